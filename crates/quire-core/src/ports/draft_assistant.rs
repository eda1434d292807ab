//! Draft assistant port - abstraction over the text-generation backend.

use async_trait::async_trait;

use crate::domain::Draft;

/// Draft assistant trait - produces and refines post drafts.
///
/// Implementations perform no retries.
#[async_trait]
pub trait DraftAssistant: Send + Sync {
    /// Generate a structured draft from a free-text prompt.
    async fn generate_draft(&self, prompt: &str) -> Result<Draft, DraftError>;

    /// Rewrite `content` according to `instruction`.
    ///
    /// Best effort: on any failure the original `content` is returned and
    /// nothing is surfaced to the caller. This is deliberately weaker than
    /// [`DraftAssistant::generate_draft`].
    async fn refine_draft(&self, content: &str, instruction: &str) -> String;
}

/// Draft assistant errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    /// No credential or backend configured. Retrying will not help.
    #[error("Assistant not configured: {0}")]
    Configuration(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Malformed draft response: {0}")]
    Parse(String),
}
