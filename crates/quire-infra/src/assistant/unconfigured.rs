//! Assistant used when no backend is available.
//!
//! Generation always reports a configuration problem; refinement hands the
//! content back untouched.

use async_trait::async_trait;

use quire_core::domain::Draft;
use quire_core::ports::{DraftAssistant, DraftError};

pub struct UnconfiguredAssistant {
    reason: String,
}

impl UnconfiguredAssistant {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for UnconfiguredAssistant {
    fn default() -> Self {
        Self::new("no draft assistant backend is configured")
    }
}

#[async_trait]
impl DraftAssistant for UnconfiguredAssistant {
    async fn generate_draft(&self, _prompt: &str) -> Result<Draft, DraftError> {
        Err(DraftError::Configuration(self.reason.clone()))
    }

    async fn refine_draft(&self, content: &str, _instruction: &str) -> String {
        content.to_string()
    }
}
