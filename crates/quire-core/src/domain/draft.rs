use serde::{Deserialize, Serialize};

use crate::ports::DraftError;

/// Structured draft proposed by the assistant. Never stored as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Draft {
    pub title: String,
    /// HTML fragment.
    pub content: String,
    pub excerpt: String,
}

impl Draft {
    /// Validate an untrusted backend payload.
    ///
    /// The payload must be a JSON object with exactly the string keys
    /// `title`, `content` and `excerpt`.
    pub fn parse(payload: &str) -> Result<Self, DraftError> {
        serde_json::from_str(payload.trim()).map_err(|e| DraftError::Parse(e.to_string()))
    }
}
