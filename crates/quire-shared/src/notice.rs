//! User-visible notices.
//!
//! Structured replacement for blocking alert dialogs, shaped after problem
//! details: a stable `kind` for programs plus a title and detail for people.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeSeverity {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Stable identifier, e.g. `draft-failed`.
    pub kind: String,

    pub severity: NoticeSeverity,

    /// Short message for the user.
    pub title: String,

    /// Diagnostic detail. Not shown by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Notice {
    pub fn new(kind: impl Into<String>, severity: NoticeSeverity, title: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            severity,
            title: title.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == NoticeSeverity::Error
    }

    // Common notices
    pub fn draft_failed() -> Self {
        Self::new(
            "draft-failed",
            NoticeSeverity::Error,
            "נכשלנו ביצירת התוכן. אנא בדוק את מפתח ה-API שלך.",
        )
    }

    pub fn missing_fields() -> Self {
        Self::new(
            "validation",
            NoticeSeverity::Error,
            "אנא ספק לפחות כותרת ותוכן.",
        )
    }

    pub fn published(title: &str) -> Self {
        Self::new("published", NoticeSeverity::Info, format!("המאמר \"{title}\" פורסם."))
    }

    pub fn no_results() -> Self {
        Self::new(
            "no-results",
            NoticeSeverity::Info,
            "לא נמצאו מאמרים התואמים את החיפוש שלך.",
        )
    }
}
