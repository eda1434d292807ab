//! Domain-level error types.

use thiserror::Error;

use crate::ports::DraftError;

/// Domain errors - business rule failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Which user-facing notice a compose failure maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Any draft assistant failure. The user is not told which kind.
    DraftFailed,
    /// Missing required fields, or a store invariant was violated.
    Validation,
}

/// Errors raised by the compose workflow.
///
/// The gateway kinds are kept intact so diagnostics and tests can tell a
/// missing credential apart from a malformed response, even though the
/// front end collapses them into one notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    #[error("Draft generation failed: {0}")]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ComposeError {
    pub fn notice_kind(&self) -> NoticeKind {
        match self {
            ComposeError::Draft(_) => NoticeKind::DraftFailed,
            ComposeError::Domain(_) => NoticeKind::Validation,
        }
    }
}
