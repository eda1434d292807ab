//! Mapping of workflow errors to user-visible notices.

use quire_core::{ComposeError, NoticeKind};
use quire_shared::Notice;

/// The notice to show for a failed compose operation.
///
/// All assistant failures collapse into one message; the precise error is
/// logged and kept as the notice detail.
pub fn notice_for(err: &ComposeError) -> Notice {
    match err.notice_kind() {
        NoticeKind::DraftFailed => {
            tracing::warn!(error = %err, "Draft assistant failed");
            Notice::draft_failed().with_detail(err.to_string())
        }
        NoticeKind::Validation => Notice::missing_fields().with_detail(err.to_string()),
    }
}
