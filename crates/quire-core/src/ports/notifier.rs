//! Change notification port.
//!
//! The front end re-derives its screen whenever one of these arrives.

use crate::domain::View;

/// Something observable changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// The post store grew.
    PostsChanged { count: usize },
    /// The active view or the selected post changed.
    ViewChanged { view: View },
    /// The list search query changed.
    SearchChanged,
    /// Compose fields or the generating flag changed.
    ComposeChanged,
}

/// Sink for change events.
pub trait ChangeNotifier: Send + Sync {
    /// Publish an event. Never fails; an event with no listeners is dropped.
    fn notify(&self, event: ChangeEvent);
}
