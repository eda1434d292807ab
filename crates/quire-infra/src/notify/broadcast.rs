//! Broadcast-channel change notifier.
//!
//! Works within a single process only. Slow listeners lag and miss events;
//! since every event just means "re-derive the screen", a lagged listener
//! only needs to render once more.

use tokio::sync::broadcast;

use quire_core::ports::{ChangeEvent, ChangeNotifier};

pub struct BroadcastNotifier {
    sender: broadcast::Sender<ChangeEvent>,
}

impl BroadcastNotifier {
    pub fn new(buffer_size: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer_size.max(1));
        Self { sender }
    }

    /// Listen for every event published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(100)
    }
}

impl ChangeNotifier for BroadcastNotifier {
    fn notify(&self, event: ChangeEvent) {
        match self.sender.send(event) {
            Ok(listeners) => tracing::debug!(listeners, "Change event published"),
            Err(broadcast::error::SendError(event)) => {
                tracing::debug!(?event, "No listeners for change event");
            }
        }
    }
}
