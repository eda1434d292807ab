//! Change notifier implementations.

mod broadcast;

pub use self::broadcast::BroadcastNotifier;
