//! Ports - trait definitions for the collaborators the state machine uses.
//! Infrastructure provides the implementations.

mod draft_assistant;
mod notifier;
mod post_store;

pub use draft_assistant::{DraftAssistant, DraftError};
pub use notifier::{ChangeEvent, ChangeNotifier};
pub use post_store::PostStore;
