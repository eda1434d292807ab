//! # Quire Infrastructure
//!
//! Concrete implementations of the ports defined in `quire-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No network, in-memory only
//! - `gemini` - Draft assistant backed by the Gemini API

pub mod assistant;
pub mod notify;
pub mod seed;
pub mod store;

// Re-exports - In-Memory
pub use assistant::UnconfiguredAssistant;
pub use notify::BroadcastNotifier;
pub use seed::SeedError;
pub use store::InMemoryPostStore;

// Re-exports - Gemini
#[cfg(feature = "gemini")]
pub use assistant::{GeminiConfig, GeminiDraftAssistant};
