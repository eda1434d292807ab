//! Draft assistant implementations.

mod unconfigured;

pub use unconfigured::UnconfiguredAssistant;

#[cfg(feature = "gemini")]
mod gemini;
#[cfg(feature = "gemini")]
pub use self::gemini::{GeminiConfig, GeminiDraftAssistant};
