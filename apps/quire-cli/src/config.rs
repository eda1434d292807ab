//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

#[cfg(feature = "gemini")]
use quire_infra::GeminiConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Replaces the bundled seed posts when set.
    pub seed_path: Option<PathBuf>,
    /// Capacity of the change event channel.
    pub event_buffer: usize,
    #[cfg(feature = "gemini")]
    pub gemini: GeminiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            seed_path: env::var("QUIRE_SEED_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            event_buffer: env::var("QUIRE_EVENT_BUFFER")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            #[cfg(feature = "gemini")]
            gemini: GeminiConfig::from_env(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed_path: None,
            event_buffer: 100,
            #[cfg(feature = "gemini")]
            gemini: GeminiConfig::default(),
        }
    }
}
