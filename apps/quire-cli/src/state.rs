//! Application state - the collaborators a session is built from.

use std::sync::Arc;

use anyhow::Context;

use quire_core::PublishingSession;
use quire_core::domain::Post;
use quire_core::ports::{DraftAssistant, PostStore};
use quire_infra::{BroadcastNotifier, InMemoryPostStore, seed};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PostStore>,
    pub assistant: Arc<dyn DraftAssistant>,
    pub notifier: Arc<BroadcastNotifier>,
}

impl AppState {
    /// Build the application state with the configured implementations.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let notifier = Arc::new(BroadcastNotifier::new(config.event_buffer));

        let posts = Self::seed_posts(config)?;
        let store: Arc<dyn PostStore> = Arc::new(
            InMemoryPostStore::seeded(posts, notifier.clone()).context("invalid seed posts")?,
        );

        let assistant = Self::assistant(config);

        tracing::info!(posts = store.len(), "Application state initialized");

        Ok(Self {
            store,
            assistant,
            notifier,
        })
    }

    /// Start a session at the list view.
    pub fn session(&self) -> PublishingSession {
        PublishingSession::new(
            self.store.clone(),
            self.assistant.clone(),
            self.notifier.clone(),
        )
    }

    fn seed_posts(config: &AppConfig) -> anyhow::Result<Vec<Post>> {
        if let Some(path) = &config.seed_path {
            match seed::load_posts(path) {
                Ok(posts) => return Ok(posts),
                Err(e) => {
                    tracing::error!("Failed to load seed posts: {}. Using bundled posts.", e);
                }
            }
        }
        seed::bundled_posts().context("bundled seed posts are invalid")
    }

    #[cfg(feature = "gemini")]
    fn assistant(config: &AppConfig) -> Arc<dyn DraftAssistant> {
        Arc::new(quire_infra::GeminiDraftAssistant::new(config.gemini.clone()))
    }

    #[cfg(not(feature = "gemini"))]
    fn assistant(_config: &AppConfig) -> Arc<dyn DraftAssistant> {
        tracing::info!("Running without gemini feature - draft assistant disabled");
        Arc::new(quire_infra::UnconfiguredAssistant::default())
    }
}
