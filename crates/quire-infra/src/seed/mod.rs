//! Initial post dataset.
//!
//! The store starts from a fixed list of posts, newest first. A bundled
//! dataset is compiled in; a JSON file with the same shape can replace it.

use std::path::Path;

use quire_core::domain::Post;
use quire_core::error::DomainError;

const BUNDLED_POSTS: &str = include_str!("posts.json");

/// Seed loading errors.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Seed data does not match the post shape: {0}")]
    Format(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// The bundled dataset.
pub fn bundled_posts() -> Result<Vec<Post>, SeedError> {
    parse_posts(BUNDLED_POSTS)
}

/// Load a dataset from a JSON file.
pub fn load_posts(path: &Path) -> Result<Vec<Post>, SeedError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let posts = parse_posts(&raw)?;
    tracing::info!(path = %path.display(), count = posts.len(), "Loaded seed posts");
    Ok(posts)
}

/// Parse and check a dataset: every post needs a title and content.
pub fn parse_posts(raw: &str) -> Result<Vec<Post>, SeedError> {
    let posts: Vec<Post> = serde_json::from_str(raw)?;

    if let Some(bad) = posts
        .iter()
        .find(|p| p.title.trim().is_empty() || p.content.trim().is_empty())
    {
        return Err(DomainError::Validation(format!(
            "seed post {} needs a title and content",
            bad.id
        ))
        .into());
    }

    Ok(posts)
}
