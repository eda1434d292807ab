//! In-memory post store.
//!
//! Posts live for the lifetime of the process only.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use quire_core::domain::{Post, PostId};
use quire_core::error::DomainError;
use quire_core::ports::{ChangeEvent, ChangeNotifier, PostStore};

/// Newest-first post list guarded by a read/write lock.
pub struct InMemoryPostStore {
    posts: RwLock<Vec<Post>>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl InMemoryPostStore {
    pub fn new(notifier: Arc<dyn ChangeNotifier>) -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
            notifier,
        }
    }

    /// Build a store holding `posts` in the given order.
    ///
    /// Fails if two seed posts share an id.
    pub fn seeded(posts: Vec<Post>, notifier: Arc<dyn ChangeNotifier>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(posts.len());
        for post in &posts {
            if !seen.insert(&post.id) {
                return Err(DomainError::Validation(format!(
                    "duplicate post id in seed data: {}",
                    post.id
                )));
            }
        }

        tracing::debug!(count = posts.len(), "Post store seeded");
        Ok(Self {
            posts: RwLock::new(posts),
            notifier,
        })
    }
}

impl PostStore for InMemoryPostStore {
    fn all(&self) -> Vec<Post> {
        self.posts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn append(&self, post: Post) -> Result<(), DomainError> {
        let count = {
            let mut posts = self.posts.write().unwrap_or_else(PoisonError::into_inner);

            if posts.iter().any(|p| p.id == post.id) {
                return Err(DomainError::Validation(format!(
                    "post id already exists: {}",
                    post.id
                )));
            }

            tracing::debug!(post_id = %post.id, "Post appended");
            posts.insert(0, post);
            posts.len()
        };

        // Notify after the lock is released so listeners can read the store.
        self.notifier.notify(ChangeEvent::PostsChanged { count });
        Ok(())
    }

    fn find_by_id(&self, id: &PostId) -> Option<Post> {
        self.posts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|p| &p.id == id)
            .cloned()
    }

    fn len(&self) -> usize {
        self.posts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
