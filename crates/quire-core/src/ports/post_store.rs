use crate::domain::{Post, PostId};
use crate::error::DomainError;

/// Post store - the ordered, newest-first collection of posts.
///
/// Operations are synchronous: the store lives on the UI thread and never
/// suspends. Implementations must publish a change notification after every
/// successful mutation.
pub trait PostStore: Send + Sync {
    /// All posts, newest first.
    fn all(&self) -> Vec<Post>;

    /// Insert a post at the head.
    ///
    /// Fails with [`DomainError::Validation`] if the id is already taken;
    /// the store is left unchanged in that case.
    fn append(&self, post: Post) -> Result<(), DomainError>;

    /// Look up a post by id.
    fn find_by_id(&self, id: &PostId) -> Option<Post>;

    /// Number of stored posts.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
