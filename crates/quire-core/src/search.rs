//! Search projection over the post list.

use crate::domain::Post;

/// Posts matching `query`, in their original order.
///
/// A blank query matches everything. Otherwise a post matches when its
/// title, excerpt or content contains the query, ignoring case.
pub fn filter_posts(posts: &[Post], query: &str) -> Vec<Post> {
    if query.trim().is_empty() {
        return posts.to_vec();
    }

    let needle = query.to_lowercase();
    posts
        .iter()
        .filter(|post| matches(post, &needle))
        .cloned()
        .collect()
}

fn matches(post: &Post, needle: &str) -> bool {
    [&post.title, &post.excerpt, &post.content]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}
