//! Data Transfer Objects - what a front end shows for a post.

use serde::{Deserialize, Serialize};

/// One row of the post list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    /// 1-based position in the visible list.
    pub position: usize,
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub date: String,
    pub reading_time: String,
    pub has_cover: bool,
}

impl PostSummary {
    /// `category · date · reading time` line shown under the title.
    pub fn meta_line(&self) -> String {
        [&self.category, &self.date, &self.reading_time]
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" · ")
    }
}
