use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Characters of content per minute of reading.
const CHARS_PER_MINUTE: usize = 1000;

const HEBREW_MONTHS: [&str; 12] = [
    "ינואר",
    "פברואר",
    "מרץ",
    "אפריל",
    "מאי",
    "יוני",
    "יולי",
    "אוגוסט",
    "ספטמבר",
    "אוקטובר",
    "נובמבר",
    "דצמבר",
];

/// Opaque post identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    /// Fresh unique id for a newly created post.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PostId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Post entity - a single published article.
///
/// Fields are fixed once the post exists; `date` and `reading_time` are
/// rendered labels computed at creation and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub excerpt: String,
    /// HTML fragment. Not sanitized here.
    pub content: String,
    pub date: String,
    pub reading_time: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

/// User-supplied fields for a post that does not exist yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
}

impl NewPost {
    /// Title and content are both required.
    pub fn validate(&self) -> Result<(), DomainError> {
        match (is_blank(&self.title), is_blank(&self.content)) {
            (false, false) => Ok(()),
            (true, true) => Err(DomainError::Validation(
                "title and content are required".to_string(),
            )),
            (true, false) => Err(DomainError::Validation("title is required".to_string())),
            (false, true) => Err(DomainError::Validation("content is required".to_string())),
        }
    }
}

impl Post {
    /// Create a post dated `today`, with a fresh id.
    pub fn create(new: NewPost, today: NaiveDate) -> Result<Self, DomainError> {
        new.validate()?;
        let minutes = reading_minutes(&new.content);

        Ok(Self {
            id: PostId::generate(),
            title: new.title,
            excerpt: new.excerpt,
            content: new.content,
            date: format_date(today),
            reading_time: reading_time_label(minutes),
            category: new.category,
            cover_image: None,
        })
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// `max(1, round(chars / 1000))`, rounding halves up.
pub fn reading_minutes(content: &str) -> u32 {
    let chars = content.chars().count();
    let minutes = (chars + CHARS_PER_MINUTE / 2) / CHARS_PER_MINUTE;
    u32::try_from(minutes).unwrap_or(u32::MAX).max(1)
}

pub fn reading_time_label(minutes: u32) -> String {
    format!("{minutes} דקות קריאה")
}

/// Long Hebrew date, e.g. `17 באוקטובר 2026`.
pub fn format_date(date: NaiveDate) -> String {
    let month = HEBREW_MONTHS[date.month0() as usize];
    format!("{} ב{} {}", date.day(), month, date.year())
}
