//! # Quire Shared
//!
//! Presentation types shared by Quire front ends.

pub mod dto;
pub mod notice;

pub use dto::PostSummary;
pub use notice::{Notice, NoticeSeverity};
