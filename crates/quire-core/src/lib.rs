//! # Quire Core
//!
//! The publishing state machine: posts, views, search and the compose
//! workflow. This crate holds the business rules only; the post store,
//! draft assistant and change notifier are ports implemented elsewhere.

pub mod compose;
pub mod domain;
pub mod error;
pub mod navigation;
pub mod ports;
pub mod search;
pub mod session;

pub use error::{ComposeError, DomainError, NoticeKind};
pub use session::{PublishingSession, Screen};
