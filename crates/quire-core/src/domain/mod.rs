//! Domain entities - the core publishing objects.

mod draft;
mod post;
mod view;

pub use draft::Draft;
pub use post::{NewPost, Post, PostId, format_date, reading_minutes, reading_time_label};
pub use view::{NavTarget, View};
