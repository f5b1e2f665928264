pub mod post;
pub mod query;

pub use post::{Post, PostStatus, excerpt_from_body, slugify};
pub use query::{Page, PageRequest, PostFilter, SortBy, SortOrder};
