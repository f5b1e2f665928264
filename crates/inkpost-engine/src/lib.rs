pub mod content;
pub mod io;
pub mod models;
pub mod store;

// Re-export key types for easier usage
pub use content::{ContentNode, plain_text, render};
pub use models::{Page, PageRequest, Post, PostFilter, PostStatus, SortBy, SortOrder};
pub use store::{MemoryStore, PostStore, Session, StoreError};
