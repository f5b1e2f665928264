//! Post storage contract and its in-memory realization.

mod memory;

pub use memory::MemoryStore;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{Page, PageRequest, Post, PostFilter};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("post not found: {0}")]
    NotFound(Uuid),
    #[error("slug already in use: {0}")]
    DuplicateSlug(String),
    #[error("invalid post: {0}")]
    InvalidPost(String),
}

/// Authenticated caller state, passed explicitly to the operations that
/// change behavior with it. No process-wide flag exists; anonymous callers
/// pass `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
}

/// Storage contract for post records.
///
/// Updates are full-document replacements; the renderer never goes through
/// this trait.
pub trait PostStore {
    /// Persists a new post. Fails on an empty title, slug or body, or on a
    /// slug collision.
    fn create(&mut self, post: Post) -> Result<Post, StoreError>;

    fn get(&self, id: Uuid) -> Option<&Post>;

    fn get_by_slug(&self, slug: &str) -> Option<&Post>;

    /// Replaces the stored document with `post` (matched by id). The stored
    /// creation timestamp is kept and `updated_at` is bumped.
    fn update(&mut self, post: Post) -> Result<Post, StoreError>;

    fn delete(&mut self, id: Uuid) -> Result<(), StoreError>;

    /// Lists posts matching `filter`, sorted and paginated.
    ///
    /// Without an explicit status filter, anonymous callers see published
    /// posts only; an authenticated session sees every status.
    fn list(
        &self,
        filter: &PostFilter,
        page: PageRequest,
        session: Option<&Session>,
    ) -> Page<Post>;
}
