use std::collections::HashMap;

use jiff::Timestamp;
use uuid::Uuid;

use super::{PostStore, Session, StoreError};
use crate::models::{Page, PageRequest, Post, PostFilter, PostStatus, SortBy, SortOrder};

/// In-memory [`PostStore`].
///
/// Backs the terminal viewer and tests; a remote store implementing the
/// same trait can replace it without touching callers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    posts: HashMap<Uuid, Post>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    fn validate(post: &Post) -> Result<(), StoreError> {
        if post.title.trim().is_empty() {
            return Err(StoreError::InvalidPost("title is empty".to_string()));
        }
        if post.slug.trim().is_empty() {
            return Err(StoreError::InvalidPost("slug is empty".to_string()));
        }
        if post.body.trim().is_empty() {
            return Err(StoreError::InvalidPost("body is empty".to_string()));
        }
        Ok(())
    }
}

impl PostStore for MemoryStore {
    fn create(&mut self, post: Post) -> Result<Post, StoreError> {
        Self::validate(&post)?;
        if self.posts.values().any(|p| p.slug == post.slug) {
            return Err(StoreError::DuplicateSlug(post.slug));
        }
        self.posts.insert(post.id, post.clone());
        Ok(post)
    }

    fn get(&self, id: Uuid) -> Option<&Post> {
        self.posts.get(&id)
    }

    fn get_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.values().find(|p| p.slug == slug)
    }

    fn update(&mut self, mut post: Post) -> Result<Post, StoreError> {
        Self::validate(&post)?;
        let existing = self
            .posts
            .get(&post.id)
            .ok_or(StoreError::NotFound(post.id))?;
        if self
            .posts
            .values()
            .any(|p| p.id != post.id && p.slug == post.slug)
        {
            return Err(StoreError::DuplicateSlug(post.slug));
        }
        post.created_at = existing.created_at;
        post.updated_at = Timestamp::now();
        self.posts.insert(post.id, post.clone());
        Ok(post)
    }

    fn delete(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.posts
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    fn list(
        &self,
        filter: &PostFilter,
        page: PageRequest,
        session: Option<&Session>,
    ) -> Page<Post> {
        let mut matches: Vec<&Post> = self
            .posts
            .values()
            .filter(|post| match (&filter.status, session) {
                (Some(status), _) => post.status == *status,
                (None, Some(_)) => true,
                (None, None) => post.status == PostStatus::Published,
            })
            .filter(|post| {
                filter
                    .category
                    .as_ref()
                    .is_none_or(|category| post.categories.iter().any(|c| c == category))
            })
            .filter(|post| {
                filter.search.as_ref().is_none_or(|search| {
                    let needle = search.to_lowercase();
                    post.title.to_lowercase().contains(&needle)
                        || post.body.to_lowercase().contains(&needle)
                        || post.excerpt.to_lowercase().contains(&needle)
                })
            })
            .collect();

        // Ties fall back to slug order so listings are reproducible even
        // though the posts come out of a HashMap.
        matches.sort_by(|a, b| {
            let primary = match filter.sort_by {
                SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
                SortBy::UpdatedAt => a.updated_at.cmp(&b.updated_at),
                SortBy::Title => a.title.cmp(&b.title),
            };
            let primary = match filter.sort_order {
                SortOrder::Asc => primary,
                SortOrder::Desc => primary.reverse(),
            };
            primary.then_with(|| a.slug.cmp(&b.slug))
        });

        let page = page.normalized();
        let total = matches.len();
        let total_pages = total.div_ceil(page.page_size);
        let items = matches
            .into_iter()
            .skip((page.page - 1) * page.page_size)
            .take(page.page_size)
            .cloned()
            .collect();

        Page {
            items,
            total,
            page: page.page,
            page_size: page.page_size,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_with(posts: Vec<Post>) -> MemoryStore {
        let mut store = MemoryStore::new();
        for post in posts {
            store.create(post).unwrap();
        }
        store
    }

    fn published(title: &str, body: &str) -> Post {
        let mut post = Post::new(title, body, Uuid::new_v4());
        post.status = PostStatus::Published;
        post
    }

    #[test]
    fn create_and_fetch_by_id_and_slug() {
        let post = published("Hello World", "body text");
        let mut store = MemoryStore::new();
        let created = store.create(post.clone()).unwrap();

        assert_eq!(store.get(created.id), Some(&created));
        assert_eq!(store.get_by_slug("hello-world"), Some(&created));
        assert_eq!(store.get_by_slug("missing"), None);
    }

    #[test]
    fn create_rejects_blank_fields() {
        let mut store = MemoryStore::new();
        let post = Post::new("  ", "body", Uuid::new_v4());
        assert!(matches!(
            store.create(post),
            Err(StoreError::InvalidPost(_))
        ));
    }

    #[test]
    fn create_rejects_duplicate_slug() {
        let mut store = store_with(vec![published("Same Title", "one")]);
        let result = store.create(published("Same Title", "two"));
        assert!(matches!(result, Err(StoreError::DuplicateSlug(_))));
    }

    #[test]
    fn update_replaces_document_and_bumps_updated_at() {
        let mut post = published("Original", "first body");
        let past: Timestamp = "2024-01-01T00:00:00Z".parse().unwrap();
        post.created_at = past;
        post.updated_at = past;
        let mut store = store_with(vec![post.clone()]);

        post.body = "second body".to_string();
        let updated = store.update(post).unwrap();

        assert_eq!(updated.body, "second body");
        assert_eq!(updated.created_at, past);
        assert!(updated.updated_at > past);
        assert_eq!(store.get(updated.id).unwrap().body, "second body");
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut store = MemoryStore::new();
        let result = store.update(published("Ghost", "body"));
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn delete_removes_post() {
        let post = published("Doomed", "body");
        let id = post.id;
        let mut store = store_with(vec![post]);

        store.delete(id).unwrap();
        assert_eq!(store.get(id), None);
        assert!(matches!(store.delete(id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn anonymous_listing_sees_published_only() {
        let draft = Post::new("Secret Draft", "body", Uuid::new_v4());
        let store = store_with(vec![published("Public", "body"), draft]);

        let page = store.list(&PostFilter::default(), PageRequest::default(), None);
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title, "Public");
    }

    #[test]
    fn session_listing_sees_all_statuses() {
        let draft = Post::new("Secret Draft", "body", Uuid::new_v4());
        let store = store_with(vec![published("Public", "body"), draft]);
        let session = Session {
            user_id: Uuid::new_v4(),
        };

        let page = store.list(&PostFilter::default(), PageRequest::default(), Some(&session));
        assert_eq!(page.total, 2);
    }

    #[test]
    fn explicit_status_filter_overrides_session_rule() {
        let draft = Post::new("Secret Draft", "body", Uuid::new_v4());
        let store = store_with(vec![published("Public", "body"), draft]);

        let filter = PostFilter {
            status: Some(PostStatus::Draft),
            ..Default::default()
        };
        let page = store.list(&filter, PageRequest::default(), None);
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title, "Secret Draft");
    }

    #[test]
    fn category_filter_requires_label() {
        let mut tagged = published("Tagged", "body");
        tagged.categories = vec!["rust".to_string(), "blog".to_string()];
        let store = store_with(vec![tagged, published("Untagged", "body")]);

        let filter = PostFilter {
            category: Some("rust".to_string()),
            ..Default::default()
        };
        let page = store.list(&filter, PageRequest::default(), None);
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title, "Tagged");
    }

    #[test]
    fn search_matches_title_body_and_excerpt_case_insensitively() {
        let store = store_with(vec![
            published("Needle in Title", "plain"),
            published("Second", "the NEEDLE is in the body"),
            published("Third", "nothing here"),
        ]);

        let filter = PostFilter {
            search: Some("needle".to_string()),
            ..Default::default()
        };
        let page = store.list(&filter, PageRequest::default(), None);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn title_sort_ascending() {
        let store = store_with(vec![
            published("Banana", "body"),
            published("Apple", "body"),
            published("Cherry", "body"),
        ]);

        let filter = PostFilter {
            sort_by: SortBy::Title,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        let page = store.list(&filter, PageRequest::default(), None);
        let titles: Vec<&str> = page.items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple", "Banana", "Cherry"]);
    }

    #[test]
    fn created_at_sort_defaults_newest_first() {
        let mut older = published("Older", "body");
        older.created_at = "2024-01-01T00:00:00Z".parse().unwrap();
        let mut newer = published("Newer", "body");
        newer.created_at = "2025-01-01T00:00:00Z".parse().unwrap();
        let store = store_with(vec![older, newer]);

        let page = store.list(&PostFilter::default(), PageRequest::default(), None);
        let titles: Vec<&str> = page.items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Newer", "Older"]);
    }

    #[test]
    fn equal_sort_keys_fall_back_to_slug_order() {
        let ts: Timestamp = "2024-06-01T00:00:00Z".parse().unwrap();
        let mut posts = vec![
            published("Banana", "body"),
            published("Apple", "body"),
            published("Cherry", "body"),
        ];
        for post in &mut posts {
            post.created_at = ts;
        }
        let store = store_with(posts);

        let page = store.list(&PostFilter::default(), PageRequest::default(), None);
        let slugs: Vec<&str> = page.items.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn pagination_slices_and_counts_pages() {
        let posts = (0..7)
            .map(|i| published(&format!("Post {i}"), "body"))
            .collect();
        let store = store_with(posts);

        let filter = PostFilter {
            sort_by: SortBy::Title,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        let request = PageRequest { page: 3, page_size: 3 };
        let page = store.list(&filter, request, None);

        assert_eq!(page.total, 7);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Post 6");
    }

    #[test]
    fn out_of_range_page_is_empty_but_keeps_totals() {
        let store = store_with(vec![published("Only", "body")]);
        let request = PageRequest {
            page: 5,
            page_size: 10,
        };
        let page = store.list(&PostFilter::default(), request, None);
        assert_eq!(page.total, 1);
        assert!(page.items.is_empty());
    }
}
