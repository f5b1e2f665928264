use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

/// A blog post record.
///
/// The `body` holds the raw markup string consumed by
/// [`content::render`](crate::content::render); the renderer never mutates
/// a post. Edits replace the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    /// URL-safe unique key, see [`slugify`].
    pub slug: String,
    pub body: String,
    pub excerpt: String,
    /// Image references: absolute URLs or bare photo identifiers.
    pub images: Vec<String>,
    /// Free-form category labels.
    pub categories: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Owning user.
    pub author: Uuid,
    pub status: PostStatus,
}

impl Post {
    /// Creates a draft with a slug derived from the title and an excerpt
    /// derived from the body.
    pub fn new(title: impl Into<String>, body: impl Into<String>, author: Uuid) -> Self {
        let title = title.into();
        let body = body.into();
        let now = Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            slug: slugify(&title),
            excerpt: excerpt_from_body(&body, DEFAULT_EXCERPT_CHARS),
            title,
            body,
            images: Vec::new(),
            categories: Vec::new(),
            created_at: now,
            updated_at: now,
            author,
            status: PostStatus::default(),
        }
    }
}

/// Default excerpt length in characters.
pub const DEFAULT_EXCERPT_CHARS: usize = 160;

/// Derives a URL-safe slug from a title: lowercased, characters other than
/// word characters, hyphens and whitespace stripped, whitespace runs
/// collapsed to single hyphens.
pub fn slugify(title: &str) -> String {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Derives a single-line excerpt from a raw post body.
///
/// The body is rendered and flattened so markup delimiters and image tags
/// never show up in the excerpt; paragraph breaks become single spaces and
/// the result is truncated to `max_chars` characters with an ellipsis.
pub fn excerpt_from_body(body: &str, max_chars: usize) -> String {
    let flat = content::plain_text(&content::render(body)).replace("\n\n", " ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let truncated: String = flat.chars().take(max_chars).collect();
    format!("{}…", truncated.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("My First Post", "my-first-post")]
    #[case("Hello, World!", "hello-world")]
    #[case("  spaced   out  ", "spaced-out")]
    #[case("already-slugged_title", "already-slugged_title")]
    #[case("Ünïcode Tîtle", "ünïcode-tîtle")]
    fn slugify_cases(#[case] title: &str, #[case] expected: &str) {
        assert_eq!(slugify(title), expected);
    }

    #[test]
    fn new_post_derives_slug_and_excerpt() {
        let author = Uuid::new_v4();
        let post = Post::new("A Fresh Start", "**Hello** there.", author);
        assert_eq!(post.slug, "a-fresh-start");
        assert_eq!(post.excerpt, "Hello there.");
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.author, author);
        assert_eq!(post.created_at, post.updated_at);
    }

    #[test]
    fn excerpt_strips_markup_and_image_tags() {
        let excerpt = excerpt_from_body("*intro* [img]pic[/img]\n\nsecond __part__", 100);
        assert_eq!(excerpt, "intro  second part");
    }

    #[test]
    fn excerpt_truncates_with_ellipsis() {
        let excerpt = excerpt_from_body("word ".repeat(50).trim_end(), 12);
        assert_eq!(excerpt, "word word wo…");
    }

    #[test]
    fn short_excerpt_is_not_truncated() {
        assert_eq!(excerpt_from_body("short", 10), "short");
    }
}
