//! Loading post bodies from a content directory.
//!
//! Each `.post` file holds one raw body in the post markup; the file stem
//! becomes the slug. This feeds a [`MemoryStore`] for local viewing and
//! tests.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::models::{Post, PostStatus, slugify};
use crate::store::{MemoryStore, PostStore, StoreError};

pub const POST_EXTENSION: &str = "post";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Post file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid content directory: {0}")]
    InvalidContentDir(String),
    #[error("Rejected post file {path}: {source}")]
    RejectedPost {
        path: PathBuf,
        source: StoreError,
    },
}

/// Read one post body file
pub fn read_body(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Scan for post body files in the content directory
pub fn scan_post_files(content_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !content_root.exists() {
        return Err(IoError::InvalidContentDir(
            "content directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(content_root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == POST_EXTENSION
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_content_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidContentDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

/// Loads every post body file under `content_root` into a fresh store.
///
/// The slug comes from the file stem, the title from the slug with hyphens
/// and underscores spaced out, and the excerpt is derived from the body.
/// Loaded posts are published so the anonymous listing shows them. A file
/// whose stem collides with an already-loaded slug is rejected.
pub fn load_store(content_root: &Path, author: Uuid) -> Result<MemoryStore, IoError> {
    let files = scan_post_files(content_root)?;
    let mut store = MemoryStore::new();

    for path in files {
        let body = read_body(&path)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut post = Post::new(title_from_stem(&stem), body, author);
        post.slug = slugify(&stem);
        post.status = PostStatus::Published;

        store
            .create(post)
            .map_err(|source| IoError::RejectedPost {
                path: path.clone(),
                source,
            })?;
    }

    Ok(store)
}

/// `my-first-post` becomes `My first post`.
fn title_from_stem(stem: &str) -> String {
    let spaced = stem.replace(['-', '_'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
