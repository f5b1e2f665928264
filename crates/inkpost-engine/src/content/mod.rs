//! Post body parsing and rendering.
//!
//! Post bodies are stored as plain strings in a lightweight markup:
//! `**bold**`, `__underline__`, `*italic*`, `[img]...[/img]` image embeds,
//! and blank-line paragraph breaks. [`render`] turns such a string into a
//! tree of [`ContentNode`]s that a display layer can walk without doing any
//! further string parsing.

pub mod html;
mod node;
mod render;

pub use node::{ContentNode, plain_text};
pub use render::{IMAGE_BASE_URL, render};
