// src/output/paths.rs
//! Pure functions for output locations.
//!
//! Every location is derived from page title and identity or from the image
//! filename alone, so repeated runs land on the same paths and overwrite.

use crate::types::PageId;
use std::path::PathBuf;

/// `<title-slug>-<page-id-without-dashes>.md`, or `<page-id>.md` when the
/// title has nothing to slug.
pub fn markdown_file_name(title: &str, id: &PageId) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        format!("{}.md", id.as_str())
    } else {
        format!("{}-{}.md", slug, id.as_str())
    }
}

/// Lowercase alphanumeric runs joined by single dashes.
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let end = slug.trim_end_matches('-').len();
    slug.truncate(end);
    slug
}

/// Where Markdown files and images are written, and how Markdown refers to images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    output_dir: PathBuf,
    image_dir: PathBuf,
    image_prefix: Option<String>,
}

impl OutputLayout {
    /// Images go to `output_dir/<prefix>` when a prefix is set, else next to the Markdown.
    pub fn new(output_dir: impl Into<PathBuf>, image_prefix: Option<&str>) -> Self {
        let output_dir = output_dir.into();
        let image_prefix = image_prefix
            .map(|prefix| prefix.trim_matches('/'))
            .filter(|prefix| !prefix.is_empty())
            .map(str::to_string);
        let image_dir = match &image_prefix {
            Some(prefix) => output_dir.join(prefix),
            None => output_dir.clone(),
        };

        Self {
            output_dir,
            image_dir,
            image_prefix,
        }
    }

    pub fn image_prefix(&self) -> Option<&str> {
        self.image_prefix.as_deref()
    }

    pub fn markdown_path(&self, title: &str, id: &PageId) -> PathBuf {
        self.output_dir.join(markdown_file_name(title, id))
    }

    pub fn image_path(&self, file_name: &str) -> PathBuf {
        self.image_dir.join(file_name)
    }
}
