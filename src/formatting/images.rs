// src/formatting/images.rs
//! Local filenames for downloaded images.
//!
//! The same derivation names the file on disk and the path written into the
//! Markdown, so links and files always agree.

/// Derives `<stem>-<asset-id><ext>` from an image's source URL and asset IDs.
///
/// The raw filename is the last `/` segment of `source`, split at its first
/// `.` into stem and extension. Returns an empty string (and logs a
/// warning) when the image has no asset ID.
pub fn image_file_name(source: &str, file_ids: &[String]) -> String {
    let Some(file_id) = file_ids.first() else {
        log::warn!("Image {} has no asset id; cannot derive a filename", source);
        return String::new();
    };

    let raw_name = source.rsplit('/').next().unwrap_or(source);
    let (stem, ext) = match raw_name.split_once('.') {
        Some((stem, ext)) => (stem, format!(".{}", ext)),
        None => (raw_name, String::new()),
    };

    format!("{}-{}{}", stem, file_id, ext)
}

/// The path Markdown uses to reference an image file.
pub fn markdown_image_path(prefix: Option<&str>, file_name: &str) -> String {
    match prefix {
        Some(prefix) if !file_name.is_empty() => format!("{}/{}", prefix, file_name),
        Some(prefix) => prefix.to_string(),
        None => file_name.to_string(),
    }
}
