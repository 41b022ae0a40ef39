// src/formatting/converter.rs
//! Page-to-Markdown conversion for Hugo.
//!
//! Images are rewritten to point at their downloaded local copies and code
//! blocks become plain fences; every other block uses the default renderer.

use super::block_renderer::{render_default, BlockRenderer, FormatContext};
use super::front_matter::render_front_matter;
use super::images::{image_file_name, markdown_image_path};
use crate::error::AppError;
use crate::model::{Block, CodeBlock, ImageBlock, Page};
use crate::taxonomy::Taxonomy;

/// Converts pages into front matter plus Markdown body.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownConverter<'a> {
    image_prefix: Option<&'a str>,
}

impl<'a> MarkdownConverter<'a> {
    /// `image_prefix` is the path segment Markdown puts before image filenames.
    pub fn new(image_prefix: Option<&'a str>) -> Self {
        Self { image_prefix }
    }

    /// Renders the page, drops the generated `# title` line and prepends
    /// the front matter.
    pub fn convert(&self, page: &Page, taxonomy: &Taxonomy) -> Result<String, AppError> {
        let raw = self.render_children(&page.blocks, FormatContext::new())?;
        let body = strip_title_line(&raw);

        let mut document = render_front_matter(page, taxonomy)?;
        document.push_str(body);
        Ok(document)
    }

    fn render_image(&self, image: &ImageBlock) -> String {
        let mut out = String::new();
        if image.file_ids.is_empty() {
            out.push_str(&format!("<!-- image without asset id: {} -->\n", image.source));
        }
        let file_name = image_file_name(&image.source, &image.file_ids);
        out.push_str(&format!(
            "![]({})\n",
            markdown_image_path(self.image_prefix, &file_name)
        ));
        out
    }

    fn render_code(&self, code: &CodeBlock) -> String {
        format!("```\n{}\n```\n", code.code)
    }
}

impl BlockRenderer for MarkdownConverter<'_> {
    fn render_block(&self, block: &Block, context: FormatContext) -> Result<String, AppError> {
        match block {
            Block::Image(image) => Ok(self.render_image(image)),
            Block::Code(code) => Ok(self.render_code(code)),
            _ => render_default(self, block, context),
        }
    }
}

/// Everything after the first newline; the input unchanged if it has none.
fn strip_title_line(raw: &str) -> &str {
    match raw.find('\n') {
        Some(end) => &raw[end + 1..],
        None => raw,
    }
}
