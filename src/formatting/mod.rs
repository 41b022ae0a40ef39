// src/formatting/mod.rs
//! Renders Notion pages into Hugo-flavoured Markdown.

pub mod block_renderer;
mod converter;
mod front_matter;
mod images;
mod rich_text;

pub use block_renderer::{render_blocks, BlockRenderer, FormatContext, MarkdownBlockRenderer};
pub use converter::MarkdownConverter;
pub use front_matter::{render_front_matter, FrontMatter};
pub use images::{image_file_name, markdown_image_path};
pub use rich_text::rich_text_to_markdown;
