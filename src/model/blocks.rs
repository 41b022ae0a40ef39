use super::common::BlockCommon;
use crate::types::{PageId, RichTextItem};
use chrono::{DateTime, Utc};

/// Text content shared by paragraph-like blocks
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBlockContent {
    pub rich_text: Vec<RichTextItem>,
}

impl TextBlockContent {
    pub fn new(rich_text: Vec<RichTextItem>) -> Self {
        Self { rich_text }
    }
}

/// The page's own block: carries the page title and creation time, and the
/// page content as its children.
#[derive(Debug, Clone, PartialEq)]
pub struct PageBlock {
    pub common: BlockCommon,
    pub title: String,
    pub created_time: DateTime<Utc>,
}

/// Paragraphs, headings, list items, toggles, quotes and templates
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// To-do block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToDoBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub checked: bool,
}

/// Callout block; only emoji icons are rendered
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalloutBlock {
    pub common: BlockCommon,
    pub icon: Option<String>,
    pub content: TextBlockContent,
}

/// Code block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeBlock {
    pub common: BlockCommon,
    pub language: String,
    pub code: String,
    pub caption: Vec<RichTextItem>,
}

/// Equation block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EquationBlock {
    pub common: BlockCommon,
    pub expression: String,
}

/// Blocks with no content of their own: dividers, breadcrumbs, tables of
/// contents, column containers and synced blocks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructuralBlock {
    pub common: BlockCommon,
}

/// Image block.
///
/// `source` is the image URL without query string or fragment and is what
/// local filenames are derived from; `download_url` is the full (possibly
/// signed) URL used to fetch the bytes. `file_ids` are the workspace asset
/// IDs attached to the image; external images have none.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageBlock {
    pub common: BlockCommon,
    pub source: String,
    pub download_url: String,
    pub file_ids: Vec<String>,
}

/// Video, file and PDF blocks
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileBlock {
    pub common: BlockCommon,
    pub url: String,
    pub caption: Vec<RichTextItem>,
}

/// Bookmark, embed and link preview blocks
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinkBlock {
    pub common: BlockCommon,
    pub url: String,
    pub caption: Vec<RichTextItem>,
}

/// Child page block; its ID is the child page's ID
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChildPageBlock {
    pub common: BlockCommon,
    pub title: String,
}

/// Child database block; its ID is the database's ID
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChildDatabaseBlock {
    pub common: BlockCommon,
    pub title: String,
}

/// Link to page block
#[derive(Debug, Clone, PartialEq)]
pub struct LinkToPageBlock {
    pub common: BlockCommon,
    pub page_id: PageId,
}

/// Table block; rows are its children
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableBlock {
    pub common: BlockCommon,
    pub table_width: usize,
    pub has_column_header: bool,
}

/// Table row block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRowBlock {
    pub common: BlockCommon,
    pub cells: Vec<Vec<RichTextItem>>,
}

/// Any block type without a dedicated variant
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnsupportedBlock {
    pub common: BlockCommon,
    pub block_type: String,
}
