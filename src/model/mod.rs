mod block;
pub mod blocks;
pub mod common;
pub mod table;

pub use block::Block;
pub use blocks::*;
pub use common::*;
pub use table::{CellValue, Collection, ColumnSchema, TableRow, TableView};

use crate::types::PageId;

/// A Notion page with its full block tree.
///
/// `blocks` normally holds a single [`Block::Page`] whose children are the
/// page content.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: PageId,
    pub blocks: Vec<Block>,
    pub table_views: Vec<TableView>,
}

impl Page {
    /// Visits every block of the page, depth-first in document order.
    pub fn for_each_block<'a>(&'a self, mut visit: impl FnMut(&'a Block)) {
        for block in &self.blocks {
            block.walk(&mut visit);
        }
    }

    /// The page's own block, if the tree has one.
    pub fn page_block(&self) -> Option<&PageBlock> {
        let mut found = None;
        self.for_each_block(|block| {
            if let Block::Page(page) = block {
                found.get_or_insert(page);
            }
        });
        found
    }

    /// The page title, empty when the tree has no page block.
    pub fn title(&self) -> &str {
        self.page_block()
            .map(|block| block.title.as_str())
            .unwrap_or_default()
    }

    /// IDs of the sub-pages linked from this page, in document order.
    pub fn sub_pages(&self) -> Vec<PageId> {
        let mut ids: Vec<PageId> = Vec::new();
        self.for_each_block(|block| {
            if let Block::ChildPage(child) = block {
                let id = child.common.id.cast();
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        });
        ids
    }

    /// All image blocks of the page, in document order.
    pub fn images(&self) -> Vec<&ImageBlock> {
        let mut images = Vec::new();
        self.for_each_block(|block| {
            if let Block::Image(image) = block {
                images.push(image);
            }
        });
        images
    }
}
