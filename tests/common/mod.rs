// tests/common/mod.rs
//! Shared fixtures: an in-memory Notion workspace and page builders.

#![allow(dead_code)]

use chrono::TimeZone;
use indexmap::IndexMap;
use notion_md::model::{
    Block, BlockCommon, CellValue, ChildPageBlock, Collection, ColumnSchema, ImageBlock, Page,
    PageBlock, TableRow, TableView, TextBlock, TextBlockContent,
};
use notion_md::types::{BlockId, DatabaseId, PageId, RichTextItem};
use notion_md::{AppError, DownloadedFile, NotionErrorCode, NotionRepository};
use std::collections::HashMap;
use std::sync::Mutex;

/// A workspace held in memory. Unknown pages and files fail like missing objects.
#[derive(Default)]
pub struct InMemoryRepository {
    pages: HashMap<PageId, Page>,
    files: HashMap<String, Vec<u8>>,
    requested_pages: Mutex<Vec<PageId>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.insert(page.id.clone(), page);
        self
    }

    pub fn with_file(mut self, url: &str, data: &[u8]) -> Self {
        self.files.insert(url.to_string(), data.to_vec());
        self
    }

    pub fn requested_pages(&self) -> Vec<PageId> {
        self.requested_pages.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl NotionRepository for InMemoryRepository {
    async fn download_page(&self, id: &PageId) -> Result<Page, AppError> {
        self.requested_pages.lock().unwrap().push(id.clone());
        self.pages
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotionService {
                code: NotionErrorCode::ObjectNotFound,
                message: format!("no page {}", id),
            })
    }

    async fn download_file(
        &self,
        url: &str,
        _block_id: &BlockId,
    ) -> Result<DownloadedFile, AppError> {
        self.files
            .get(url)
            .map(|data| DownloadedFile { data: data.clone() })
            .ok_or_else(|| AppError::DownloadFailed {
                url: url.to_string(),
                reason: "HTTP 404 Not Found".to_string(),
            })
    }
}

pub fn page_id(n: u8) -> PageId {
    PageId::parse(&format!("{:032x}", n)).unwrap()
}

/// A page titled `title`, created 2021-05-01T00:00:00Z, holding `content`.
pub fn page(id: &PageId, title: &str, content: Vec<Block>) -> Page {
    Page {
        id: id.clone(),
        blocks: vec![Block::Page(PageBlock {
            common: BlockCommon::new(id.cast()).with_children(content),
            title: title.to_string(),
            created_time: chrono::Utc.with_ymd_and_hms(2021, 5, 1, 0, 0, 0).unwrap(),
        })],
        table_views: Vec::new(),
    }
}

pub fn child_page(id: &PageId, title: &str) -> Block {
    Block::ChildPage(ChildPageBlock {
        common: BlockCommon::new(id.cast()),
        title: title.to_string(),
    })
}

pub fn paragraph(text: &str) -> Block {
    Block::Paragraph(TextBlock {
        common: BlockCommon::new(BlockId::new_v4()),
        content: TextBlockContent::new(vec![RichTextItem::plain_text(text)]),
    })
}

/// A workspace-hosted image; `download_url` carries a signature query.
pub fn hosted_image(source: &str, asset_id: &str) -> Block {
    Block::Image(ImageBlock {
        common: BlockCommon::new(BlockId::new_v4()),
        source: source.to_string(),
        download_url: signed(source),
        file_ids: vec![asset_id.to_string()],
    })
}

pub fn signed(source: &str) -> String {
    format!("{}?X-Amz-Signature=abc", source)
}

/// A table view with "Name", "Categories" and "Tags" columns.
pub fn table_view(rows: Vec<(PageId, Vec<&str>, Vec<&str>)>) -> TableView {
    let mut schema = IndexMap::new();
    for (column_id, name, column_type) in [
        ("title", "Name", "title"),
        ("cat%3A", "Categories", "multi_select"),
        ("tag%3B", "Tags", "multi_select"),
    ] {
        schema.insert(
            column_id.to_string(),
            ColumnSchema {
                name: name.to_string(),
                column_type: column_type.to_string(),
            },
        );
    }

    let rows = rows
        .into_iter()
        .map(|(page_id, categories, tags)| {
            let texts =
                |values: Vec<&str>| CellValue::new(values.into_iter().map(str::to_string).collect());
            let mut properties = IndexMap::new();
            properties.insert("cat%3A".to_string(), texts(categories));
            properties.insert("tag%3B".to_string(), texts(tags));
            TableRow {
                page_id,
                properties,
            }
        })
        .collect();

    TableView {
        collection: Collection {
            id: DatabaseId::new_v4(),
            name: "Posts".to_string(),
            schema,
        },
        rows,
    }
}
