// src/api/mod.rs
//! Notion API interaction: the ability to retrieve pages and their files.
//!
//! Business logic depends on [`NotionRepository`], never on HTTP details;
//! [`client::NotionHttpClient`] is the production implementation.

pub mod client;
pub mod notion_client_adapter;
pub mod parser;
mod responses;
mod simple_pagination;
mod types;

pub use client::NotionHttpClient;
pub use types::{DatabaseHeader, PageHeader};

use crate::error::AppError;
use crate::model::Page;
use crate::types::{BlockId, PageId};

/// Bytes of a downloaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub data: Vec<u8>,
}

/// The ability to retrieve content from a Notion workspace.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    /// Retrieve a page with its complete block tree and table views.
    async fn download_page(&self, id: &PageId) -> Result<Page, AppError>;

    /// Download the bytes behind a file URL found in `block_id`.
    async fn download_file(&self, url: &str, block_id: &BlockId)
        -> Result<DownloadedFile, AppError>;
}
