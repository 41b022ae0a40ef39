// src/api/client.rs
//! HTTP client for the Notion API.
//!
//! `NotionHttpClient` wraps reqwest with Notion authentication and knows
//! how to assemble a complete [`Page`]: header, recursive block tree and
//! the table views of its inline databases. File downloads go through a
//! separate client without the Notion headers, since file URLs are
//! pre-signed links to third-party storage.

use super::parser;
use super::simple_pagination::fetch_all_pages_simple;
use super::types::{DatabaseHeader, PageHeader};
use super::{DownloadedFile, NotionRepository};
use crate::constants::{API_BASE_URL, NOTION_VERSION};
use crate::error::AppError;
use crate::model::{Block, BlockCommon, Collection, Page, PageBlock, TableRow, TableView};
use crate::types::{ApiKey, BlockId, DatabaseId, PageId};
use reqwest::{header, Client, Response};
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    files: Client,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        let files = Client::builder().build()?;
        Ok(Self { client, files })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to the specified endpoint (path without base URL).
    pub async fn get(&self, endpoint: &str) -> Result<Response, AppError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        log::debug!("GET {}", url);
        Ok(self.client.get(url).send().await?)
    }

    /// Makes a POST request with a JSON body to the specified endpoint.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        log::debug!("POST {}", url);
        Ok(self.client.post(url).json(body).send().await?)
    }

    async fn retrieve_page_header(&self, id: &PageId) -> Result<PageHeader, AppError> {
        let response = self.get(&format!("pages/{}", id.to_dashed())).await?;
        let result = extract_response_text(response).await?;
        parser::parse_page_response(result)
    }

    async fn retrieve_database_header(&self, id: &DatabaseId) -> Result<DatabaseHeader, AppError> {
        let response = self.get(&format!("databases/{}", id.to_dashed())).await?;
        let result = extract_response_text(response).await?;
        parser::parse_database_response(result)
    }

    /// Direct children of a block, following pagination cursors.
    async fn retrieve_children(&self, parent: &BlockId) -> Result<Vec<Block>, AppError> {
        let endpoint = format!("blocks/{}/children", parent.to_dashed());
        let pagination_result = fetch_all_pages_simple(
            |page_size, cursor| {
                let endpoint = with_page_query(&endpoint, page_size, cursor.as_deref());
                async move {
                    let response = self.get(&endpoint).await?;
                    let result = extract_response_text(response).await?;
                    parser::parse_blocks_pagination(result)
                }
            },
            None,
        )
        .await?;
        Ok(pagination_result.items)
    }

    /// The block tree below `parent`.
    ///
    /// Sub-pages and inline databases are separate documents; their
    /// content is not part of this tree.
    fn retrieve_block_tree<'a>(
        &'a self,
        parent: &'a BlockId,
    ) -> BoxFuture<'a, Result<Vec<Block>, AppError>> {
        Box::pin(async move {
            let mut blocks = self.retrieve_children(parent).await?;
            for block in &mut blocks {
                if !block.has_children()
                    || matches!(block, Block::ChildPage(_) | Block::ChildDatabase(_))
                {
                    continue;
                }
                let id = block.id().clone();
                let children = self.retrieve_block_tree(&id).await?;
                block.set_children(children);
            }
            Ok(blocks)
        })
    }

    /// All rows of a database, following pagination cursors.
    async fn query_rows(&self, database: &DatabaseId) -> Result<Vec<TableRow>, AppError> {
        let endpoint = format!("databases/{}/query", database.to_dashed());
        let pagination_result = fetch_all_pages_simple(
            |page_size, cursor| {
                let endpoint = endpoint.as_str();
                async move {
                    let mut query = serde_json::json!({ "page_size": page_size });
                    if let Some(cursor) = cursor {
                        query["start_cursor"] = serde_json::json!(cursor);
                    }
                    let response = self.post(endpoint, &query).await?;
                    let result = extract_response_text(response).await?;
                    parser::parse_rows_pagination(result)
                }
            },
            None,
        )
        .await?;
        Ok(pagination_result.items)
    }

    async fn retrieve_table_view(&self, id: &DatabaseId) -> Result<TableView, AppError> {
        let header = self.retrieve_database_header(id).await?;
        self.table_view_for(header).await
    }

    async fn table_view_for(&self, header: DatabaseHeader) -> Result<TableView, AppError> {
        let rows = self.query_rows(&header.id).await?;
        log::debug!("Table view {} has {} rows", header.id, rows.len());
        Ok(TableView {
            collection: Collection {
                id: header.id,
                name: header.title,
                schema: header.schema,
            },
            rows,
        })
    }

    /// Table views of the inline databases directly on the page.
    ///
    /// A database that cannot be read is skipped; the page stays usable.
    async fn retrieve_table_views(&self, content: &[Block]) -> Vec<TableView> {
        let mut views = Vec::new();
        for block in content {
            let Block::ChildDatabase(database) = block else {
                continue;
            };
            let id: DatabaseId = database.common.id.cast();
            match self.retrieve_table_view(&id).await {
                Ok(view) => views.push(view),
                Err(e) => log::warn!("Skipping table view {} ('{}'): {}", id, database.title, e),
            }
        }
        views
    }

    async fn download_regular_page(&self, header: PageHeader) -> Result<Page, AppError> {
        let content = self.retrieve_block_tree(&header.id.cast()).await?;
        let table_views = self.retrieve_table_views(&content).await;
        Ok(assemble_page(
            header.id,
            header.title,
            header.created_time,
            content,
            table_views,
        ))
    }

    /// A database addressed as a page: no content, one table view.
    async fn download_database_page(&self, id: &PageId) -> Result<Page, AppError> {
        let header = self.retrieve_database_header(&id.cast()).await?;
        let title = header.title.clone();
        let created_time = header.created_time;
        let view = self.table_view_for(header).await?;
        Ok(assemble_page(
            id.clone(),
            title,
            created_time,
            Vec::new(),
            vec![view],
        ))
    }
}

fn assemble_page(
    id: PageId,
    title: String,
    created_time: chrono::DateTime<chrono::Utc>,
    content: Vec<Block>,
    table_views: Vec<TableView>,
) -> Page {
    let page_block = Block::Page(PageBlock {
        common: BlockCommon::new(id.cast()).with_children(content),
        title,
        created_time,
    });
    Page {
        id,
        blocks: vec![page_block],
        table_views,
    }
}

fn with_page_query(endpoint: &str, page_size: u32, cursor: Option<&str>) -> String {
    match cursor {
        Some(cursor) => format!(
            "{}?page_size={}&start_cursor={}",
            endpoint, page_size, cursor
        ),
        None => format!("{}?page_size={}", endpoint, page_size),
    }
}

#[async_trait::async_trait]
impl NotionRepository for NotionHttpClient {
    async fn download_page(&self, id: &PageId) -> Result<Page, AppError> {
        match self.retrieve_page_header(id).await {
            Ok(header) => self.download_regular_page(header).await,
            Err(e) if e.is_not_found() => {
                log::debug!("{} is not a page, trying it as a database", id);
                self.download_database_page(id).await.map_err(|db_err| {
                    log::debug!("{} is not a database either: {}", id, db_err);
                    e
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn download_file(
        &self,
        url: &str,
        block_id: &BlockId,
    ) -> Result<DownloadedFile, AppError> {
        let failed = |reason: String| AppError::DownloadFailed {
            url: url.to_string(),
            reason,
        };

        log::debug!("Downloading file of block {}: {}", block_id, url);
        let response = self
            .files
            .get(url)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("HTTP {}", status)));
        }

        let data = response.bytes().await.map_err(|e| failed(e.to_string()))?;
        Ok(DownloadedFile {
            data: data.to_vec(),
        })
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text along with status and URL metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
