// src/api/types.rs
//! Type definitions for the Notion API module.

use crate::model::ColumnSchema;
use crate::types::{DatabaseId, PageId};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// Page-level fields of a retrieved page, before its blocks are fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct PageHeader {
    pub id: PageId,
    pub title: String,
    pub created_time: DateTime<Utc>,
}

/// Database-level fields of a retrieved database, before its rows are queried.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseHeader {
    pub id: DatabaseId,
    pub title: String,
    pub created_time: DateTime<Utc>,
    pub schema: IndexMap<String, ColumnSchema>,
}

/// One page of a paginated listing, already converted to domain values.
#[derive(Debug, Clone)]
pub struct PaginatedResponse<T> {
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// Result of a pagination operation.
#[derive(Debug, Clone)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub total_fetched: usize,
}
