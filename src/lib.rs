// src/lib.rs
//! notion-md library: exports Notion pages as Hugo Markdown with local images.
//!
//! # Public API
//!
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `ExportConfig`, `CommandLineInput`, `ConfigFile`
//! - **Domain model**: `Page`, `Block` and its block types, `TableView`
//! - **API client**: `NotionRepository`, `NotionHttpClient`
//! - **Formatting**: `MarkdownConverter`, `render_blocks`, `render_front_matter`
//! - **Orchestration**: `Manager`, `ListingMode`, `RunReport`

mod api;
mod config;
mod constants;
mod error;
mod formatting;
pub mod model;
mod output;
mod pipeline;
mod taxonomy;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionClientError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, ConfigFile, ExportConfig};

// --- Domain Model ---
pub use crate::model::{Block, BlockCommon, Page, TableRow, TableView};

// --- Domain Types ---
pub use crate::types::{ApiKey, BlockId, DatabaseId, PageId, RichTextItem};

// --- API Client ---
pub use crate::api::{DownloadedFile, NotionHttpClient, NotionRepository};

// --- Formatting ---
pub use crate::formatting::{
    image_file_name, render_blocks, render_front_matter, BlockRenderer, FormatContext,
    MarkdownConverter,
};

// --- Orchestration ---
pub use crate::output::{OutputLayout, PageOutcome, RunReport, RunStats};
pub use crate::pipeline::{resolve_work_set, ListingMode, Manager};
pub use crate::taxonomy::{Taxonomy, WorkSet};
