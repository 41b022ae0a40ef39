// src/constants.rs
//! Domain constants that define the operational boundaries of the exporter.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results (the API maximum).
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// API version sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

pub const API_BASE_URL: &str = "https://api.notion.com/v1";

/// Maximum characters shown when previewing unparseable response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;

// ---------------------------------------------------------------------------
// Table view columns
// ---------------------------------------------------------------------------

/// Display name of the column whose values become front-matter categories.
pub const CATEGORIES_COLUMN: &str = "Categories";

/// Display name of the column whose values become front-matter tags.
pub const TAGS_COLUMN: &str = "Tags";

// ---------------------------------------------------------------------------
// Configuration defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_OUTPUT_DIR: &str = "./output";

/// Config file looked up in the home directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE_NAME: &str = ".notion-md.yaml";

/// Prefix of the environment variables that override config file values.
pub const ENV_PREFIX: &str = "NOTION_MD_";

/// Fallback environment variable for the integration token.
pub const API_KEY_ENV: &str = "NOTION_API_KEY";

// ---------------------------------------------------------------------------
// String capacity hints (performance, not correctness)
// ---------------------------------------------------------------------------

/// Estimated characters per block, used to pre-allocate output strings.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 256;
