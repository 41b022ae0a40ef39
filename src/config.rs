// src/config.rs
//! Command-line flags, environment variables and the YAML config file,
//! merged into one validated [`ExportConfig`].
//!
//! Precedence is CLI > environment > config file > built-in default.

use crate::constants::{API_KEY_ENV, DEFAULT_CONFIG_FILE_NAME, DEFAULT_OUTPUT_DIR, ENV_PREFIX};
use crate::error::AppError;
use crate::output::OutputLayout;
use crate::pipeline::ListingMode;
use crate::types::{ApiKey, PageId};
use clap::Parser;
use directories::BaseDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Parsed command-line input.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Config file (default is $HOME/.notion-md.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Root page ID or URL
    #[arg(short, long)]
    pub id: Option<String>,

    /// Notion integration token
    #[arg(short, long)]
    pub token: Option<String>,

    /// Directory the Markdown files are written to (default ./output)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path segment images are stored under, relative to the output directory
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// List pages from the root page's table view instead of its sub-pages
    #[arg(short = 'v', long, action = clap::ArgAction::SetTrue)]
    pub listview: bool,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

/// Contents of the YAML config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub id: Option<String>,
    pub token: Option<String>,
    pub output: Option<String>,
    pub prefix: Option<String>,
    pub listview: Option<bool>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self, AppError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|source| AppError::ConfigFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the explicit config file, or the one in the home directory when
    /// it exists.
    pub fn locate(explicit: Option<&Path>) -> Result<Self, AppError> {
        if let Some(path) = explicit {
            log::debug!("Using config file {}", path.display());
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => {
                log::debug!("Using config file {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(DEFAULT_CONFIG_FILE_NAME))
}

/// Resolved export configuration.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub root_page_id: PageId,
    pub api_key: ApiKey,
    pub output_dir: PathBuf,
    pub image_prefix: Option<String>,
    pub list_view: bool,
}

impl ExportConfig {
    /// Resolves the configuration from CLI input, the process environment
    /// and the config file.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let file = ConfigFile::locate(cli.config.as_deref())?;
        Self::resolve_from(cli, |key| std::env::var(key).ok(), file)
    }

    /// Resolves the configuration with an explicit environment lookup.
    pub fn resolve_from(
        cli: CommandLineInput,
        env: impl Fn(&str) -> Option<String>,
        file: ConfigFile,
    ) -> Result<Self, AppError> {
        let env_value = |key: &str| non_empty(env(&format!("{}{}", ENV_PREFIX, key)));

        let id = non_empty(cli.id)
            .or_else(|| env_value("ID"))
            .or_else(|| non_empty(file.id))
            .ok_or_else(|| {
                AppError::MissingConfiguration("root page id (--id or NOTION_MD_ID)".to_string())
            })?;

        let token = non_empty(cli.token)
            .or_else(|| env_value("TOKEN"))
            .or_else(|| non_empty(env(API_KEY_ENV)))
            .or_else(|| non_empty(file.token))
            .ok_or_else(|| {
                AppError::MissingConfiguration(format!(
                    "Notion token (--token, NOTION_MD_TOKEN or {})",
                    API_KEY_ENV
                ))
            })?;

        let output = non_empty(cli.output)
            .or_else(|| env_value("OUTPUT"))
            .or_else(|| non_empty(file.output))
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());

        let image_prefix = non_empty(cli.prefix)
            .or_else(|| env_value("PREFIX"))
            .or_else(|| non_empty(file.prefix));

        let list_view = cli.listview
            || env_value("LISTVIEW")
                .and_then(|value| parse_flag(&value))
                .or(file.listview)
                .unwrap_or(false);

        Ok(Self {
            root_page_id: PageId::parse(&id)?,
            api_key: ApiKey::new(token)?,
            output_dir: PathBuf::from(output),
            image_prefix,
            list_view,
        })
    }

    pub fn listing_mode(&self) -> ListingMode {
        if self.list_view {
            ListingMode::TableView
        } else {
            ListingMode::PageTree
        }
    }

    pub fn layout(&self) -> OutputLayout {
        OutputLayout::new(self.output_dir.clone(), self.image_prefix.as_deref())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            log::warn!("Ignoring unrecognized boolean value '{}'", other);
            None
        }
    }
}
