// src/output/types.rs
//! Per-page outcomes of an export run.

use crate::types::PageId;
use std::fmt;
use std::path::PathBuf;

/// What happened to one page of the work set.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// Markdown and every image were written.
    Converted {
        markdown_path: PathBuf,
        images_written: usize,
    },
    /// The page could not be downloaded; nothing was written.
    FetchFailed { error: String },
    /// The Markdown could not be produced or written; images were not attempted.
    ConversionFailed { error: String },
    /// Markdown was written but at least one image failed.
    ImagesFailed {
        markdown_path: PathBuf,
        images_written: usize,
        error: String,
    },
}

impl PageOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PageOutcome::Converted { .. })
    }

    /// Whether a Markdown file exists for the page after the run.
    pub fn wrote_markdown(&self) -> bool {
        matches!(
            self,
            PageOutcome::Converted { .. } | PageOutcome::ImagesFailed { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageReport {
    pub page_id: PageId,
    pub outcome: PageOutcome,
}

/// Result of processing a whole work set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub pages: Vec<PageReport>,
    pub stats: RunStats,
}

/// Counters over a run's page outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub converted: usize,
    pub fetch_failed: usize,
    pub conversion_failed: usize,
    pub images_failed: usize,
    pub images_written: usize,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page outcome to the report.
    pub fn with_page(mut self, page_id: PageId, outcome: PageOutcome) -> Self {
        match &outcome {
            PageOutcome::Converted { images_written, .. } => {
                self.stats.converted += 1;
                self.stats.images_written += images_written;
            }
            PageOutcome::FetchFailed { .. } => self.stats.fetch_failed += 1,
            PageOutcome::ConversionFailed { .. } => self.stats.conversion_failed += 1,
            PageOutcome::ImagesFailed { images_written, .. } => {
                self.stats.images_failed += 1;
                self.stats.images_written += images_written;
            }
        }
        self.pages.push(PageReport { page_id, outcome });
        self
    }

    pub fn outcome_for(&self, page_id: &PageId) -> Option<&PageOutcome> {
        self.pages
            .iter()
            .find(|report| &report.page_id == page_id)
            .map(|report| &report.outcome)
    }

    /// Checks if every page was converted with all its images.
    pub fn is_success(&self) -> bool {
        self.pages.iter().all(|report| report.outcome.is_success())
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pages: {} converted, {} with image failures, {} failed to download, {} failed to convert; {} images written",
            self.pages.len(),
            self.stats.converted,
            self.stats.images_failed,
            self.stats.fetch_failed,
            self.stats.conversion_failed,
            self.stats.images_written
        )
    }
}
