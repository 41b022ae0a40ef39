// src/pipeline.rs
//! Export orchestration: root page → work set → Markdown and image files.
//!
//! Every page of the work set is processed independently. A page that fails
//! to download, convert or fetch its images is recorded in the
//! [`RunReport`] and the run moves on; only an unreachable root page and a
//! missing table view stop the export.

use crate::api::NotionRepository;
use crate::error::AppError;
use crate::formatting::{image_file_name, MarkdownConverter};
use crate::model::{ImageBlock, Page};
use crate::output::{write_file, OutputLayout, PageOutcome, RunReport};
use crate::taxonomy::{Taxonomy, WorkSet};
use crate::types::PageId;
use std::path::PathBuf;

/// How the root page lists the pages to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingMode {
    /// The root page's sub-pages, in document order.
    #[default]
    PageTree,
    /// The rows of the root page's first table view.
    TableView,
}

/// Drives an export run against a [`NotionRepository`].
pub struct Manager<'a, R: NotionRepository + ?Sized> {
    repo: &'a R,
    layout: OutputLayout,
}

impl<'a, R: NotionRepository + ?Sized> Manager<'a, R> {
    pub fn new(repo: &'a R, layout: OutputLayout) -> Self {
        Self { repo, layout }
    }

    /// Exports every page listed by `root`.
    pub async fn run(&self, root: &PageId, mode: ListingMode) -> Result<RunReport, AppError> {
        log::info!("Downloading root page {}", root);
        let root_page = self
            .repo
            .download_page(root)
            .await
            .map_err(|e| AppError::RootUnavailable {
                id: root.to_string(),
                cause: e.to_string(),
            })?;

        let work_set = resolve_work_set(&root_page, mode)?;
        log::info!("{} pages to export", work_set.page_ids.len());

        let mut report = RunReport::new();
        for page_id in &work_set.page_ids {
            let outcome = self.export_page(page_id, &work_set.taxonomy).await;
            report = report.with_page(page_id.clone(), outcome);
        }
        Ok(report)
    }

    async fn export_page(&self, page_id: &PageId, taxonomy: &Taxonomy) -> PageOutcome {
        let page = match self.repo.download_page(page_id).await {
            Ok(page) => page,
            Err(e) => {
                log::error!("unable to download page {}: {}", page_id, e);
                return PageOutcome::FetchFailed {
                    error: e.to_string(),
                };
            }
        };

        let markdown_path = match self.write_markdown(&page, taxonomy) {
            Ok(path) => path,
            Err(e) => {
                log::error!("unable to convert page {}: {}", page_id, e);
                return PageOutcome::ConversionFailed {
                    error: e.to_string(),
                };
            }
        };
        log::info!("Wrote {}", markdown_path.display());

        let (images_written, result) = self.download_images(&page).await;
        match result {
            Ok(()) => PageOutcome::Converted {
                markdown_path,
                images_written,
            },
            Err(e) => {
                log::error!("unable to download images of page {}: {}", page_id, e);
                PageOutcome::ImagesFailed {
                    markdown_path,
                    images_written,
                    error: e.to_string(),
                }
            }
        }
    }

    fn write_markdown(&self, page: &Page, taxonomy: &Taxonomy) -> Result<PathBuf, AppError> {
        let markdown = MarkdownConverter::new(self.layout.image_prefix()).convert(page, taxonomy)?;
        let path = self.layout.markdown_path(page.title(), &page.id);
        write_file(&path, markdown.as_bytes())?;
        Ok(path)
    }

    /// Downloads every image of the page; failures are collected, not fatal.
    async fn download_images(&self, page: &Page) -> (usize, Result<(), AppError>) {
        let mut written = 0;
        let mut failures = Vec::new();

        for image in page.images() {
            match self.download_image(image).await {
                Ok(path) => {
                    log::debug!("Wrote image {}", path.display());
                    written += 1;
                }
                Err(e) => failures.push(format!("{}: {}", image.source, e)),
            }
        }

        if failures.is_empty() {
            (written, Ok(()))
        } else {
            (written, Err(AppError::ImageDownloads { failures }))
        }
    }

    async fn download_image(&self, image: &ImageBlock) -> Result<PathBuf, AppError> {
        let file_name = image_file_name(&image.source, &image.file_ids);
        if file_name.is_empty() {
            return Err(AppError::DownloadFailed {
                url: image.source.clone(),
                reason: "no asset id".to_string(),
            });
        }

        let file = self
            .repo
            .download_file(&image.download_url, &image.common.id)
            .await?;
        let path = self.layout.image_path(&file_name);
        write_file(&path, &file.data)?;
        Ok(path)
    }
}

/// The pages listed by the root page in the given mode.
pub fn resolve_work_set(root: &Page, mode: ListingMode) -> Result<WorkSet, AppError> {
    match mode {
        ListingMode::PageTree => Ok(WorkSet::from_sub_pages(root)),
        ListingMode::TableView => {
            let view = root.table_views.first().ok_or_else(|| AppError::NoTableView {
                id: root.id.to_string(),
            })?;
            log::info!(
                "Listing pages from table view '{}' ({} rows)",
                view.collection.name,
                view.rows.len()
            );
            Ok(WorkSet::from_table_view(view))
        }
    }
}
