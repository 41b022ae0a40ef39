// tests/export_run.rs
//! End-to-end export runs against an in-memory workspace.

mod common;

use common::{child_page, hosted_image, page, page_id, paragraph, signed, table_view, InMemoryRepository};
use notion_md::{AppError, ListingMode, Manager, OutputLayout, PageOutcome};
use pretty_assertions::assert_eq;
use std::fs;

const PHOTO: &str =
    "https://s3.us-west-2.amazonaws.com/secure.notion-static.com/e5470cfd-08f0-4fb8-8ec2-452ca1a3f05e/Photo.png";

fn md_name(slug: &str, n: u8) -> String {
    format!("{}-{:032x}.md", slug, n)
}

#[tokio::test]
async fn failing_page_does_not_stop_the_run() {
    let root = page_id(1);
    let repo = InMemoryRepository::new()
        .with_page(page(
            &root,
            "Root",
            vec![
                child_page(&page_id(2), "First"),
                child_page(&page_id(3), "Missing"),
                child_page(&page_id(4), "Third"),
            ],
        ))
        .with_page(page(&page_id(2), "First", vec![paragraph("one")]))
        .with_page(page(&page_id(4), "Third", vec![paragraph("three")]));
    let dir = tempfile::tempdir().unwrap();

    let report = Manager::new(&repo, OutputLayout::new(dir.path(), None))
        .run(&root, ListingMode::PageTree)
        .await
        .unwrap();

    assert!(dir.path().join(md_name("first", 2)).is_file());
    assert!(dir.path().join(md_name("third", 4)).is_file());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    assert_eq!(report.stats.converted, 2);
    assert_eq!(report.stats.fetch_failed, 1);
    assert!(matches!(
        report.outcome_for(&page_id(3)),
        Some(PageOutcome::FetchFailed { .. })
    ));
    assert_eq!(
        repo.requested_pages(),
        vec![page_id(1), page_id(2), page_id(3), page_id(4)]
    );
}

#[tokio::test]
async fn table_view_rows_carry_categories_and_tags() {
    let root = page_id(1);
    let mut root_page = page(&root, "Blog", Vec::new());
    root_page.table_views = vec![table_view(vec![
        (page_id(2), vec!["dev"], vec!["go", "notion"]),
        (page_id(3), vec![], vec![]),
    ])];
    let repo = InMemoryRepository::new()
        .with_page(root_page)
        .with_page(page(&page_id(2), "Post", vec![paragraph("Body")]))
        .with_page(page(&page_id(3), "Draft", vec![paragraph("Soon")]));
    let dir = tempfile::tempdir().unwrap();

    let report = Manager::new(&repo, OutputLayout::new(dir.path(), None))
        .run(&root, ListingMode::TableView)
        .await
        .unwrap();

    assert!(report.is_success());
    assert_eq!(
        fs::read_to_string(dir.path().join(md_name("post", 2))).unwrap(),
        "---\ntitle: \"Post\"\ndate: \"2021-05-01T00:00:00Z\"\ndraft: false\ntoc: true\nautoCollapseToc: false\ncomment: true\ncategories: [dev]\ntags: [go,notion]\n---\n\nBody\n\n"
    );
    let draft = fs::read_to_string(dir.path().join(md_name("draft", 3))).unwrap();
    assert!(draft.contains("categories: []\ntags: []\n"));
}

#[tokio::test]
async fn images_are_downloaded_under_the_prefix() {
    let root = page_id(1);
    let repo = InMemoryRepository::new()
        .with_page(page(&root, "Root", vec![child_page(&page_id(2), "Post")]))
        .with_page(page(&page_id(2), "Post", vec![hosted_image(PHOTO, "abc123")]))
        .with_file(&signed(PHOTO), b"\x89PNG");
    let dir = tempfile::tempdir().unwrap();

    let report = Manager::new(&repo, OutputLayout::new(dir.path(), Some("images")))
        .run(&root, ListingMode::PageTree)
        .await
        .unwrap();

    assert_eq!(
        fs::read(dir.path().join("images").join("Photo-abc123.png")).unwrap(),
        b"\x89PNG"
    );
    let markdown = fs::read_to_string(dir.path().join(md_name("post", 2))).unwrap();
    assert!(markdown.contains("![](images/Photo-abc123.png)\n"));
    assert_eq!(report.stats.images_written, 1);
}

#[tokio::test]
async fn image_failures_keep_the_markdown() {
    let root = page_id(1);
    let repo = InMemoryRepository::new()
        .with_page(page(&root, "Root", vec![child_page(&page_id(2), "Post")]))
        .with_page(page(&page_id(2), "Post", vec![hosted_image(PHOTO, "abc123")]));
    let dir = tempfile::tempdir().unwrap();

    let report = Manager::new(&repo, OutputLayout::new(dir.path(), None))
        .run(&root, ListingMode::PageTree)
        .await
        .unwrap();

    assert!(dir.path().join(md_name("post", 2)).is_file());
    match report.outcome_for(&page_id(2)) {
        Some(PageOutcome::ImagesFailed {
            images_written,
            error,
            ..
        }) => {
            assert_eq!(*images_written, 0);
            assert!(error.contains("Photo.png"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn conversion_failure_skips_images_and_continues() {
    let root = page_id(1);
    let repo = InMemoryRepository::new()
        .with_page(page(
            &root,
            "Root",
            vec![child_page(&page_id(2), "Blocked"), child_page(&page_id(3), "Next")],
        ))
        .with_page(page(&page_id(2), "Blocked", vec![hosted_image(PHOTO, "abc123")]))
        .with_page(page(&page_id(3), "Next", vec![paragraph("fine")]))
        .with_file(&signed(PHOTO), b"image-bytes");
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join(md_name("blocked", 2))).unwrap();

    let report = Manager::new(&repo, OutputLayout::new(dir.path(), Some("img")))
        .run(&root, ListingMode::PageTree)
        .await
        .unwrap();

    assert!(matches!(
        report.outcome_for(&page_id(2)),
        Some(PageOutcome::ConversionFailed { .. })
    ));
    assert!(!dir.path().join("img").exists());
    assert!(dir.path().join(md_name("next", 3)).is_file());
    assert_eq!(report.stats.conversion_failed, 1);
    assert_eq!(report.stats.converted, 1);
    assert_eq!(report.stats.images_written, 0);
}

#[tokio::test]
async fn repeated_runs_write_identical_files() {
    let root = page_id(1);
    let repo = InMemoryRepository::new()
        .with_page(page(&root, "Root", vec![child_page(&page_id(2), "Post")]))
        .with_page(page(
            &page_id(2),
            "Post",
            vec![paragraph("Body"), hosted_image(PHOTO, "abc123")],
        ))
        .with_file(&signed(PHOTO), b"image-bytes");
    let dir = tempfile::tempdir().unwrap();
    let manager = Manager::new(&repo, OutputLayout::new(dir.path(), Some("img")));

    manager.run(&root, ListingMode::PageTree).await.unwrap();
    let first_md = fs::read(dir.path().join(md_name("post", 2))).unwrap();
    let first_img = fs::read(dir.path().join("img").join("Photo-abc123.png")).unwrap();

    manager.run(&root, ListingMode::PageTree).await.unwrap();
    assert_eq!(fs::read(dir.path().join(md_name("post", 2))).unwrap(), first_md);
    assert_eq!(
        fs::read(dir.path().join("img").join("Photo-abc123.png")).unwrap(),
        first_img
    );
    assert_eq!(fs::read_dir(dir.path().join("img")).unwrap().count(), 1);
}

#[tokio::test]
async fn unreachable_root_stops_the_run() {
    let repo = InMemoryRepository::new();
    let dir = tempfile::tempdir().unwrap();

    let err = Manager::new(&repo, OutputLayout::new(dir.path(), None))
        .run(&page_id(1), ListingMode::PageTree)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::RootUnavailable { .. }));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn table_view_mode_needs_a_table_view() {
    let root = page_id(1);
    let repo = InMemoryRepository::new().with_page(page(&root, "Root", vec![child_page(&page_id(2), "Post")]));
    let dir = tempfile::tempdir().unwrap();

    let err = Manager::new(&repo, OutputLayout::new(dir.path(), None))
        .run(&root, ListingMode::TableView)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NoTableView { .. }));
    assert_eq!(repo.requested_pages(), vec![root]);
}
