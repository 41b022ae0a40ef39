// src/formatting/front_matter.rs
//! Hugo front matter for an exported page.

use crate::model::Page;
use crate::taxonomy::Taxonomy;
use chrono::SecondsFormat;
use std::fmt::{self, Write};

/// Front-matter fields derived from a page and its taxonomy entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub title: String,
    /// Creation time as RFC 3339 in UTC, e.g. `2021-05-01T00:00:00Z`.
    pub date: String,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

impl FrontMatter {
    /// Reads title and date from the page's own block; both stay empty when
    /// the page has none.
    pub fn extract(page: &Page, taxonomy: &Taxonomy) -> Self {
        let (title, date) = page
            .page_block()
            .map(|block| {
                (
                    block.title.clone(),
                    block.created_time.to_rfc3339_opts(SecondsFormat::Secs, true),
                )
            })
            .unwrap_or_default();

        Self {
            title,
            date,
            categories: taxonomy.categories_for(&page.id).map(<[String]>::to_vec),
            tags: taxonomy.tags_for(&page.id).map(<[String]>::to_vec),
        }
    }
}

impl fmt::Display for FrontMatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("---\n")?;
        writeln!(f, "title: \"{}\"", escape_yaml_string(&self.title))?;
        writeln!(f, "date: \"{}\"", self.date)?;
        f.write_str("draft: false\n")?;
        f.write_str("toc: true\n")?;
        f.write_str("autoCollapseToc: false\n")?;
        f.write_str("comment: true\n")?;
        if let Some(categories) = &self.categories {
            writeln!(f, "categories: [{}]", categories.join(","))?;
        }
        if let Some(tags) = &self.tags {
            writeln!(f, "tags: [{}]", tags.join(","))?;
        }
        f.write_str("---\n")
    }
}

/// Escapes a value for a double-quoted YAML scalar.
fn escape_yaml_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Renders the front matter for `page`.
pub fn render_front_matter(page: &Page, taxonomy: &Taxonomy) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write!(out, "{}", FrontMatter::extract(page, taxonomy))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, BlockCommon, PageBlock, TextBlock};
    use crate::types::PageId;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn page_titled(title: &str) -> Page {
        let id = PageId::parse("2b5c1ab17a3c4e6b9a1f0f3d2c4b5a69").unwrap();
        Page {
            id: id.clone(),
            blocks: vec![Block::Page(PageBlock {
                common: BlockCommon::new(id.cast()),
                title: title.to_string(),
                created_time: chrono::Utc.with_ymd_and_hms(2021, 5, 1, 0, 0, 0).unwrap(),
            })],
            table_views: Vec::new(),
        }
    }

    #[test]
    fn renders_title_and_date() {
        let rendered = render_front_matter(&page_titled("Hello"), &Taxonomy::new()).unwrap();
        insta::assert_snapshot!(rendered.trim_end(), @r###"
        ---
        title: "Hello"
        date: "2021-05-01T00:00:00Z"
        draft: false
        toc: true
        autoCollapseToc: false
        comment: true
        ---
        "###);
    }

    #[test]
    fn includes_taxonomy_lines_when_present() {
        let page = page_titled("Hello");
        let taxonomy = Taxonomy::new()
            .with_categories(page.id.clone(), vec!["tech".to_string()])
            .with_tags(page.id.clone(), vec!["go".to_string(), "notion".to_string()]);

        let rendered = render_front_matter(&page, &taxonomy).unwrap();
        assert!(rendered.contains("categories: [tech]\n"));
        assert!(rendered.contains("tags: [go,notion]\n"));
        assert!(rendered.ends_with("tags: [go,notion]\n---\n"));
    }

    #[test]
    fn escapes_quotes_and_backslashes_in_title() {
        let rendered =
            render_front_matter(&page_titled(r#"Say "hi" \o/"#), &Taxonomy::new()).unwrap();
        assert!(rendered.contains(r#"title: "Say \"hi\" \\o/""#));
    }

    #[test]
    fn page_without_page_block_has_empty_fields() {
        let page = Page {
            id: PageId::parse("2b5c1ab17a3c4e6b9a1f0f3d2c4b5a69").unwrap(),
            blocks: vec![Block::Paragraph(TextBlock::default())],
            table_views: Vec::new(),
        };
        let front_matter = FrontMatter::extract(&page, &Taxonomy::new());
        assert_eq!(front_matter.title, "");
        assert_eq!(front_matter.date, "");
        assert!(front_matter.to_string().starts_with("---\ntitle: \"\"\ndate: \"\"\n"));
    }
}
