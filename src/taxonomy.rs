// src/taxonomy.rs
//! Which pages to export, and the categories and tags each one carries.

use crate::constants::{CATEGORIES_COLUMN, TAGS_COLUMN};
use crate::model::{Page, TableView};
use crate::types::PageId;
use std::collections::HashMap;

/// Categories and tags per page, read from a table view.
///
/// A page with an entry gets the corresponding front-matter line even when
/// its list is empty; a page without one gets no line at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Taxonomy {
    categories: HashMap<PageId, Vec<String>>,
    tags: HashMap<PageId, Vec<String>>,
}

impl Taxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(mut self, page: PageId, categories: Vec<String>) -> Self {
        self.categories.insert(page, categories);
        self
    }

    pub fn with_tags(mut self, page: PageId, tags: Vec<String>) -> Self {
        self.tags.insert(page, tags);
        self
    }

    pub fn categories_for(&self, page: &PageId) -> Option<&[String]> {
        self.categories.get(page).map(Vec::as_slice)
    }

    pub fn tags_for(&self, page: &PageId) -> Option<&[String]> {
        self.tags.get(page).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.tags.is_empty()
    }
}

/// The pages an export run processes, in order, with their taxonomy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkSet {
    pub page_ids: Vec<PageId>,
    pub taxonomy: Taxonomy,
}

impl WorkSet {
    /// The root page's direct sub-pages, in document order, without taxonomy.
    pub fn from_sub_pages(root: &Page) -> Self {
        Self {
            page_ids: root.sub_pages(),
            taxonomy: Taxonomy::new(),
        }
    }

    /// One page per row; "Categories" and "Tags" columns feed the taxonomy.
    pub fn from_table_view(view: &TableView) -> Self {
        let column_names = view.column_names();
        let mut page_ids = Vec::with_capacity(view.rows.len());
        let mut taxonomy = Taxonomy::new();

        for row in &view.rows {
            page_ids.push(row.page_id.clone());
            for (column_id, value) in &row.properties {
                match column_names.get(column_id.as_str()).copied() {
                    Some(CATEGORIES_COLUMN) => {
                        taxonomy = taxonomy.with_categories(row.page_id.clone(), value.texts().to_vec());
                    }
                    Some(TAGS_COLUMN) => {
                        taxonomy = taxonomy.with_tags(row.page_id.clone(), value.texts().to_vec());
                    }
                    _ => {}
                }
            }
        }

        log::debug!(
            "Table view '{}' lists {} pages",
            view.collection.name,
            page_ids.len()
        );
        Self { page_ids, taxonomy }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellValue, Collection, ColumnSchema, TableRow};
    use crate::types::DatabaseId;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    fn id(n: u8) -> PageId {
        PageId::parse(&format!("{:032x}", n)).unwrap()
    }

    fn column(name: &str) -> ColumnSchema {
        ColumnSchema {
            name: name.to_string(),
            column_type: "multi_select".to_string(),
        }
    }

    fn texts(values: &[&str]) -> CellValue {
        CellValue::new(values.iter().map(|v| v.to_string()).collect())
    }

    fn view() -> TableView {
        let mut schema = IndexMap::new();
        schema.insert("title".to_string(), column("Name"));
        schema.insert("c%3Aa".to_string(), column("Categories"));
        schema.insert("t%3Ag".to_string(), column("Tags"));

        let mut first = IndexMap::new();
        first.insert("title".to_string(), texts(&["Post one"]));
        first.insert("t%3Ag".to_string(), texts(&["go", "notion"]));
        first.insert("c%3Aa".to_string(), texts(&["tech"]));

        let mut second = IndexMap::new();
        second.insert("title".to_string(), texts(&["Post two"]));

        TableView {
            collection: Collection {
                id: DatabaseId::parse(&format!("{:032x}", 99)).unwrap(),
                name: "Posts".to_string(),
                schema,
            },
            rows: vec![
                TableRow {
                    page_id: id(1),
                    properties: first,
                },
                TableRow {
                    page_id: id(2),
                    properties: second,
                },
            ],
        }
    }

    #[test]
    fn table_view_rows_become_work_items() {
        let work = WorkSet::from_table_view(&view());

        assert_eq!(work.page_ids, vec![id(1), id(2)]);
        assert_eq!(
            work.taxonomy.tags_for(&id(1)),
            Some(&["go".to_string(), "notion".to_string()][..])
        );
        assert_eq!(
            work.taxonomy.categories_for(&id(1)),
            Some(&["tech".to_string()][..])
        );
        assert_eq!(work.taxonomy.tags_for(&id(2)), None);
    }

    #[test]
    fn unnamed_columns_are_ignored() {
        let mut view = view();
        view.collection.schema.clear();
        let work = WorkSet::from_table_view(&view);
        assert_eq!(work.page_ids.len(), 2);
        assert!(work.taxonomy.is_empty());
    }
}
