//! Table views: a page's tabular listings (Notion databases) with their
//! schema and rows.

use crate::types::{DatabaseId, PageId};
use indexmap::IndexMap;

/// A tabular listing attached to a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub collection: Collection,
    pub rows: Vec<TableRow>,
}

impl TableView {
    /// Maps internal column identifiers to their display names.
    pub fn column_names(&self) -> IndexMap<&str, &str> {
        self.collection
            .schema
            .iter()
            .map(|(column_id, column)| (column_id.as_str(), column.name.as_str()))
            .collect()
    }
}

/// The database behind a table view.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub id: DatabaseId,
    pub name: String,
    /// Column schema keyed by internal column identifier.
    pub schema: IndexMap<String, ColumnSchema>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSchema {
    pub name: String,
    pub column_type: String,
}

/// One row of a table view; each row is itself a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub page_id: PageId,
    /// Property values keyed by internal column identifier.
    pub properties: IndexMap<String, CellValue>,
}

/// A property value evaluated to its text values.
///
/// Multi-selects evaluate to one text per option; scalar properties to a
/// single text; empty properties to none.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellValue(Vec<String>);

impl CellValue {
    pub fn new(texts: Vec<String>) -> Self {
        Self(texts)
    }

    pub fn texts(&self) -> &[String] {
        &self.0
    }
}
