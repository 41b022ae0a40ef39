// src/api/responses.rs
//! Wire types for Notion API responses.
//!
//! Block and page payloads are decoded with notion-client's serde types. The
//! few fields those types do not expose in a usable shape (creation time,
//! internal property IDs) are read through the small envelope structs below.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use notion_client::objects::{
    block::Block as NotionBlock, database::Database as NotionDatabase, error::Error as NotionError,
    page::Page as NotionPage,
};

/// Generic paginated list envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub object: String,
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// Database query response using notion-client types
pub type QueryDatabaseResponse = ListResponse<NotionPage>;

/// Block children response using notion-client types
pub type RetrieveBlockChildrenResponse = ListResponse<NotionBlock>;

/// Identity and property layout of a page or database object.
///
/// `properties` keeps the order the API returned them in.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectEnvelope {
    pub id: String,
    pub created_time: DateTime<Utc>,
    #[serde(default)]
    pub properties: IndexMap<String, PropertyEnvelope>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertyEnvelope {
    pub id: String,
    #[serde(rename = "type", default)]
    pub property_type: String,
}

/// Query response seen through [`ObjectEnvelope`]s, one per row.
pub type QueryEnvelopeResponse = ListResponse<ObjectEnvelope>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_keeps_property_order_and_ids() {
        let json = r#"{
            "object": "page",
            "id": "2b5c1ab1-7a3c-4e6b-9a1f-0f3d2c4b5a69",
            "created_time": "2021-05-01T00:00:00.000Z",
            "properties": {
                "Tags": {"id": "t%3Ag", "type": "multi_select", "multi_select": []},
                "Categories": {"id": "c%3Aa", "type": "multi_select", "multi_select": []},
                "Name": {"id": "title", "type": "title", "title": []}
            }
        }"#;
        let envelope: ObjectEnvelope = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = envelope.properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Tags", "Categories", "Name"]);
        assert_eq!(envelope.properties["Tags"].id, "t%3Ag");
        assert_eq!(envelope.properties["Name"].property_type, "title");
        assert_eq!(
            envelope.created_time.to_rfc3339(),
            "2021-05-01T00:00:00+00:00"
        );
    }
}
