// src/api/parser.rs
//! Response parsing on top of notion-client's serde types.
//!
//! Every parser first checks the HTTP status and turns Notion error bodies
//! into typed errors, then decodes the payload and hands it to the adapter.

use super::client::ApiResponse;
use super::notion_client_adapter::{
    convert_block, convert_database_header, convert_page_header, convert_row,
};
use super::responses::{
    NotionDatabase, NotionError, NotionPage, ObjectEnvelope, QueryDatabaseResponse,
    QueryEnvelopeResponse, RetrieveBlockChildrenResponse,
};
use super::types::{DatabaseHeader, PageHeader, PaginatedResponse};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionClientError, NotionErrorCode};
use crate::model::{Block, TableRow};
use reqwest::StatusCode;

/// Parse any Notion API response, mapping error statuses to typed errors
pub fn parse_api_response<T>(result: &ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_with_notion_client(&result.data, &result.url)
    } else {
        Err(parse_error_body(&result.data, result.status, &result.url))
    }
}

/// Parse successful response using notion-client's robust parsing
fn parse_with_notion_client<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);

        NotionClientError::Deserialization {
            source: e,
            body: preview(body),
        }
        .into()
    })
}

fn preview(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Turn an error response into the most specific error available
fn parse_error_body(body: &str, status: StatusCode, url: &str) -> AppError {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        return NotionClientError::NotionApi {
            status: notion_error.status,
            code: notion_error.code,
            message: notion_error.message,
            request_id: notion_error.request_id,
        }
        .into();
    }

    AppError::NotionService {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}", status, url),
    }
}

/// Parse a retrieved page into its header
pub fn parse_page_response(result: ApiResponse<String>) -> Result<PageHeader, AppError> {
    let envelope: ObjectEnvelope = parse_api_response(&result)?;
    let notion_page: NotionPage = parse_api_response(&result)?;
    convert_page_header(envelope, notion_page)
}

/// Parse a retrieved database into its header and schema
pub fn parse_database_response(result: ApiResponse<String>) -> Result<DatabaseHeader, AppError> {
    let envelope: ObjectEnvelope = parse_api_response(&result)?;
    let notion_db: NotionDatabase = parse_api_response(&result)?;
    convert_database_header(envelope, notion_db)
}

/// Parse one page of block children
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    let response: RetrieveBlockChildrenResponse = parse_api_response(&result)?;
    let blocks = response
        .results
        .into_iter()
        .map(convert_block)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PaginatedResponse {
        results: blocks,
        next_cursor: response.next_cursor,
        has_more: response.has_more,
    })
}

/// Parse one page of database query results into table rows
pub fn parse_rows_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<TableRow>, AppError> {
    let envelopes: QueryEnvelopeResponse = parse_api_response(&result)?;
    let response: QueryDatabaseResponse = parse_api_response(&result)?;

    if envelopes.results.len() != response.results.len() {
        return Err(AppError::MalformedResponse(format!(
            "Query response from {} changed shape while parsing",
            result.url
        )));
    }

    let rows = envelopes
        .results
        .into_iter()
        .zip(response.results)
        .map(|(envelope, page)| convert_row(envelope, page))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PaginatedResponse {
        results: rows,
        next_cursor: response.next_cursor,
        has_more: response.has_more,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ok(body: &str) -> ApiResponse<String> {
        ApiResponse {
            data: body.to_string(),
            status: StatusCode::OK,
            url: "https://api.notion.com/v1/test".to_string(),
        }
    }

    const PAGE_JSON: &str = r#"{
        "object": "page",
        "id": "2b5c1ab1-7a3c-4e6b-9a1f-0f3d2c4b5a69",
        "created_time": "2021-05-01T00:00:00.000Z",
        "last_edited_time": "2021-05-02T00:00:00.000Z",
        "created_by": {"object": "user", "id": "user-id"},
        "last_edited_by": {"object": "user", "id": "user-id"},
        "parent": {"type": "page_id", "page_id": "414cd412-8533-8087-a989-cf37889137c5"},
        "in_trash": false,
        "url": "https://www.notion.so/Hello-2b5c1ab17a3c4e6b9a1f0f3d2c4b5a69",
        "properties": {
            "title": {
                "id": "title",
                "type": "title",
                "title": [{
                    "type": "text",
                    "text": {"content": "Hello", "link": null},
                    "annotations": {"bold": false, "italic": false, "strikethrough": false, "underline": false, "code": false, "color": "default"},
                    "plain_text": "Hello",
                    "href": null
                }]
            }
        }
    }"#;

    #[test]
    fn parses_page_header() {
        let header = parse_page_response(ok(PAGE_JSON)).unwrap();
        assert_eq!(header.id.as_str(), "2b5c1ab17a3c4e6b9a1f0f3d2c4b5a69");
        assert_eq!(header.title, "Hello");
        assert_eq!(header.created_time.to_rfc3339(), "2021-05-01T00:00:00+00:00");
    }

    #[test]
    fn maps_notion_error_body() {
        let result = ApiResponse {
            data: r#"{
                "object": "error",
                "status": 404,
                "code": "object_not_found",
                "message": "Could not find page with ID: abc123",
                "request_id": "req_123"
            }"#
            .to_string(),
            status: StatusCode::NOT_FOUND,
            url: "https://api.notion.com/v1/pages/abc123".to_string(),
        };

        let err = parse_page_response(result).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("object_not_found"));
    }

    #[test]
    fn falls_back_to_http_status_for_unparseable_errors() {
        let result = ApiResponse {
            data: "<html>bad gateway</html>".to_string(),
            status: StatusCode::BAD_GATEWAY,
            url: "https://api.notion.com/v1/pages/abc".to_string(),
        };

        let err = parse_page_response(result).unwrap_err();
        assert!(matches!(
            err,
            AppError::NotionService {
                code: NotionErrorCode::HttpStatus(502),
                ..
            }
        ));
    }

    #[test]
    fn malformed_body_is_a_deserialization_error() {
        let err = parse_blocks_pagination(ok("{not json")).unwrap_err();
        assert!(matches!(
            err,
            AppError::NotionClient(NotionClientError::Deserialization { .. })
        ));
    }

    #[test]
    fn previews_long_bodies() {
        let body = "x".repeat(ERROR_BODY_PREVIEW_LENGTH + 10);
        let shown = preview(&body);
        assert_eq!(shown.len(), ERROR_BODY_PREVIEW_LENGTH + 3);
        assert!(shown.ends_with("..."));
    }
}
