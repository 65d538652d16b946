//! Wire types for the database query endpoint
//!
//! `POST /databases/{id}/query` takes a page size and an optional start
//! cursor, and answers with a page of page objects plus pagination fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque pagination token handed back by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryCursor(String);

impl QueryCursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Body of one query request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    pub page_size: u32,

    /// Omitted on the first request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<QueryCursor>,
}

impl QueryRequest {
    /// Request for the first page
    pub fn first(page_size: u32) -> Self {
        Self {
            page_size,
            start_cursor: None,
        }
    }

    /// Request for the page after `cursor`
    pub fn after(page_size: u32, cursor: QueryCursor) -> Self {
        Self {
            page_size,
            start_cursor: Some(cursor),
        }
    }
}

/// One page of query results
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<RawRecord>,

    #[serde(default)]
    pub has_more: bool,

    #[serde(default)]
    pub next_cursor: Option<QueryCursor>,
}

/// One Notion page object, with its properties left as raw JSON
///
/// Properties are decoded one at a time during flattening, so a single
/// malformed property cannot fail the decode of the whole response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub created_time: Option<String>,

    #[serde(default)]
    pub last_edited_time: Option<String>,

    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl RawRecord {
    /// Look up a property by its display name
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

/// Error object returned with non-success statuses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub status: Option<u16>,

    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub message: String,
}
