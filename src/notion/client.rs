//! HTTP transport for the database query endpoint
//!
//! [`QueryTransport`] is the seam between the pagination loop and the network;
//! [`HttpTransport`] implements it with a blocking reqwest client.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use super::query::{ApiErrorBody, QueryRequest, QueryResponse};
use crate::config::{SecretToken, Settings};
use crate::error::{ExpenseError, ExpenseResult};

/// Issues one query request and returns one page of results
pub trait QueryTransport {
    fn query(&self, database_id: &str, request: &QueryRequest) -> ExpenseResult<QueryResponse>;
}

impl<T: QueryTransport + ?Sized> QueryTransport for &T {
    fn query(&self, database_id: &str, request: &QueryRequest) -> ExpenseResult<QueryResponse> {
        (**self).query(database_id, request)
    }
}

impl<T: QueryTransport + ?Sized> QueryTransport for Box<T> {
    fn query(&self, database_id: &str, request: &QueryRequest) -> ExpenseResult<QueryResponse> {
        (**self).query(database_id, request)
    }
}

/// Blocking HTTPS transport authenticated with a bearer token
pub struct HttpTransport {
    client: Client,
    base_url: String,
    token: SecretToken,
}

impl HttpTransport {
    /// Build a transport from settings
    pub fn new(settings: &Settings, token: SecretToken) -> ExpenseResult<Self> {
        Self::with_base_url(settings, token, &settings.api_base_url)
    }

    /// Build a transport against a different API root (used by tests and `--api-url`)
    pub fn with_base_url(
        settings: &Settings,
        token: SecretToken,
        base_url: &str,
    ) -> ExpenseResult<Self> {
        if token.is_empty() {
            return Err(ExpenseError::missing_credential(
                crate::config::credentials::TOKEN_VAR,
            ));
        }

        let mut headers = HeaderMap::new();
        let version = HeaderValue::from_str(&settings.notion_version).map_err(|e| {
            ExpenseError::Config(format!("Invalid Notion-Version header value: {}", e))
        })?;
        headers.insert("Notion-Version", version);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.request_timeout_secs.max(1)))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ExpenseError::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn query_url(&self, database_id: &str) -> String {
        format!("{}/databases/{}/query", self.base_url, database_id.trim())
    }

    fn bearer(&self) -> ExpenseResult<HeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token.expose()))
            .map_err(|_| ExpenseError::Config("Token contains invalid header characters".into()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl QueryTransport for HttpTransport {
    fn query(&self, database_id: &str, request: &QueryRequest) -> ExpenseResult<QueryResponse> {
        let url = self.query_url(database_id);
        debug!(%url, cursor = ?request.start_cursor, "Querying database");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, self.bearer()?)
            .json(request)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let detail: ApiErrorBody = serde_json::from_str(&body).unwrap_or_default();
            return Err(ExpenseError::Api {
                status: status.as_u16(),
                code: if detail.code.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown")
                        .to_lowercase()
                        .replace(' ', "_")
                } else {
                    detail.code
                },
                message: if detail.message.is_empty() {
                    body.chars().take(200).collect()
                } else {
                    detail.message
                },
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| ExpenseError::Protocol(format!("Invalid query response: {}", e)))
    }
}
