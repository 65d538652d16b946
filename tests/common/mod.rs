//! Scripted Notion API stub for integration tests
//!
//! An axum router on its own tokio runtime. Every query request is recorded
//! and answered with the next scripted response; once the script runs out the
//! stub answers 500.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::runtime::Runtime;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

#[derive(Default)]
struct StubState {
    responses: Mutex<VecDeque<(u16, Value)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct StubServer {
    pub base_url: String,
    state: Arc<StubState>,
    runtime: Runtime,
}

impl StubServer {
    /// Start a server that answers with `responses` (status, JSON body) in order
    pub fn start(responses: Vec<(u16, Value)>) -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("build stub runtime");

        let state = Arc::new(StubState {
            responses: Mutex::new(responses.into()),
            ..StubState::default()
        });
        let app = Router::new()
            .route("/v1/databases/:database_id/query", post(query))
            .with_state(Arc::clone(&state));

        let listener = runtime
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .expect("bind random port");
        let port = listener.local_addr().expect("local address").port();
        runtime.spawn(async move { axum::serve(listener, app).await });

        Self {
            base_url: format!("http://127.0.0.1:{}/v1", port),
            state,
            runtime,
        }
    }

    /// Stop the server and return every request it received
    pub fn finish(self) -> Vec<RecordedRequest> {
        let requests = self.requests();
        self.runtime.shutdown_background();
        requests
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Scripted responses not served yet
    pub fn remaining(&self) -> usize {
        self.state.responses.lock().unwrap().len()
    }
}

async fn query(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        headers: headers
            .iter()
            .map(|(k, v)| {
                let value = v.to_str().unwrap_or_default();
                (k.as_str().to_string(), value.to_string())
            })
            .collect(),
        body,
    });

    match state.responses.lock().unwrap().pop_front() {
        Some((status, body)) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(body),
        ),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "object": "error",
                "status": 500,
                "code": "internal_server_error",
                "message": "stub script exhausted"
            })),
        ),
    }
}

/// A Notion page with the five expense properties
pub fn page(id: &str, name: &str, date: &str, category: &str, amount: f64) -> Value {
    json!({
        "object": "page",
        "id": id,
        "created_time": "2024-01-01T00:00:00.000Z",
        "last_edited_time": "2024-01-01T00:00:00.000Z",
        "properties": {
            "Name": { "type": "title", "title": [{ "plain_text": name }] },
            "Date": { "type": "date", "date": { "start": date, "end": null } },
            "Category": { "type": "select", "select": { "name": category } },
            "Amount": { "type": "number", "number": amount },
            "Comment": {
                "type": "rich_text",
                "rich_text": [{ "plain_text": format!("note {}", id) }]
            }
        }
    })
}

/// One page of query results
pub fn results(pages: Vec<Value>, next_cursor: Option<&str>) -> Value {
    json!({
        "object": "list",
        "results": pages,
        "has_more": next_cursor.is_some(),
        "next_cursor": next_cursor
    })
}

/// Five records on the first page and three on the second
pub fn two_pages() -> Vec<(u16, Value)> {
    let first = (1..=5)
        .map(|i| {
            let date = format!("2024-01-{:02}", 10 - i);
            page(&format!("p{}", i), &format!("Item {}", i), &date, "Food", 10.0 * i as f64)
        })
        .collect();
    let second = (6..=8)
        .map(|i| {
            let date = format!("2024-02-{:02}", i);
            page(&format!("p{}", i), &format!("Item {}", i), &date, "Travel", 100.0)
        })
        .collect();
    vec![
        (200, results(first, Some("cursor-2"))),
        (200, results(second, None)),
    ]
}

pub fn unauthorized() -> (u16, Value) {
    (
        401,
        json!({
            "object": "error",
            "status": 401,
            "code": "unauthorized",
            "message": "API token is invalid."
        }),
    )
}
