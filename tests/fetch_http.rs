//! Fetching over real HTTP against a scripted stub server

mod common;

use common::{two_pages, unauthorized, StubServer};
use notion_expenses::config::{SecretToken, Settings};
use notion_expenses::notion::{fetch_all, HttpTransport};
use notion_expenses::services::{ExpenseService, LoadSource};
use notion_expenses::storage::SnapshotCache;
use tempfile::TempDir;

const DATABASE_ID: &str = "db-123";

fn transport(server: &StubServer) -> HttpTransport {
    HttpTransport::with_base_url(
        &Settings::default(),
        SecretToken::new("secret_test"),
        &server.base_url,
    )
    .unwrap()
}

#[test]
fn fetches_every_page_in_order() {
    let server = StubServer::start(two_pages());
    let records = fetch_all(&transport(&server), DATABASE_ID, 5).unwrap();
    assert_eq!(server.remaining(), 0);
    let requests = server.finish();

    assert_eq!(records.len(), 8);
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3", "p4", "p5", "p6", "p7", "p8"]);

    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/v1/databases/db-123/query");
    assert_eq!(requests[0].header("authorization"), Some("Bearer secret_test"));
    assert_eq!(requests[0].header("notion-version"), Some("2022-06-28"));
    assert_eq!(requests[0].json(), serde_json::json!({ "page_size": 5 }));
    assert_eq!(
        requests[1].json(),
        serde_json::json!({ "page_size": 5, "start_cursor": "cursor-2" })
    );
}

#[test]
fn unauthorized_aborts_the_fetch() {
    let server = StubServer::start(vec![unauthorized()]);
    let err = fetch_all(&transport(&server), DATABASE_ID, 100).unwrap_err();
    server.finish();

    assert!(err.is_unauthorized());
    assert!(err.to_string().contains("API token is invalid."));
}

#[test]
fn failure_on_second_page_returns_nothing() {
    let mut script = two_pages();
    script[1] = unauthorized();
    let server = StubServer::start(script);

    let result = fetch_all(&transport(&server), DATABASE_ID, 5);
    server.finish();

    assert!(result.is_err());
}

#[test]
fn truncated_pagination_fails_instead_of_waiting() {
    let mut script = two_pages();
    script.truncate(1);
    let server = StubServer::start(script);

    let err = fetch_all(&transport(&server), DATABASE_ID, 5).unwrap_err();
    let requests = server.finish();

    assert!(!err.is_unauthorized());
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].json()["start_cursor"], "cursor-2");
}

#[test]
fn service_flattens_sorts_and_caches() {
    let temp_dir = TempDir::new().unwrap();
    let cache = SnapshotCache::new(temp_dir.path().to_path_buf());
    let server = StubServer::start(two_pages());

    let service = ExpenseService::new(transport(&server), DATABASE_ID, Settings::default())
        .with_cache(cache.clone());

    let loaded = service.load(false).unwrap();
    assert_eq!(loaded.source, LoadSource::Remote);
    assert_eq!(loaded.records.len(), 8);

    // first page is dated 2024-01-09 down to 2024-01-05
    let names: Vec<_> = loaded.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Item 5", "Item 4", "Item 3", "Item 2", "Item 1", "Item 6", "Item 7", "Item 8"]
    );
    assert_eq!(loaded.records[0].description, "note p5");
    assert_eq!(loaded.records[0].amount.cents(), 5000);

    // the stub has no responses left; a second load must come from the cache
    server.finish();
    let again = service.load(false).unwrap();
    assert_eq!(again.source, LoadSource::Cache);
    assert_eq!(again.records, loaded.records);
}
