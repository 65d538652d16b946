//! Cursor-paginated retrieval of every record in a database

use tracing::info;

use super::client::QueryTransport;
use super::query::{QueryRequest, RawRecord};
use crate::error::{ExpenseError, ExpenseResult};

/// Fetch all records of a database, following cursors until `has_more` is false
///
/// Records are returned in arrival order. Any failure aborts the whole fetch;
/// no partial result is ever returned.
pub fn fetch_all<T: QueryTransport>(
    transport: &T,
    database_id: &str,
    page_size: u32,
) -> ExpenseResult<Vec<RawRecord>> {
    let mut records = Vec::new();
    let mut request = QueryRequest::first(page_size);
    let mut pages = 0usize;

    loop {
        let response = transport.query(database_id, &request)?;
        pages += 1;
        info!(
            page = pages,
            count = response.results.len(),
            has_more = response.has_more,
            "Retrieved page of records"
        );
        records.extend(response.results);

        if !response.has_more {
            break;
        }

        let cursor = response.next_cursor.ok_or_else(|| {
            ExpenseError::Protocol(format!(
                "page {} reports has_more without a next_cursor",
                pages
            ))
        })?;

        if request.start_cursor.as_ref() == Some(&cursor) {
            return Err(ExpenseError::Protocol(format!(
                "cursor {} was returned twice in a row",
                cursor.as_str()
            )));
        }

        request = QueryRequest::after(page_size, cursor);
    }

    info!(total = records.len(), pages, "Fetched all records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notion::query::{QueryCursor, QueryResponse};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Replays scripted responses and records the requests it saw
    struct ScriptedTransport {
        responses: RefCell<VecDeque<ExpenseResult<QueryResponse>>>,
        requests: RefCell<Vec<QueryRequest>>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<ExpenseResult<QueryResponse>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl QueryTransport for ScriptedTransport {
        fn query(&self, _database_id: &str, request: &QueryRequest) -> ExpenseResult<QueryResponse> {
            self.requests.borrow_mut().push(request.clone());
            self.responses
                .borrow_mut()
                .pop_front()
                .expect("unexpected extra request")
        }
    }

    fn page(ids: std::ops::Range<usize>, next: Option<&str>) -> ExpenseResult<QueryResponse> {
        Ok(QueryResponse {
            results: ids
                .map(|i| RawRecord {
                    id: format!("page-{}", i),
                    ..RawRecord::default()
                })
                .collect(),
            has_more: next.is_some(),
            next_cursor: next.map(QueryCursor::new),
        })
    }

    #[test]
    fn test_two_pages_are_concatenated() {
        let transport = ScriptedTransport::new(vec![page(0..5, Some("c1")), page(5..8, None)]);

        let records = fetch_all(&transport, "db", 100).unwrap();

        assert_eq!(records.len(), 8);
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids[0], "page-0");
        assert_eq!(ids[7], "page-7");

        let requests = transport.requests.borrow();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].start_cursor, None);
        assert_eq!(requests[1].start_cursor, Some(QueryCursor::new("c1")));
    }

    #[test]
    fn test_single_page() {
        let transport = ScriptedTransport::new(vec![page(0..2, None)]);
        assert_eq!(fetch_all(&transport, "db", 100).unwrap().len(), 2);
        assert_eq!(transport.requests.borrow().len(), 1);
    }

    #[test]
    fn test_empty_database() {
        let transport = ScriptedTransport::new(vec![page(0..0, None)]);
        assert!(fetch_all(&transport, "db", 100).unwrap().is_empty());
    }

    #[test]
    fn test_unauthorized_aborts_before_any_records() {
        let transport = ScriptedTransport::new(vec![Err(ExpenseError::Api {
            status: 401,
            code: "unauthorized".into(),
            message: "API token is invalid.".into(),
        })]);

        let err = fetch_all(&transport, "db", 100).unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_failure_on_later_page_discards_earlier_pages() {
        let transport = ScriptedTransport::new(vec![
            page(0..5, Some("c1")),
            Err(ExpenseError::Http("connection reset".into())),
        ]);

        let err = fetch_all(&transport, "db", 100).unwrap_err();
        assert!(matches!(err, ExpenseError::Http(_)));
    }

    #[test]
    fn test_has_more_without_cursor_is_protocol_error() {
        let transport = ScriptedTransport::new(vec![Ok(QueryResponse {
            results: Vec::new(),
            has_more: true,
            next_cursor: None,
        })]);

        let err = fetch_all(&transport, "db", 100).unwrap_err();
        assert!(matches!(err, ExpenseError::Protocol(_)));
    }

    #[test]
    fn test_repeated_cursor_is_protocol_error() {
        let transport =
            ScriptedTransport::new(vec![page(0..1, Some("same")), page(1..2, Some("same"))]);

        let err = fetch_all(&transport, "db", 100).unwrap_err();
        assert!(matches!(err, ExpenseError::Protocol(_)));
    }
}
