//! Expense service
//!
//! Ties the transport, the flattener and the snapshot cache together into a
//! single `load` call that yields chronologically sorted expense rows.

use std::time::Duration;

use tracing::{info, warn};

use crate::config::Settings;
use crate::error::ExpenseResult;
use crate::models::{sort_chronologically, ExpenseRecord};
use crate::notion::{fetch_all, Flattener, QueryTransport};
use crate::storage::{FlattenKey, Snapshot, SnapshotCache};

/// Where a set of loaded records came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Fetched from the API during this call
    Remote,
    /// Served from a snapshot younger than the cache TTL
    Cache,
}

/// Records plus where they came from
#[derive(Debug, Clone)]
pub struct LoadedExpenses {
    pub records: Vec<ExpenseRecord>,
    pub source: LoadSource,
}

/// Service for loading expenses from one Notion database
pub struct ExpenseService<T: QueryTransport> {
    transport: T,
    database_id: String,
    settings: Settings,
    cache: Option<SnapshotCache>,
}

impl<T: QueryTransport> ExpenseService<T> {
    /// Create a new service without a snapshot cache
    pub fn new(transport: T, database_id: impl Into<String>, settings: Settings) -> Self {
        Self {
            transport,
            database_id: database_id.into(),
            settings,
            cache: None,
        }
    }

    /// Attach a snapshot cache; ignored when the TTL is zero
    pub fn with_cache(mut self, cache: SnapshotCache) -> Self {
        if self.settings.cache_enabled() {
            self.cache = Some(cache);
        }
        self
    }

    /// Load all expenses, sorted by date (undated rows last)
    ///
    /// With `refresh` the cache is bypassed but still updated. Fetch failures
    /// are fatal; failing to write the snapshot is only logged.
    pub fn load(&self, refresh: bool) -> ExpenseResult<LoadedExpenses> {
        if !refresh {
            if let Some(snapshot) = self.cached() {
                info!(
                    count = snapshot.records.len(),
                    fetched_at = %snapshot.fetched_at,
                    "Using cached snapshot"
                );
                return Ok(LoadedExpenses {
                    records: snapshot.records,
                    source: LoadSource::Cache,
                });
            }
        }

        let records = self.fetch()?;

        if let Some(cache) = &self.cache {
            let snapshot = Snapshot::new(
                self.database_id.trim(),
                FlattenKey::from_settings(&self.settings),
                records.clone(),
            );
            if let Err(e) = cache.save(&snapshot) {
                warn!(error = %e, "Failed to write snapshot");
            }
        }

        Ok(LoadedExpenses {
            records,
            source: LoadSource::Remote,
        })
    }

    /// Fetch and flatten without touching the cache
    pub fn fetch(&self) -> ExpenseResult<Vec<ExpenseRecord>> {
        let raw = fetch_all(
            &self.transport,
            &self.database_id,
            self.settings.effective_page_size(),
        )?;

        let flattener = Flattener::new(
            self.settings.properties.clone(),
            self.settings.utc_offset_minutes,
        );
        let mut records = flattener.flatten_all(&raw);
        sort_chronologically(&mut records);

        info!(count = records.len(), "Processed records");
        Ok(records)
    }

    fn cached(&self) -> Option<Snapshot> {
        let cache = self.cache.as_ref()?;
        cache.load_fresh(
            &self.database_id,
            &FlattenKey::from_settings(&self.settings),
            Duration::from_secs(self.settings.cache_ttl_secs),
        )
    }
}

/// Keep only dated records, for chronological views
///
/// Dropped rows are logged with their count.
pub fn dated(records: Vec<ExpenseRecord>) -> Vec<ExpenseRecord> {
    let total = records.len();
    let kept: Vec<_> = records.into_iter().filter(|r| r.is_dated()).collect();
    let dropped = total - kept.len();
    if dropped > 0 {
        warn!(dropped, "Skipping records without a usable date");
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExpenseError;
    use crate::models::Money;
    use crate::notion::{QueryRequest, QueryResponse, RawRecord};
    use chrono::NaiveDate;
    use serde_json::json;
    use std::cell::Cell;
    use tempfile::TempDir;

    /// Serves the same single page on every call and counts calls
    struct FixedTransport {
        records: Vec<RawRecord>,
        calls: Cell<usize>,
        fail: bool,
    }

    impl FixedTransport {
        fn new(records: Vec<RawRecord>) -> Self {
            Self {
                records,
                calls: Cell::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(Vec::new())
            }
        }
    }

    impl QueryTransport for FixedTransport {
        fn query(&self, _database_id: &str, _request: &QueryRequest) -> ExpenseResult<QueryResponse> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(ExpenseError::Api {
                    status: 401,
                    code: "unauthorized".into(),
                    message: "API token is invalid.".into(),
                });
            }
            Ok(QueryResponse {
                results: self.records.clone(),
                has_more: false,
                next_cursor: None,
            })
        }
    }

    fn raw(id: &str, date: Option<&str>, amount: f64) -> RawRecord {
        let mut properties = json!({
            "Amount": { "type": "number", "number": amount },
            "Category": { "type": "select", "select": { "name": "Food" } }
        });
        if let Some(date) = date {
            properties["Date"] = json!({ "type": "date", "date": { "start": date } });
        }
        serde_json::from_value(json!({ "id": id, "properties": properties })).unwrap()
    }

    #[test]
    fn test_load_sorts_by_date() {
        let transport = FixedTransport::new(vec![
            raw("b", Some("2024-02-01"), 2.0),
            raw("undated", None, 9.0),
            raw("a", Some("2024-01-01"), 1.0),
        ]);
        let service = ExpenseService::new(&transport, "db", Settings::default());

        let loaded = service.load(false).unwrap();

        assert_eq!(loaded.source, LoadSource::Remote);
        let ids: Vec<_> = loaded.records.iter().map(|r| r.page_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "undated"]);
    }

    #[test]
    fn test_cache_short_circuits_transport() {
        let temp_dir = TempDir::new().unwrap();
        let transport = FixedTransport::new(vec![raw("a", Some("2024-01-01"), 1.0)]);
        let service = ExpenseService::new(&transport, "db", Settings::default())
            .with_cache(SnapshotCache::new(temp_dir.path().to_path_buf()));

        let first = service.load(false).unwrap();
        let second = service.load(false).unwrap();

        assert_eq!(first.source, LoadSource::Remote);
        assert_eq!(second.source, LoadSource::Cache);
        assert_eq!(second.records, first.records);
        assert_eq!(transport.calls.get(), 1);

        let refreshed = service.load(true).unwrap();
        assert_eq!(refreshed.source, LoadSource::Remote);
        assert_eq!(transport.calls.get(), 2);
    }

    #[test]
    fn test_changed_utc_offset_refetches() {
        let temp_dir = TempDir::new().unwrap();
        let transport = FixedTransport::new(vec![raw("a", Some("2024-01-01"), 1.0)]);
        let cache = SnapshotCache::new(temp_dir.path().to_path_buf());

        ExpenseService::new(&transport, "db", Settings::default())
            .with_cache(cache.clone())
            .load(false)
            .unwrap();

        let settings = Settings {
            utc_offset_minutes: 0,
            ..Settings::default()
        };
        let loaded = ExpenseService::new(&transport, "db", settings)
            .with_cache(cache)
            .load(false)
            .unwrap();

        assert_eq!(loaded.source, LoadSource::Remote);
        assert_eq!(transport.calls.get(), 2);
    }

    #[test]
    fn test_zero_ttl_disables_cache() {
        let temp_dir = TempDir::new().unwrap();
        let transport = FixedTransport::new(vec![raw("a", Some("2024-01-01"), 1.0)]);
        let settings = Settings {
            cache_ttl_secs: 0,
            ..Settings::default()
        };
        let service = ExpenseService::new(&transport, "db", settings)
            .with_cache(SnapshotCache::new(temp_dir.path().to_path_buf()));

        service.load(false).unwrap();
        service.load(false).unwrap();

        assert_eq!(transport.calls.get(), 2);
    }

    #[test]
    fn test_unauthorized_returns_no_records() {
        let transport = FixedTransport::failing();
        let service = ExpenseService::new(&transport, "db", Settings::default());

        let err = service.load(false).unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_dated_drops_undated() {
        let records = vec![
            ExpenseRecord::new(NaiveDate::from_ymd_opt(2024, 1, 1), Money::zero()),
            ExpenseRecord::new(None, Money::zero()),
        ];
        assert_eq!(dated(records).len(), 1);
    }
}
