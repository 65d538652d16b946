//! Storage layer for notion-expenses
//!
//! Nothing here is authoritative: Notion holds the data, and the snapshot
//! cache only memoizes the last fetch.

pub mod cache;
pub mod file_io;

pub use cache::{FlattenKey, Snapshot, SnapshotCache};
pub use file_io::{read_json_optional, write_json_atomic};
