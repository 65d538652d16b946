//! Notion database access
//!
//! Only the database query endpoint is modelled: a paginated fetch of raw
//! page objects and the flattening of their property bags into expense rows.

pub mod client;
pub mod fetch;
pub mod flatten;
pub mod property;
pub mod query;

pub use client::{HttpTransport, QueryTransport};
pub use fetch::fetch_all;
pub use flatten::{parse_date, Flattener};
pub use property::PropertyValue;
pub use query::{QueryCursor, QueryRequest, QueryResponse, RawRecord};
