//! notion-expenses - Terminal expense dashboard backed by a Notion database
//!
//! This library fetches every page of a Notion expenses database, flattens
//! each page's typed property bag into an [`models::ExpenseRecord`], and
//! computes the dashboard reports over the resulting rows.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, settings and Notion credentials
//! - `error`: Custom error types
//! - `notion`: Query transport, pagination and property flattening
//! - `models`: Expense rows and money amounts
//! - `storage`: Snapshot cache of the last fetch
//! - `services`: Loading expenses through the cache
//! - `reports`: Filtering and analytics
//! - `display`: Terminal tables, charts and the dashboard page
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers for the `expenses` binary
//! - `logging`: `tracing` subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use notion_expenses::config::{Credentials, ExpensePaths, Settings};
//! use notion_expenses::notion::HttpTransport;
//! use notion_expenses::services::ExpenseService;
//!
//! let paths = ExpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let credentials = Credentials::resolve(None, None, &paths)?;
//! let transport = HttpTransport::new(&settings, credentials.token)?;
//! let records = ExpenseService::new(transport, credentials.database_id, settings)
//!     .load(false)?
//!     .records;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod notion;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
