//! JSON Export functionality
//!
//! Exports expenses as a versioned document with summary metadata.

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseRecord, Money};
use crate::reports::{categories, date_bounds};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Expense export document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Export metadata
    pub metadata: ExportMetadata,

    /// The exported expenses, in display order
    pub records: Vec<ExportedExpense>,
}

/// One expense as written to an export document
///
/// Same fields as [`ExpenseRecord`], with the amount in currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedExpense {
    pub page_id: String,
    pub name: String,
    pub date: Option<NaiveDate>,
    pub category: String,
    #[serde(with = "crate::models::money::units")]
    pub amount: Money,
    pub description: String,
}

impl From<&ExpenseRecord> for ExportedExpense {
    fn from(record: &ExpenseRecord) -> Self {
        Self {
            page_id: record.page_id.clone(),
            name: record.name.clone(),
            date: record.date,
            category: record.category.clone(),
            amount: record.amount,
            description: record.description.clone(),
        }
    }
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub record_count: usize,

    /// Sum of all amounts
    #[serde(with = "crate::models::money::units")]
    pub total: Money,

    /// Date range of the expenses (earliest)
    pub earliest: Option<NaiveDate>,

    /// Date range of the expenses (latest)
    pub latest: Option<NaiveDate>,

    /// Distinct category labels, sorted
    pub categories: Vec<String>,
}

impl ExpenseExport {
    /// Build an export document from records
    pub fn new(records: &[ExpenseRecord]) -> Self {
        let bounds = date_bounds(records);

        let metadata = ExportMetadata {
            record_count: records.len(),
            total: records.iter().map(|r| r.amount).sum(),
            earliest: bounds.map(|(first, _)| first),
            latest: bounds.map(|(_, last)| last),
            categories: categories(records),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            metadata,
            records: records.iter().map(ExportedExpense::from).collect(),
        }
    }
}

/// Export expenses to JSON
pub fn export_expenses_json<W: Write>(
    records: &[ExpenseRecord],
    writer: W,
    pretty: bool,
) -> ExpenseResult<()> {
    let export = ExpenseExport::new(records);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}
