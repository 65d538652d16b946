//! Export module for notion-expenses
//!
//! Writes the filtered expense set to disk:
//! - CSV: one row per expense (spreadsheet-compatible)
//! - JSON: versioned document with metadata
//! - YAML: the same document, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_expenses_csv;
pub use json::{
    export_expenses_json, ExpenseExport, ExportMetadata, ExportedExpense, EXPORT_SCHEMA_VERSION,
};
pub use yaml::export_expenses_yaml;
