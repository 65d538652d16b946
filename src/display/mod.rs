//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses and report panels for the
//! terminal, including tables and text bar charts.

pub mod dashboard;
pub mod report;
pub mod table;

pub use dashboard::format_dashboard;
pub use table::format_expense_table;
