//! Recent Expenses
//!
//! The latest N dated expenses, newest first.

use std::io::Write;

use crate::display::format_expense_table;
use crate::error::ExpenseResult;
use crate::export::csv::export_expenses_csv;
use crate::models::ExpenseRecord;

/// Recent Expenses
#[derive(Debug, Clone)]
pub struct RecentExpenses {
    pub records: Vec<ExpenseRecord>,
}

impl RecentExpenses {
    /// Select the latest `limit` records by date
    ///
    /// Records on the same date keep their input order. Undated records are
    /// never selected.
    pub fn generate(records: &[ExpenseRecord], limit: usize) -> Self {
        let mut dated: Vec<ExpenseRecord> =
            records.iter().filter(|r| r.is_dated()).cloned().collect();
        dated.sort_by(|a, b| b.date.cmp(&a.date));
        dated.truncate(limit);
        Self { records: dated }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = format_expense_table(&self.records, symbol);
        output.push('\n');
        output
    }

    /// Export to CSV using the expense export columns
    pub fn export_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        export_expenses_csv(&self.records, writer)
    }
}
