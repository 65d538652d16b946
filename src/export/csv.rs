//! CSV Export functionality
//!
//! Exports flattened expenses with the columns
//! `Date,Name,Amount,Category,Description`.

use crate::error::ExpenseResult;
use crate::models::ExpenseRecord;
use std::io::Write;

/// Export expenses to CSV, in the order given
///
/// Undated records get an empty date cell. Categories are written as stored,
/// so a blank category stays blank.
pub fn export_expenses_csv<W: Write>(records: &[ExpenseRecord], writer: W) -> ExpenseResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["Date", "Name", "Amount", "Category", "Description"])?;

    for record in records {
        csv.write_record([
            record.date.map(|d| d.to_string()).unwrap_or_default(),
            record.name.clone(),
            format!("{:.2}", record.amount.as_f64()),
            record.category.clone(),
            record.description.clone(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}
