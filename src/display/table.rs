//! Expense table formatting
//!
//! Renders flattened expense rows as a bordered terminal table.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::models::ExpenseRecord;

const MAX_TEXT_WIDTH: usize = 40;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl ExpenseRow {
    fn new(record: &ExpenseRecord, symbol: &str) -> Self {
        Self {
            date: record
                .date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            name: truncate(&record.name, MAX_TEXT_WIDTH),
            amount: record.amount.format_with_symbol(symbol),
            category: record.category_label().to_string(),
            description: truncate(&record.description, MAX_TEXT_WIDTH),
        }
    }
}

/// Format expenses as a table, in the order given
pub fn format_expense_table(records: &[ExpenseRecord], symbol: &str) -> String {
    if records.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows = records.iter().map(|r| ExpenseRow::new(r, symbol));
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::single(2), Alignment::right());
    table.to_string()
}
