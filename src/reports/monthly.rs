//! Monthly Trend
//!
//! Pivot of spending by calendar month and category. Every selected category
//! gets a value for every month in range, zero-filled where nothing was spent.

use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::Write;

use super::filter::categories;
use crate::display::report::{left_align, right_align, truncate};
use crate::error::ExpenseResult;
use crate::models::{ExpenseRecord, Money};

const MONTH_WIDTH: usize = 8;
const COLUMN_WIDTH: usize = 16;

/// A calendar month, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month after this one
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Monthly Trend
#[derive(Debug, Clone)]
pub struct MonthlyTrend {
    /// Every month between the first and last dated record, inclusive
    pub months: Vec<YearMonth>,
    /// Column order
    pub categories: Vec<String>,
    /// One row per month, one value per category in `categories` order
    pub totals: Vec<Vec<Money>>,
}

impl MonthlyTrend {
    /// Generate the pivot for the given categories
    ///
    /// Categories are matched against the display label, so "Uncategorized"
    /// selects blank-category records. Undated records are skipped.
    pub fn generate(records: &[ExpenseRecord], selected: &[String]) -> Self {
        let columns: HashMap<&str, usize> = selected
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();

        let mut by_month: BTreeMap<YearMonth, Vec<Money>> = BTreeMap::new();
        let mut seen: BTreeSet<YearMonth> = BTreeSet::new();

        for record in records {
            let Some(date) = record.date else { continue };
            let month = YearMonth::of(date);
            seen.insert(month);

            if let Some(&col) = columns.get(record.category_label()) {
                let row = by_month
                    .entry(month)
                    .or_insert_with(|| vec![Money::zero(); selected.len()]);
                row[col] += record.amount;
            }
        }

        let months = match (seen.first(), seen.last()) {
            (Some(&first), Some(&last)) => {
                let mut months = Vec::new();
                let mut current = first;
                while current <= last {
                    months.push(current);
                    current = current.next();
                }
                months
            }
            _ => Vec::new(),
        };

        let totals = months
            .iter()
            .map(|m| {
                by_month
                    .get(m)
                    .cloned()
                    .unwrap_or_else(|| vec![Money::zero(); selected.len()])
            })
            .collect();

        Self {
            months,
            categories: selected.to_vec(),
            totals,
        }
    }

    /// Generate the pivot for the first `limit` categories in alphabetical order
    pub fn generate_default(records: &[ExpenseRecord], limit: usize) -> Self {
        let mut selected = categories(records);
        selected.truncate(limit);
        Self::generate(records, &selected)
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty() || self.categories.is_empty()
    }

    /// Sum of one category across all months
    pub fn category_total(&self, index: usize) -> Money {
        self.totals.iter().filter_map(|row| row.get(index)).copied().sum()
    }

    /// Format the pivot as a month-by-category grid
    pub fn format_terminal(&self, symbol: &str) -> String {
        if self.is_empty() {
            return "No monthly data.\n".to_string();
        }

        let mut output = String::new();
        output.push_str(&left_align("Month", MONTH_WIDTH));
        for category in &self.categories {
            output.push(' ');
            output.push_str(&right_align(
                &truncate(category, COLUMN_WIDTH),
                COLUMN_WIDTH,
            ));
        }
        output.push('\n');

        for (month, row) in self.months.iter().zip(&self.totals) {
            output.push_str(&left_align(&month.to_string(), MONTH_WIDTH));
            for value in row {
                output.push(' ');
                output.push_str(&right_align(&value.format_with_symbol(symbol), COLUMN_WIDTH));
            }
            output.push('\n');
        }

        output
    }

    /// Export the pivot to CSV format, one column per category
    pub fn export_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        let mut csv = csv::Writer::from_writer(writer);

        let mut header = vec!["Month".to_string()];
        header.extend(self.categories.iter().cloned());
        csv.write_record(&header)?;

        for (month, row) in self.months.iter().zip(&self.totals) {
            let mut line = vec![month.to_string()];
            line.extend(row.iter().map(|v| format!("{:.2}", v.as_f64())));
            csv.write_record(&line)?;
        }

        csv.flush()?;
        Ok(())
    }
}
