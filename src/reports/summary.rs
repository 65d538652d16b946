//! Summary Report
//!
//! Headline metrics for a set of expenses: total, average per active day,
//! highest single expense and transaction count.

use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::io::Write;

use super::filter::date_bounds;
use crate::error::ExpenseResult;
use crate::models::{ExpenseRecord, Money};

/// The largest single expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighestExpense {
    pub name: String,
    pub category: String,
    pub date: Option<NaiveDate>,
    pub amount: Money,
}

/// Summary Report
#[derive(Debug, Clone)]
pub struct SummaryReport {
    /// Sum of all amounts
    pub total: Money,
    /// Total divided by the number of distinct dates
    pub average_daily: Money,
    /// Number of distinct dates with at least one expense
    pub active_days: usize,
    /// Largest expense; first one wins on ties
    pub highest: Option<HighestExpense>,
    pub transaction_count: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl SummaryReport {
    /// Generate the summary for the given records
    pub fn generate(records: &[ExpenseRecord]) -> Self {
        let total: Money = records.iter().map(|r| r.amount).sum();
        let days: BTreeSet<NaiveDate> = records.iter().filter_map(|r| r.date).collect();

        let highest = records
            .iter()
            .fold(None::<&ExpenseRecord>, |best, r| match best {
                Some(b) if b.amount >= r.amount => Some(b),
                _ => Some(r),
            })
            .map(|r| HighestExpense {
                name: r.name.clone(),
                category: r.category_label().to_string(),
                date: r.date,
                amount: r.amount,
            });

        let bounds = date_bounds(records);

        Self {
            total,
            average_daily: total.average(days.len()),
            active_days: days.len(),
            highest,
            transaction_count: records.len(),
            first_date: bounds.map(|(first, _)| first),
            last_date: bounds.map(|(_, last)| last),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        if let (Some(first), Some(last)) = (self.first_date, self.last_date) {
            output.push_str(&format!("Period: {} to {}\n", first, last));
        }
        output.push_str(&format!(
            "{:<24} {}\n",
            "Total Expenses:",
            self.total.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "{:<24} {} ({} days)\n",
            "Average Daily Expense:",
            self.average_daily.format_with_symbol(symbol),
            self.active_days
        ));
        match &self.highest {
            Some(h) => {
                let label = if h.name.is_empty() { &h.category } else { &h.name };
                output.push_str(&format!(
                    "{:<24} {} ({})\n",
                    "Highest Expense:",
                    h.amount.format_with_symbol(symbol),
                    label
                ));
            }
            None => output.push_str(&format!("{:<24} -\n", "Highest Expense:")),
        }
        output.push_str(&format!(
            "{:<24} {}\n",
            "Number of Transactions:", self.transaction_count
        ));

        output
    }

    /// Export the report to CSV format (one metric per row)
    pub fn export_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Metric", "Value", "Detail"])?;
        csv.write_record([
            "Total Expenses".to_string(),
            format!("{:.2}", self.total.as_f64()),
            String::new(),
        ])?;
        csv.write_record([
            "Average Daily Expense".to_string(),
            format!("{:.2}", self.average_daily.as_f64()),
            format!("{} days", self.active_days),
        ])?;
        if let Some(h) = &self.highest {
            csv.write_record([
                "Highest Expense".to_string(),
                format!("{:.2}", h.amount.as_f64()),
                h.name.clone(),
            ])?;
        }
        csv.write_record([
            "Number of Transactions".to_string(),
            self.transaction_count.to_string(),
            String::new(),
        ])?;
        csv.flush()?;
        Ok(())
    }
}
