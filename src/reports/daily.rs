//! Daily Trend
//!
//! Total spending per calendar date, rendered as a horizontal bar chart.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::io::Write;

use crate::display::report::{format_bar, right_align};
use crate::error::ExpenseResult;
use crate::models::{ExpenseRecord, Money};

const BAR_WIDTH: usize = 40;

/// One day's total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub total: Money,
    pub count: usize,
}

/// Daily totals in ascending date order
#[derive(Debug, Clone)]
pub struct DailyTrend {
    pub points: Vec<DailyPoint>,
}

impl DailyTrend {
    /// Generate the trend; undated records are skipped
    pub fn generate(records: &[ExpenseRecord]) -> Self {
        let mut by_day: BTreeMap<NaiveDate, (Money, usize)> = BTreeMap::new();
        for record in records {
            if let Some(date) = record.date {
                let entry = by_day.entry(date).or_insert((Money::zero(), 0));
                entry.0 += record.amount;
                entry.1 += 1;
            }
        }

        let points = by_day
            .into_iter()
            .map(|(date, (total, count))| DailyPoint { date, total, count })
            .collect();

        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Format the trend as a bar chart
    pub fn format_terminal(&self, symbol: &str) -> String {
        if self.points.is_empty() {
            return "No dated expenses.\n".to_string();
        }

        let max = self
            .points
            .iter()
            .map(|p| p.total.as_f64())
            .fold(0.0_f64, f64::max);
        let amounts: Vec<String> = self
            .points
            .iter()
            .map(|p| p.total.format_with_symbol(symbol))
            .collect();
        let width = amounts.iter().map(|a| a.chars().count()).max().unwrap_or(0);

        let mut output = String::new();
        for (point, amount) in self.points.iter().zip(&amounts) {
            output.push_str(&format!(
                "{}  {}  {}\n",
                point.date,
                right_align(amount, width),
                format_bar(point.total.as_f64(), max, BAR_WIDTH)
            ));
        }
        output
    }

    /// Export the trend to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Date", "Amount", "Count"])?;
        for point in &self.points {
            csv.write_record([
                point.date.to_string(),
                format!("{:.2}", point.total.as_f64()),
                point.count.to_string(),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }
}
