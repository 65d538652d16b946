//! Category Breakdown
//!
//! Spending per category with totals, averages, counts and share of the whole.

use std::collections::HashMap;
use std::io::Write;

use crate::display::report::{format_bar, format_percentage, right_align, truncate};
use crate::error::ExpenseResult;
use crate::models::{ExpenseRecord, Money};

const BAR_WIDTH: usize = 30;
const NAME_WIDTH: usize = 24;

/// Spending for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpending {
    pub category: String,
    pub total: Money,
    pub average: Money,
    pub count: usize,
    /// Share of the absolute grand total, 0-100
    pub percentage: f64,
}

/// Category Breakdown
#[derive(Debug, Clone)]
pub struct CategoryBreakdown {
    /// Sorted by total descending, then name
    pub categories: Vec<CategorySpending>,
    pub total: Money,
    pub transaction_count: usize,
}

impl CategoryBreakdown {
    /// Generate the breakdown; blank categories are grouped as "Uncategorized"
    pub fn generate(records: &[ExpenseRecord]) -> Self {
        let mut by_category: HashMap<&str, (Money, usize)> = HashMap::new();
        for record in records {
            let entry = by_category
                .entry(record.category_label())
                .or_insert((Money::zero(), 0));
            entry.0 += record.amount;
            entry.1 += 1;
        }

        let total: Money = records.iter().map(|r| r.amount).sum();
        let abs_total = by_category
            .values()
            .map(|(m, _)| m.abs())
            .sum::<Money>()
            .cents();

        let mut categories: Vec<CategorySpending> = by_category
            .into_iter()
            .map(|(name, (sum, count))| CategorySpending {
                category: name.to_string(),
                total: sum,
                average: sum.average(count),
                count,
                percentage: if abs_total == 0 {
                    0.0
                } else {
                    sum.abs().cents() as f64 / abs_total as f64 * 100.0
                },
            })
            .collect();

        categories.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category.cmp(&b.category))
        });

        Self {
            categories,
            total,
            transaction_count: records.len(),
        }
    }

    /// Share of the total per category as percentage bars
    pub fn format_distribution(&self) -> String {
        let mut output = String::new();
        for c in &self.categories {
            output.push_str(&format!(
                "{:<NAME_WIDTH$} {:>6}  {}\n",
                truncate(&c.category, NAME_WIDTH),
                format_percentage(c.percentage),
                format_bar(c.percentage, 100.0, BAR_WIDTH)
            ));
        }
        output
    }

    /// Format the breakdown as a table with a distribution bar per category
    pub fn format_terminal(&self, symbol: &str) -> String {
        if self.categories.is_empty() {
            return "No expenses.\n".to_string();
        }

        let max = self
            .categories
            .iter()
            .map(|c| c.total.as_f64())
            .fold(0.0_f64, f64::max);

        let mut output = String::new();
        output.push_str(&format!(
            "{:<NAME_WIDTH$} {:>14} {:>12} {:>6} {:>6}\n",
            "Category", "Total", "Average", "Count", "%"
        ));
        output.push_str(&"-".repeat(NAME_WIDTH + 14 + 12 + 6 + 6 + 4));
        output.push('\n');

        for c in &self.categories {
            output.push_str(&format!(
                "{:<NAME_WIDTH$} {} {} {:>6} {:>6}  {}\n",
                truncate(&c.category, NAME_WIDTH),
                right_align(&c.total.format_with_symbol(symbol), 14),
                right_align(&c.average.format_with_symbol(symbol), 12),
                c.count,
                format_percentage(c.percentage),
                format_bar(c.total.as_f64(), max, BAR_WIDTH)
            ));
        }

        output.push_str(&"-".repeat(NAME_WIDTH + 14 + 12 + 6 + 6 + 4));
        output.push('\n');
        output.push_str(&format!(
            "{:<NAME_WIDTH$} {} {:>12} {:>6}\n",
            "TOTAL",
            right_align(&self.total.format_with_symbol(symbol), 14),
            "",
            self.transaction_count
        ));

        output
    }

    /// Export the breakdown to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Category", "Total", "Average", "Count", "Percentage"])?;
        for c in &self.categories {
            csv.write_record([
                c.category.clone(),
                format!("{:.2}", c.total.as_f64()),
                format!("{:.2}", c.average.as_f64()),
                c.count.to_string(),
                format!("{:.2}", c.percentage),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }
}
