//! Dashboard page
//!
//! Renders every report panel for one set of expenses as a single text page.

use super::report::{double_separator, format_header, section};
use crate::config::Settings;
use crate::models::ExpenseRecord;
use crate::reports::{CategoryBreakdown, DailyTrend, MonthlyTrend, RecentExpenses, SummaryReport};

const PAGE_WIDTH: usize = 72;

/// Render the full dashboard
pub fn format_dashboard(records: &[ExpenseRecord], settings: &Settings) -> String {
    let symbol = settings.currency_symbol.as_str();
    let categories = CategoryBreakdown::generate(records);

    let mut output = String::new();
    output.push_str(&format_header("Expense Analytics Dashboard", PAGE_WIDTH));
    output.push('\n');
    output.push_str(&double_separator(PAGE_WIDTH));
    output.push_str("\n\n");

    if records.is_empty() {
        output.push_str("No expenses match the current filters.\n");
        return output;
    }

    let panels = [
        (
            "Key Metrics",
            SummaryReport::generate(records).format_terminal(symbol),
        ),
        (
            "Daily Expenses Trend",
            DailyTrend::generate(records).format_terminal(symbol),
        ),
        ("Category-wise Distribution", categories.format_distribution()),
        ("Category-wise Analysis", categories.format_terminal(symbol)),
        (
            "Monthly Category Trends",
            MonthlyTrend::generate_default(records, settings.trend_categories)
                .format_terminal(symbol),
        ),
        (
            "Recent Transactions",
            RecentExpenses::generate(records, settings.recent_limit).format_terminal(symbol),
        ),
    ];

    for (title, body) in panels {
        output.push_str(&section(title));
        output.push_str(&body);
        output.push('\n');
    }

    output
}
