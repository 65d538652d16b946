//! CLI commands for reports
//!
//! Each report prints to the terminal or, with `--output`, writes CSV.

use crate::cli::{create_output, FilterArgs};
use crate::config::Settings;
use crate::error::ExpenseResult;
use crate::models::ExpenseRecord;
use crate::reports::{CategoryBreakdown, DailyTrend, MonthlyTrend, RecentExpenses, SummaryReport};
use crate::services::dated;
use clap::Subcommand;
use std::path::PathBuf;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Headline metrics: total, daily average, highest expense, count
    Summary {
        #[command(flatten)]
        filter: FilterArgs,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Total spending per day
    Daily {
        #[command(flatten)]
        filter: FilterArgs,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Spending by category
    #[command(alias = "category")]
    Categories {
        #[command(flatten)]
        filter: FilterArgs,

        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Month-by-category spending
    ///
    /// Columns are the filtered categories, or the first few alphabetically
    /// when no category filter is given.
    Monthly {
        #[command(flatten)]
        filter: FilterArgs,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Latest expenses, newest first
    Recent {
        #[command(flatten)]
        filter: FilterArgs,

        /// Number of expenses to show (default from settings)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    records: Vec<ExpenseRecord>,
    settings: &Settings,
    cmd: ReportCommands,
) -> ExpenseResult<()> {
    let symbol = settings.currency_symbol.as_str();
    let records = dated(records);

    match cmd {
        ReportCommands::Summary { filter, output } => {
            let report = SummaryReport::generate(&filter.to_filter()?.apply(&records));
            emit(output, "Summary report", |w| report.export_csv(w), || {
                report.format_terminal(symbol)
            })
        }
        ReportCommands::Daily { filter, output } => {
            let report = DailyTrend::generate(&filter.to_filter()?.apply(&records));
            emit(output, "Daily report", |w| report.export_csv(w), || {
                report.format_terminal(symbol)
            })
        }
        ReportCommands::Categories {
            filter,
            top,
            output,
        } => {
            let mut report = CategoryBreakdown::generate(&filter.to_filter()?.apply(&records));
            if let Some(n) = top {
                report.categories.truncate(n);
            }
            emit(output, "Category report", |w| report.export_csv(w), || {
                report.format_terminal(symbol)
            })
        }
        ReportCommands::Monthly { filter, output } => {
            let expense_filter = filter.to_filter()?;
            let filtered = expense_filter.apply(&records);
            let limit = if expense_filter.categories.is_empty() {
                settings.trend_categories
            } else {
                usize::MAX
            };
            let report = MonthlyTrend::generate_default(&filtered, limit);
            emit(output, "Monthly report", |w| report.export_csv(w), || {
                report.format_terminal(symbol)
            })
        }
        ReportCommands::Recent {
            filter,
            limit,
            output,
        } => {
            let report = RecentExpenses::generate(
                &filter.to_filter()?.apply(&records),
                limit.unwrap_or(settings.recent_limit),
            );
            emit(output, "Recent expenses", |w| report.export_csv(w), || {
                report.format_terminal(symbol)
            })
        }
    }
}

/// Write CSV to `output` if given, otherwise print the terminal rendering
fn emit<E, F>(output: Option<PathBuf>, label: &str, export: E, format: F) -> ExpenseResult<()>
where
    E: FnOnce(&mut dyn std::io::Write) -> ExpenseResult<()>,
    F: FnOnce() -> String,
{
    match output {
        Some(path) => {
            let mut writer = create_output(&path)?;
            export(&mut writer)?;
            println!("{} exported to: {}", label, path.display());
        }
        None => println!("{}", format()),
    }
    Ok(())
}
