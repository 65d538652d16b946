//! CLI commands that print expenses: the dashboard and the plain list

use crate::cli::FilterArgs;
use crate::config::Settings;
use crate::display::{format_dashboard, format_expense_table};
use crate::error::ExpenseResult;
use crate::models::ExpenseRecord;
use crate::services::dated;

/// Print the full dashboard for the filtered, dated expenses
pub fn handle_dashboard_command(
    records: Vec<ExpenseRecord>,
    settings: &Settings,
    filter: &FilterArgs,
) -> ExpenseResult<()> {
    let filter = filter.to_filter()?;
    let records = filter.apply(&dated(records));
    println!("{}", format_dashboard(&records, settings));
    Ok(())
}

/// Print the filtered expenses as a table in chronological order
///
/// With a limit only the last `limit` rows are shown.
pub fn handle_list_command(
    records: Vec<ExpenseRecord>,
    settings: &Settings,
    filter: &FilterArgs,
    limit: Option<usize>,
) -> ExpenseResult<()> {
    let filter = filter.to_filter()?;
    let records = filter.apply(&records);
    let shown = match limit {
        Some(n) if n < records.len() => &records[records.len() - n..],
        _ => &records[..],
    };

    println!("{}", format_expense_table(shown, &settings.currency_symbol));
    if shown.len() < records.len() {
        println!("Showing {} of {} expenses.", shown.len(), records.len());
    }
    Ok(())
}
