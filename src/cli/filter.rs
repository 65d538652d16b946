//! Shared filter flags
//!
//! `--from`, `--to` and `--category` as accepted by every command that reads
//! expenses.

use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::ExpenseFilter;
use chrono::NaiveDate;
use clap::Args;

/// Filter flags
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Start date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// End date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Only include this category (repeatable)
    #[arg(short, long = "category")]
    pub categories: Vec<String>,
}

impl FilterArgs {
    /// Parse the flags into a filter
    pub fn to_filter(&self) -> ExpenseResult<ExpenseFilter> {
        let start = parse_date_arg("start", self.from.as_deref())?;
        let end = parse_date_arg("end", self.to.as_deref())?;
        ExpenseFilter::new(start, end, self.categories.clone())
    }
}

fn parse_date_arg(label: &str, value: Option<&str>) -> ExpenseResult<Option<NaiveDate>> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
                ExpenseError::Validation(format!(
                    "Invalid {} date format: {}. Use YYYY-MM-DD",
                    label, s
                ))
            })
        })
        .transpose()
}
