//! Expense filtering
//!
//! Narrows a set of expenses to an inclusive date range and a set of
//! categories before any report is computed.

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::ExpenseRecord;

/// Filter criteria; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    /// Inclusive lower bound
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound
    pub end: Option<NaiveDate>,
    /// Categories to keep (compared case-insensitively); empty keeps all
    pub categories: Vec<String>,
}

impl ExpenseFilter {
    /// Build a filter, rejecting an inverted date range
    pub fn new(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        categories: Vec<String>,
    ) -> ExpenseResult<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(ExpenseError::Validation(format!(
                    "Start date {} is after end date {}",
                    s, e
                )));
            }
        }

        let categories = categories
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        Ok(Self {
            start,
            end,
            categories,
        })
    }

    /// Check if the filter has any effect
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none() && self.categories.is_empty()
    }

    /// Whether a single record passes
    ///
    /// Undated records never pass a date-bounded filter.
    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        if self.start.is_some() || self.end.is_some() {
            let Some(date) = record.date else {
                return false;
            };
            if self.start.is_some_and(|s| date < s) || self.end.is_some_and(|e| date > e) {
                return false;
            }
        }

        if !self.categories.is_empty() {
            let label = record.category_label();
            if !self
                .categories
                .iter()
                .any(|c| c.eq_ignore_ascii_case(label) || c.eq_ignore_ascii_case(&record.category))
            {
                return false;
            }
        }

        true
    }

    /// Keep the matching records, preserving order
    pub fn apply(&self, records: &[ExpenseRecord]) -> Vec<ExpenseRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Sorted, de-duplicated category labels present in the records
pub fn categories(records: &[ExpenseRecord]) -> Vec<String> {
    let mut labels: Vec<String> = records
        .iter()
        .map(|r| r.category_label().to_string())
        .collect();
    labels.sort();
    labels.dedup();
    labels
}

/// Earliest and latest dates present, if any record is dated
pub fn date_bounds(records: &[ExpenseRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = records.iter().filter_map(|r| r.date);
    let first = dates.next()?;
    Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}
