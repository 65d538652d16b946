//! Expense model
//!
//! One flattened row of the Notion expenses database.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// Label used wherever a blank category has to be shown
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A single expense, flattened from one Notion page
///
/// Every field is always populated: missing source values are replaced by
/// defaults during flattening (empty text, zero amount, no date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Notion page id
    #[serde(default)]
    pub page_id: String,

    /// Title of the page
    #[serde(default)]
    pub name: String,

    /// Calendar date of the expense, if one could be parsed
    pub date: Option<NaiveDate>,

    /// Category label (open set, defined by the Notion select options)
    #[serde(default)]
    pub category: String,

    /// Amount; sign is not validated
    #[serde(default)]
    pub amount: Money,

    /// Free-text description
    #[serde(default)]
    pub description: String,
}

impl ExpenseRecord {
    /// Create a record with the given date and amount and blank text fields
    pub fn new(date: Option<NaiveDate>, amount: Money) -> Self {
        Self {
            page_id: String::new(),
            name: String::new(),
            date,
            category: String::new(),
            amount,
            description: String::new(),
        }
    }

    /// Builder-style category setter
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder-style description setter
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder-style name setter
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Category for display, substituting a label for blanks
    pub fn category_label(&self) -> &str {
        if self.category.trim().is_empty() {
            UNCATEGORIZED
        } else {
            &self.category
        }
    }

    pub fn is_dated(&self) -> bool {
        self.date.is_some()
    }
}

/// Sort records by date ascending, keeping fetch order for equal dates
///
/// Undated records are moved after all dated ones.
pub fn sort_chronologically(records: &mut [ExpenseRecord]) {
    // sort_by_key is stable
    records.sort_by_key(|r| (r.date.is_none(), r.date));
}
