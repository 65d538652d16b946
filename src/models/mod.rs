//! Core data models for notion-expenses

pub mod expense;
pub mod money;

pub use expense::{sort_chronologically, ExpenseRecord, UNCATEGORIZED};
pub use money::Money;
