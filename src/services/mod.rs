//! Service layer for notion-expenses
//!
//! Business logic between the Notion client and the CLI.

pub mod expenses;

pub use expenses::{dated, ExpenseService, LoadSource, LoadedExpenses};
