//! Reports module for notion-expenses
//!
//! Analytics computed over a filtered set of expenses: headline metrics,
//! daily and monthly trends, category breakdown and recent transactions.

pub mod category;
pub mod daily;
pub mod filter;
pub mod monthly;
pub mod recent;
pub mod summary;

pub use category::{CategoryBreakdown, CategorySpending};
pub use daily::{DailyPoint, DailyTrend};
pub use filter::{categories, date_bounds, ExpenseFilter};
pub use monthly::{MonthlyTrend, YearMonth};
pub use recent::RecentExpenses;
pub use summary::{HighestExpense, SummaryReport};
