//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod cache;
pub mod export;
pub mod filter;
pub mod output;
pub mod report;
pub mod view;

pub use cache::{handle_cache_command, CacheCommands};
pub use export::{handle_export_command, ExportCommands, ExportFormat};
pub use filter::FilterArgs;
pub use output::create_output;
pub use report::{handle_report_command, ReportCommands};
pub use view::{handle_dashboard_command, handle_list_command};
