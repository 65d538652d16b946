//! CLI commands for data export
//!
//! Writes the filtered expenses to a file as CSV, JSON or YAML.

use crate::cli::{create_output, FilterArgs};
use crate::error::ExpenseResult;
use crate::export::{export_expenses_csv, export_expenses_json, export_expenses_yaml};
use crate::models::ExpenseRecord;
use clap::{Subcommand, ValueEnum};
use std::path::PathBuf;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (spreadsheet-compatible)
    Csv,
    /// JSON format with metadata
    Json,
    /// YAML format (human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export expenses to CSV
    Csv {
        /// Output file path
        output: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Export expenses to JSON
    Json {
        /// Output file path
        output: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Export expenses to YAML
    Yaml {
        /// Output file path
        output: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },
}

impl ExportCommands {
    pub fn format(&self) -> ExportFormat {
        match self {
            Self::Csv { .. } => ExportFormat::Csv,
            Self::Json { .. } => ExportFormat::Json,
            Self::Yaml { .. } => ExportFormat::Yaml,
        }
    }
}

/// Handle export commands
pub fn handle_export_command(records: Vec<ExpenseRecord>, cmd: ExportCommands) -> ExpenseResult<()> {
    let format = cmd.format();
    let (output, filter, pretty) = match cmd {
        ExportCommands::Csv { output, filter } => (output, filter, false),
        ExportCommands::Json {
            output,
            pretty,
            filter,
        } => (output, filter, pretty),
        ExportCommands::Yaml { output, filter } => (output, filter, false),
    };

    let records = filter.to_filter()?.apply(&records);
    export_to_file(&records, &output, format, pretty)?;

    println!("Exported {} expenses to: {}", records.len(), output.display());
    Ok(())
}

/// Write records to `path` in the given format
pub fn export_to_file(
    records: &[ExpenseRecord],
    path: &std::path::Path,
    format: ExportFormat,
    pretty: bool,
) -> ExpenseResult<()> {
    let mut writer = create_output(path)?;
    match format {
        ExportFormat::Csv => export_expenses_csv(records, &mut writer),
        ExportFormat::Json => export_expenses_json(records, &mut writer, pretty),
        ExportFormat::Yaml => export_expenses_yaml(records, &mut writer),
    }
}
