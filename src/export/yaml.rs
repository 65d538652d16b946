//! YAML Export functionality
//!
//! Same document as the JSON export, for reading by humans.

use crate::error::ExpenseResult;
use crate::export::json::ExpenseExport;
use crate::models::ExpenseRecord;
use std::io::Write;

/// Export expenses to YAML with a short header comment
pub fn export_expenses_yaml<W: Write>(records: &[ExpenseRecord], mut writer: W) -> ExpenseResult<()> {
    let export = ExpenseExport::new(records);

    writeln!(writer, "# Notion expenses export")?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# App Version: {}", export.app_version)?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, &export)?;

    Ok(())
}
