//! Output file helper shared by report and export commands

use crate::error::{ExpenseError, ExpenseResult};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Create (or truncate) an output file for buffered writing
pub fn create_output(path: &Path) -> ExpenseResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
