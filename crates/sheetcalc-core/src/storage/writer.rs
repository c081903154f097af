//! Writer for the JSON sheet format

use super::SheetFile;
use crate::error::{Result, SpreadsheetError};
use std::fs;
use std::path::Path;

/// Write a sheet file.
pub fn write_sheet(path: &Path, file: &SheetFile, pretty: bool) -> Result<()> {
    let content = write_sheet_content(file, pretty)?;
    fs::write(path, content).map_err(|e| SpreadsheetError::read_write(path.display().to_string(), e))
}

/// Render sheet JSON.
pub fn write_sheet_content(file: &SheetFile, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(file)
    } else {
        serde_json::to_string(file)
    };
    rendered.map_err(|e| SpreadsheetError::read_write("sheet JSON", e))
}
