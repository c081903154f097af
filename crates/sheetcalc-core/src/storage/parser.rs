//! Parser for the JSON sheet format

use super::SheetFile;
use crate::error::{Result, SpreadsheetError};
use std::fs;
use std::path::Path;

/// Read and parse a sheet file.
pub fn parse_sheet(path: &Path) -> Result<SheetFile> {
    let target = path.display().to_string();
    let content =
        fs::read_to_string(path).map_err(|e| SpreadsheetError::read_write(&target, e))?;
    parse_sheet_content(&content).map_err(|e| match e {
        SpreadsheetError::ReadWrite { source, .. } => SpreadsheetError::ReadWrite { target, source },
        other => other,
    })
}

/// Parse sheet JSON from a string. A JSON `null` document is an error.
pub fn parse_sheet_content(content: &str) -> Result<SheetFile> {
    let parsed: Option<SheetFile> = serde_json::from_str(content)
        .map_err(|e| SpreadsheetError::read_write("sheet JSON", e))?;
    parsed.ok_or_else(|| SpreadsheetError::read_write("sheet JSON", "document is null"))
}
