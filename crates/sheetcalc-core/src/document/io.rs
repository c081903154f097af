use super::Spreadsheet;
use crate::error::{Result, SpreadsheetError};
use crate::storage::{SheetFile, StoredCell, parse_sheet, parse_sheet_content, write_sheet, write_sheet_content};
use log::{info, warn};
use std::path::Path;

/// Options for writing a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// Indent the JSON output.
    pub pretty: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        SaveOptions { pretty: true }
    }
}

impl Spreadsheet {
    /// Open a sheet file. Every stored cell is replayed through
    /// [`Spreadsheet::set_contents_of_cell`]; any failure is a read error.
    pub fn open(path: &Path) -> Result<Self> {
        let mut sheet = Spreadsheet::new();
        sheet.load_file(path)?;
        Ok(sheet)
    }

    /// Build a sheet from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut sheet = Spreadsheet::new();
        sheet.load_json(json)?;
        Ok(sheet)
    }

    /// Replace this sheet's contents with a sheet file.
    ///
    /// Loading is transactional: on failure this sheet is left unchanged.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let file = parse_sheet(path)?;
        self.replace_with(&file, &path.display().to_string())
    }

    /// Replace this sheet's contents with JSON text. Transactional like
    /// [`Spreadsheet::load_file`].
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        let file = parse_sheet_content(json)?;
        self.replace_with(&file, "sheet JSON")
    }

    /// Save to `path` and clear the changed flag.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.save_with(path, SaveOptions::default())
    }

    pub fn save_with(&mut self, path: &Path, options: SaveOptions) -> Result<()> {
        write_sheet(path, &self.to_sheet_file(), options.pretty)?;
        info!("saved {} cell(s) to {}", self.cells.len(), path.display());
        self.changed = false;
        Ok(())
    }

    /// Render the persisted JSON (pretty-printed).
    pub fn to_json(&self) -> Result<String> {
        self.to_json_with(SaveOptions::default())
    }

    pub fn to_json_with(&self, options: SaveOptions) -> Result<String> {
        write_sheet_content(&self.to_sheet_file(), options.pretty)
    }

    fn to_sheet_file(&self) -> SheetFile {
        let cells = self
            .cells()
            .map(|(name, cell)| (name.to_string(), StoredCell::new(cell.to_input_string())))
            .collect();
        SheetFile { cells }
    }

    fn replace_with(&mut self, file: &SheetFile, target: &str) -> Result<()> {
        let mut fresh = Spreadsheet::new();
        for (name, stored) in &file.cells {
            if let Err(e) = fresh.set_contents_of_cell(name, &stored.string_form) {
                warn!("failed to load {}: cell {}: {}", target, name, e);
                return Err(SpreadsheetError::read_write(
                    target,
                    format!("cell {}: {}", name, e),
                ));
            }
        }
        fresh.changed = false;
        info!("loaded {} cell(s) from {}", fresh.cells.len(), target);
        *self = fresh;
        Ok(())
    }
}
