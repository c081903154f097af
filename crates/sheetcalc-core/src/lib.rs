//! sheetcalc-core - UI-agnostic spreadsheet model + storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::{SaveOptions, Spreadsheet};
pub use error::{Result, SpreadsheetError};

pub use sheetcalc_engine::engine::{CellContent, CellName, CellValue, Formula, FormulaError};
