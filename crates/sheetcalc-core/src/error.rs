//! Error types for sheetcalc core.

use thiserror::Error;

use sheetcalc_engine::engine::CellName;
use sheetcalc_engine::{FormulaFormatError, InvalidNameError};

/// Errors that can occur when editing, loading or saving a spreadsheet.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    #[error(transparent)]
    InvalidName(#[from] InvalidNameError),

    #[error(transparent)]
    FormulaFormat(#[from] FormulaFormatError),

    #[error("circular dependency: {cell} would depend on itself")]
    Circular { cell: CellName },

    #[error("unable to read or write {target}: {source}")]
    ReadWrite {
        target: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl SpreadsheetError {
    pub(crate) fn read_write(
        target: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        SpreadsheetError::ReadWrite {
            target: target.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SpreadsheetError>;
