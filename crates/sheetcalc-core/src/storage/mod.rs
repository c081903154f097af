//! Persisted spreadsheet format.
//!
//! A JSON object whose `Cells` field maps each cell name to an object with a
//! single `StringForm` field, the text that recreates the cell when entered:
//!
//! ```json
//! {
//!   "Cells": {
//!     "A1": { "StringForm": "5" },
//!     "B1": { "StringForm": "=A1+2" }
//!   }
//! }
//! ```

pub mod parser;
pub mod writer;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use parser::{parse_sheet, parse_sheet_content};
pub use writer::{write_sheet, write_sheet_content};

/// On-disk representation of a spreadsheet.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetFile {
    #[serde(rename = "Cells", default)]
    pub cells: BTreeMap<String, StoredCell>,
}

/// On-disk representation of one cell.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCell {
    #[serde(rename = "StringForm", default)]
    pub string_form: String,
}

impl StoredCell {
    pub fn new(string_form: impl Into<String>) -> Self {
        StoredCell {
            string_form: string_form.into(),
        }
    }
}
