//! sheetcalc_engine - Formula parsing, evaluation and dependency tracking.

pub mod engine;
pub mod error;

pub use error::{FormulaFormatError, InvalidNameError};
