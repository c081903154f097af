//! Cell data structures.
//!
//! - [`CellContent`] - What the user entered (empty, text, number, or formula)
//! - [`CellValue`] - What the cell currently evaluates to
//! - [`Cell`] - Content plus its cached value

use std::fmt;

use super::format::format_number;
use super::formula::{Formula, FormulaError};
use crate::error::FormulaFormatError;

/// The content stored in a cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellContent {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Formula(Formula),
}

impl CellContent {
    /// Classify user input.
    ///
    /// - `""` -> Empty
    /// - anything that parses as a finite `f64` (surrounding whitespace
    ///   allowed) -> Number; `inf`, `NaN` and overflowing literals stay text
    /// - starts with `=` -> Formula (the rest is parsed; errors propagate)
    /// - otherwise -> Text, kept verbatim
    pub fn parse(input: &str) -> Result<CellContent, FormulaFormatError> {
        if input.is_empty() {
            return Ok(CellContent::Empty);
        }

        if let Some(n) = input.trim().parse::<f64>().ok().filter(|n| n.is_finite()) {
            return Ok(CellContent::Number(n));
        }

        if let Some(formula) = input.strip_prefix('=') {
            return Ok(CellContent::Formula(Formula::new(formula)?));
        }

        Ok(CellContent::Text(input.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellContent::Empty)
    }

    pub fn as_formula(&self) -> Option<&Formula> {
        match self {
            CellContent::Formula(f) => Some(f),
            _ => None,
        }
    }

    /// The persisted string form. Feeding it back to [`CellContent::parse`]
    /// yields equal content.
    pub fn to_input_string(&self) -> String {
        match self {
            CellContent::Empty => String::new(),
            CellContent::Text(s) => s.clone(),
            CellContent::Number(n) => n.to_string(),
            CellContent::Formula(f) => format!("={}", f),
        }
    }
}

/// The value a cell currently holds.
///
/// A cell that was never set, or was set to `""`, has the empty text value.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Error(FormulaError),
}

impl CellValue {
    /// The value of an empty cell.
    pub const EMPTY: CellValue = CellValue::Text(String::new());

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error(_))
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::EMPTY
    }
}

impl From<Result<f64, FormulaError>> for CellValue {
    fn from(result: Result<f64, FormulaError>) -> Self {
        match result {
            Ok(n) => CellValue::Number(n),
            Err(e) => CellValue::Error(e),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Error(e) => write!(f, "#ERROR: {}", e),
        }
    }
}

/// A stored cell: its content and the value last computed for it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    pub content: CellContent,
    pub value: CellValue,
}

impl Cell {
    pub fn new(content: CellContent, value: CellValue) -> Cell {
        Cell { content, value }
    }

    pub fn to_input_string(&self) -> String {
        self.content.to_input_string()
    }
}
