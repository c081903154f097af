//! Spreadsheet engine API.
//!
//! - [`CellName`] - Cell name validation and normalization (`a1` -> `A1`)
//! - [`tokenize`], [`Token`] - Formula tokenizer
//! - [`Formula`] - Validated, normalized formula with infix evaluation
//! - [`DependencyGraph`] - Dependee/dependent edge set over opaque nodes
//! - [`recalculation_order`] - Topological traversal with cycle detection
//! - [`Cell`], [`CellContent`], [`CellValue`] - Cell data structures
//! - [`format_number`] - Format values for display

mod cell;
mod cell_name;
mod eval;
mod format;
mod formula;
mod graph;
mod order;
mod token;

pub use cell::{Cell, CellContent, CellValue};
pub use cell_name::CellName;
pub use format::{format_number, format_number_with_precision};
pub use formula::{Formula, FormulaError};
pub use graph::DependencyGraph;
pub use order::{CycleDetected, recalculation_order};
pub use token::{Token, TokenKind, tokenize};
