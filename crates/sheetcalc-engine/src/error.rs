//! Error types for the formula engine.

use thiserror::Error;

/// A formula failed one of the grammar rules. No partially built formula
/// exists when this is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid formula: {message}")]
pub struct FormulaFormatError {
    message: String,
}

impl FormulaFormatError {
    pub fn new(message: impl Into<String>) -> Self {
        FormulaFormatError {
            message: message.into(),
        }
    }

    /// The violated rule, without the "invalid formula" prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors about cell names: either the text is not a cell name at all, or a
/// formula referenced a cell that has no numeric value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidNameError {
    #[error("invalid cell name: {0:?}")]
    Malformed(String),

    #[error("cell {0} has no numeric value")]
    NoValue(String),
}
