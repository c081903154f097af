//! Cell name parsing and normalization.
//!
//! A cell name is one or more ASCII letters followed by one or more digits
//! (e.g. "A1", "b22", "AbC7"). Names are case-insensitive and are stored
//! uppercased, so "a1" and "A1" refer to the same cell.
//!
//! # Examples
//!
//! ```
//! use sheetcalc_engine::engine::CellName;
//!
//! let name = CellName::parse("b3").unwrap();
//! assert_eq!(name.as_str(), "B3");
//! assert!(CellName::parse("3B").is_err());
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

use crate::error::InvalidNameError;

/// A validated, uppercased cell name.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellName(String);

impl CellName {
    /// Validate and normalize a cell name.
    pub fn parse(name: &str) -> Result<CellName, InvalidNameError> {
        if Self::is_valid(name) {
            Ok(CellName(name.to_ascii_uppercase()))
        } else {
            Err(InvalidNameError::Malformed(name.to_string()))
        }
    }

    /// Whether `name` matches the cell naming pattern (in any case).
    pub fn is_valid(name: &str) -> bool {
        cell_name_re().is_match(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into the letter and digit halves ("AB12" -> ("AB", "12")).
    fn split(&self) -> (&str, &str) {
        let at = self
            .0
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(self.0.len());
        self.0.split_at(at)
    }
}

fn cell_name_re() -> &'static Regex {
    static CELL_NAME_RE: OnceLock<Regex> = OnceLock::new();
    CELL_NAME_RE
        .get_or_init(|| Regex::new(r"^[A-Za-z]+[0-9]+$").expect("cell name regex must compile"))
}

impl std::str::FromStr for CellName {
    type Err = InvalidNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CellName {
    type Error = InvalidNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CellName> for String {
    fn from(name: CellName) -> String {
        name.0
    }
}

impl AsRef<str> for CellName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CellName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Spreadsheet order: column letters first (shorter columns first, so Z < AA),
/// then row number numerically (A2 < A10).
impl Ord for CellName {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a_letters, a_digits) = self.split();
        let (b_letters, b_digits) = other.split();
        let a_digits = a_digits.trim_start_matches('0');
        let b_digits = b_digits.trim_start_matches('0');

        a_letters
            .len()
            .cmp(&b_letters.len())
            .then_with(|| a_letters.cmp(b_letters))
            .then_with(|| a_digits.len().cmp(&b_digits.len()))
            .then_with(|| a_digits.cmp(b_digits))
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for CellName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
