//! Formula construction and normalization.
//!
//! A [`Formula`] is built from infix text in one validating pass over the
//! token stream. Construction either succeeds with a fully normalized,
//! immutable formula or fails with [`FormulaFormatError`].
//!
//! Normalization:
//! - whitespace is dropped
//! - variables are uppercased (`a1` -> `A1`)
//! - numbers are re-rendered through `f64` (`1E-4` -> `0.0001`, `5.000` -> `5`)
//!
//! Two formulas are equal exactly when their normalized text is equal.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use super::token::{TokenKind, tokenize};
use crate::error::FormulaFormatError;

/// The four binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    fn from_symbol(symbol: &str) -> Option<Operator> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "*" => Some(Operator::Mul),
            "/" => Some(Operator::Div),
            _ => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }
}

/// A validated token with its value already extracted.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Term {
    Number(f64),
    Variable(String),
    Op(Operator),
    Open,
    Close,
}

/// The result of a failed evaluation (bad lookup, division by zero).
///
/// This is an ordinary value, not an exceptional condition: spreadsheet cells
/// hold it as their value and it flows through dependent recalculation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FormulaError {
    reason: String,
}

impl FormulaError {
    pub fn new(reason: impl Into<String>) -> Self {
        FormulaError {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

/// An immutable, normalized arithmetic formula.
#[derive(Clone, Debug)]
pub struct Formula {
    canonical: String,
    variables: BTreeSet<String>,
    pub(crate) terms: Vec<Term>,
}

impl Formula {
    /// Parse and validate a formula.
    pub fn new(input: &str) -> Result<Formula, FormulaFormatError> {
        let tokens = tokenize(input);
        if tokens.is_empty() {
            return Err(FormulaFormatError::new(
                "formula must contain at least one token",
            ));
        }

        let mut canonical = String::with_capacity(input.len());
        let mut variables = BTreeSet::new();
        let mut terms = Vec::with_capacity(tokens.len());
        let mut depth = 0usize;
        let mut prev: Option<TokenKind> = None;

        for token in &tokens {
            let kind = token.kind;
            check_adjacent(prev, kind, token.text)?;

            match kind {
                TokenKind::OpenParen => {
                    depth += 1;
                    canonical.push('(');
                    terms.push(Term::Open);
                }
                TokenKind::CloseParen => {
                    depth = depth.checked_sub(1).ok_or_else(|| {
                        FormulaFormatError::new("closing parenthesis without a matching '('")
                    })?;
                    canonical.push(')');
                    terms.push(Term::Close);
                }
                TokenKind::Operator => {
                    let op = Operator::from_symbol(token.text).ok_or_else(|| {
                        FormulaFormatError::new(format!("unknown operator '{}'", token.text))
                    })?;
                    canonical.push(op.symbol());
                    terms.push(Term::Op(op));
                }
                TokenKind::Variable => {
                    let name = token.text.to_ascii_uppercase();
                    canonical.push_str(&name);
                    variables.insert(name.clone());
                    terms.push(Term::Variable(name));
                }
                TokenKind::Number => {
                    let value = parse_number(token.text)?;
                    canonical.push_str(&value.to_string());
                    terms.push(Term::Number(value));
                }
                TokenKind::Invalid => {
                    return Err(FormulaFormatError::new(format!(
                        "invalid token '{}'",
                        token.text
                    )));
                }
            }

            prev = Some(kind);
        }

        if depth != 0 {
            return Err(FormulaFormatError::new(
                "number of opening and closing parentheses differ",
            ));
        }
        if matches!(prev, Some(TokenKind::Operator | TokenKind::OpenParen)) {
            return Err(FormulaFormatError::new(
                "formula must end with a number, variable, or closing parenthesis",
            ));
        }

        Ok(Formula {
            canonical,
            variables,
            terms,
        })
    }

    /// The normalized variable names this formula references.
    pub fn variables(&self) -> &BTreeSet<String> {
        &self.variables
    }

    /// The normalized text (no whitespace, uppercased variables).
    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

/// Rules that only look at the current token and the one before it.
fn check_adjacent(
    prev: Option<TokenKind>,
    kind: TokenKind,
    text: &str,
) -> Result<(), FormulaFormatError> {
    use TokenKind as K;

    let message = match (prev, kind) {
        (_, K::Invalid) => format!("invalid token '{text}'"),
        (None, K::Operator | K::CloseParen) => {
            "formula must start with a number, variable, or opening parenthesis".to_string()
        }
        (Some(K::Number), K::Number)
        | (Some(K::Variable), K::Variable)
        | (Some(K::Operator), K::Operator) => {
            format!("'{text}' cannot directly follow a token of the same kind")
        }
        (Some(K::OpenParen), K::CloseParen) => "empty parentheses".to_string(),
        (Some(K::OpenParen), K::Operator) => {
            format!("operator '{text}' cannot directly follow '('")
        }
        (Some(K::Operator), K::CloseParen) => "')' cannot directly follow an operator".to_string(),
        (Some(K::Variable | K::CloseParen), K::Number) => {
            format!("number '{text}' cannot follow a variable or ')'")
        }
        (Some(K::Number | K::CloseParen), K::Variable) => {
            format!("variable '{text}' cannot follow a number or ')'")
        }
        (Some(K::CloseParen), K::OpenParen) => "'(' cannot directly follow ')'".to_string(),
        _ => return Ok(()),
    };

    Err(FormulaFormatError::new(message))
}

fn parse_number(text: &str) -> Result<f64, FormulaFormatError> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(FormulaFormatError::new(format!(
            "number '{text}' is out of range"
        ))),
        Err(e) => Err(FormulaFormatError::new(format!(
            "invalid number '{text}': {e}"
        ))),
    }
}

impl FromStr for Formula {
    type Err = FormulaFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formula::new(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for Formula {}

impl Hash for Formula {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}
