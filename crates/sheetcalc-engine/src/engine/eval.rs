//! Formula evaluation.
//!
//! Classic two-stack infix evaluation over the validated terms:
//!
//! - `*` and `/` are applied as soon as their right operand arrives
//! - `+` and `-` are applied when another `+`/`-` arrives at the same level
//! - `)` drains a pending `+`/`-`, pops the `(`, then applies a pending
//!   `*`/`/` from just outside the parentheses
//! - at the end, a remaining `+`/`-` is applied to the last two operands
//!
//! Evaluation never panics and never returns a Rust error for bad input:
//! division by zero and failed lookups become a [`FormulaError`].

use std::fmt::Display;

use log::trace;

use super::formula::{Formula, FormulaError, Operator, Term};

const DIVIDE_BY_ZERO: &str = "Divide by zero";
const MALFORMED: &str = "Malformed expression";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
    Op(Operator),
    Open,
}

impl Formula {
    /// Evaluate against a variable lookup.
    ///
    /// `lookup` receives normalized (uppercase) variable names. Its error
    /// message becomes the reason of the returned [`FormulaError`].
    pub fn evaluate<F, E>(&self, mut lookup: F) -> Result<f64, FormulaError>
    where
        F: FnMut(&str) -> Result<f64, E>,
        E: Display,
    {
        let mut values: Vec<f64> = Vec::new();
        let mut pending: Vec<Pending> = Vec::new();

        for term in &self.terms {
            match term {
                Term::Number(n) => push_operand(&mut values, &mut pending, *n)?,
                Term::Variable(name) => {
                    let value = lookup(name).map_err(|e| FormulaError::new(e.to_string()))?;
                    trace!("lookup {} = {}", name, value);
                    push_operand(&mut values, &mut pending, value)?;
                }
                Term::Op(op @ (Operator::Add | Operator::Sub)) => {
                    apply_pending_if(&mut values, &mut pending, is_additive)?;
                    pending.push(Pending::Op(*op));
                }
                Term::Op(op) => pending.push(Pending::Op(*op)),
                Term::Open => pending.push(Pending::Open),
                Term::Close => {
                    apply_pending_if(&mut values, &mut pending, is_additive)?;
                    if pending.pop() != Some(Pending::Open) {
                        return Err(FormulaError::new(MALFORMED));
                    }
                    apply_pending_if(&mut values, &mut pending, is_multiplicative)?;
                }
            }
        }

        if let Some(Pending::Op(op)) = pending.pop() {
            apply(&mut values, op)?;
        }

        values.pop().ok_or_else(|| FormulaError::new(MALFORMED))
    }
}

fn is_additive(op: Operator) -> bool {
    matches!(op, Operator::Add | Operator::Sub)
}

fn is_multiplicative(op: Operator) -> bool {
    matches!(op, Operator::Mul | Operator::Div)
}

/// Push an operand, immediately applying a pending `*` or `/`.
fn push_operand(
    values: &mut Vec<f64>,
    pending: &mut Vec<Pending>,
    value: f64,
) -> Result<(), FormulaError> {
    values.push(value);
    apply_pending_if(values, pending, is_multiplicative)
}

/// Apply the operator on top of the pending stack if it satisfies `pred`.
fn apply_pending_if(
    values: &mut Vec<f64>,
    pending: &mut Vec<Pending>,
    pred: fn(Operator) -> bool,
) -> Result<(), FormulaError> {
    if let Some(&Pending::Op(op)) = pending.last() {
        if pred(op) {
            pending.pop();
            apply(values, op)?;
        }
    }
    Ok(())
}

fn apply(values: &mut Vec<f64>, op: Operator) -> Result<(), FormulaError> {
    let (Some(right), Some(left)) = (values.pop(), values.pop()) else {
        return Err(FormulaError::new(MALFORMED));
    };

    let result = match op {
        Operator::Add => left + right,
        Operator::Sub => left - right,
        Operator::Mul => left * right,
        Operator::Div => {
            if right == 0.0 {
                return Err(FormulaError::new(DIVIDE_BY_ZERO));
            }
            left / right
        }
    };

    values.push(result);
    Ok(())
}
