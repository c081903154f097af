use super::Spreadsheet;
use crate::error::Result;
use log::trace;
use sheetcalc_engine::InvalidNameError;
use sheetcalc_engine::engine::{CellContent, CellName, CellValue, Formula};

impl Spreadsheet {
    /// Evaluate a standalone formula (without a leading `=`) against the
    /// current cell values. Nothing is stored.
    pub fn evaluate(&self, formula: &str) -> Result<CellValue> {
        let formula = Formula::new(formula)?;
        Ok(formula.evaluate(|var| self.lookup(var)).into())
    }

    /// Recompute values for `order`, which must list each cell after the
    /// cells it depends on.
    pub(crate) fn recalculate(&mut self, order: &[CellName]) {
        for name in order {
            let Some(value) = self.cells.get(name).map(|cell| self.compute(&cell.content)) else {
                continue;
            };
            trace!("{} = {:?}", name, value);
            if let Some(cell) = self.cells.get_mut(name) {
                cell.value = value;
            }
        }
    }

    fn compute(&self, content: &CellContent) -> CellValue {
        match content {
            CellContent::Empty => CellValue::EMPTY,
            CellContent::Text(s) => CellValue::Text(s.clone()),
            CellContent::Number(n) => CellValue::Number(*n),
            CellContent::Formula(formula) => formula.evaluate(|var| self.lookup(var)).into(),
        }
    }

    /// Resolve a formula variable to the numeric value of that cell.
    fn lookup(&self, var: &str) -> std::result::Result<f64, InvalidNameError> {
        let name = CellName::parse(var)?;
        self.cells
            .get(&name)
            .and_then(|cell| cell.value.as_number())
            .ok_or(InvalidNameError::NoValue(name.to_string()))
    }
}
