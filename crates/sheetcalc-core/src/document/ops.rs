use super::Spreadsheet;
use crate::error::{Result, SpreadsheetError};
use log::{debug, warn};
use sheetcalc_engine::engine::{
    Cell, CellContent, CellName, CellValue, CycleDetected, recalculation_order,
};
use std::collections::HashSet;

impl Spreadsheet {
    /// Set a cell from user input and recalculate everything that depends on it.
    ///
    /// Input is classified as empty (`""`), a number, a formula (leading `=`)
    /// or text. Returns the cells whose values may have changed: `name`
    /// first, then its dependents in an order where every cell follows the
    /// cells it depends on.
    ///
    /// Fails without changing anything if the name is invalid, the formula is
    /// malformed, or the new formula would make the cell depend on itself.
    pub fn set_contents_of_cell(&mut self, name: &str, input: &str) -> Result<Vec<CellName>> {
        let name = CellName::parse(name)?;
        let content = CellContent::parse(input)?;
        let dependees = referenced_cells(&content);

        let order = self
            .plan_recalculation(&name, &dependees)
            .map_err(|cycle| {
                warn!(
                    "rejected {} = {:?}: cycle closes at {}",
                    name, input, cycle.node
                );
                SpreadsheetError::Circular { cell: name.clone() }
            })?;

        // Validated: commit edges and content.
        debug!("{} depends on {:?}", name, dependees);
        self.graph.replace_dependees(&name, dependees);
        if content.is_empty() {
            self.cells.remove(&name);
        } else {
            self.cells
                .insert(name.clone(), Cell::new(content, CellValue::EMPTY));
        }
        self.changed = true;

        debug!("recalculating {} cell(s) after edit of {}", order.len(), name);
        self.recalculate(&order);
        Ok(order)
    }

    /// Compute the recalculation order as if `name` depended on exactly
    /// `dependees`, without touching the graph.
    fn plan_recalculation(
        &self,
        name: &CellName,
        dependees: &HashSet<CellName>,
    ) -> std::result::Result<Vec<CellName>, CycleDetected<CellName>> {
        let old_dependees = self.graph.dependees(name);

        recalculation_order(name, |cell: &CellName| {
            let mut next = self.graph.dependents(cell);
            if old_dependees.contains(cell) {
                next.remove(name);
            }
            if dependees.contains(cell) {
                next.insert(name.clone());
            }
            next
        })
    }
}

/// Cells a content references; only formulas reference anything.
fn referenced_cells(content: &CellContent) -> HashSet<CellName> {
    content
        .as_formula()
        .map(|formula| {
            formula
                .variables()
                .iter()
                .filter_map(|var| CellName::parse(var).ok())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(order: &[CellName]) -> Vec<&str> {
        order.iter().map(CellName::as_str).collect()
    }

    #[test]
    fn test_set_number_text_and_formula() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("a1", "5").unwrap();
        sheet.set_contents_of_cell("B1", "hello").unwrap();
        sheet.set_contents_of_cell("C1", "=a1 * 2").unwrap();

        assert_eq!(sheet.get_cell_contents("A1").unwrap(), &CellContent::Number(5.0));
        assert_eq!(
            sheet.get_cell_contents("b1").unwrap(),
            &CellContent::Text("hello".to_string())
        );
        assert_eq!(sheet.get_cell_value("C1").unwrap(), &CellValue::Number(10.0));
        assert!(sheet.changed());
    }

    #[test]
    fn test_recalculation_order_and_values() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "5").unwrap();
        sheet.set_contents_of_cell("B1", "=A1+2").unwrap();
        sheet.set_contents_of_cell("C1", "=B1+A1").unwrap();

        let order = sheet.set_contents_of_cell("A1", "6").unwrap();
        assert_eq!(names(&order), vec!["A1", "B1", "C1"]);
        assert_eq!(sheet.get_cell_value("B1").unwrap(), &CellValue::Number(8.0));
        assert_eq!(sheet.get_cell_value("C1").unwrap(), &CellValue::Number(14.0));
    }

    #[test]
    fn test_self_reference_is_rejected() {
        let mut sheet = Spreadsheet::new();
        let err = sheet.set_contents_of_cell("A1", "=A1").unwrap_err();
        assert!(matches!(err, SpreadsheetError::Circular { .. }));
        assert_eq!(sheet.get_cell_contents("A1").unwrap(), &CellContent::Empty);
        assert!(!sheet.changed());
    }

    #[test]
    fn test_transitive_cycle_leaves_state_untouched() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "=B1+1").unwrap();
        sheet.set_contents_of_cell("B1", "=C1+1").unwrap();
        sheet.set_contents_of_cell("C1", "3").unwrap();
        assert_eq!(sheet.get_cell_value("A1").unwrap(), &CellValue::Number(5.0));

        let err = sheet.set_contents_of_cell("C1", "=A1").unwrap_err();
        assert!(matches!(err, SpreadsheetError::Circular { ref cell } if cell.as_str() == "C1"));

        assert_eq!(sheet.get_cell_contents("C1").unwrap(), &CellContent::Number(3.0));
        assert!(sheet.direct_dependents("A1").unwrap().is_empty());
        let order = sheet.set_contents_of_cell("C1", "4").unwrap();
        assert_eq!(names(&order), vec!["C1", "B1", "A1"]);
        assert_eq!(sheet.get_cell_value("A1").unwrap(), &CellValue::Number(6.0));
    }

    #[test]
    fn test_replacing_formula_drops_old_edges() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("B1", "=A1").unwrap();
        sheet.set_contents_of_cell("B1", "=C1").unwrap();
        assert!(sheet.direct_dependents("A1").unwrap().is_empty());

        // A1 may now depend on B1 without a cycle.
        sheet.set_contents_of_cell("A1", "=B1").unwrap();

        sheet.set_contents_of_cell("B1", "text").unwrap();
        assert!(sheet.direct_dependents("C1").unwrap().is_empty());
    }

    #[test]
    fn test_missing_and_text_references_become_errors() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "=B1 + 1").unwrap();
        assert!(sheet.get_cell_value("A1").unwrap().is_error());

        sheet.set_contents_of_cell("B1", "words").unwrap();
        assert!(sheet.get_cell_value("A1").unwrap().is_error());

        sheet.set_contents_of_cell("B1", "1").unwrap();
        assert_eq!(sheet.get_cell_value("A1").unwrap(), &CellValue::Number(2.0));
    }

    #[test]
    fn test_errors_propagate_through_dependents() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "0").unwrap();
        sheet.set_contents_of_cell("B1", "=1/A1").unwrap();
        sheet.set_contents_of_cell("C1", "=B1*2").unwrap();

        match sheet.get_cell_value("B1").unwrap() {
            CellValue::Error(e) => assert_eq!(e.reason(), "Divide by zero"),
            other => panic!("expected error, got {other:?}"),
        }
        assert!(sheet.get_cell_value("C1").unwrap().is_error());

        sheet.set_contents_of_cell("A1", "4").unwrap();
        assert_eq!(sheet.get_cell_value("C1").unwrap(), &CellValue::Number(0.5));
    }

    #[test]
    fn test_clearing_a_cell() {
        let mut sheet = Spreadsheet::new();
        sheet.set_contents_of_cell("A1", "2").unwrap();
        sheet.set_contents_of_cell("B1", "=A1").unwrap();
        let order = sheet.set_contents_of_cell("A1", "").unwrap();

        assert_eq!(names(&order), vec!["A1", "B1"]);
        assert!(!sheet.get_names_of_all_nonempty_cells().iter().any(|n| n.as_str() == "A1"));
        assert_eq!(sheet.get_cell_value("A1").unwrap(), &CellValue::EMPTY);
        assert!(sheet.get_cell_value("B1").unwrap().is_error());
    }

    #[test]
    fn test_invalid_inputs_change_nothing() {
        let mut sheet = Spreadsheet::new();
        assert!(matches!(
            sheet.set_contents_of_cell("1A", "5"),
            Err(SpreadsheetError::InvalidName(_))
        ));
        assert!(matches!(
            sheet.set_contents_of_cell("A1", "=1 +"),
            Err(SpreadsheetError::FormulaFormat(_))
        ));
        assert!(!sheet.changed());
        assert!(sheet.get_names_of_all_nonempty_cells().is_empty());
    }
}
