use crate::error::Result;
use sheetcalc_engine::engine::{Cell, CellContent, CellName, CellValue, DependencyGraph};
use std::collections::{BTreeSet, HashMap};

static EMPTY_CONTENT: CellContent = CellContent::Empty;
static EMPTY_VALUE: CellValue = CellValue::EMPTY;

/// UI-agnostic spreadsheet: the cell store, the dependency graph between
/// cells, and a "changed since last save/load" flag.
///
/// Cells that were never set are not stored; they read as empty content with
/// an empty text value.
#[derive(Debug, Default)]
pub struct Spreadsheet {
    /// Stored (non-empty) cells
    pub(crate) cells: HashMap<CellName, Cell>,
    /// Edge (X, C) means formula cell C references X
    pub(crate) graph: DependencyGraph<CellName>,
    /// Whether the sheet has been modified since creation, load or save
    pub(crate) changed: bool,
}

impl Spreadsheet {
    /// Create an empty spreadsheet.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new() -> Self {
        Spreadsheet {
            cells: HashMap::new(),
            graph: DependencyGraph::new(),
            changed: false,
        }
    }

    /// True after any successful edit; reset by load and save.
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// The content of a cell. Unset cells are [`CellContent::Empty`].
    pub fn get_cell_contents(&self, name: &str) -> Result<&CellContent> {
        let name = CellName::parse(name)?;
        Ok(self
            .cells
            .get(&name)
            .map_or(&EMPTY_CONTENT, |cell| &cell.content))
    }

    /// The value of a cell. Unset cells hold the empty text value.
    pub fn get_cell_value(&self, name: &str) -> Result<&CellValue> {
        let name = CellName::parse(name)?;
        Ok(self.cells.get(&name).map_or(&EMPTY_VALUE, |cell| &cell.value))
    }

    /// Names of all cells with non-empty content, in spreadsheet order.
    pub fn get_names_of_all_nonempty_cells(&self) -> BTreeSet<CellName> {
        self.cells
            .iter()
            .filter(|(_, cell)| !cell.content.is_empty())
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Iterate over stored non-empty cells in spreadsheet order.
    pub fn cells(&self) -> impl Iterator<Item = (&CellName, &Cell)> {
        let mut cells: Vec<_> = self
            .cells
            .iter()
            .filter(|(_, cell)| !cell.content.is_empty())
            .collect();
        cells.sort_by(|a, b| a.0.cmp(b.0));
        cells.into_iter()
    }

    /// Cells whose formulas reference `name` directly.
    pub fn direct_dependents(&self, name: &str) -> Result<BTreeSet<CellName>> {
        let name = CellName::parse(name)?;
        Ok(self.graph.dependents(&name).into_iter().collect())
    }
}
