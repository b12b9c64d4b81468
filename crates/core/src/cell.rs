use serde::{Deserialize, Serialize};

/// Classification of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cell {
    /// Beyond both the held amount and the spending target.
    Empty,
    /// Held and not earmarked.
    Has,
    /// Held and earmarked for spending.
    ToBeSpent,
    /// Not held but required to reach the spending target.
    Needed,
}

impl Cell {
    pub const ALL: [Cell; 4] = [Cell::Empty, Cell::Has, Cell::ToBeSpent, Cell::Needed];

    /// Wire name, matches the serde representation
    pub fn name(&self) -> &'static str {
        match self {
            Cell::Empty => "empty",
            Cell::Has => "has",
            Cell::ToBeSpent => "toBeSpent",
            Cell::Needed => "needed",
        }
    }

    /// Style class for display surfaces. `Empty` carries no style.
    pub fn style_class(&self) -> &'static str {
        match self {
            Cell::Empty => "",
            Cell::Has => "cell-has",
            Cell::ToBeSpent => "cell-to-be-spent",
            Cell::Needed => "cell-needed",
        }
    }

    /// Legend text
    pub fn description(&self) -> &'static str {
        match self {
            Cell::Empty => "unused",
            Cell::Has => "possessed",
            Cell::ToBeSpent => "reserved for spending",
            Cell::Needed => "still required",
        }
    }
}

/// Row-major matrix of classified cells. Always derived, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub(crate) fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the grid; 0 when there are no rows.
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Cells in visitation order (row 0 first, column 0 first within a row).
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rows.iter().flat_map(|r| r.iter().copied())
    }

    pub fn counts(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for cell in self.cells() {
            counts.add(cell);
        }
        counts
    }
}

/// Number of cells per classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellCounts {
    pub empty: usize,
    pub has: usize,
    pub to_be_spent: usize,
    pub needed: usize,
}

impl CellCounts {
    fn add(&mut self, cell: Cell) {
        match cell {
            Cell::Empty => self.empty += 1,
            Cell::Has => self.has += 1,
            Cell::ToBeSpent => self.to_be_spent += 1,
            Cell::Needed => self.needed += 1,
        }
    }

    pub fn get(&self, cell: Cell) -> usize {
        match cell {
            Cell::Empty => self.empty,
            Cell::Has => self.has,
            Cell::ToBeSpent => self.to_be_spent,
            Cell::Needed => self.needed,
        }
    }

    pub fn total(&self) -> usize {
        self.empty + self.has + self.to_be_spent + self.needed
    }
}
