use crate::cell::Grid;
use crate::classify::classify;
use crate::settings::Settings;

/// Current settings together with the grid derived from them.
///
/// The grid is recomputed in full inside [`Board::replace`], so a reader
/// never observes settings and grid out of step. The latest replacement
/// wins; nothing is queued or merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    settings: Settings,
    grid: Grid,
}

impl Board {
    pub fn new(settings: Settings) -> Self {
        let grid = classify(&settings);
        Self { settings, grid }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Swap in new settings and reclassify.
    pub fn replace(&mut self, settings: Settings) -> &Grid {
        self.grid = classify(&settings);
        self.settings = settings;
        &self.grid
    }

    /// Running total at the end of the cell at `(row, col)`.
    pub fn cell_value(&self, row: usize, col: usize) -> Option<u128> {
        self.grid.get(row, col)?;
        let index = (row * self.grid.column_count() + col) as u128;
        Some((index + 1) * u128::from(self.settings.cell_weight()))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    #[test]
    fn new_board_is_classified() {
        let board = Board::new(Settings::new(50, 1, 4, 120, 0).unwrap());
        assert_eq!(board.grid().rows()[0], vec![Cell::Has, Cell::Has, Cell::Empty, Cell::Empty]);
    }

    #[test]
    fn last_replacement_wins() {
        let mut board = Board::default();
        board.replace(Settings::new(50, 1, 4, 20, 80).unwrap());
        board.replace(Settings::new(50, 2, 2, 100, 60).unwrap());

        assert_eq!(board.settings(), &Settings::new(50, 2, 2, 100, 60).unwrap());
        assert_eq!(
            board.grid().rows(),
            &[vec![Cell::ToBeSpent, Cell::ToBeSpent], vec![Cell::Empty, Cell::Empty]]
        );
    }

    #[test]
    fn cell_values_accumulate_row_major() {
        let board = Board::new(Settings::new(25, 2, 3, 0, 0).unwrap());
        assert_eq!(board.cell_value(0, 0), Some(25));
        assert_eq!(board.cell_value(1, 0), Some(100));
        assert_eq!(board.cell_value(1, 2), Some(150));
        assert_eq!(board.cell_value(2, 0), None);
    }
}
