//! Grid classification.
//!
//! Cell `k` (0-based, row-major) stands for the money interval ending at
//! `(k + 1) * cellWeight`. Comparing that running total against the held
//! amount and the spending target decides the cell's class:
//!
//! | toSpend | total <= has                 | total > has                      |
//! |---------|------------------------------|----------------------------------|
//! | 0       | `Has`                        | `Empty`                          |
//! | > 0     | `Has` if total <= has-toSpend, else `ToBeSpent` | `Needed` if total <= ceil(toSpend) to a cell, else `Empty` |
//!
//! `has - toSpend` goes negative when more is earmarked than held. Every held
//! cell is then `ToBeSpent`; that is intended.

use crate::cell::{Cell, Grid};
use crate::settings::Settings;

/// Thresholds derived once per classification.
struct Thresholds {
    has: u128,
    to_spend: u64,
    money_left_after_spent: i128,
    to_spend_rounded: u128,
}

impl Thresholds {
    fn new(settings: &Settings) -> Self {
        let cell_weight = settings.cell_weight();
        let to_spend = settings.to_spend();

        // Only the spending branch needs the rounded target
        let to_spend_rounded = if to_spend == 0 {
            0
        } else {
            assert!(
                cell_weight != 0,
                "cannot round toSpend={to_spend} to a cell weight of 0"
            );
            u128::from(to_spend.div_ceil(cell_weight)) * u128::from(cell_weight)
        };

        Self {
            has: u128::from(settings.has()),
            to_spend,
            money_left_after_spent: i128::from(settings.has()) - i128::from(to_spend),
            to_spend_rounded,
        }
    }

    fn cell_at(&self, current_value: u128) -> Cell {
        if self.to_spend == 0 {
            return if current_value <= self.has {
                Cell::Has
            } else {
                Cell::Empty
            };
        }

        if current_value <= self.has {
            // current_value <= has < 2^64, so the cast is lossless
            if (current_value as i128) <= self.money_left_after_spent {
                Cell::Has
            } else {
                Cell::ToBeSpent
            }
        } else if current_value <= self.to_spend_rounded {
            Cell::Needed
        } else {
            Cell::Empty
        }
    }
}

/// Classify every cell of the grid described by `settings`.
///
/// Pure and deterministic. Panics only if `cellWeight` is 0 while `toSpend`
/// is not, which validated settings rule out.
pub fn classify(settings: &Settings) -> Grid {
    let thresholds = Thresholds::new(settings);
    let cell_weight = u128::from(settings.cell_weight());
    let columns = settings.columns_count() as usize;

    let mut rows = Vec::with_capacity(settings.rows_count() as usize);
    let mut current_value: u128 = 0;
    for _ in 0..settings.rows_count() {
        let mut row = Vec::with_capacity(columns);
        for _ in 0..columns {
            current_value += cell_weight;
            row.push(thresholds.cell_at(current_value));
        }
        rows.push(row);
    }
    Grid::from_rows(rows)
}
