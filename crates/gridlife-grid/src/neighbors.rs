//! Live-neighbor counting under bounded (non-wrapping) topology.
//!
//! The count examines exactly the eight positions adjacent to a cell.
//! Candidates that fall off the grid edge contribute zero -- there is no
//! wraparound to the opposite side. The query is pure and cannot fail:
//! its own offset arithmetic never produces an out-of-bounds access.

use crate::grid::Grid;

/// The eight relative offsets examined for every cell.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (0, 1),
    (0, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
    (-1, -1),
    (1, 0),
    (-1, 0),
];

/// Count the live neighbors of the cell at `(row, col)`.
///
/// Returns a value in `[0, 8]`. Off-grid candidate positions contribute
/// zero. The result is a commutative sum, so offset order is irrelevant.
pub fn live_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    let mut count: u8 = 0;
    for (d_row, d_col) in NEIGHBOR_OFFSETS {
        let Some(n_row) = row.checked_add_signed(d_row) else {
            continue;
        };
        let Some(n_col) = col.checked_add_signed(d_col) else {
            continue;
        };
        if let Ok(cell) = grid.get(n_row, n_col) {
            count = count.saturating_add(u8::from(cell));
        }
    }
    count
}
