//! The B3/S23 transition rule with synchronous update.
//!
//! Every cell of the successor generation is computed from the *prior*
//! generation exclusively: the input grid is read-only for the duration of
//! the computation, and writes go to a cloned grid. A computed cell's
//! neighbor count therefore never observes an already-updated neighbor.
//!
//! The rule, per cell with `n` live neighbors:
//!
//! - `n < 2` or `n > 3` -> dead (isolation or overcrowding);
//! - dead with `n == 3` -> alive (birth);
//! - otherwise unchanged (covers survival on 2 or 3, and a dead cell with
//!   2 neighbors staying dead).

use serde::{Deserialize, Serialize};

use gridlife_grid::{Cell, Grid, GridError, live_neighbors};

/// What changed in one committed step.
///
/// Published to the observer after every generation alongside the new grid
/// snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSummary {
    /// The generation number just produced.
    pub generation: u64,
    /// Live cells in the new generation.
    pub alive: usize,
    /// Cells that went dead -> alive this step.
    pub births: u64,
    /// Cells that went alive -> dead this step.
    pub deaths: u64,
}

/// A computed successor generation with its change counts.
#[derive(Debug, Clone)]
pub struct Transition {
    /// The successor grid.
    pub grid: Grid,
    /// Cells born this transition.
    pub births: u64,
    /// Cells that died this transition.
    pub deaths: u64,
}

impl Transition {
    /// Return `true` if the transition changed nothing (a still life).
    pub const fn is_unchanged(&self) -> bool {
        self.births == 0 && self.deaths == 0
    }
}

/// Apply the rule to a single cell given its live-neighbor count.
pub const fn next_state(current: Cell, neighbors: u8) -> Cell {
    if neighbors < 2 || neighbors > 3 {
        Cell::Dead
    } else if matches!(current, Cell::Dead) && neighbors == 3 {
        Cell::Alive
    } else {
        current
    }
}

/// Compute the successor generation of `grid`.
///
/// The result has identical dimensions; the input is not mutated. The
/// computation is deterministic and visits each cell once, with eight
/// neighbor lookups per visit.
///
/// # Errors
///
/// Returns [`GridError`] only if a cell write fails, which cannot happen
/// for coordinates drawn from the grid's own extent.
pub fn next_generation(grid: &Grid) -> Result<Grid, GridError> {
    Ok(compute_transition(grid)?.grid)
}

/// Compute the successor generation together with birth/death counts.
///
/// # Errors
///
/// Returns [`GridError`] only if a cell write fails, which cannot happen
/// for coordinates drawn from the grid's own extent.
pub fn compute_transition(grid: &Grid) -> Result<Transition, GridError> {
    // Clone-then-write: reads go to `grid` (the prior generation), writes
    // to the clone, so no cell ever sees a half-updated neighborhood.
    let mut successor = grid.clone();
    let mut births: u64 = 0;
    let mut deaths: u64 = 0;

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let current = grid.get(row, col)?;
            let next = next_state(current, live_neighbors(grid, row, col));
            if next != current {
                successor.set(row, col, next)?;
                match next {
                    Cell::Alive => births = births.saturating_add(1),
                    Cell::Dead => deaths = deaths.saturating_add(1),
                }
            }
        }
    }

    Ok(Transition {
        grid: successor,
        births,
        deaths,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Build a grid from a string picture: `#` alive, `.` dead.
    fn picture(rows: &[&str]) -> Grid {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let mut grid = Grid::empty(height, width).unwrap();
        for (i, line) in rows.iter().enumerate() {
            for (j, ch) in line.chars().enumerate() {
                if ch == '#' {
                    grid.set(i, j, Cell::Alive).unwrap();
                }
            }
        }
        grid
    }

    // ------------------------------------------------------------------
    // Rule table
    // ------------------------------------------------------------------

    #[test]
    fn underpopulation_and_overcrowding_kill() {
        for n in [0, 1, 4, 5, 6, 7, 8] {
            assert_eq!(next_state(Cell::Alive, n), Cell::Dead, "n = {n}");
            assert_eq!(next_state(Cell::Dead, n), Cell::Dead, "n = {n}");
        }
    }

    #[test]
    fn live_cell_survives_on_two_or_three() {
        assert_eq!(next_state(Cell::Alive, 2), Cell::Alive);
        assert_eq!(next_state(Cell::Alive, 3), Cell::Alive);
    }

    #[test]
    fn dead_cell_born_only_on_exactly_three() {
        assert_eq!(next_state(Cell::Dead, 3), Cell::Alive);
        assert_eq!(next_state(Cell::Dead, 2), Cell::Dead);
    }

    // ------------------------------------------------------------------
    // Whole-grid transitions
    // ------------------------------------------------------------------

    #[test]
    fn dimensions_are_preserved() {
        let grid = picture(&["..#..", ".###.", "..#.."]);
        let next = next_generation(&grid).unwrap();
        assert_eq!(next.rows(), grid.rows());
        assert_eq!(next.cols(), grid.cols());
    }

    #[test]
    fn input_grid_is_not_mutated() {
        let grid = picture(&[".#.", ".#.", ".#."]);
        let before = grid.clone();
        let _ = next_generation(&grid).unwrap();
        assert_eq!(grid, before);
    }

    #[test]
    fn advance_is_deterministic() {
        let grid = picture(&["..#", "#.#", ".##"]);
        let a = next_generation(&grid).unwrap();
        let b = next_generation(&grid).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn lone_center_cell_dies_on_empty_grid() {
        // 3x3, only (1,1) alive: every neighbor count is <= 1, so the
        // successor is all dead.
        let grid = picture(&["...", ".#.", "..."]);
        let next = next_generation(&grid).unwrap();
        assert_eq!(next.live_count(), 0);
    }

    #[test]
    fn block_still_life_is_a_fixed_point() {
        let block = picture(&["....", ".##.", ".##.", "...."]);
        let transition = compute_transition(&block).unwrap();
        assert!(transition.is_unchanged());
        assert_eq!(transition.grid, block);
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let horizontal = picture(&[".....", ".....", ".###.", ".....", "....."]);
        let vertical = picture(&[".....", "..#..", "..#..", "..#..", "....."]);

        let gen1 = next_generation(&horizontal).unwrap();
        assert_eq!(gen1, vertical);
        let gen2 = next_generation(&gen1).unwrap();
        assert_eq!(gen2, horizontal);
    }

    #[test]
    fn edge_cells_obey_bounded_topology() {
        // A blinker flush against the top edge: the vertical phase would
        // need a cell above row 0, which is clipped, so the pattern decays
        // instead of oscillating forever.
        let top_row = picture(&["###", "...", "..."]);
        let gen1 = next_generation(&top_row).unwrap();
        assert_eq!(gen1, picture(&[".#.", ".#.", "..."]));
        let gen2 = next_generation(&gen1).unwrap();
        assert_eq!(gen2.live_count(), 0);
    }

    #[test]
    fn birth_and_death_counts_match_the_blinker() {
        let horizontal = picture(&[".....", ".....", ".###.", ".....", "....."]);
        let transition = compute_transition(&horizontal).unwrap();
        // The two blinker arms die, the two cells above and below the
        // center are born.
        assert_eq!(transition.births, 2);
        assert_eq!(transition.deaths, 2);
        assert_eq!(transition.grid.live_count(), 3);
    }

    #[test]
    fn step_summary_serializes_round_trip() {
        let summary = StepSummary {
            generation: 7,
            alive: 12,
            births: 3,
            deaths: 1,
        };
        let json = serde_json::to_string(&summary).unwrap();
        let back: StepSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }

    #[test]
    fn zero_sized_grid_steps_without_error() {
        let grid = Grid::empty(0, 0).unwrap();
        let next = next_generation(&grid).unwrap();
        assert_eq!(next.cell_count(), 0);

        let grid = Grid::empty(0, 8).unwrap();
        let next = next_generation(&grid).unwrap();
        assert_eq!(next.rows(), 0);
        assert_eq!(next.cols(), 8);
    }
}
