//! The [`Grid`] container: a fixed-size, row-major field of cells.
//!
//! A grid is allocated once with its dimensions and never grows or shrinks;
//! resizing is modeled upstream as wholesale replacement. Cells are stored
//! row-major in a single `Vec`, and the `rows * cols == cells.len()`
//! invariant is enforced by construction.
//!
//! The external collaborator only ever receives `&Grid` snapshots or deep
//! clones -- never a handle that can mutate cells behind the engine's back.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::GridError;

/// A finite two-dimensional field of binary cells.
///
/// Edges do not wrap: the grid models bounded topology, and coordinates
/// beyond the extent are rejected with [`GridError::OutOfBounds`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
    /// Cell states, row-major, exactly `rows * cols` entries.
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell dead.
    ///
    /// Any dimensions are accepted, including zero rows or columns (the
    /// resulting grid simply has no cells).
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionOverflow`] if `rows * cols` does not
    /// fit in `usize`.
    pub fn empty(rows: usize, cols: usize) -> Result<Self, GridError> {
        let len = rows
            .checked_mul(cols)
            .ok_or(GridError::DimensionOverflow { rows, cols })?;
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Dead; len],
        })
    }

    /// Create a grid where each cell is independently alive with
    /// probability 0.5.
    ///
    /// The caller supplies the random source, so a seeded generator yields
    /// a reproducible fill.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionOverflow`] if `rows * cols` does not
    /// fit in `usize`.
    pub fn random<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Result<Self, GridError> {
        let len = rows
            .checked_mul(cols)
            .ok_or(GridError::DimensionOverflow { rows, cols })?;
        let cells = (0..len).map(|_| Cell::from(rng.random_bool(0.5))).collect();
        Ok(Self { rows, cols, cells })
    }

    /// Return the number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Return the number of columns.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Return the total number of cells (`rows * cols`).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Return the state of the cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if the coordinate lies outside
    /// the grid extent.
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, GridError> {
        self.index(row, col)
            .and_then(|idx| self.cells.get(idx).copied())
            .ok_or(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
    }

    /// Overwrite the cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if the coordinate lies outside
    /// the grid extent.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), GridError> {
        let (rows, cols) = (self.rows, self.cols);
        let slot = self
            .index(row, col)
            .and_then(|idx| self.cells.get_mut(idx))
            .ok_or(GridError::OutOfBounds { row, col, rows, cols })?;
        *slot = cell;
        Ok(())
    }

    /// Flip the cell at `(row, col)` between dead and alive, in place.
    ///
    /// Returns the new state of the cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if the coordinate lies outside
    /// the grid extent.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<Cell, GridError> {
        let (rows, cols) = (self.rows, self.cols);
        let slot = self
            .index(row, col)
            .and_then(|idx| self.cells.get_mut(idx))
            .ok_or(GridError::OutOfBounds { row, col, rows, cols })?;
        *slot = slot.toggled();
        Ok(*slot)
    }

    /// Return the number of live cells.
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Return the full cell storage as a row-major slice.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Return a single row as a slice, or `None` if `row` is out of range.
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.rows {
            return None;
        }
        let start = row.checked_mul(self.cols)?;
        let end = start.checked_add(self.cols)?;
        self.cells.get(start..end)
    }

    /// Compute the flat index of `(row, col)`, or `None` if out of range.
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        row.checked_mul(self.cols)?.checked_add(col)
    }
}
