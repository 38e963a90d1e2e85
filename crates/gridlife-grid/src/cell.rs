//! The binary cell state of the automaton.

use serde::{Deserialize, Serialize};

/// State of a single grid cell: dead or alive.
///
/// The wire encoding follows the classic 0/1 convention, available through
/// the `From<Cell> for u8` conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// The cell is dead (0).
    #[default]
    Dead,
    /// The cell is alive (1).
    Alive,
}

impl Cell {
    /// Return `true` if the cell is alive.
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }

    /// Return the opposite state.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dead => Self::Alive,
            Self::Alive => Self::Dead,
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Dead => 0,
            Cell::Alive => 1,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Self::Alive } else { Self::Dead }
    }
}
