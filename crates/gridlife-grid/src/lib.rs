//! Finite two-dimensional cell grid for the Gridlife simulation.
//!
//! This crate models the data layer of the automaton: binary cell states,
//! the bounded (non-wrapping) grid container, and the pure neighbor-count
//! query that the transition rule is built on.
//!
//! # Modules
//!
//! - [`cell`] -- The binary [`Cell`] state (dead or alive).
//! - [`error`] -- Error types for grid operations.
//! - [`grid`] -- The [`Grid`] container: allocation, seeding, cell access.
//! - [`neighbors`] -- Live-neighbor counting under bounded topology.

pub mod cell;
pub mod error;
pub mod grid;
pub mod neighbors;

// Re-export primary types at crate root.
pub use cell::Cell;
pub use error::GridError;
pub use grid::Grid;
pub use neighbors::{NEIGHBOR_OFFSETS, live_neighbors};
