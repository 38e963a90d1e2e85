//! Error types for the `gridlife-grid` crate.
//!
//! All fallible operations in this crate return [`GridError`] through the
//! standard [`Result`] type alias.

/// Errors that can occur during grid operations.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// A cell coordinate lies outside the grid extent.
    #[error("cell ({row}, {col}) is out of bounds for a {rows}x{cols} grid")]
    OutOfBounds {
        /// The requested row.
        row: usize,
        /// The requested column.
        col: usize,
        /// Number of rows in the grid.
        rows: usize,
        /// Number of columns in the grid.
        cols: usize,
    },

    /// The requested dimensions overflow the addressable cell count.
    #[error("grid dimensions {rows}x{cols} overflow usize")]
    DimensionOverflow {
        /// The requested row count.
        rows: usize,
        /// The requested column count.
        cols: usize,
    },
}
