//! Typed error types for par-textvideo-terminal.

use thiserror::Error;

/// Errors returned by character grid accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// A cell position outside `ROWS x COLUMNS`.
    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} grid", rows = par_textvideo_config::ROWS, cols = par_textvideo_config::COLUMNS)]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// A row index outside `0..ROWS`.
    #[error("Row {row} is outside the grid ({rows} rows)", rows = par_textvideo_config::ROWS)]
    RowOutOfRange {
        /// Requested row.
        row: usize,
    },
}
