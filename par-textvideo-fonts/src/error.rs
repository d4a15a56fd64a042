//! Typed error types for par-textvideo-fonts.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a replacement glyph font.
#[derive(Debug, Error)]
pub enum FontError {
    /// The font data is not exactly one bitmap row per glyph row.
    #[error("Invalid font size: expected {expected} bytes, got {actual} bytes")]
    InvalidSize {
        /// Expected byte count (`95 * 16`).
        expected: usize,
        /// Actual byte count received.
        actual: usize,
    },

    /// The font file could not be read from disk.
    #[error("Font file read failed for '{path}': {source}")]
    Io {
        /// Path to the font file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
