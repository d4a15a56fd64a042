//! Typed error types for par-textvideo-render.
//!
//! Rendering itself has no recoverable failures; these cover setup
//! (palette construction), out-of-contract scanline requests, and the
//! decode/capture path used for verification and screenshots.

use par_textvideo_terminal::GridError;
use thiserror::Error;

/// Top-level error type for the scanline renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The palette does not have exactly 16 entries.
    #[error("Palette must have {expected} entries, got {actual}")]
    PaletteSize {
        /// Required entry count.
        expected: usize,
        /// Entries supplied.
        actual: usize,
    },

    /// A scanline index outside the visible area was requested.
    #[error("Scanline {scanline} is outside the visible area ({visible} lines)")]
    ScanlineOutOfRange {
        /// Requested scanline.
        scanline: usize,
        /// Number of visible scanlines.
        visible: usize,
    },

    /// An encoded word stream does not follow the raw-run layout.
    #[error("Malformed scanline run: {0}")]
    MalformedRun(String),

    /// A capture was saved before any line was recorded.
    #[error("Frame capture for frame {frame} has no scanlines")]
    EmptyCapture {
        /// Frame number of the capture.
        frame: u32,
    },

    /// The PNG could not be written.
    #[error("Image save failed for '{path}': {source}")]
    ImageSave {
        /// Destination path.
        path: String,
        /// Underlying image error.
        #[source]
        source: image::ImageError,
    },

    /// A grid access failed while rendering.
    #[error(transparent)]
    Grid(#[from] GridError),
}
