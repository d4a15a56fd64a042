//! Scanline rendering engine for the par-textvideo alphanumeric video mode.
//!
//! This crate turns one scanline of the character grid into the packed word
//! stream the scanout engine's timing generator consumes:
//!
//! - Palette lookup of 5:5:5 packed colors
//! - Per-dot color resolution from glyph rows and cell attributes
//! - Raw-run wire encoding with the end-of-line marker
//! - Decoding and PNG capture of rendered frames

pub mod capture;
pub mod encoder;
pub mod error;
pub mod palette;
pub mod scanline;

// Re-export main public types
pub use capture::FrameCapture;
pub use encoder::{
    END_OF_LINE_MARKER, RAW_RUN_MARKER, RawRunEncoder, ScanlinePixelRunEncoder,
    WORDS_PER_SCANLINE,
};
pub use error::RenderError;
pub use palette::{PackedColor, Palette};
pub use scanline::{RenderContext, ScanlineRenderer, expand_glyph_row};

// Re-export shared types from dependencies for convenience
pub use par_textvideo_config::{COLUMNS, PIXELS_PER_LINE, ROWS, ROWS_PER_GLYPH, VISIBLE_SCANLINES};
