//! Glyph font for the par-textvideo scanline renderer.
//!
//! This crate provides:
//! - The built-in 8x16 bitmap font covering the printable ASCII range
//! - Loading of replacement fonts from raw bitmap files
//! - Per-scanline glyph row lookup with a blank fallback for
//!   non-printable codes
//!
//! # Layout
//!
//! A font is `95 * 16` bytes: one byte per glyph row, glyphs in code order
//! from `0x20` to `0x7E`. Row byte bit 7 is the leftmost dot.

pub mod error;
pub mod glyph_font;

// Re-export main types for convenience
pub use error::FontError;
pub use glyph_font::{FONT_BYTES, GLYPH_COUNT, GlyphFont};
