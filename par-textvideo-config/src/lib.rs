//! Configuration system for the par-textvideo scanline renderer.
//!
//! This crate provides configuration loading, saving, and default values
//! for the text-mode video pipeline. It includes:
//!
//! - The fixed screen geometry (rows, columns, glyph size)
//! - The `Cell` / `Attribute` pair stored in the character grid
//! - Palette, video mode, fill pattern and frame hook settings
//! - YAML persistence under the XDG config directory

pub mod cell;
pub mod config;
pub mod defaults;
pub mod error;
pub mod geometry;
mod types;

// Re-export main types for convenience
pub use cell::{Attribute, Cell};
pub use config::Config;
pub use config::validation::PALETTE_SIZE;
pub use error::ConfigError;
pub use geometry::{
    COLUMNS, DOTS_PER_GLYPH, FIRST_PRINTABLE, LAST_PRINTABLE, PIXELS_PER_LINE, ROWS,
    ROWS_PER_GLYPH, VISIBLE_SCANLINES,
};

// Re-export config types
pub use types::{FillPattern, HookKind, LogLevel, Rgb5, VideoMode};
