//! Configuration types and enums.
//!
//! This module is split into focused sub-modules by domain:
//! - `color`   — 5-bit-per-channel palette entries
//! - `grid`    — startup fill pattern and built-in frame hook selection
//! - `logging` — log level selection
//! - `video`   — display mode geometry and refresh rate

pub mod color;
pub mod grid;
pub mod logging;
pub mod video;

// Re-export everything so callers of `types::*` continue to work.

pub use color::Rgb5;
pub use grid::{FillPattern, HookKind};
pub use logging::LogLevel;
pub use video::VideoMode;
