//! Character grid store for the par-textvideo scanline renderer.
//!
//! Provides the fixed 40x15 matrix of (glyph, attribute) cells that the
//! frame-update hook writes and the scanline renderer reads, plus a
//! mutex-guarded copy for producers running on another thread.

pub mod error;
pub mod grid;
pub mod shared;

pub use error::GridError;
pub use grid::CharacterGrid;
pub use shared::SharedGrid;
