//! Fixed screen geometry of the alphanumeric video mode.
//!
//! The grid is 15 lines of 40 characters, each glyph 8 dots wide and
//! 16 scanlines tall, which fills a 320x240 display exactly.

/// Text rows on screen.
pub const ROWS: usize = 15;

/// Text columns on screen.
pub const COLUMNS: usize = 40;

/// Scanlines per glyph (glyph height).
pub const ROWS_PER_GLYPH: usize = 16;

/// Dots per glyph row (glyph width).
pub const DOTS_PER_GLYPH: usize = 8;

/// Visible pixels per scanline.
pub const PIXELS_PER_LINE: usize = COLUMNS * DOTS_PER_GLYPH;

/// Visible scanlines per frame.
pub const VISIBLE_SCANLINES: usize = ROWS * ROWS_PER_GLYPH;

/// First glyph code with a bitmap in the font (space).
pub const FIRST_PRINTABLE: u8 = 0x20;

/// Last glyph code with a bitmap in the font (tilde).
pub const LAST_PRINTABLE: u8 = 0x7E;
