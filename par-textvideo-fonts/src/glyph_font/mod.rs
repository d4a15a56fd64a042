//! Fixed-size bitmap glyph font.
//!
//! Glyph rows are looked up once per cell per scanline, so lookup is a
//! single index computation with no allocation and no error path: codes
//! outside the printable range render as a blank row.

mod builtin;

use crate::error::FontError;
use builtin::BUILTIN_8X16;
use par_textvideo_config::{FIRST_PRINTABLE, LAST_PRINTABLE, ROWS_PER_GLYPH};
use std::borrow::Cow;
use std::path::Path;

/// Number of glyphs stored in a font.
pub const GLYPH_COUNT: usize = (LAST_PRINTABLE - FIRST_PRINTABLE) as usize + 1;

/// Size in bytes of a complete font.
pub const FONT_BYTES: usize = GLYPH_COUNT * ROWS_PER_GLYPH;

/// An immutable 8x16 bitmap font for the printable ASCII range.
#[derive(Clone, PartialEq, Eq)]
pub struct GlyphFont {
    data: Cow<'static, [u8]>,
}

impl std::fmt::Debug for GlyphFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphFont")
            .field("builtin", &matches!(self.data, Cow::Borrowed(_)))
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl Default for GlyphFont {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GlyphFont {
    /// The font compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            data: Cow::Borrowed(&BUILTIN_8X16[..]),
        }
    }

    /// Build a font from raw bitmap bytes.
    ///
    /// # Errors
    /// Returns [`FontError::InvalidSize`] unless `data` is exactly
    /// [`FONT_BYTES`] long.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FontError> {
        if data.len() != FONT_BYTES {
            return Err(FontError::InvalidSize {
                expected: FONT_BYTES,
                actual: data.len(),
            });
        }
        Ok(Self {
            data: Cow::Owned(data),
        })
    }

    /// Load a raw bitmap font file.
    pub fn from_file(path: &Path) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font = Self::from_bytes(data)?;
        log::info!("Loaded glyph font from {}", path.display());
        Ok(font)
    }

    /// Whether `code` has a bitmap in this font.
    #[inline]
    pub const fn is_printable(code: u8) -> bool {
        code >= FIRST_PRINTABLE && code <= LAST_PRINTABLE
    }

    /// Offset of `(code, row)` in the font table, `None` for non-printable codes.
    #[inline]
    pub const fn glyph_index(code: u8, row: usize) -> Option<usize> {
        if Self::is_printable(code) {
            Some((code - FIRST_PRINTABLE) as usize * ROWS_PER_GLYPH + row)
        } else {
            None
        }
    }

    /// Bitmap of one glyph row; `0` (blank) for non-printable codes.
    ///
    /// `row` must be below `ROWS_PER_GLYPH`; this is the caller's contract
    /// and only checked in debug builds.
    #[inline]
    pub fn glyph_row(&self, code: u8, row: usize) -> u8 {
        debug_assert!(row < ROWS_PER_GLYPH, "glyph row {row} out of range");
        match Self::glyph_index(code, row) {
            Some(index) => self.data[index],
            None => 0,
        }
    }

    /// All rows of a printable glyph.
    pub fn glyph(&self, code: u8) -> Option<&[u8]> {
        let start = Self::glyph_index(code, 0)?;
        Some(&self.data[start..start + ROWS_PER_GLYPH])
    }

    /// Raw font table.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_every_glyph() {
        assert_eq!(GlyphFont::builtin().as_bytes().len(), FONT_BYTES);
        assert_eq!(GLYPH_COUNT, 95);
    }

    #[test]
    fn space_is_blank() {
        let font = GlyphFont::builtin();
        assert!((0..ROWS_PER_GLYPH).all(|row| font.glyph_row(b' ', row) == 0));
    }

    #[test]
    fn glyph_index_follows_code_order() {
        assert_eq!(GlyphFont::glyph_index(b' ', 0), Some(0));
        assert_eq!(GlyphFont::glyph_index(b'A', 3), Some(0x21 * 16 + 3));
        assert_eq!(GlyphFont::glyph_index(0x7F, 0), None);
        assert_eq!(GlyphFont::glyph_index(0x1F, 0), None);
    }

    #[test]
    fn control_and_high_codes_are_blank() {
        let font = GlyphFont::builtin();
        for code in [0x00u8, 0x01, 0x1F, 0x7F, 0x80, 0xFF] {
            assert!(font.glyph(code).is_none());
            assert!((0..ROWS_PER_GLYPH).all(|row| font.glyph_row(code, row) == 0));
        }
    }
}
