use serde::{Deserialize, Serialize};

/// Color attribute of a cell.
///
/// The low nibble is the foreground palette index and the high nibble the
/// background palette index, so both are always in `0..16`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attribute(pub u8);

impl Attribute {
    /// White on blue, the attribute used for the startup fill.
    pub const WHITE_ON_BLUE: Attribute = Attribute(0x17);

    /// Build an attribute from foreground and background palette indices.
    ///
    /// Only the low four bits of each index are kept.
    pub const fn new(fg: u8, bg: u8) -> Self {
        Attribute((fg & 0x0F) | ((bg & 0x0F) << 4))
    }

    /// Foreground palette index (low nibble).
    #[inline]
    pub const fn fg(self) -> u8 {
        self.0 & 0x0F
    }

    /// Background palette index (high nibble).
    #[inline]
    pub const fn bg(self) -> u8 {
        self.0 >> 4
    }

    /// Swap foreground and background.
    pub const fn inverted(self) -> Self {
        Attribute::new(self.bg(), self.fg())
    }
}

impl From<u8> for Attribute {
    fn from(value: u8) -> Self {
        Attribute(value)
    }
}

/// One character grid position: a glyph code and its color attribute.
///
/// This is what the frame-update hook writes and what the scanline renderer
/// reads once per cell per scanline, so it stays two bytes and `Copy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub glyph: u8,
    pub attr: Attribute,
}

impl Cell {
    pub const fn new(glyph: u8, attr: Attribute) -> Self {
        Self { glyph, attr }
    }

    /// A space in the given attribute.
    pub const fn blank(attr: Attribute) -> Self {
        Self { glyph: b' ', attr }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Attribute::WHITE_ON_BLUE)
    }
}

impl From<(u8, u8)> for Cell {
    fn from((glyph, attr): (u8, u8)) -> Self {
        Self {
            glyph,
            attr: Attribute(attr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_splits_nibbles() {
        let attr = Attribute(0x17);
        assert_eq!(attr.fg(), 7);
        assert_eq!(attr.bg(), 1);
    }

    #[test]
    fn attribute_new_masks_indices() {
        assert_eq!(Attribute::new(0x1F, 0x21), Attribute(0x1F));
        assert_eq!(Attribute::new(15, 15).0, 0xFF);
    }

    #[test]
    fn inverted_swaps_colors() {
        assert_eq!(Attribute(0x17).inverted(), Attribute(0x71));
    }

    #[test]
    fn cell_from_tuple() {
        let cell: Cell = (b'A', 0x1F).into();
        assert_eq!(cell.glyph, b'A');
        assert_eq!(cell.attr.fg(), 0xF);
        assert_eq!(cell.attr.bg(), 0x1);
    }
}
