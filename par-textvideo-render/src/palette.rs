//! 16-entry palette of 5:5:5 packed colors.
//!
//! A packed color is the 16-bit value the scanout engine expects in each
//! half of a pixel word: red in bits 0-4, green in bits 6-10 and blue in
//! bits 11-15. Bit 5 is unused and always zero.

use crate::error::RenderError;
use par_textvideo_config::{PALETTE_SIZE, Rgb5};

const CHANNEL_MASK: u16 = 0x1F;
const GREEN_SHIFT: u16 = 6;
const BLUE_SHIFT: u16 = 11;

/// A 16-bit 5:5:5 color as placed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedColor(pub u16);

impl PackedColor {
    pub const BLACK: PackedColor = PackedColor(0);

    /// Pack three 5-bit channels; higher bits are discarded.
    pub const fn from_rgb5(r: u8, g: u8, b: u8) -> Self {
        PackedColor(
            (r as u16 & CHANNEL_MASK)
                | (g as u16 & CHANNEL_MASK) << GREEN_SHIFT
                | (b as u16 & CHANNEL_MASK) << BLUE_SHIFT,
        )
    }

    pub const fn r(self) -> u8 {
        (self.0 & CHANNEL_MASK) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> GREEN_SHIFT & CHANNEL_MASK) as u8
    }

    pub const fn b(self) -> u8 {
        (self.0 >> BLUE_SHIFT & CHANNEL_MASK) as u8
    }

    /// Expand to 8 bits per channel, replicating the top bits into the
    /// bottom so that 0x1F maps to 0xFF.
    pub const fn to_rgb8(self) -> [u8; 3] {
        const fn expand(c: u8) -> u8 {
            (c << 3) | (c >> 2)
        }
        [expand(self.r()), expand(self.g()), expand(self.b())]
    }
}

impl From<Rgb5> for PackedColor {
    fn from(c: Rgb5) -> Self {
        PackedColor::from_rgb5(c.r(), c.g(), c.b())
    }
}

/// Lookup table from a 4-bit color index to a packed color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: [PackedColor; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        let mut colors = [PackedColor::BLACK; PALETTE_SIZE];
        for (slot, rgb) in colors
            .iter_mut()
            .zip(par_textvideo_config::defaults::palette())
        {
            *slot = rgb.into();
        }
        Self { colors }
    }
}

impl Palette {
    pub const fn new(colors: [PackedColor; PALETTE_SIZE]) -> Self {
        Self { colors }
    }

    /// Build a palette from configured 5-bit entries.
    ///
    /// # Errors
    /// Returns [`RenderError::PaletteSize`] unless exactly 16 entries are given.
    pub fn from_config(entries: &[Rgb5]) -> Result<Self, RenderError> {
        if entries.len() != PALETTE_SIZE {
            return Err(RenderError::PaletteSize {
                expected: PALETTE_SIZE,
                actual: entries.len(),
            });
        }
        let mut colors = [PackedColor::BLACK; PALETTE_SIZE];
        for (slot, &rgb) in colors.iter_mut().zip(entries) {
            *slot = rgb.into();
        }
        Ok(Self { colors })
    }

    /// Color for a 4-bit index. Only the low nibble of `index` is used.
    #[inline]
    pub fn color(&self, index: u8) -> PackedColor {
        self.colors[(index & 0x0F) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_channels_into_their_fields() {
        assert_eq!(PackedColor::from_rgb5(31, 0, 0).0, 0x001F);
        assert_eq!(PackedColor::from_rgb5(0, 31, 0).0, 0x07C0);
        assert_eq!(PackedColor::from_rgb5(0, 0, 31).0, 0xF800);
        assert_eq!(PackedColor::from_rgb5(31, 31, 31).0, 0xFFDF);
        // Bit 5 stays clear.
        assert_eq!(PackedColor::from_rgb5(31, 31, 31).0 & 0x20, 0);
    }

    #[test]
    fn channel_accessors_invert_packing() {
        let c = PackedColor::from_rgb5(3, 17, 29);
        assert_eq!((c.r(), c.g(), c.b()), (3, 17, 29));
    }

    #[test]
    fn default_palette_matches_configured_colors() {
        let palette = Palette::default();
        assert_eq!(palette.color(0), PackedColor::BLACK);
        assert_eq!(palette.color(1), PackedColor::from_rgb5(0, 0, 15));
        assert_eq!(palette.color(7), PackedColor::from_rgb5(15, 15, 15));
        assert_eq!(palette.color(8), PackedColor::from_rgb5(7, 7, 7));
        assert_eq!(palette.color(15), PackedColor::from_rgb5(31, 31, 31));
    }

    #[test]
    fn index_uses_low_nibble_only() {
        let palette = Palette::default();
        assert_eq!(palette.color(0x17), palette.color(0x07));
        assert_eq!(palette.color(0xF1), palette.color(0x01));
    }

    #[test]
    fn wrong_entry_count_is_rejected() {
        let entries = vec![Rgb5::new(1, 2, 3); 15];
        assert!(matches!(
            Palette::from_config(&entries),
            Err(RenderError::PaletteSize {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn rgb8_expansion_spans_full_range() {
        assert_eq!(PackedColor::BLACK.to_rgb8(), [0, 0, 0]);
        assert_eq!(PackedColor::from_rgb5(31, 31, 31).to_rgb8(), [255, 255, 255]);
        assert_eq!(PackedColor::from_rgb5(15, 0, 0).to_rgb8(), [123, 0, 0]);
    }
}
