//! Per-scanline rendering of the character grid.
//!
//! Each visible scanline crosses one text row at one glyph row. For every
//! cell in that text row the renderer fetches the glyph's bitmap byte,
//! resolves its two attribute colors, and expands the byte into eight dots,
//! most significant bit leftmost. The resolved line is then handed to the
//! wire encoder.

use crate::encoder::{RawRunEncoder, ScanlinePixelRunEncoder};
use crate::error::RenderError;
use crate::palette::{PackedColor, Palette};
use par_textvideo_config::{DOTS_PER_GLYPH, PIXELS_PER_LINE, ROWS_PER_GLYPH, VISIBLE_SCANLINES};
use par_textvideo_fonts::GlyphFont;
use par_textvideo_terminal::CharacterGrid;

/// Everything a scanline render reads: grid, font and palette.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    grid: CharacterGrid,
    font: GlyphFont,
    palette: Palette,
}

impl RenderContext {
    pub fn new(grid: CharacterGrid, font: GlyphFont, palette: Palette) -> Self {
        Self {
            grid,
            font,
            palette,
        }
    }

    pub fn grid(&self) -> &CharacterGrid {
        &self.grid
    }

    /// Mutable grid access for the frame-update hook. Must not be used while
    /// a frame's scanlines are being rendered.
    pub fn grid_mut(&mut self) -> &mut CharacterGrid {
        &mut self.grid
    }

    pub fn font(&self) -> &GlyphFont {
        &self.font
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

/// Expand one glyph row byte into eight dots, leftmost dot from bit 7.
#[inline]
pub fn expand_glyph_row(
    bits: u8,
    fg: PackedColor,
    bg: PackedColor,
) -> [PackedColor; DOTS_PER_GLYPH] {
    let mut dots = [bg; DOTS_PER_GLYPH];
    for (i, dot) in dots.iter_mut().enumerate() {
        if bits & (0x80 >> i) != 0 {
            *dot = fg;
        }
    }
    dots
}

/// Renders scanlines of a [`RenderContext`] into scanout words.
#[derive(Debug, Clone, Default)]
pub struct ScanlineRenderer<E = RawRunEncoder> {
    encoder: E,
}

impl ScanlineRenderer<RawRunEncoder> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: ScanlinePixelRunEncoder> ScanlineRenderer<E> {
    pub fn with_encoder(encoder: E) -> Self {
        Self { encoder }
    }

    /// Words a full scanline occupies.
    pub fn words_per_scanline(&self) -> usize {
        self.encoder.encoded_len(PIXELS_PER_LINE)
    }

    /// Resolve the colors of every dot on `scanline`.
    pub fn resolve_line(
        &self,
        ctx: &RenderContext,
        scanline: usize,
        pixels: &mut [PackedColor; PIXELS_PER_LINE],
    ) -> Result<(), RenderError> {
        if scanline >= VISIBLE_SCANLINES {
            return Err(RenderError::ScanlineOutOfRange {
                scanline,
                visible: VISIBLE_SCANLINES,
            });
        }
        let text_row = scanline / ROWS_PER_GLYPH;
        let glyph_row = scanline % ROWS_PER_GLYPH;
        let cells = ctx.grid.row(text_row)?;

        for (cell, dots) in cells.iter().zip(pixels.chunks_exact_mut(DOTS_PER_GLYPH)) {
            let bits = ctx.font.glyph_row(cell.glyph, glyph_row);
            let fg = ctx.palette.color(cell.attr.fg());
            let bg = ctx.palette.color(cell.attr.bg());
            dots.copy_from_slice(&expand_glyph_row(bits, fg, bg));
        }
        Ok(())
    }

    /// Render `scanline` into the start of `out`, returning the words used.
    ///
    /// # Panics
    /// Panics if `out` is shorter than [`words_per_scanline`](Self::words_per_scanline).
    pub fn render_into(
        &self,
        ctx: &RenderContext,
        scanline: usize,
        out: &mut [u32],
    ) -> Result<usize, RenderError> {
        let mut pixels = [PackedColor::BLACK; PIXELS_PER_LINE];
        self.resolve_line(ctx, scanline, &mut pixels)?;
        Ok(self.encoder.encode(&pixels, out))
    }

    /// Render `scanline` into a freshly allocated word vector.
    pub fn render(&self, ctx: &RenderContext, scanline: usize) -> Result<Vec<u32>, RenderError> {
        let mut out = vec![0; self.words_per_scanline()];
        let used = self.render_into(ctx, scanline, &mut out)?;
        out.truncate(used);
        Ok(out)
    }
}
