//! Frame capture to PNG.
//!
//! Scanlines are decoded back from the wire words as they are released, so
//! a capture shows exactly what the timing generator was handed, including
//! the forced-black last pixel of every line.

use crate::encoder::ScanlinePixelRunEncoder;
use crate::error::RenderError;
use crate::palette::PackedColor;
use image::{ImageFormat, Rgb, RgbImage};
use par_textvideo_config::{PIXELS_PER_LINE, VISIBLE_SCANLINES};
use std::path::Path;

/// Accumulates the decoded scanlines of one frame.
#[derive(Debug, Clone)]
pub struct FrameCapture {
    frame: u32,
    lines: Vec<Option<Vec<PackedColor>>>,
}

impl FrameCapture {
    pub fn new(frame: u32) -> Self {
        Self {
            frame,
            lines: vec![None; VISIBLE_SCANLINES],
        }
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Decode `words` with `encoder` and store them as `scanline`.
    pub fn record_words(
        &mut self,
        encoder: &impl ScanlinePixelRunEncoder,
        scanline: usize,
        words: &[u32],
    ) -> Result<(), RenderError> {
        let pixels = encoder.decode(words)?;
        self.record_line(scanline, pixels)
    }

    /// Store resolved pixels for `scanline`.
    pub fn record_line(
        &mut self,
        scanline: usize,
        pixels: Vec<PackedColor>,
    ) -> Result<(), RenderError> {
        let slot = self
            .lines
            .get_mut(scanline)
            .ok_or(RenderError::ScanlineOutOfRange {
                scanline,
                visible: VISIBLE_SCANLINES,
            })?;
        *slot = Some(pixels);
        Ok(())
    }

    /// Number of scanlines recorded so far.
    pub fn recorded(&self) -> usize {
        self.lines.iter().filter(|l| l.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.recorded() == VISIBLE_SCANLINES
    }

    /// Build an 8-bit RGB image. Lines never recorded stay black.
    pub fn to_image(&self) -> RgbImage {
        let mut img = RgbImage::new(PIXELS_PER_LINE as u32, VISIBLE_SCANLINES as u32);
        for (y, line) in self.lines.iter().enumerate() {
            let Some(pixels) = line else { continue };
            for (x, color) in pixels.iter().take(PIXELS_PER_LINE).enumerate() {
                img.put_pixel(x as u32, y as u32, Rgb(color.to_rgb8()));
            }
        }
        img
    }

    /// Write the capture as a PNG file.
    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        if self.recorded() == 0 {
            return Err(RenderError::EmptyCapture { frame: self.frame });
        }
        if !self.is_complete() {
            log::warn!(
                "Saving frame {} with {} of {} scanlines",
                self.frame,
                self.recorded(),
                VISIBLE_SCANLINES
            );
        }
        self.to_image()
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| RenderError::ImageSave {
                path: path.display().to_string(),
                source,
            })?;
        log::info!("Saved frame {} capture to {}", self.frame, path.display());
        Ok(())
    }
}
