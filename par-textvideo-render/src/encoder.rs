//! Scanout wire encoding for one rendered scanline.
//!
//! A raw run carries its pixels two per word, low half first. The first two
//! pixels ride in the upper halves of the two header words:
//!
//! ```text
//! word 0        RAW_RUN_MARKER | pixel0 << 16
//! word 1        (pixels - 3)   | pixel1 << 16
//! word 2..N-1   pixel2k        | pixel2k+1 << 16
//! word N        END_OF_LINE_MARKER
//! ```
//!
//! The timing generator holds the last pixel of a line until blanking, so
//! the final pixel (upper half of word N-1) is always black.

use crate::error::RenderError;
use crate::palette::PackedColor;
use par_textvideo_config::COLUMNS;

/// Token opening a raw pixel run.
pub const RAW_RUN_MARKER: u32 = 2;

/// Token ending a scanline.
pub const END_OF_LINE_MARKER: u32 = 5;

/// Words produced for a full visible line.
pub const WORDS_PER_SCANLINE: usize = COLUMNS * 4 + 2;

/// Pixels a raw run carries outside its count field.
const RUN_COUNT_BIAS: usize = 3;

const LOW_HALF: u32 = 0xFFFF;

/// Packs a line of resolved pixels into scanout words.
pub trait ScanlinePixelRunEncoder {
    /// Words needed to encode `pixels` pixels.
    fn encoded_len(&self, pixels: usize) -> usize;

    /// Encode `pixels` into the start of `out` and return the word count.
    ///
    /// # Panics
    /// Panics if `out` is shorter than [`encoded_len`](Self::encoded_len).
    fn encode(&self, pixels: &[PackedColor], out: &mut [u32]) -> usize;

    /// Recover the pixels from an encoded line.
    fn decode(&self, words: &[u32]) -> Result<Vec<PackedColor>, RenderError>;
}

/// Single raw run per line followed by the end-of-line marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawRunEncoder;

impl ScanlinePixelRunEncoder for RawRunEncoder {
    fn encoded_len(&self, pixels: usize) -> usize {
        pixels / 2 + 2
    }

    fn encode(&self, pixels: &[PackedColor], out: &mut [u32]) -> usize {
        debug_assert!(
            pixels.len() >= 4
                && pixels.len() % 2 == 0
                && pixels.len() - RUN_COUNT_BIAS <= LOW_HALF as usize,
            "raw run of {} pixels",
            pixels.len()
        );
        let needed = self.encoded_len(pixels.len());
        assert!(
            out.len() >= needed,
            "scanline buffer holds {} words, {} needed",
            out.len(),
            needed
        );

        out[0] = RAW_RUN_MARKER | (pixels[0].0 as u32) << 16;
        out[1] = (pixels.len() - RUN_COUNT_BIAS) as u32 | (pixels[1].0 as u32) << 16;

        let mut pos = 2;
        for pair in pixels[2..].chunks_exact(2) {
            out[pos] = pair[0].0 as u32 | (pair[1].0 as u32) << 16;
            pos += 1;
        }
        out[pos - 1] &= LOW_HALF;

        out[pos] = END_OF_LINE_MARKER;
        pos + 1
    }

    fn decode(&self, words: &[u32]) -> Result<Vec<PackedColor>, RenderError> {
        if words.len() < 4 {
            return Err(RenderError::MalformedRun(format!(
                "{} words is too short for a raw run",
                words.len()
            )));
        }
        if words[0] & LOW_HALF != RAW_RUN_MARKER {
            return Err(RenderError::MalformedRun(format!(
                "expected raw run marker, found {:#x}",
                words[0] & LOW_HALF
            )));
        }

        let count = (words[1] & LOW_HALF) as usize + RUN_COUNT_BIAS;
        if count % 2 != 0 {
            return Err(RenderError::MalformedRun(format!(
                "odd run length {count}"
            )));
        }
        let expected = self.encoded_len(count);
        if words.len() != expected {
            return Err(RenderError::MalformedRun(format!(
                "run of {count} pixels needs {expected} words, got {}",
                words.len()
            )));
        }
        let eol = words[expected - 1];
        if eol != END_OF_LINE_MARKER {
            return Err(RenderError::MalformedRun(format!(
                "expected end-of-line marker, found {eol:#x}"
            )));
        }

        let mut pixels = Vec::with_capacity(count);
        pixels.push(PackedColor((words[0] >> 16) as u16));
        pixels.push(PackedColor((words[1] >> 16) as u16));
        for &word in &words[2..expected - 1] {
            pixels.push(PackedColor((word & LOW_HALF) as u16));
            pixels.push(PackedColor((word >> 16) as u16));
        }
        Ok(pixels)
    }
}
