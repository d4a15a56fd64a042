//! Scanout engine interface.
//!
//! The timing generator requests scanlines one at a time. Each request is a
//! [`ScanlineBuffer`] tagged with a [`ScanlineId`]; the consumer fills it and
//! hands it back with [`ScanoutEngine::release`]. Acquisition is the only
//! place the render thread ever waits.
//!
//! # Sub-modules
//!
//! - [`software`] — in-process engine with optional real-time pacing

pub mod software;

pub use software::{CancelToken, ScanoutOptions, ScanoutStats, SoftwareScanout};

use par_textvideo_config::VideoMode;
use thiserror::Error;

/// Frame and scanline number of a scanline request.
///
/// The frame number occupies the upper 16 bits and wraps at 65536; the
/// scanline number occupies the lower 16 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanlineId(u32);

impl ScanlineId {
    pub const fn new(frame: u32, scanline: u32) -> Self {
        ScanlineId((frame & 0xFFFF) << 16 | (scanline & 0xFFFF))
    }

    pub const fn from_raw(raw: u32) -> Self {
        ScanlineId(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn frame_number(self) -> u32 {
        self.0 >> 16
    }

    pub const fn scanline_number(self) -> u32 {
        self.0 & 0xFFFF
    }
}

/// Outcome reported when a buffer is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanlineStatus {
    /// The buffer holds a complete encoded line.
    #[default]
    Ok,
    /// The line was not rendered; the engine shows blanking instead.
    Abort,
}

/// One scanline request and the storage the line is rendered into.
#[derive(Debug)]
pub struct ScanlineBuffer {
    id: ScanlineId,
    data: Vec<u32>,
    data_used: usize,
    status: ScanlineStatus,
}

impl ScanlineBuffer {
    /// A request for `id` backed by `capacity` words.
    pub fn new(id: ScanlineId, capacity: usize) -> Self {
        Self {
            id,
            data: vec![0; capacity],
            data_used: 0,
            status: ScanlineStatus::Ok,
        }
    }

    pub(crate) fn reuse(mut data: Vec<u32>, id: ScanlineId) -> Self {
        data.fill(0);
        Self {
            id,
            data,
            data_used: 0,
            status: ScanlineStatus::Ok,
        }
    }

    pub(crate) fn into_storage(self) -> Vec<u32> {
        self.data
    }

    pub fn id(&self) -> ScanlineId {
        self.id
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Whole backing storage, for the renderer to write into.
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// The words written so far.
    pub fn data(&self) -> &[u32] {
        &self.data[..self.data_used.min(self.data.len())]
    }

    pub fn data_used(&self) -> usize {
        self.data_used
    }

    pub fn set_data_used(&mut self, words: usize) {
        self.data_used = words;
    }

    pub fn status(&self) -> ScanlineStatus {
        self.status
    }

    pub fn set_status(&mut self, status: ScanlineStatus) {
        self.status = status;
    }
}

/// Errors raised by scanout engines.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanoutError {
    /// The requested mode does not fit the text grid geometry.
    #[error("Video mode {requested} is not supported (expected {expected})")]
    ModeMismatch {
        requested: String,
        expected: String,
    },

    /// Timing was enabled before a mode was set up.
    #[error("Scanout timing enabled before a video mode was set up")]
    NotConfigured,

    /// A released buffer claims more words than it holds.
    #[error("Scanline {scanline} reports {used} words but the buffer holds {capacity}")]
    DataOverrun {
        scanline: u32,
        used: usize,
        capacity: usize,
    },
}

/// A source of scanline requests.
///
/// `acquire_scanline_buffer(true)` blocks until the next line is due and
/// returns `None` when the engine has shut down. Hardware engines never
/// shut down; software engines stop at a frame limit or on cancellation.
///
/// A blocking acquire also returns `None` if the caller still holds every
/// buffer of the pool, since no release can happen while it waits. Engines
/// log this as an error; callers that release each buffer before the next
/// acquire never hit it.
pub trait ScanoutEngine {
    /// Select the video mode. Must be called before `timing_enable(true)`.
    fn setup(&mut self, mode: &VideoMode) -> Result<(), ScanoutError>;

    /// Start or stop scanline generation.
    fn timing_enable(&mut self, enable: bool) -> Result<(), ScanoutError>;

    /// Next scanline request. With `blocking == false`, returns `None` when no
    /// line is due yet. Returns `None` in either mode when no buffer is free.
    fn acquire_scanline_buffer(&mut self, blocking: bool) -> Option<ScanlineBuffer>;

    /// Hand a filled (or aborted) buffer back to the engine.
    fn release(&mut self, buffer: ScanlineBuffer) -> Result<(), ScanoutError>;
}
