//! In-process scanout engine.
//!
//! Produces scanline requests in display order, `VISIBLE_SCANLINES` per
//! frame, with a fixed pool of buffers. When pacing is on, each request is
//! handed out `buffer_count` lines ahead of its display time and lines
//! released after their display time are counted as late.

use super::{ScanlineBuffer, ScanlineId, ScanlineStatus, ScanoutEngine, ScanoutError};
use par_textvideo_config::{Config, PIXELS_PER_LINE, VISIBLE_SCANLINES, VideoMode};
use par_textvideo_render::{FrameCapture, RawRunEncoder, WORDS_PER_SCANLINE};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

const LINES_PER_FRAME: u64 = VISIBLE_SCANLINES as u64;

/// Stops a [`SoftwareScanout`] from any thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Software engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanoutOptions {
    /// Hold each request until it is due at the mode's refresh rate
    pub pacing: bool,
    /// Shut down after this many frames
    pub frame_limit: Option<u64>,
    /// Buffers in the pool, and how many lines ahead requests are issued
    pub buffer_count: usize,
    /// Decode this frame into a [`FrameCapture`]
    pub capture_frame: Option<u64>,
}

impl Default for ScanoutOptions {
    fn default() -> Self {
        Self {
            pacing: par_textvideo_config::defaults::pacing(),
            frame_limit: None,
            buffer_count: par_textvideo_config::defaults::buffer_count(),
            capture_frame: None,
        }
    }
}

impl ScanoutOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            pacing: config.pacing,
            frame_limit: config.frame_limit,
            buffer_count: config.buffer_count,
            capture_frame: None,
        }
    }
}

/// Counters kept by the software engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanoutStats {
    /// Frames started
    pub frames: u64,
    /// Requests handed out
    pub lines_acquired: u64,
    /// Buffers released with `ScanlineStatus::Ok`
    pub lines_released: u64,
    /// Buffers released with `ScanlineStatus::Abort`
    pub lines_aborted: u64,
    /// Lines released after their display time (pacing only)
    pub late_lines: u64,
    /// Acquires refused because every buffer was in flight
    pub pool_exhausted: u64,
}

/// Scanout engine that runs entirely in-process.
#[derive(Debug)]
pub struct SoftwareScanout {
    options: ScanoutOptions,
    mode: Option<VideoMode>,
    enabled: bool,
    started: Option<Instant>,
    next_line: u64,
    free: Vec<Vec<u32>>,
    pending: VecDeque<u64>,
    cancel: CancelToken,
    stats: ScanoutStats,
    encoder: RawRunEncoder,
    capture: Option<FrameCapture>,
    finished_capture: Option<FrameCapture>,
}

impl SoftwareScanout {
    pub fn new(options: ScanoutOptions) -> Self {
        Self {
            options,
            mode: None,
            enabled: false,
            started: None,
            next_line: 0,
            free: Vec::new(),
            pending: VecDeque::new(),
            cancel: CancelToken::new(),
            stats: ScanoutStats::default(),
            encoder: RawRunEncoder,
            capture: None,
            finished_capture: None,
        }
    }

    /// Token that makes the next acquire return `None`.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn stats(&self) -> ScanoutStats {
        self.stats
    }

    pub fn mode(&self) -> Option<VideoMode> {
        self.mode
    }

    /// The captured frame, once its last line has been released. A partially
    /// captured frame is returned if the engine stopped before finishing it.
    pub fn take_capture(&mut self) -> Option<FrameCapture> {
        self.finished_capture.take().or_else(|| self.capture.take())
    }

    fn id_for(line: u64) -> ScanlineId {
        ScanlineId::new(
            (line / LINES_PER_FRAME) as u32,
            (line % LINES_PER_FRAME) as u32,
        )
    }

    /// Time from timing start to the beginning of `line`.
    fn line_offset(&self, line: u64) -> Duration {
        let period = self.mode.map(|m| m.line_period()).unwrap_or_default();
        let nanos = period.as_nanos().saturating_mul(line as u128);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    /// Wait until `line` may be handed out. Returns `false` if it is not
    /// due and the caller does not want to block, or if cancelled meanwhile.
    fn wait_until_due(&self, line: u64, blocking: bool) -> bool {
        if !self.options.pacing {
            return true;
        }
        let Some(started) = self.started else {
            return true;
        };
        let lead = self.options.buffer_count as u64;
        let due = started + self.line_offset(line.saturating_sub(lead));
        let now = Instant::now();
        if now >= due {
            return true;
        }
        if !blocking {
            return false;
        }
        std::thread::sleep(due - now);
        !self.cancel.is_cancelled()
    }

    fn record_capture(&mut self, line: u64, buffer: &ScanlineBuffer) {
        let frame = line / LINES_PER_FRAME;
        let scanline = (line % LINES_PER_FRAME) as usize;
        let Some(capture) = self.capture.as_mut() else {
            return;
        };
        if u64::from(capture.frame()) != frame {
            return;
        }
        if buffer.status() == ScanlineStatus::Ok
            && let Err(e) = capture.record_words(&self.encoder, scanline, buffer.data())
        {
            log::warn!("Capture of scanline {} failed: {}", scanline, e);
        }
        if scanline == VISIBLE_SCANLINES - 1 {
            log::debug!("Frame {} capture complete", frame);
            self.finished_capture = self.capture.take();
        }
    }
}

impl ScanoutEngine for SoftwareScanout {
    fn setup(&mut self, mode: &VideoMode) -> Result<(), ScanoutError> {
        if mode.width as usize != PIXELS_PER_LINE
            || mode.height as usize != VISIBLE_SCANLINES
            || mode.refresh_hz == 0
        {
            return Err(ScanoutError::ModeMismatch {
                requested: mode.name(),
                expected: VideoMode::MODE_320X240_60.name(),
            });
        }
        self.mode = Some(*mode);
        let buffers = self.options.buffer_count.max(1);
        self.free = (0..buffers).map(|_| vec![0; WORDS_PER_SCANLINE]).collect();
        self.pending.clear();
        log::info!(
            "Software scanout set up for {} with {} buffers (pacing {})",
            mode.name(),
            buffers,
            if self.options.pacing { "on" } else { "off" }
        );
        Ok(())
    }

    fn timing_enable(&mut self, enable: bool) -> Result<(), ScanoutError> {
        if enable {
            if self.mode.is_none() {
                return Err(ScanoutError::NotConfigured);
            }
            if !self.enabled {
                self.started = Some(Instant::now());
                self.enabled = true;
                log::info!("Scanout timing enabled");
            }
        } else if self.enabled {
            self.enabled = false;
            log::info!(
                "Scanout timing disabled after {} frames ({} lines, {} aborted, {} late)",
                self.stats.frames,
                self.stats.lines_released,
                self.stats.lines_aborted,
                self.stats.late_lines
            );
        }
        Ok(())
    }

    fn acquire_scanline_buffer(&mut self, blocking: bool) -> Option<ScanlineBuffer> {
        if !self.enabled {
            log::debug!("Scanline requested while timing is disabled");
            return None;
        }
        if self.cancel.is_cancelled() {
            log::info!("Software scanout cancelled");
            return None;
        }
        let line = self.next_line;
        let frame = line / LINES_PER_FRAME;
        if let Some(limit) = self.options.frame_limit
            && frame >= limit
        {
            log::debug!("Frame limit {} reached", limit);
            return None;
        }
        if self.free.is_empty() {
            self.stats.pool_exhausted += 1;
            log::error!(
                "All {} scanline buffers are in flight",
                self.options.buffer_count.max(1)
            );
            return None;
        }
        if !self.wait_until_due(line, blocking) {
            return None;
        }
        let storage = self.free.pop()?;

        if line % LINES_PER_FRAME == 0 {
            self.stats.frames += 1;
            log::trace!("Frame {} started", frame);
            if self.options.capture_frame == Some(frame) {
                self.capture = Some(FrameCapture::new(frame as u32));
            }
        }

        self.next_line += 1;
        self.pending.push_back(line);
        self.stats.lines_acquired += 1;
        Some(ScanlineBuffer::reuse(storage, Self::id_for(line)))
    }

    fn release(&mut self, buffer: ScanlineBuffer) -> Result<(), ScanoutError> {
        let id = buffer.id();
        let pending = self
            .pending
            .iter()
            .position(|&line| Self::id_for(line) == id)
            .and_then(|pos| self.pending.remove(pos));

        let result = if buffer.data_used() > buffer.capacity() {
            Err(ScanoutError::DataOverrun {
                scanline: id.scanline_number(),
                used: buffer.data_used(),
                capacity: buffer.capacity(),
            })
        } else {
            Ok(())
        };

        match buffer.status() {
            ScanlineStatus::Abort => self.stats.lines_aborted += 1,
            ScanlineStatus::Ok => self.stats.lines_released += 1,
        }

        if let Some(line) = pending {
            if self.options.pacing
                && let Some(started) = self.started
                && Instant::now() > started + self.line_offset(line + 1)
            {
                self.stats.late_lines += 1;
            }
            if result.is_ok() {
                self.record_capture(line, &buffer);
            }
        } else {
            log::warn!("Released scanline {:#010x} was never acquired", id.raw());
        }

        self.free.push(buffer.into_storage());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unpaced(frame_limit: Option<u64>) -> SoftwareScanout {
        let mut engine = SoftwareScanout::new(ScanoutOptions {
            pacing: false,
            frame_limit,
            buffer_count: 2,
            capture_frame: None,
        });
        engine.setup(&VideoMode::default()).expect("setup");
        engine.timing_enable(true).expect("enable");
        engine
    }

    #[test]
    fn rejects_other_modes() {
        let mut engine = SoftwareScanout::new(ScanoutOptions::default());
        let mode = VideoMode {
            width: 640,
            height: 480,
            refresh_hz: 60,
        };
        assert!(matches!(
            engine.setup(&mode),
            Err(ScanoutError::ModeMismatch { .. })
        ));
    }

    #[test]
    fn timing_requires_setup() {
        let mut engine = SoftwareScanout::new(ScanoutOptions::default());
        assert_eq!(engine.timing_enable(true), Err(ScanoutError::NotConfigured));
        assert!(engine.acquire_scanline_buffer(false).is_none());
    }

    #[test]
    fn ids_advance_in_display_order() {
        let mut engine = unpaced(None);
        for expected in 0..(LINES_PER_FRAME + 3) {
            let buffer = engine.acquire_scanline_buffer(true).expect("buffer");
            assert_eq!(buffer.id(), SoftwareScanout::id_for(expected));
            assert_eq!(buffer.capacity(), WORDS_PER_SCANLINE);
            engine.release(buffer).expect("release");
        }
        assert_eq!(engine.stats().frames, 2);
    }

    #[test]
    fn stops_at_frame_limit() {
        let mut engine = unpaced(Some(1));
        let mut lines = 0;
        while let Some(buffer) = engine.acquire_scanline_buffer(true) {
            engine.release(buffer).expect("release");
            lines += 1;
        }
        assert_eq!(lines, VISIBLE_SCANLINES);
    }

    #[test]
    fn cancel_token_stops_acquisition() {
        let mut engine = unpaced(None);
        let token = engine.cancel_token();
        assert!(engine.acquire_scanline_buffer(true).is_some());
        token.cancel();
        assert!(engine.acquire_scanline_buffer(true).is_none());
    }

    #[test]
    fn pool_exhaustion_returns_none() {
        let mut engine = unpaced(None);
        let a = engine.acquire_scanline_buffer(true).expect("first");
        let _b = engine.acquire_scanline_buffer(true).expect("second");
        assert!(engine.acquire_scanline_buffer(true).is_none());
        assert_eq!(engine.stats().pool_exhausted, 1);
        // Exhaustion is not a shutdown: releasing a buffer resumes the stream.
        engine.release(a).expect("release");
        let next = engine.acquire_scanline_buffer(true).expect("resumed");
        assert_eq!(next.id(), ScanlineId::new(0, 2));
    }

    #[test]
    fn overrun_is_reported_and_buffer_returned() {
        let mut engine = unpaced(None);
        let mut buffer = engine.acquire_scanline_buffer(true).expect("buffer");
        buffer.set_data_used(WORDS_PER_SCANLINE + 1);
        assert!(matches!(
            engine.release(buffer),
            Err(ScanoutError::DataOverrun { scanline: 0, .. })
        ));
        assert!(engine.acquire_scanline_buffer(true).is_some());
    }

    #[test]
    fn aborted_lines_are_counted() {
        let mut engine = unpaced(None);
        let mut buffer = engine.acquire_scanline_buffer(true).expect("buffer");
        buffer.set_status(ScanlineStatus::Abort);
        engine.release(buffer).expect("release");
        assert_eq!(engine.stats().lines_aborted, 1);
        assert_eq!(engine.stats().lines_released, 0);
    }

    #[test]
    fn paced_non_blocking_acquire_waits_for_due_line() {
        let mut engine = SoftwareScanout::new(ScanoutOptions {
            pacing: true,
            frame_limit: None,
            buffer_count: 1,
            capture_frame: None,
        });
        engine.setup(&VideoMode::default()).expect("setup");
        engine.timing_enable(true).expect("enable");

        // Line 0 is due immediately; far-future lines are not.
        let first = engine.acquire_scanline_buffer(false).expect("line 0");
        engine.release(first).expect("release");
        engine.next_line = LINES_PER_FRAME * 600;
        assert!(engine.acquire_scanline_buffer(false).is_none());
    }
}
