//! The frame dispatch loop.
//!
//! Pulls scanline requests from a [`ScanoutEngine`], runs the frame-update
//! hook whenever a new frame number shows up, renders the requested line
//! into the request's buffer and hands it back. Rendering, the hook and the
//! loop all run on the calling thread; the blocking acquire is the only
//! place it waits.

use crate::hooks::FrameUpdateHook;
use crate::scanout::{ScanlineStatus, ScanoutEngine};
use par_textvideo_render::{RawRunEncoder, RenderContext, ScanlinePixelRunEncoder, ScanlineRenderer};

/// Counters returned when the loop ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Distinct frames observed; the hook ran once for each
    pub frames: u64,
    /// Scanlines rendered and released with `ScanlineStatus::Ok`
    pub scanlines: u64,
    /// Requests outside the visible area, released with `ScanlineStatus::Abort`
    pub aborted: u64,
    /// Releases the engine rejected
    pub release_errors: u64,
}

/// Drives a render context from an engine's scanline requests.
pub struct FrameDispatchLoop<H, E = RawRunEncoder> {
    context: RenderContext,
    renderer: ScanlineRenderer<E>,
    hook: H,
    last_frame: Option<u32>,
    stats: DispatchStats,
}

impl<H: FrameUpdateHook> FrameDispatchLoop<H, RawRunEncoder> {
    pub fn new(context: RenderContext, hook: H) -> Self {
        Self::with_renderer(context, ScanlineRenderer::new(), hook)
    }
}

impl<H: FrameUpdateHook, E: ScanlinePixelRunEncoder> FrameDispatchLoop<H, E> {
    pub fn with_renderer(context: RenderContext, renderer: ScanlineRenderer<E>, hook: H) -> Self {
        Self {
            context,
            renderer,
            hook,
            last_frame: None,
            stats: DispatchStats::default(),
        }
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Serve one scanline request. Returns `false` once the engine has shut
    /// down.
    pub fn step(&mut self, engine: &mut impl ScanoutEngine) -> bool {
        let Some(mut buffer) = engine.acquire_scanline_buffer(true) else {
            return false;
        };
        let id = buffer.id();
        let frame = id.frame_number();

        if self.last_frame != Some(frame) {
            self.hook.on_frame(frame, self.context.grid_mut());
            self.last_frame = Some(frame);
            self.stats.frames += 1;
        }

        let scanline = id.scanline_number() as usize;
        match self
            .renderer
            .render_into(&self.context, scanline, buffer.data_mut())
        {
            Ok(used) => {
                buffer.set_data_used(used);
                self.stats.scanlines += 1;
            }
            Err(e) => {
                log::debug!("Aborting scanline {} of frame {}: {}", scanline, frame, e);
                buffer.set_data_used(0);
                buffer.set_status(ScanlineStatus::Abort);
                self.stats.aborted += 1;
            }
        }

        if let Err(e) = engine.release(buffer) {
            log::warn!("Scanline release failed: {}", e);
            self.stats.release_errors += 1;
        }
        true
    }

    /// Serve requests until the engine shuts down.
    pub fn run(&mut self, engine: &mut impl ScanoutEngine) -> DispatchStats {
        log::info!("Frame dispatch loop started");
        while self.step(engine) {}
        log::info!(
            "Frame dispatch loop finished: {} frames, {} scanlines, {} aborted",
            self.stats.frames,
            self.stats.scanlines,
            self.stats.aborted
        );
        self.stats
    }
}
