//! Application setup and run loop.
//!
//! Loads the config, builds the render context, wires the frame hooks and
//! optional stdin feed, and runs the dispatch loop against the software
//! scanout engine.

use crate::cli::RuntimeOptions;
use crate::dispatch::{DispatchStats, FrameDispatchLoop};
use crate::feed::TextFeed;
use crate::hooks::{FrameCounterHook, FrameUpdateHook, SharedGridHook};
use crate::scanout::{CancelToken, ScanoutEngine, ScanoutOptions, SoftwareScanout};
use anyhow::{Context, Result};
use par_textvideo_config::{Config, HookKind};
use par_textvideo_fonts::GlyphFont;
use par_textvideo_render::{Palette, RenderContext, ScanlineRenderer};
use par_textvideo_terminal::{CharacterGrid, SharedGrid};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Build the render context a config describes: startup grid, font and palette.
pub fn build_context(config: &Config) -> Result<RenderContext> {
    let palette = Palette::from_config(&config.palette)?;
    let font = match &config.font_path {
        Some(path) => GlyphFont::from_file(path)?,
        None => GlyphFont::builtin(),
    };
    let grid = CharacterGrid::filled(config.initial_fill, config.default_attribute);
    Ok(RenderContext::new(grid, font, palette))
}

/// Encoded words of one scanline of the startup screen.
pub fn render_startup_scanline(config: &Config, scanline: usize) -> Result<Vec<u32>> {
    let context = build_context(config)?;
    let words = ScanlineRenderer::new().render(&context, scanline)?;
    Ok(words)
}

/// The hook chain the application runs each frame: shared-grid copy first,
/// then the frame counter on top.
#[derive(Debug, Default)]
pub struct AppHook {
    shared: Option<SharedGridHook>,
    counter: Option<FrameCounterHook>,
}

impl AppHook {
    pub fn new(shared: Option<SharedGridHook>, counter: Option<FrameCounterHook>) -> Self {
        Self { shared, counter }
    }
}

impl FrameUpdateHook for AppHook {
    fn on_frame(&mut self, frame: u32, grid: &mut CharacterGrid) {
        if let Some(shared) = self.shared.as_mut() {
            shared.on_frame(frame, grid);
        }
        if let Some(counter) = self.counter.as_mut() {
            counter.on_frame(frame, grid);
        }
    }
}

/// Main application state
pub struct App {
    config: Config,
    options: RuntimeOptions,
    engine: SoftwareScanout,
}

impl App {
    /// Load the config (from `--config` or the default path) and apply CLI
    /// overrides.
    pub fn new(options: RuntimeOptions) -> Result<Self> {
        let config = match &options.config_path {
            Some(path) => Config::load_from(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => Config::load()?,
        };
        crate::debug::apply_config_log_level(config.log_level);
        Ok(Self::with_config(config, options))
    }

    /// Use an already-loaded config.
    pub fn with_config(mut config: Config, options: RuntimeOptions) -> Self {
        if let Some(frames) = options.frames {
            config.frame_limit = Some(frames);
        }
        if options.no_pacing {
            config.pacing = false;
        }
        if options.screenshot.is_some() && config.frame_limit.is_none() {
            log::info!("Screenshot requested without a frame limit; rendering one frame");
            config.frame_limit = Some(1);
        }

        let mut scanout_options = ScanoutOptions::from_config(&config);
        if options.screenshot.is_some() {
            scanout_options.capture_frame = config.frame_limit.map(|n| n.saturating_sub(1));
        }

        Self {
            config,
            options,
            engine: SoftwareScanout::new(scanout_options),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Token that stops the run loop from another thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.engine.cancel_token()
    }

    /// Run until the frame limit or cancellation.
    pub fn run(mut self) -> Result<DispatchStats> {
        let context = build_context(&self.config)?;

        let (feed, shared_hook) = if self.options.feed_stdin {
            let shared = SharedGrid::new(context.grid().clone());
            let feed = TextFeed::start(
                BufReader::new(std::io::stdin()),
                shared.clone(),
                self.config.default_attribute,
            )
            .context("starting stdin feed")?;
            (Some(feed), Some(SharedGridHook::new(shared)))
        } else {
            (None, None)
        };

        let counter = (self.config.frame_hook == HookKind::FrameCounter)
            .then(|| FrameCounterHook::new(self.config.default_attribute.inverted()));
        log::info!(
            "Frame hook: {}{}",
            self.config.frame_hook.display_name(),
            if shared_hook.is_some() { " + stdin feed" } else { "" }
        );
        let hook = AppHook::new(shared_hook, counter);

        self.engine.setup(&self.config.video_mode)?;
        self.engine.timing_enable(true)?;
        let mut dispatch = FrameDispatchLoop::new(context, hook);
        let stats = dispatch.run(&mut self.engine);
        self.engine.timing_enable(false)?;

        if let Some(feed) = feed {
            log::info!("Text feed delivered {} lines", feed.lines_read());
            feed.stop();
        }

        if let Some(requested) = &self.options.screenshot {
            let path = screenshot_path(requested);
            match self.engine.take_capture() {
                Some(capture) => capture.save_png(&path)?,
                None => log::warn!("No frame was captured for the screenshot"),
            }
        }

        let scanout = self.engine.stats();
        if scanout.pool_exhausted > 0 {
            log::error!(
                "Run ended early: {} acquires found no free scanline buffer",
                scanout.pool_exhausted
            );
        }
        if scanout.late_lines > 0 {
            log::warn!(
                "{} of {} scanlines were released late",
                scanout.late_lines,
                scanout.lines_released + scanout.lines_aborted
            );
        }
        Ok(stats)
    }
}

/// Resolve `--screenshot`: an empty path means a timestamped file in the
/// current directory.
fn screenshot_path(requested: &Path) -> PathBuf {
    if requested.as_os_str().is_empty() {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        PathBuf::from(format!("par-textvideo-{secs}.png"))
    } else {
        requested.to_path_buf()
    }
}
