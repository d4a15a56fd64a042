//! Core `Config` struct definition.

use crate::cell::Attribute;
use crate::types::{FillPattern, HookKind, LogLevel, Rgb5, VideoMode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for one run of the text-mode video pipeline.
///
/// Every field has a serde default so partial YAML files load cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // ========================================================================
    // Video mode & scanout
    // ========================================================================
    /// Display mode requested from the scanout engine at startup
    #[serde(default = "crate::defaults::video_mode")]
    pub video_mode: VideoMode,

    /// Pace the software scanout engine at the mode's refresh rate
    #[serde(default = "crate::defaults::pacing")]
    pub pacing: bool,

    /// Stop after this many frames (runs forever when unset)
    #[serde(default)]
    pub frame_limit: Option<u64>,

    /// Number of scanline buffers in the software scanout pool
    #[serde(default = "crate::defaults::buffer_count")]
    pub buffer_count: usize,

    // ========================================================================
    // Colors & font
    // ========================================================================
    /// The 16 palette entries, `[r, g, b]` with 5 bits per channel
    #[serde(default = "crate::defaults::palette")]
    pub palette: Vec<Rgb5>,

    /// Raw 8x16 font file (95 glyphs x 16 bytes); the built-in font when unset
    #[serde(default)]
    pub font_path: Option<PathBuf>,

    // ========================================================================
    // Character grid
    // ========================================================================
    /// Attribute used for the startup fill
    #[serde(default = "crate::defaults::default_attribute")]
    pub default_attribute: Attribute,

    /// Startup content of the character grid
    #[serde(default)]
    pub initial_fill: FillPattern,

    /// Built-in frame-update hook
    #[serde(default)]
    pub frame_hook: HookKind,

    // ========================================================================
    // Debug Logging
    // ========================================================================
    /// Log level for the debug log file
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            video_mode: crate::defaults::video_mode(),
            pacing: crate::defaults::pacing(),
            frame_limit: None,
            buffer_count: crate::defaults::buffer_count(),
            palette: crate::defaults::palette(),
            font_path: None,
            default_attribute: crate::defaults::default_attribute(),
            initial_fill: FillPattern::default(),
            frame_hook: HookKind::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Set the frame limit
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Set the built-in frame hook
    pub fn with_frame_hook(mut self, hook: HookKind) -> Self {
        self.frame_hook = hook;
        self
    }
}
