//! Display mode settings handed to the scanout engine at startup.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Visible resolution and refresh rate of the video mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMode {
    /// Visible pixels per scanline
    pub width: u32,
    /// Visible scanlines per frame
    pub height: u32,
    /// Frames per second
    pub refresh_hz: u32,
}

impl VideoMode {
    /// The 320x240 @ 60 Hz mode the 40x15 text grid is laid out for.
    pub const MODE_320X240_60: VideoMode = VideoMode {
        width: 320,
        height: 240,
        refresh_hz: 60,
    };

    /// Short name such as `320x240@60`.
    pub fn name(&self) -> String {
        format!("{}x{}@{}", self.width, self.height, self.refresh_hz)
    }

    /// Duration of one frame. Zero refresh rate means unpaced.
    pub fn frame_period(&self) -> Duration {
        if self.refresh_hz == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(1) / self.refresh_hz
        }
    }

    /// Time budget for one visible scanline.
    pub fn line_period(&self) -> Duration {
        if self.height == 0 {
            Duration::ZERO
        } else {
            self.frame_period() / self.height
        }
    }
}

impl Default for VideoMode {
    fn default() -> Self {
        Self::MODE_320X240_60
    }
}
