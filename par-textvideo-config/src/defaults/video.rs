//! Default values for the video mode and the software scanout engine.

use crate::types::VideoMode;

pub fn video_mode() -> VideoMode {
    VideoMode::MODE_320X240_60
}

pub fn pacing() -> bool {
    true
}

pub fn buffer_count() -> usize {
    4
}
