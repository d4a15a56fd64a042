//! Character grid startup and per-frame update settings.

use serde::{Deserialize, Serialize};

/// Content written to the character grid at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FillPattern {
    /// Cycle through all 95 printable characters across the screen
    #[default]
    Sweep,
    /// Fill every cell with a space
    Blank,
}

/// Built-in frame-update hook run at every frame boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HookKind {
    /// Leave the grid untouched
    #[default]
    None,
    /// Print the current frame number on the bottom row
    FrameCounter,
}

impl HookKind {
    /// Display name for logs and the CLI
    pub fn display_name(&self) -> &'static str {
        match self {
            HookKind::None => "none",
            HookKind::FrameCounter => "frame counter",
        }
    }
}
