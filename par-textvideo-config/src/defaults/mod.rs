//! Default value functions for configuration.
//!
//! Each sub-module groups related `default_*` free functions used as
//! `#[serde(default = "crate::defaults::...")]` attributes on `Config` fields.

mod colors;
mod video;

// ── Colors ─────────────────────────────────────────────────────────────────
pub use colors::{default_attribute, palette};

// ── Video mode & scanout ───────────────────────────────────────────────────
pub use video::{buffer_count, pacing, video_mode};
