// Library exports for testing and potential library use
//
// The render thread owns the `RenderContext` and is the only code that
// touches its grid. Anything produced on another thread goes through a
// `SharedGrid` (`parking_lot::Mutex`) and is copied in by a frame hook.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod cli;
pub mod debug;
pub mod dispatch;
pub mod feed;
pub mod hooks;
pub mod scanout;

pub use dispatch::{DispatchStats, FrameDispatchLoop};
pub use hooks::{FrameCounterHook, FrameUpdateHook, NoopHook, SharedGridHook};
pub use scanout::{
    CancelToken, ScanlineBuffer, ScanlineId, ScanlineStatus, ScanoutEngine, ScanoutError,
    ScanoutOptions, SoftwareScanout,
};

// Re-export the workspace crates under their concern names
pub use par_textvideo_config as config;
pub use par_textvideo_fonts as fonts;
pub use par_textvideo_render as render;
pub use par_textvideo_terminal as terminal;
