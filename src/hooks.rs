//! Frame-update hooks.
//!
//! A hook runs at most once per frame, before any scanline of that frame is
//! rendered, and is the only code allowed to mutate the render grid. It runs
//! on the render thread, so it must return quickly and must never block.

use par_textvideo_config::{Attribute, COLUMNS, ROWS};
use par_textvideo_terminal::{CharacterGrid, SharedGrid};

/// Called by the dispatch loop whenever a new frame number is observed.
pub trait FrameUpdateHook {
    fn on_frame(&mut self, frame: u32, grid: &mut CharacterGrid);
}

/// Leaves the grid untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl FrameUpdateHook for NoopHook {
    fn on_frame(&mut self, _frame: u32, _grid: &mut CharacterGrid) {}
}

impl<F> FrameUpdateHook for F
where
    F: FnMut(u32, &mut CharacterGrid),
{
    fn on_frame(&mut self, frame: u32, grid: &mut CharacterGrid) {
        self(frame, grid)
    }
}

/// Writes the frame number, right-aligned, into the bottom row.
#[derive(Debug, Clone, Copy)]
pub struct FrameCounterHook {
    attr: Attribute,
}

impl FrameCounterHook {
    pub fn new(attr: Attribute) -> Self {
        Self { attr }
    }

    /// Text drawn for `frame`.
    pub fn label(frame: u32) -> String {
        format!("frame {frame:>5}")
    }
}

impl Default for FrameCounterHook {
    fn default() -> Self {
        Self::new(Attribute::WHITE_ON_BLUE.inverted())
    }
}

impl FrameUpdateHook for FrameCounterHook {
    fn on_frame(&mut self, frame: u32, grid: &mut CharacterGrid) {
        let label = Self::label(frame);
        let col = COLUMNS.saturating_sub(label.len());
        if let Err(e) = grid.write_str(ROWS - 1, col, &label, self.attr) {
            log::warn!("Frame counter not drawn: {}", e);
        }
    }
}

/// Copies a [`SharedGrid`] into the render grid at the frame boundary.
///
/// Producers on other threads write the shared grid; the renderer only ever
/// reads its own copy, so it never observes a half-written frame.
#[derive(Debug, Clone)]
pub struct SharedGridHook {
    shared: SharedGrid,
    copies: u64,
}

impl SharedGridHook {
    pub fn new(shared: SharedGrid) -> Self {
        Self { shared, copies: 0 }
    }

    /// Frames on which the shared grid had changed and was copied.
    pub fn copies(&self) -> u64 {
        self.copies
    }
}

impl FrameUpdateHook for SharedGridHook {
    fn on_frame(&mut self, frame: u32, grid: &mut CharacterGrid) {
        if self.shared.snapshot_into(grid) {
            self.copies += 1;
            log::trace!("Shared grid copied at frame {}", frame);
        }
    }
}
