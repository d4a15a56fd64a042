//! A character grid shared with a producer thread.
//!
//! The renderer must never read a grid that is being written. Producers on
//! other threads therefore write a `SharedGrid` under a `parking_lot::Mutex`,
//! and the render thread copies it into its own grid at a frame boundary.

use crate::grid::CharacterGrid;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug)]
struct Inner {
    grid: CharacterGrid,
    /// Set by every `update`, cleared by `snapshot_into`.
    dirty: bool,
}

/// Cloneable handle to a mutex-guarded character grid.
#[derive(Debug, Clone)]
pub struct SharedGrid {
    inner: Arc<Mutex<Inner>>,
}

impl SharedGrid {
    pub fn new(grid: CharacterGrid) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner { grid, dirty: true })),
        }
    }

    /// Mutate the grid under the lock.
    pub fn update<R>(&self, f: impl FnOnce(&mut CharacterGrid) -> R) -> R {
        let mut inner = self.inner.lock();
        inner.dirty = true;
        f(&mut inner.grid)
    }

    /// Read the grid under the lock.
    pub fn read<R>(&self, f: impl FnOnce(&CharacterGrid) -> R) -> R {
        f(&self.inner.lock().grid)
    }

    /// Copy the grid into `target` if it changed since the last snapshot.
    ///
    /// Returns `true` when a copy was made.
    pub fn snapshot_into(&self, target: &mut CharacterGrid) -> bool {
        let mut inner = self.inner.lock();
        if !inner.dirty {
            return false;
        }
        target.copy_from(&inner.grid);
        inner.dirty = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use par_textvideo_config::{Attribute, Cell};

    #[test]
    fn snapshot_copies_only_when_dirty() {
        let shared = SharedGrid::new(CharacterGrid::new(Attribute(0x07)));
        let mut target = CharacterGrid::new(Attribute(0x70));

        assert!(shared.snapshot_into(&mut target));
        assert_eq!(target.get(0, 0), Ok(Cell::blank(Attribute(0x07))));
        assert!(!shared.snapshot_into(&mut target));

        shared
            .update(|g| g.set(3, 3, Cell::new(b'#', Attribute(0x0E))))
            .expect("in range");
        assert!(shared.snapshot_into(&mut target));
        assert_eq!(target.get(3, 3).map(|c| c.glyph), Ok(b'#'));
    }

    #[test]
    fn writes_from_another_thread_are_visible() {
        let shared = SharedGrid::new(CharacterGrid::default());
        let producer = shared.clone();
        std::thread::spawn(move || {
            producer.update(|g| g.write_str(0, 0, "hi", Attribute(0x17)))
        })
        .join()
        .expect("producer thread")
        .expect("in range");

        assert_eq!(shared.read(|g| g.get(0, 1).map(|c| c.glyph)), Ok(b'i'));
    }
}
