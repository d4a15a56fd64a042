//! Background text feed.
//!
//! Reads lines from any reader (stdin from the CLI) on a named thread and
//! prints them into a [`SharedGrid`], scrolling once the bottom row is used.
//! The render grid is never touched here; `SharedGridHook` picks the changes
//! up at the next frame boundary.

use par_textvideo_config::{Attribute, COLUMNS, ROWS};
use par_textvideo_terminal::SharedGrid;
use parking_lot::Mutex;
use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::JoinHandle;

/// Handle to a running feed thread.
pub struct TextFeed {
    running: Arc<AtomicBool>,
    lines: Arc<AtomicU64>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl TextFeed {
    /// Clear `grid` in `attr` and start copying lines from `reader` into it.
    pub fn start<R>(reader: R, grid: SharedGrid, attr: Attribute) -> std::io::Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let lines = Arc::new(AtomicU64::new(0));

        let thread_running = Arc::clone(&running);
        let thread_lines = Arc::clone(&lines);
        let handle = std::thread::Builder::new()
            .name("textvideo-feed".to_string())
            .spawn(move || {
                grid.update(|g| g.clear(attr));
                let mut row = 0;
                for line in reader.lines() {
                    if !thread_running.load(Ordering::SeqCst) {
                        break;
                    }
                    let line = match line {
                        Ok(line) => line.replace('\t', " "),
                        Err(e) => {
                            log::warn!("Text feed read failed: {}", e);
                            break;
                        }
                    };
                    let padded = format!("{line:<width$}", width = COLUMNS);
                    grid.update(|g| {
                        if row == ROWS {
                            g.scroll_up(attr);
                            row = ROWS - 1;
                        }
                        if let Err(e) = g.write_str(row, 0, &padded, attr) {
                            log::warn!("Text feed write failed: {}", e);
                        }
                    });
                    row += 1;
                    thread_lines.fetch_add(1, Ordering::SeqCst);
                }
                log::debug!(
                    "Text feed finished after {} lines",
                    thread_lines.load(Ordering::SeqCst)
                );
                thread_running.store(false, Ordering::SeqCst);
            })?;

        Ok(Self {
            running,
            lines,
            thread: Mutex::new(Some(handle)),
        })
    }

    /// Whether the feed thread is still reading.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Lines written into the grid so far.
    pub fn lines_read(&self) -> u64 {
        self.lines.load(Ordering::SeqCst)
    }

    /// Block until the reader reaches end of input.
    pub fn wait(&self) {
        if let Some(handle) = self.thread.lock().take()
            && handle.join().is_err()
        {
            log::error!("Text feed thread panicked");
        }
    }

    /// Ask the thread to stop after its current line.
    ///
    /// A thread blocked on a read that never completes is left detached.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        let mut thread = self.thread.lock();
        if thread.as_ref().is_some_and(|h| h.is_finished()) {
            if let Some(handle) = thread.take() {
                let _ = handle.join();
            }
        } else if thread.take().is_some() {
            log::debug!("Text feed thread still blocked on input; detaching");
        }
    }
}

impl Drop for TextFeed {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use par_textvideo_terminal::CharacterGrid;
    use std::io::Cursor;

    fn glyphs(grid: &SharedGrid, row: usize, len: usize) -> String {
        grid.read(|g| {
            g.row(row)
                .map(|cells| cells[..len].iter().map(|c| c.glyph as char).collect())
                .unwrap_or_default()
        })
    }

    #[test]
    fn lines_fill_rows_top_down() {
        let shared = SharedGrid::new(CharacterGrid::default());
        let feed = TextFeed::start(
            Cursor::new("alpha\nbeta\tgamma\n"),
            shared.clone(),
            Attribute(0x07),
        )
        .expect("spawn");
        feed.wait();

        assert_eq!(feed.lines_read(), 2);
        assert!(!feed.is_running());
        assert_eq!(glyphs(&shared, 0, 5), "alpha");
        assert_eq!(glyphs(&shared, 1, 10), "beta gamma");
        assert_eq!(glyphs(&shared, 2, 3), "   ");
    }

    #[test]
    fn scrolls_after_bottom_row() {
        let input: String = (0..ROWS + 2).map(|i| format!("line {i}\n")).collect();
        let shared = SharedGrid::new(CharacterGrid::default());
        let feed = TextFeed::start(Cursor::new(input), shared.clone(), Attribute(0x07))
            .expect("spawn");
        feed.wait();

        assert_eq!(glyphs(&shared, 0, 6), "line 2");
        assert_eq!(glyphs(&shared, ROWS - 1, 7), "line 16");
    }

    #[test]
    fn long_lines_are_clipped() {
        let shared = SharedGrid::new(CharacterGrid::default());
        let long = "x".repeat(COLUMNS * 2);
        let feed = TextFeed::start(Cursor::new(long), shared.clone(), Attribute(0x07))
            .expect("spawn");
        feed.wait();

        assert_eq!(glyphs(&shared, 0, COLUMNS), "x".repeat(COLUMNS));
        assert_eq!(glyphs(&shared, 1, 1), " ");
    }
}
