//! Shared integration test helpers for par-textvideo.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{ScriptedEngine, Event};
//! ```
//!
//! The `#![allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers are used per file.

#![allow(dead_code)]

use par_textvideo::config::VideoMode;
use par_textvideo::render::WORDS_PER_SCANLINE;
use par_textvideo::{ScanlineBuffer, ScanlineId, ScanlineStatus, ScanoutEngine, ScanoutError};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Something observed by a scripted engine or a recording hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Hook(u32),
    Released {
        id: ScanlineId,
        status: ScanlineStatus,
        words: Vec<u32>,
    },
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

/// Engine that hands out a fixed list of scanline ids, then shuts down.
pub struct ScriptedEngine {
    ids: VecDeque<ScanlineId>,
    pub events: EventLog,
}

impl ScriptedEngine {
    pub fn new(ids: impl IntoIterator<Item = ScanlineId>, events: EventLog) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            events,
        }
    }

    /// Every scanline of `frames` frames starting at `first_frame`.
    pub fn frames(first_frame: u32, frames: u32, lines: u32, events: EventLog) -> Self {
        let ids = (first_frame..first_frame + frames)
            .flat_map(|f| (0..lines).map(move |l| ScanlineId::new(f, l)));
        Self::new(ids, events)
    }
}

impl ScanoutEngine for ScriptedEngine {
    fn setup(&mut self, _mode: &VideoMode) -> Result<(), ScanoutError> {
        Ok(())
    }

    fn timing_enable(&mut self, _enable: bool) -> Result<(), ScanoutError> {
        Ok(())
    }

    fn acquire_scanline_buffer(&mut self, _blocking: bool) -> Option<ScanlineBuffer> {
        let id = self.ids.pop_front()?;
        Some(ScanlineBuffer::new(id, WORDS_PER_SCANLINE))
    }

    fn release(&mut self, buffer: ScanlineBuffer) -> Result<(), ScanoutError> {
        self.events.borrow_mut().push(Event::Released {
            id: buffer.id(),
            status: buffer.status(),
            words: buffer.data().to_vec(),
        });
        Ok(())
    }
}

/// Released events only, in order.
pub fn released(events: &EventLog) -> Vec<(ScanlineId, ScanlineStatus, Vec<u32>)> {
    events
        .borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Released { id, status, words } => Some((*id, *status, words.clone())),
            Event::Hook(_) => None,
        })
        .collect()
}
