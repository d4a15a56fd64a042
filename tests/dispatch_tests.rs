//! Dispatch loop behavior against scripted and software scanout engines.

mod common;

use common::{Event, EventLog, ScriptedEngine, released};
use par_textvideo::config::{Attribute, Cell, FillPattern, VISIBLE_SCANLINES, VideoMode};
use par_textvideo::render::{RenderContext, ScanlineRenderer, WORDS_PER_SCANLINE};
use par_textvideo::terminal::CharacterGrid;
use par_textvideo::{
    FrameDispatchLoop, NoopHook, ScanlineId, ScanlineStatus, ScanoutEngine, ScanoutOptions,
    SoftwareScanout,
};
use std::cell::RefCell;
use std::rc::Rc;

fn sweep_context() -> RenderContext {
    RenderContext::new(
        CharacterGrid::filled(FillPattern::Sweep, Attribute::WHITE_ON_BLUE),
        Default::default(),
        Default::default(),
    )
}

fn recording_hook(events: EventLog) -> impl FnMut(u32, &mut CharacterGrid) {
    move |frame, _grid| events.borrow_mut().push(Event::Hook(frame))
}

#[test]
fn test_hook_runs_once_per_frame_before_its_first_scanline() {
    let events: EventLog = Rc::new(RefCell::new(Vec::new()));
    let mut engine = ScriptedEngine::frames(0, 3, 4, Rc::clone(&events));
    let mut dispatch = FrameDispatchLoop::new(sweep_context(), recording_hook(Rc::clone(&events)));

    let stats = dispatch.run(&mut engine);

    assert_eq!(stats.frames, 3);
    assert_eq!(stats.scanlines, 12);
    assert_eq!(stats.aborted, 0);

    let log = events.borrow();
    let hooks: Vec<usize> = log
        .iter()
        .enumerate()
        .filter_map(|(i, e)| matches!(e, Event::Hook(_)).then_some(i))
        .collect();
    assert_eq!(hooks, vec![0, 5, 10]);
    assert_eq!(log[5], Event::Hook(1));
    assert!(matches!(
        &log[6],
        Event::Released { id, .. } if *id == ScanlineId::new(1, 0)
    ));
}

#[test]
fn test_first_frame_zero_triggers_hook() {
    let events: EventLog = Rc::new(RefCell::new(Vec::new()));
    let mut engine = ScriptedEngine::new([ScanlineId::new(0, 0)], Rc::clone(&events));
    let mut dispatch = FrameDispatchLoop::new(sweep_context(), recording_hook(Rc::clone(&events)));
    dispatch.run(&mut engine);
    assert_eq!(events.borrow()[0], Event::Hook(0));
}

#[test]
fn test_hook_edits_are_visible_in_the_same_frame() {
    let events: EventLog = Rc::new(RefCell::new(Vec::new()));
    let mut engine = ScriptedEngine::frames(0, 2, 1, Rc::clone(&events));
    let hook = |frame: u32, grid: &mut CharacterGrid| {
        let attr = if frame == 0 { Attribute(0x00) } else { Attribute(0xFF) };
        grid.fill(Cell::blank(attr));
    };
    let mut dispatch = FrameDispatchLoop::new(sweep_context(), hook);
    dispatch.run(&mut engine);

    let lines = released(&events);
    assert_eq!(lines.len(), 2);
    // Frame 0 is all black, frame 1 all white (except the forced-black tail).
    assert_eq!(lines[0].2[2], 0);
    assert_eq!(lines[1].2[2], 0xFFDF_FFDF);
}

#[test]
fn test_rendered_words_match_direct_render() {
    let events: EventLog = Rc::new(RefCell::new(Vec::new()));
    let ids = [ScanlineId::new(2, 17), ScanlineId::new(2, 200)];
    let mut engine = ScriptedEngine::new(ids, Rc::clone(&events));
    let mut dispatch = FrameDispatchLoop::new(sweep_context(), NoopHook);
    dispatch.run(&mut engine);

    let renderer = ScanlineRenderer::new();
    let context = sweep_context();
    for (id, status, words) in released(&events) {
        assert_eq!(status, ScanlineStatus::Ok);
        assert_eq!(words.len(), WORDS_PER_SCANLINE);
        let expected = renderer
            .render(&context, id.scanline_number() as usize)
            .expect("render");
        assert_eq!(words, expected);
    }
}

#[test]
fn test_out_of_range_scanline_is_aborted() {
    let events: EventLog = Rc::new(RefCell::new(Vec::new()));
    let ids = [
        ScanlineId::new(0, 0),
        ScanlineId::new(0, VISIBLE_SCANLINES as u32),
        ScanlineId::new(0, 1),
    ];
    let mut engine = ScriptedEngine::new(ids, Rc::clone(&events));
    let mut dispatch = FrameDispatchLoop::new(sweep_context(), NoopHook);
    let stats = dispatch.run(&mut engine);

    assert_eq!(stats.scanlines, 2);
    assert_eq!(stats.aborted, 1);
    let lines = released(&events);
    assert_eq!(lines[1].1, ScanlineStatus::Abort);
    assert!(lines[1].2.is_empty());
}

#[test]
fn test_software_scanout_runs_to_frame_limit() {
    let mut engine = SoftwareScanout::new(ScanoutOptions {
        pacing: false,
        frame_limit: Some(3),
        buffer_count: 2,
        capture_frame: Some(2),
    });
    engine.setup(&VideoMode::default()).expect("setup");
    engine.timing_enable(true).expect("enable");

    let mut frames_seen = Vec::new();
    let hook = |frame: u32, _grid: &mut CharacterGrid| frames_seen.push(frame);
    let mut dispatch = FrameDispatchLoop::new(sweep_context(), hook);
    let stats = dispatch.run(&mut engine);
    drop(dispatch);

    assert_eq!(frames_seen, vec![0, 1, 2]);
    assert_eq!(stats.scanlines, 3 * VISIBLE_SCANLINES as u64);
    assert_eq!(engine.stats().lines_released, stats.scanlines);

    let capture = engine.take_capture().expect("capture");
    assert_eq!(capture.frame(), 2);
    assert!(capture.is_complete());
}

#[test]
fn test_cancel_stops_a_running_loop() {
    let mut engine = SoftwareScanout::new(ScanoutOptions {
        pacing: false,
        frame_limit: None,
        buffer_count: 1,
        capture_frame: None,
    });
    engine.setup(&VideoMode::default()).expect("setup");
    engine.timing_enable(true).expect("enable");
    let token = engine.cancel_token();

    let hook = move |frame: u32, _grid: &mut CharacterGrid| {
        if frame == 4 {
            token.cancel();
        }
    };
    let mut dispatch = FrameDispatchLoop::new(sweep_context(), hook);
    let stats = dispatch.run(&mut engine);

    // Frame 4's first scanline was already acquired when the hook cancelled.
    assert_eq!(stats.frames, 5);
    assert_eq!(stats.scanlines, 4 * VISIBLE_SCANLINES as u64 + 1);
}
