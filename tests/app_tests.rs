//! End-to-end runs of the application against the software scanout engine.

use par_textvideo::app::{self, App};
use par_textvideo::cli::RuntimeOptions;
use par_textvideo::config::{Config, FillPattern, HookKind, VideoMode};
use par_textvideo::render::{RawRunEncoder, ScanlinePixelRunEncoder};
use tempfile::TempDir;

fn quick_options(frames: u64) -> RuntimeOptions {
    RuntimeOptions {
        frames: Some(frames),
        no_pacing: true,
        ..Default::default()
    }
}

#[test]
fn test_run_renders_every_line_of_every_frame() {
    let app = App::with_config(Config::default(), quick_options(2));
    let stats = app.run().expect("run");
    assert_eq!(stats.frames, 2);
    assert_eq!(stats.scanlines, 480);
    assert_eq!(stats.aborted, 0);
    assert_eq!(stats.release_errors, 0);
}

#[test]
fn test_screenshot_is_written() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("shot.png");
    let options = RuntimeOptions {
        screenshot: Some(path.clone()),
        ..quick_options(1)
    };
    let config = Config::default().with_frame_hook(HookKind::FrameCounter);

    App::with_config(config, options).run().expect("run");

    let bytes = std::fs::read(&path).expect("png written");
    assert_eq!(&bytes[..4], b"\x89PNG");
}

#[test]
fn test_config_file_drives_the_run() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "pacing: false\nframe_limit: 1\ninitial_fill: blank\nframe_hook: frame_counter\n",
    )
    .expect("write");

    let options = RuntimeOptions {
        config_path: Some(path),
        ..Default::default()
    };
    let app = App::new(options).expect("load");
    assert_eq!(app.config().initial_fill, FillPattern::Blank);
    let stats = app.run().expect("run");
    assert_eq!(stats.frames, 1);
}

#[test]
fn test_unsupported_mode_fails_to_start() {
    let mut config = Config::default();
    config.video_mode = VideoMode {
        width: 640,
        height: 480,
        refresh_hz: 60,
    };
    assert!(App::with_config(config, quick_options(1)).run().is_err());
}

#[test]
fn test_startup_scanline_decodes_to_a_full_line() {
    let words = app::render_startup_scanline(&Config::default(), 0).expect("render");
    let pixels = RawRunEncoder.decode(&words).expect("decode");
    assert_eq!(pixels.len(), 320);
    assert!(app::render_startup_scanline(&Config::default(), 240).is_err());
}
