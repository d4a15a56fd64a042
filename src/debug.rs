//! Debug log file for par-textvideo.
//!
//! Installs a `log::Log` bridge so every `log::info!()` etc. in the
//! workspace crates ends up in `/tmp/par_textvideo_debug.log` on Unix/macOS,
//! or `%TEMP%\par_textvideo_debug.log` on Windows. Stdout stays free for the
//! `dump-scanline` subcommand.
//!
//! Level precedence: `--log-level` flag, then `RUST_LOG`, then the config
//! file's `log_level` (applied after the config is loaded). When `RUST_LOG`
//! is set, records are mirrored to stderr as well.

use par_textvideo_config::LogLevel;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

struct LogBridge {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
    /// Set when the level came from the CLI or `RUST_LOG`.
    level_locked: AtomicBool,
}

impl LogBridge {
    fn open_file(&self, level: log::LevelFilter) {
        if level == log::LevelFilter::Off {
            return;
        }
        let mut file = self.file.lock();
        if file.is_some() {
            return;
        }
        let path = log_path();
        match OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&path)
        {
            Ok(mut f) => {
                let _ = writeln!(
                    f,
                    "{}\npar-textvideo debug session started at {} (level={})\n{}",
                    "=".repeat(80),
                    timestamp(),
                    level,
                    "=".repeat(80)
                );
                *file = Some(f);
            }
            Err(e) => {
                if self.mirror_stderr {
                    eprintln!("par-textvideo: cannot open {}: {e}", path.display());
                }
            }
        }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    {
        PathBuf::from("/tmp/par_textvideo_debug.log")
    }
    #[cfg(not(unix))]
    {
        std::env::temp_dir().join("par_textvideo_debug.log")
    }
}

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Level requested through `RUST_LOG`, if set. Module filters such as
/// `par_textvideo=debug` use the level after the last `=`.
fn env_level() -> Option<LogLevel> {
    let value = std::env::var("RUST_LOG").ok()?;
    let level = value
        .rsplit(',')
        .next()
        .and_then(|directive| directive.rsplit('=').next())
        .and_then(|name| name.parse().ok())
        .unwrap_or(LogLevel::Info);
    Some(level)
}

/// Install the log bridge.
///
/// `cli_level` comes from `--log-level`. Safe to call more than once; only
/// the first call installs the logger.
pub fn init_log_bridge(cli_level: Option<LogLevel>) {
    let env = env_level();
    let bridge = BRIDGE.get_or_init(|| LogBridge {
        file: Mutex::new(None),
        mirror_stderr: env.is_some(),
        level_locked: AtomicBool::new(false),
    });

    let level = match (cli_level, env) {
        (Some(level), _) | (None, Some(level)) => {
            bridge.level_locked.store(true, Ordering::SeqCst);
            level
        }
        (None, None) => LogLevel::Off,
    };

    if log::set_logger(bridge).is_ok() {
        let filter = level.to_level_filter();
        log::set_max_level(filter);
        bridge.open_file(filter);
    }
}

/// Apply the config file's `log_level` unless the CLI or `RUST_LOG` already
/// chose one.
pub fn apply_config_log_level(level: LogLevel) {
    let Some(bridge) = BRIDGE.get() else {
        return;
    };
    if bridge.level_locked.load(Ordering::SeqCst) {
        return;
    }
    let filter = level.to_level_filter();
    log::set_max_level(filter);
    bridge.open_file(filter);
    log::info!("Log level set to {} from config", level.display_name());
}
