//! Command-line interface for par-textvideo.
//!
//! This module handles CLI argument parsing and the `dump-scanline`
//! subcommand.

use crate::app;
use clap::{Parser, Subcommand};
use par_textvideo_config::{Config, LogLevel};
use std::io::{self, Write};
use std::path::PathBuf;

/// par-textvideo - A 40x15 text-mode scanline renderer
#[derive(Parser)]
#[command(name = "par-textvideo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file to use instead of ~/.config/par-textvideo/config.yaml
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(long, value_name = "N")]
    pub frames: Option<u64>,

    /// Render as fast as possible instead of at the refresh rate
    #[arg(long)]
    pub no_pacing: bool,

    /// Save the last frame as a PNG (default: timestamped file in current dir)
    // Kept as a string: clap's path parser rejects the empty default value.
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "")]
    pub screenshot: Option<String>,

    /// Log level for the debug log file (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Print lines read from stdin onto the screen
    #[arg(long)]
    pub feed_stdin: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the encoded words of one scanline of the startup screen
    DumpScanline {
        /// Scanline number (0-239)
        scanline: usize,
    },
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    /// Explicit config file
    pub config_path: Option<PathBuf>,
    /// Frame limit overriding the config
    pub frames: Option<u64>,
    /// Disable scanout pacing
    pub no_pacing: bool,
    /// Take a screenshot (Some(empty path) = auto-name, Some(path) = specific path, None = no screenshot)
    pub screenshot: Option<PathBuf>,
    /// Log level overriding `RUST_LOG` and the config
    pub log_level: Option<LogLevel>,
    /// Read text from stdin into the grid
    pub feed_stdin: bool,
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue with normal application startup, with optional runtime options
    Continue(RuntimeOptions),
    /// Exit with the given code (subcommand completed)
    Exit(i32),
}

/// Process CLI arguments and handle subcommands
pub fn process_cli() -> CliResult {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::DumpScanline { scanline }) => {
            crate::debug::init_log_bridge(cli.log_level);
            match dump_scanline(cli.config.as_deref(), scanline) {
                Ok(()) => CliResult::Exit(0),
                Err(e) => {
                    eprintln!("par-textvideo: error: {e:#}");
                    CliResult::Exit(1)
                }
            }
        }
        None => CliResult::Continue(RuntimeOptions::from(cli)),
    }
}

impl From<Cli> for RuntimeOptions {
    fn from(cli: Cli) -> Self {
        Self {
            config_path: cli.config,
            frames: cli.frames,
            no_pacing: cli.no_pacing,
            screenshot: cli.screenshot.map(PathBuf::from),
            log_level: cli.log_level,
            feed_stdin: cli.feed_stdin,
        }
    }
}

/// Render one scanline of the configured startup screen and print its words.
fn dump_scanline(config_path: Option<&std::path::Path>, scanline: usize) -> anyhow::Result<()> {
    // A dump never writes a default config file.
    let config = match config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::default(),
    };
    let words = app::render_startup_scanline(&config, scanline)?;

    let mut out = io::stdout().lock();
    for (index, word) in words.iter().enumerate() {
        writeln!(out, "{index:3}: 0x{word:08x}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn screenshot_flag_accepts_optional_path() {
        let cli = Cli::try_parse_from(["par-textvideo", "--screenshot"]).expect("parse");
        assert_eq!(cli.screenshot.as_deref(), Some(""));
        let options = RuntimeOptions::from(cli);
        assert_eq!(options.screenshot, Some(PathBuf::new()));

        let cli = Cli::try_parse_from(["par-textvideo", "--screenshot", "out.png", "--frames", "2"])
            .expect("parse");
        let options = RuntimeOptions::from(cli);
        assert_eq!(options.screenshot, Some(PathBuf::from("out.png")));
        assert_eq!(options.frames, Some(2));
    }

    #[test]
    fn bare_screenshot_before_other_flags() {
        let cli = Cli::try_parse_from(["par-textvideo", "--screenshot", "--frames", "1", "--no-pacing"])
            .expect("parse");
        let options = RuntimeOptions::from(cli);
        assert_eq!(options.screenshot, Some(PathBuf::new()));
        assert_eq!(options.frames, Some(1));
        assert!(options.no_pacing);
    }

    #[test]
    fn log_level_parses_names() {
        let cli = Cli::try_parse_from(["par-textvideo", "--log-level", "debug"]).expect("parse");
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert!(Cli::try_parse_from(["par-textvideo", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn dump_scanline_subcommand() {
        let cli = Cli::try_parse_from(["par-textvideo", "dump-scanline", "17"]).expect("parse");
        assert!(matches!(
            cli.command,
            Some(Commands::DumpScanline { scanline: 17 })
        ));
    }
}
