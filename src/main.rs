use anyhow::Result;
use par_textvideo::app::App;
use par_textvideo::cli;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let runtime_options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => options,
    };
    // Routes all log::info!() etc. to /tmp/par_textvideo_debug.log.
    // CLI --log-level takes precedence, then RUST_LOG, then config (applied in App::new).
    par_textvideo::debug::init_log_bridge(runtime_options.log_level);

    log::info!("Starting par-textvideo {}", par_textvideo::VERSION);

    let app = App::new(runtime_options)?;
    match app.run() {
        Ok(stats) => {
            log::info!(
                "Rendered {} frames ({} scanlines, {} aborted)",
                stats.frames,
                stats.scanlines,
                stats.aborted
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("par-textvideo: error: {e:#}");
            Err(e)
        }
    }
}
