//! glyphfall entry point.
//!
//! # Usage
//!
//! ```bash
//! # Katakana rain in cyan, glyphs changing as they fall
//! glyphfall -c -k -C cyan
//!
//! # Lock the terminal until the process is killed
//! glyphfall -L -M "back in five"
//!
//! # Debug logging to a file
//! glyphfall --log-file glyphfall.log --log-level debug
//! ```

use std::{fs::File, io, sync::Mutex};

use clap::Parser;
use glyphfall_tui::{Args, Runtime, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    warn_ignored(&args);

    let settings = args.settings();
    tracing::info!(?settings, "glyphfall starting");

    let driver = TerminalDriver::new()?;
    Runtime::with_settings(driver, settings)?.run().await?;

    tracing::info!("glyphfall exiting");
    Ok(())
}

#[allow(clippy::print_stderr, reason = "shown before the terminal is taken over")]
fn warn_ignored(args: &Args) {
    for flag in args.ignored_flags() {
        eprintln!("Ignoring unsupported argument: -{flag}");
        tracing::warn!(%flag, "ignoring unsupported argument");
    }
}

/// Log to `--log-file` if given. The screen belongs to the animation, so there
/// is no stderr fallback.
fn init_logging(args: &Args) -> io::Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();

    Ok(())
}
