//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use glyphfall_app::{DEFAULT_DELAY, MAX_DELAY, Settings};
use glyphfall_core::{BoldMode, Catalog, Color, Config};

/// Falling-glyph terminal effect
#[derive(Parser, Debug)]
#[command(name = "glyphfall")]
#[command(about = "Scrolling streams of glyphs, terminal screensaver style")]
#[command(version)]
#[allow(clippy::struct_excessive_bools, reason = "one field per command-line switch")]
pub struct Args {
    /// Asynchronous scroll: columns fall at different speeds
    #[arg(short = 'a', long = "async")]
    pub asynchronous: bool,

    /// Bold characters on
    #[arg(short = 'b', long)]
    pub bold: bool,

    /// All bold characters (overrides -b)
    #[arg(short = 'B', long)]
    pub all_bold: bool,

    /// Use half-width katakana glyphs
    #[arg(short = 'c', long)]
    pub katakana: bool,

    /// Stream color: green, red, blue, white, yellow, cyan, magenta or black
    #[arg(short = 'C', long, default_value_t = Color::Green)]
    pub color: Color,

    /// Glyphs change while scrolling
    #[arg(short = 'k', long)]
    pub changes: bool,

    /// Lock mode: quit keys and signals are ignored
    #[arg(short = 'L', long)]
    pub lock: bool,

    /// Lambda mode
    #[arg(short = 'm', long)]
    pub lambda: bool,

    /// Message to show in the center of the screen
    #[arg(short = 'M', long)]
    pub message: Option<String>,

    /// No bold characters (overrides -b and -B, default)
    #[arg(short = 'n', long)]
    pub no_bold: bool,

    /// Rainbow mode
    #[arg(short = 'r', long)]
    pub rainbow: bool,

    /// Screensaver mode: quit on the first keystroke
    #[arg(short = 's', long)]
    pub screensaver: bool,

    /// Screen update delay, 0 - 10 (tens of milliseconds)
    #[arg(
        short = 'u',
        long = "update",
        default_value_t = DEFAULT_DELAY,
        value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_DELAY)),
    )]
    pub delay: u8,

    /// Write logs to this file. Logging is off without it
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter (trace, debug, info, warn, error). `RUST_LOG` takes precedence
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Accepted for compatibility and ignored
    #[arg(short = 'l', hide = true)]
    pub linux_console: bool,

    /// Accepted for compatibility and ignored
    #[arg(short = 'o', hide = true)]
    pub old_scroll: bool,

    /// Accepted for compatibility and ignored
    #[arg(short = 'x', hide = true)]
    pub x_window: bool,

    /// Accepted for compatibility and ignored
    #[arg(short = 'f', hide = true)]
    pub force_linux: bool,
}

impl Args {
    /// Bold mode after resolving `-b`, `-B` and `-n`.
    pub fn bold_mode(&self) -> BoldMode {
        if self.no_bold {
            BoldMode::Off
        } else if self.all_bold {
            BoldMode::All
        } else if self.bold {
            BoldMode::Alternate
        } else {
            BoldMode::Off
        }
    }

    /// Compatibility switches that were given and have no effect.
    pub fn ignored_flags(&self) -> Vec<char> {
        [
            ('l', self.linux_console),
            ('o', self.old_scroll),
            ('x', self.x_window),
            ('f', self.force_linux),
        ]
        .into_iter()
        .filter_map(|(flag, set)| set.then_some(flag))
        .collect()
    }

    /// Startup settings described by these arguments.
    pub fn settings(&self) -> Settings {
        let config = Config {
            asynchronous: self.asynchronous,
            changes: self.changes,
            bold: self.bold_mode(),
            rainbow: self.rainbow,
            lambda: self.lambda,
            catalog: if self.katakana { Catalog::Katakana } else { Catalog::Latin },
            color: self.color,
            paused: false,
            message: self.message.clone(),
        };
        let settings =
            Settings { config, delay: self.delay, lock: false, screensaver: self.screensaver };

        if self.lock { settings.locked() } else { settings }
    }
}
