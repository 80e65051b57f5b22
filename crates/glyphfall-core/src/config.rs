//! Visual configuration supplied to the engine on every tick.
//!
//! The engine never stores or derives configuration. Whoever drives it owns
//! the [`Config`] and may change any field between ticks.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::glyph::Catalog;

/// Terminal color palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Color {
    /// Terminal default foreground.
    Reset,
    /// Black.
    Black,
    /// Red.
    Red,
    /// Green.
    #[default]
    Green,
    /// Yellow.
    Yellow,
    /// Blue.
    Blue,
    /// Magenta.
    Magenta,
    /// Cyan.
    Cyan,
    /// White.
    White,
}

impl Color {
    /// Colors selectable by name, in the order they are listed to users.
    pub const NAMED: [Color; 8] = [
        Color::Green,
        Color::Red,
        Color::Blue,
        Color::White,
        Color::Yellow,
        Color::Cyan,
        Color::Magenta,
        Color::Black,
    ];

    /// Palette rainbow mode draws from, one pick per cell per frame.
    pub const RAINBOW: [Color; 6] =
        [Color::Green, Color::Blue, Color::Black, Color::Yellow, Color::Cyan, Color::Magenta];

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Reset => "default",
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown color name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "invalid color `{0}`; valid colors are green, red, blue, white, yellow, cyan, magenta and black"
)]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::NAMED
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseColorError(s.to_string()))
    }
}

/// Which glyphs are painted bold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BoldMode {
    /// No bold styling.
    #[default]
    Off,
    /// Glyphs with an even catalog index, plus heads and spawn markers.
    Alternate,
    /// Everything.
    All,
}

/// Per-tick configuration snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Columns update on their own cadence instead of every tick.
    pub asynchronous: bool,
    /// Glyphs inside a stream occasionally change while it falls.
    pub changes: bool,
    /// Bold styling.
    pub bold: BoldMode,
    /// Random palette color per cell instead of [`Config::color`].
    pub rainbow: bool,
    /// Paint `λ` instead of catalog glyphs.
    pub lambda: bool,
    /// Active glyph catalog.
    pub catalog: Catalog,
    /// Stream color when rainbow mode is off.
    pub color: Color,
    /// Freeze the grid; frames are still rendered.
    pub paused: bool,
    /// Message centered over the streams. `None` or empty for no overlay.
    pub message: Option<String>,
}

impl Config {
    /// Overlay message, if one is set and non-empty.
    pub fn overlay(&self) -> Option<&str> {
        self.message.as_deref().filter(|msg| !msg.is_empty())
    }
}
