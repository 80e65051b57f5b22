//! Startup settings.

use std::time::Duration;

use glyphfall_core::Config;

/// Default frame delay, in tens of milliseconds.
pub const DEFAULT_DELAY: u8 = 4;

/// Largest accepted frame delay, in tens of milliseconds.
pub const MAX_DELAY: u8 = 10;

/// Overlay shown in lock mode when no message was given.
pub const LOCK_MESSAGE: &str = "Computer locked.";

/// Everything the application is started with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Visual configuration handed to the engine every tick.
    pub config: Config,
    /// Frame delay in tens of milliseconds, `0..=MAX_DELAY`.
    pub delay: u8,
    /// Ignore quit keys and interrupt/suspend requests.
    pub lock: bool,
    /// Quit on the first key press.
    pub screensaver: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { config: Config::default(), delay: DEFAULT_DELAY, lock: false, screensaver: false }
    }
}

impl Settings {
    /// Enable lock mode, showing [`LOCK_MESSAGE`] unless a message is already
    /// set.
    #[must_use]
    pub fn locked(mut self) -> Self {
        self.lock = true;
        if self.config.overlay().is_none() {
            self.config.message = Some(LOCK_MESSAGE.to_string());
        }
        self
    }

    /// Time between frames.
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.delay.min(MAX_DELAY)) * 10)
    }
}
