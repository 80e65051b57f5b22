//! Application state machine.
//!
//! This module defines the [`App`] state machine, which owns the stream
//! engine and the user-adjustable settings, completely decoupled from the
//! terminal.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Maps runtime keys onto [`Config`] and [`Settings`] changes.
//! - Rebuilds the engine when the terminal is resized.
//! - Advances the engine on every tick and keeps the latest frame.
//! - Decides when quit requests are honored (lock and screensaver modes).

use std::time::Duration;

use glyphfall_core::{BoldMode, Color, Config, EngineError, EngineState, RenderedFrame};

use crate::{AppAction, AppEvent, KeyInput, Settings};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    settings: Settings,
    engine: EngineState,
    /// Last rendered frame. Blank until the first tick.
    frame: RenderedFrame,
}

impl App {
    /// Create an App for a `cols x rows` terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be allocated.
    pub fn new(settings: Settings, cols: u16, rows: u16) -> Result<Self, EngineError> {
        let engine = EngineState::initialize(rows, cols)?;
        Ok(Self::with_engine(settings, engine))
    }

    /// Create an App whose engine randomness is derived from `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be allocated.
    pub fn with_seed(
        settings: Settings,
        cols: u16,
        rows: u16,
        seed: u64,
    ) -> Result<Self, EngineError> {
        let engine = EngineState::with_seed(rows, cols, seed)?;
        Ok(Self::with_engine(settings, engine))
    }

    fn with_engine(settings: Settings, engine: EngineState) -> Self {
        let geometry = engine.geometry();
        let frame = RenderedFrame::blank(geometry.rows, geometry.cols);
        Self { settings, engine, frame }
    }

    /// Process an event and return actions.
    ///
    /// # Errors
    ///
    /// Returns an error if a resize cannot allocate the new grid. The App is
    /// left unchanged in that case.
    pub fn handle(&mut self, event: AppEvent) -> Result<Vec<AppAction>, EngineError> {
        let actions = match event {
            AppEvent::Tick => {
                self.frame = self.engine.advance(&self.settings.config);
                vec![AppAction::Render]
            },
            AppEvent::Resize(cols, rows) => {
                self.engine.resize(rows, cols)?;
                self.frame = self.engine.render(&self.settings.config);
                vec![AppAction::Render]
            },
            AppEvent::Interrupt | AppEvent::Suspend => {
                if self.settings.lock {
                    tracing::debug!(?event, "ignored while locked");
                    vec![]
                } else {
                    vec![AppAction::Quit]
                }
            },
            AppEvent::Key(key) => self.handle_key(key),
        };
        Ok(actions)
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        if self.settings.screensaver {
            return vec![AppAction::Quit];
        }

        let KeyInput::Char(c) = key else {
            return vec![];
        };

        let config = &mut self.settings.config;
        match c {
            'q' if !self.settings.lock => return vec![AppAction::Quit],
            'q' => tracing::debug!("quit ignored while locked"),
            'a' => config.asynchronous = !config.asynchronous,
            'b' => config.bold = BoldMode::Alternate,
            'B' => config.bold = BoldMode::All,
            'n' => config.bold = BoldMode::Off,
            'L' => self.settings.lock = true,
            '0'..='9' => {
                if let Some(delay) = c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                    self.settings.delay = delay;
                }
            },
            '!' => set_color(config, Color::Red),
            '@' => set_color(config, Color::Green),
            '#' => set_color(config, Color::Yellow),
            '$' => set_color(config, Color::Blue),
            '%' => set_color(config, Color::Magenta),
            '^' => set_color(config, Color::Cyan),
            '&' => set_color(config, Color::White),
            'r' => config.rainbow = true,
            'm' => config.lambda = !config.lambda,
            'p' | 'P' => config.paused = !config.paused,
            'c' => config.catalog = config.catalog.toggled(),
            'k' => config.changes = !config.changes,
            _ => return vec![],
        }

        tracing::debug!(key = %c, "settings changed");
        vec![]
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current visual configuration.
    pub fn config(&self) -> &Config {
        &self.settings.config
    }

    /// The stream engine.
    pub fn engine(&self) -> &EngineState {
        &self.engine
    }

    /// Most recently rendered frame.
    pub fn frame(&self) -> &RenderedFrame {
        &self.frame
    }

    /// Time to wait for input before the next tick.
    pub fn frame_delay(&self) -> Duration {
        self.settings.frame_delay()
    }

    /// Whether quit requests are being ignored.
    pub fn is_locked(&self) -> bool {
        self.settings.lock
    }
}

fn set_color(config: &mut Config, color: Color) {
    config.color = color;
    config.rainbow = false;
}

#[cfg(test)]
mod tests {
    use glyphfall_core::{Catalog, Geometry};

    use super::*;

    fn app(settings: Settings) -> App {
        App::with_seed(settings, 40, 20, 7).unwrap()
    }

    fn press(app: &mut App, c: char) -> Vec<AppAction> {
        app.handle(AppEvent::Key(KeyInput::Char(c))).unwrap()
    }

    #[test]
    fn frame_is_blank_before_first_tick() {
        let app = app(Settings::default());

        assert_eq!(app.frame(), &RenderedFrame::blank(20, 40));
    }

    #[test]
    fn tick_renders_frame() {
        let mut app = app(Settings::default());

        assert_eq!(app.handle(AppEvent::Tick).unwrap(), vec![AppAction::Render]);
        assert_eq!(app.engine().tick(), 1);
        assert_eq!(app.frame().rows(), 20);
    }

    #[test]
    fn q_quits() {
        let mut app = app(Settings::default());
        assert_eq!(press(&mut app, 'q'), vec![AppAction::Quit]);
    }

    #[test]
    fn lock_ignores_quit_and_signals() {
        let mut app = app(Settings::default().locked());

        assert!(press(&mut app, 'q').is_empty());
        assert!(app.handle(AppEvent::Interrupt).unwrap().is_empty());
        assert!(app.handle(AppEvent::Suspend).unwrap().is_empty());
    }

    #[test]
    fn lock_key_engages_lock() {
        let mut app = app(Settings::default());

        press(&mut app, 'L');
        assert!(app.is_locked());
        assert!(press(&mut app, 'q').is_empty());
    }

    #[test]
    fn interrupt_quits_when_unlocked() {
        let mut app = app(Settings::default());

        assert_eq!(app.handle(AppEvent::Interrupt).unwrap(), vec![AppAction::Quit]);
        assert_eq!(app.handle(AppEvent::Suspend).unwrap(), vec![AppAction::Quit]);
    }

    #[test]
    fn screensaver_quits_on_any_key_even_locked() {
        let settings = Settings { screensaver: true, ..Settings::default() }.locked();
        let mut app = app(settings);

        assert_eq!(app.handle(AppEvent::Key(KeyInput::Other)).unwrap(), vec![AppAction::Quit]);
        assert_eq!(press(&mut app, 'x'), vec![AppAction::Quit]);
    }

    #[test]
    fn color_keys_disable_rainbow() {
        let settings = Settings {
            config: Config { rainbow: true, ..Config::default() },
            ..Settings::default()
        };
        let mut app = app(settings);

        press(&mut app, '$');
        assert_eq!(app.config().color, Color::Blue);
        assert!(!app.config().rainbow);

        press(&mut app, 'r');
        assert!(app.config().rainbow);
    }

    #[test]
    fn bold_keys() {
        let mut app = app(Settings::default());

        press(&mut app, 'b');
        assert_eq!(app.config().bold, BoldMode::Alternate);
        press(&mut app, 'B');
        assert_eq!(app.config().bold, BoldMode::All);
        press(&mut app, 'n');
        assert_eq!(app.config().bold, BoldMode::Off);
    }

    #[test]
    fn digit_sets_delay() {
        let mut app = app(Settings::default());

        press(&mut app, '0');
        assert_eq!(app.frame_delay(), Duration::ZERO);
        press(&mut app, '9');
        assert_eq!(app.frame_delay(), Duration::from_millis(90));
    }

    #[test]
    fn toggles() {
        let mut app = app(Settings::default());

        for c in ['a', 'm', 'p', 'k'] {
            press(&mut app, c);
        }
        press(&mut app, 'c');

        let config = app.config();
        assert!(config.asynchronous && config.lambda && config.paused && config.changes);
        assert_eq!(config.catalog, Catalog::Katakana);

        press(&mut app, 'P');
        assert!(!app.config().paused);
    }

    #[test]
    fn unknown_keys_do_nothing() {
        let mut app = app(Settings::default());
        let before = app.settings().clone();

        assert!(press(&mut app, 'z').is_empty());
        assert!(app.handle(AppEvent::Key(KeyInput::Other)).unwrap().is_empty());
        assert_eq!(app.settings(), &before);
    }

    #[test]
    fn resize_clamps_and_renders() {
        let mut app = app(Settings::default());

        assert_eq!(app.handle(AppEvent::Resize(3, 200)).unwrap(), vec![AppAction::Render]);
        assert_eq!(app.engine().geometry(), Geometry::new(200, 3));
        assert_eq!(app.frame().cols(), 10);
        assert_eq!(app.frame().rows(), 200);
    }
}
