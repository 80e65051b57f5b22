//! Fuzz target for the App state machine
//!
//! # Strategy
//!
//! - Arbitrary key presses (every runtime binding plus noise)
//! - Interrupts, suspends and resizes mixed into the tick stream
//! - Lock and screensaver modes chosen up front
//!
//! # Invariants
//!
//! - Engine invariants hold after every event
//! - A locked App never quits on anything but a screensaver keystroke
//! - Frame delay never exceeds the maximum

#![no_main]

use arbitrary::Arbitrary;
use glyphfall_app::{App, AppAction, AppEvent, KeyInput, MAX_DELAY, Settings};
use glyphfall_harness::{EngineSnapshot, InvariantRegistry};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
struct AppScenario {
    seed: u64,
    lock: bool,
    screensaver: bool,
    events: Vec<FuzzEvent>,
}

#[derive(Debug, Clone, Arbitrary)]
enum FuzzEvent {
    Key(char),
    OtherKey,
    Tick,
    Resize(u8, u8),
    Interrupt,
    Suspend,
}

impl From<FuzzEvent> for AppEvent {
    fn from(event: FuzzEvent) -> Self {
        match event {
            FuzzEvent::Key(c) => AppEvent::Key(KeyInput::Char(c)),
            FuzzEvent::OtherKey => AppEvent::Key(KeyInput::Other),
            FuzzEvent::Tick => AppEvent::Tick,
            FuzzEvent::Resize(cols, rows) => AppEvent::Resize(cols.into(), rows.into()),
            FuzzEvent::Interrupt => AppEvent::Interrupt,
            FuzzEvent::Suspend => AppEvent::Suspend,
        }
    }
}

fuzz_target!(|scenario: AppScenario| {
    let registry = InvariantRegistry::standard();
    let settings = Settings { screensaver: scenario.screensaver, ..Settings::default() };
    let settings = if scenario.lock { settings.locked() } else { settings };
    let Ok(mut app) = App::with_seed(settings, 40, 20, scenario.seed) else {
        return;
    };

    for event in scenario.events.into_iter().take(1024) {
        let is_key = matches!(event, FuzzEvent::Key(_) | FuzzEvent::OtherKey);
        let Ok(actions) = app.handle(event.into()) else {
            return;
        };

        if actions.contains(&AppAction::Quit) {
            assert!(!scenario.lock || (scenario.screensaver && is_key));
            return;
        }
        assert!(app.settings().delay <= MAX_DELAY);
        registry.assert_all(&EngineSnapshot::from_app(&app), "after fuzzed event");
    }
});
