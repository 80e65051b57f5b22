//! Fuzz target for the stream engine tick loop
//!
//! # Strategy
//!
//! - Arbitrary starting geometry, including sizes below the minimum
//! - Arbitrary interleaving of ticks, option toggles and resizes
//!
//! # Invariants
//!
//! - Every standard invariant holds after every operation
//! - Rendered frames always match the clamped geometry

#![no_main]

use arbitrary::Arbitrary;
use glyphfall_core::{BoldMode, Config, EngineState, Geometry};
use glyphfall_harness::{EngineSnapshot, InvariantRegistry};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
struct EngineScenario {
    seed: u64,
    rows: u8,
    cols: u8,
    ops: Vec<EngineOp>,
}

#[derive(Debug, Clone, Arbitrary)]
enum EngineOp {
    Tick,
    Ticks(u8),
    ToggleAsync,
    ToggleChanges,
    TogglePause,
    ToggleRainbow,
    CycleBold,
    ToggleCatalog,
    Resize { rows: u8, cols: u8 },
}

fuzz_target!(|scenario: EngineScenario| {
    let registry = InvariantRegistry::standard();
    let Ok(mut engine) =
        EngineState::with_seed(scenario.rows.into(), scenario.cols.into(), scenario.seed)
    else {
        return;
    };
    let mut config = Config::default();

    for op in scenario.ops.into_iter().take(512) {
        match op {
            EngineOp::Tick => {
                let frame = engine.advance(&config);
                let geometry = engine.geometry();
                assert_eq!((frame.rows(), frame.cols()), (geometry.rows, geometry.cols));
            },
            EngineOp::Ticks(n) => {
                for _ in 0..n {
                    engine.step(&config);
                }
            },
            EngineOp::ToggleAsync => config.asynchronous = !config.asynchronous,
            EngineOp::ToggleChanges => config.changes = !config.changes,
            EngineOp::TogglePause => config.paused = !config.paused,
            EngineOp::ToggleRainbow => config.rainbow = !config.rainbow,
            EngineOp::CycleBold => {
                config.bold = match config.bold {
                    BoldMode::Off => BoldMode::Alternate,
                    BoldMode::Alternate => BoldMode::All,
                    BoldMode::All => BoldMode::Off,
                };
            },
            EngineOp::ToggleCatalog => config.catalog = config.catalog.toggled(),
            EngineOp::Resize { rows, cols } => {
                if engine.resize(rows.into(), cols.into()).is_err() {
                    return;
                }
                assert_eq!(engine.geometry(), Geometry::new(rows.into(), cols.into()));
            },
        }

        registry.assert_all(&EngineSnapshot::from_engine(&engine), "after fuzzed op");
    }
});
