//! Property-based invariant tests for the stream engine.
//!
//! Tests verify that the standard invariants hold after every tick under
//! arbitrary geometry, configuration and mid-run configuration changes.

use glyphfall_core::{BoldMode, Catalog, Color, Config, EngineState, Symbol};
use glyphfall_harness::{EngineSnapshot, InvariantRegistry, pending_markers};
use proptest::prelude::*;

/// Generate random configurations. Pause is left to the toggles below.
fn config_strategy() -> impl Strategy<Value = Config> {
    (
        any::<bool>(),
        any::<bool>(),
        prop_oneof![Just(BoldMode::Off), Just(BoldMode::Alternate), Just(BoldMode::All)],
        any::<bool>(),
        any::<bool>(),
        prop_oneof![Just(Catalog::Latin), Just(Catalog::Katakana)],
        prop::sample::select(Color::NAMED.to_vec()),
    )
        .prop_map(|(asynchronous, changes, bold, rainbow, lambda, catalog, color)| Config {
            asynchronous,
            changes,
            bold,
            rainbow,
            lambda,
            catalog,
            color,
            paused: false,
            message: None,
        })
}

/// Mid-run configuration changes.
#[derive(Debug, Clone, Copy)]
enum Toggle {
    Asynchronous,
    Changes,
    Pause,
    Catalog,
}

fn toggle_strategy() -> impl Strategy<Value = Option<Toggle>> {
    prop_oneof![
        8 => Just(None),
        1 => Just(Some(Toggle::Asynchronous)),
        1 => Just(Some(Toggle::Changes)),
        1 => Just(Some(Toggle::Pause)),
        1 => Just(Some(Toggle::Catalog)),
    ]
}

fn apply(config: &mut Config, toggle: Toggle) {
    match toggle {
        Toggle::Asynchronous => config.asynchronous = !config.asynchronous,
        Toggle::Changes => config.changes = !config.changes,
        Toggle::Pause => config.paused = !config.paused,
        Toggle::Catalog => config.catalog = config.catalog.toggled(),
    }
}

proptest! {
    #[test]
    fn invariants_hold_every_tick(
        seed in any::<u64>(),
        rows in 10u16..48,
        cols in 10u16..64,
        mut config in config_strategy(),
        toggles in prop::collection::vec(toggle_strategy(), 1..300),
    ) {
        let registry = InvariantRegistry::standard();
        let mut engine = EngineState::with_seed(rows, cols, seed).unwrap();

        for (tick, toggle) in toggles.into_iter().enumerate() {
            if let Some(toggle) = toggle {
                apply(&mut config, toggle);
            }
            engine.advance(&config);

            let snapshot = EngineSnapshot::from_engine(&engine);
            prop_assert!(
                registry.check_all(&snapshot).is_ok(),
                "tick {}: {:?}",
                tick,
                registry.check_all(&snapshot)
            );
        }
    }

    #[test]
    fn invariants_hold_across_resizes(
        seed in any::<u64>(),
        sizes in prop::collection::vec((0u16..80, 0u16..160), 1..6),
        ticks in 1usize..80,
    ) {
        let registry = InvariantRegistry::standard();
        let mut engine = EngineState::with_seed(24, 80, seed).unwrap();
        let config = Config { changes: true, ..Config::default() };

        for (rows, cols) in sizes {
            engine.resize(rows, cols).unwrap();
            for _ in 0..ticks {
                engine.advance(&config);
            }
            registry.assert_all(&EngineSnapshot::from_engine(&engine), "after resize");
        }
    }

    #[test]
    fn fresh_engine_has_single_marker_per_column(
        seed in any::<u64>(),
        rows in 0u16..100,
        cols in 0u16..200,
    ) {
        let engine = EngineState::with_seed(rows, cols, seed).unwrap();
        let snapshot = EngineSnapshot::from_engine(&engine);

        for column in snapshot.active_columns() {
            prop_assert_eq!(pending_markers(&snapshot, column.col), 1);
            prop_assert_eq!(column.cells[1].symbol, Symbol::PendingSpawn);
        }
    }
}

#[test]
fn long_run_with_every_option() {
    let registry = InvariantRegistry::standard();
    let mut engine = EngineState::with_seed(30, 90, 0x5eed).unwrap();
    let config = Config {
        asynchronous: true,
        changes: true,
        bold: BoldMode::All,
        rainbow: true,
        lambda: true,
        catalog: Catalog::Katakana,
        message: Some("wake up".into()),
        ..Config::default()
    };

    for tick in 0..5_000 {
        engine.advance(&config);
        registry.assert_all(&EngineSnapshot::from_engine(&engine), &format!("after tick {tick}"));
    }
}

#[test]
fn streams_appear_after_warmup() {
    let mut engine = EngineState::with_seed(20, 20, 99).unwrap();

    for _ in 0..200 {
        engine.advance(&Config::default());
    }

    let snapshot = EngineSnapshot::from_engine(&engine);
    let quiet: Vec<u16> = snapshot
        .active_columns()
        .filter(|column| column.runs().is_empty())
        .map(|column| column.col)
        .collect();
    assert!(quiet.len() < 10, "no streams in any of {quiet:?}");
}
