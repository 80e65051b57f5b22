//! Property-based tests for the stream engine public API.
//!
//! Geometry, seeds and configuration flags are generated; the properties
//! hold for every combination.

use glyphfall_core::{
    BoldMode, Catalog, Color, Config, EngineState, Geometry, MIN_COLS, MIN_ROWS, Symbol,
};
use proptest::prelude::*;

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        any::<bool>(),
        any::<bool>(),
        prop_oneof![Just(BoldMode::Off), Just(BoldMode::Alternate), Just(BoldMode::All)],
        any::<bool>(),
        any::<bool>(),
        prop_oneof![Just(Catalog::Latin), Just(Catalog::Katakana)],
        prop::sample::select(Color::NAMED.to_vec()),
        prop::option::of("[a-z ]{0,12}"),
    )
        .prop_map(|(asynchronous, changes, bold, rainbow, lambda, catalog, color, message)| {
            Config {
                asynchronous,
                changes,
                bold,
                rainbow,
                lambda,
                catalog,
                color,
                paused: false,
                message,
            }
        })
}

fn assert_state_in_bounds(engine: &EngineState) -> Result<(), TestCaseError> {
    let geometry = engine.geometry();
    for state in engine.column_states() {
        prop_assert!(state.spaces_remaining() <= geometry.rows);
        prop_assert!(geometry.stream_length_range().contains(&state.stream_length()));
        prop_assert!(geometry.cadence_range().contains(&state.cadence()));
    }
    Ok(())
}

proptest! {
    #[test]
    fn resize_twice_stays_in_bounds(
        seed in any::<u64>(),
        rows in 0u16..120,
        cols in 0u16..250,
    ) {
        let mut engine = EngineState::with_seed(24, 80, seed).unwrap();

        engine.resize(rows, cols).unwrap();
        let first = engine.geometry();
        assert_state_in_bounds(&engine)?;

        engine.resize(rows, cols).unwrap();
        prop_assert_eq!(engine.geometry(), first);
        prop_assert_eq!(first, Geometry::new(rows, cols));
        prop_assert_eq!(engine.column_states().len(), usize::from(first.cols.div_ceil(2)));
        assert_state_in_bounds(&engine)?;

        for col in engine.grid().active_columns() {
            prop_assert_eq!(engine.grid().symbol(1, col), Symbol::PendingSpawn);
        }
    }

    #[test]
    fn frames_match_grid_geometry(
        seed in any::<u64>(),
        rows in MIN_ROWS..60,
        cols in MIN_COLS..120,
        config in config_strategy(),
        ticks in 1usize..150,
    ) {
        let mut engine = EngineState::with_seed(rows, cols, seed).unwrap();

        for _ in 0..ticks {
            let frame = engine.advance(&config);
            prop_assert_eq!(frame.rows(), rows);
            prop_assert_eq!(frame.cols(), cols);
        }
        assert_state_in_bounds(&engine)?;
    }

    #[test]
    fn paused_engine_never_changes_grid(
        seed in any::<u64>(),
        warmup in 0usize..80,
        paused_ticks in 1usize..40,
    ) {
        let mut engine = EngineState::with_seed(20, 30, seed).unwrap();
        for _ in 0..warmup {
            engine.advance(&Config::default());
        }
        let grid = engine.grid().clone();
        let columns = engine.column_states().to_vec();

        let paused = Config { paused: true, changes: true, ..Config::default() };
        for _ in 0..paused_ticks {
            engine.advance(&paused);
        }

        prop_assert_eq!(engine.grid(), &grid);
        prop_assert_eq!(engine.column_states(), columns.as_slice());
    }
}

#[test]
fn minimum_geometry_stays_in_bounds() {
    let mut engine = EngineState::with_seed(MIN_ROWS, MIN_COLS, 17).unwrap();
    let config = Config { changes: true, ..Config::default() };

    for _ in 0..2_000 {
        engine.advance(&config);
        assert_eq!(engine.grid().rows(), MIN_ROWS);
        assert_eq!(engine.grid().cols(), MIN_COLS);
        assert!(engine.grid().cell(MIN_ROWS + 1, 0).is_none());
    }
}
