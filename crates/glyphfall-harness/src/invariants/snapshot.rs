//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of an engine between ticks.
//! Invariants operate on snapshots rather than live state so checks are
//! consistent and snapshots can be hand-built in tests.

use glyphfall_app::App;
use glyphfall_core::{Cell, EngineState, Symbol};

/// Snapshot of a whole engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    /// Visible rows. Columns hold `rows + 1` cells including the staging row.
    pub rows: u16,
    /// Screen columns.
    pub cols: u16,
    /// Every column, active or not, left to right.
    pub columns: Vec<ColumnSnapshot>,
    /// Per-column state of the active (even) columns, left to right.
    pub states: Vec<StateSnapshot>,
}

impl EngineSnapshot {
    /// Capture an engine.
    pub fn from_engine(engine: &EngineState) -> Self {
        let grid = engine.grid();
        let columns = (0..grid.cols())
            .map(|col| ColumnSnapshot { col, cells: grid.column(col).copied().collect() })
            .collect();
        let states = engine
            .column_states()
            .iter()
            .map(|state| StateSnapshot {
                spaces_remaining: state.spaces_remaining(),
                stream_length: state.stream_length(),
                cadence: state.cadence(),
            })
            .collect();

        Self { rows: grid.rows(), cols: grid.cols(), columns, states }
    }

    /// Capture the engine inside an App.
    pub fn from_app(app: &App) -> Self {
        Self::from_engine(app.engine())
    }

    /// Columns that take part in the simulation.
    pub fn active_columns(&self) -> impl Iterator<Item = &ColumnSnapshot> {
        self.columns.iter().filter(|column| column.col % 2 == 0)
    }
}

/// One grid column, staging row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSnapshot {
    /// Column index.
    pub col: u16,
    /// Cells from row 0 down to the last visible row.
    pub cells: Vec<Cell>,
}

impl ColumnSnapshot {
    /// Maximal runs of consecutive glyph cells, top to bottom.
    pub fn runs(&self) -> Vec<Run> {
        let mut runs: Vec<Run> = Vec::new();
        let mut current: Option<Run> = None;

        for (row, cell) in (0u16..).zip(&self.cells) {
            match (cell.symbol, current.as_mut()) {
                (Symbol::Glyph(_), Some(run)) => {
                    run.len += 1;
                    if cell.is_head {
                        run.heads.push(row);
                    }
                },
                (Symbol::Glyph(_), None) => {
                    let heads = if cell.is_head { vec![row] } else { Vec::new() };
                    current = Some(Run { top: row, len: 1, heads });
                },
                (Symbol::Empty | Symbol::PendingSpawn, _) => runs.extend(current.take()),
            }
        }
        runs.extend(current);
        runs
    }
}

/// A maximal block of consecutive glyph cells in one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Row of the topmost glyph.
    pub top: u16,
    /// Number of glyphs.
    pub len: u16,
    /// Rows of head cells inside the run.
    pub heads: Vec<u16>,
}

impl Run {
    /// Row of the bottom glyph.
    pub fn bottom(&self) -> u16 {
        self.top + self.len - 1
    }
}

/// Per-column simulation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateSnapshot {
    /// Ticks left before the column may spawn again.
    pub spaces_remaining: u16,
    /// Target length of the current stream.
    pub stream_length: u16,
    /// Asynchronous update cadence.
    pub cadence: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(symbols: &[(Symbol, bool)]) -> ColumnSnapshot {
        let cells =
            symbols.iter().map(|&(symbol, is_head)| Cell { symbol, is_head }).collect();
        ColumnSnapshot { col: 0, cells }
    }

    #[test]
    fn runs_split_on_vacant_cells() {
        let column = column(&[
            (Symbol::Glyph(1), false),
            (Symbol::Glyph(2), true),
            (Symbol::PendingSpawn, false),
            (Symbol::Empty, false),
            (Symbol::Glyph(3), false),
        ]);

        let runs = column.runs();
        assert_eq!(runs, vec![
            Run { top: 0, len: 2, heads: vec![1] },
            Run { top: 4, len: 1, heads: vec![] },
        ]);
        assert_eq!(runs[0].bottom(), 1);
    }

    #[test]
    fn snapshot_covers_every_column() {
        let engine = EngineState::with_seed(12, 15, 5).unwrap();
        let snapshot = EngineSnapshot::from_engine(&engine);

        assert_eq!(snapshot.columns.len(), 15);
        assert_eq!(snapshot.active_columns().count(), 8);
        assert_eq!(snapshot.states.len(), 8);
        assert!(snapshot.columns.iter().all(|c| c.cells.len() == 13));
    }
}
