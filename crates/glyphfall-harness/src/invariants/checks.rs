//! Standard invariant checks.
//!
//! These invariants capture structural properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use glyphfall_core::{Cell, Geometry, Symbol};

use super::{EngineSnapshot, Invariant, InvariantKind, InvariantResult, Violation};

/// Every head holds a glyph and is the bottom cell of its run.
///
/// A head marks the most recently written glyph of a falling stream, so a
/// run can carry at most one head and never one above its leading edge.
pub struct HeadAtLeadingEdge;

impl Invariant for HeadAtLeadingEdge {
    fn kind(&self) -> InvariantKind {
        InvariantKind::HeadAtLeadingEdge
    }

    fn check(&self, state: &EngineSnapshot) -> InvariantResult {
        for column in &state.columns {
            for (row, cell) in (0u16..).zip(&column.cells) {
                if cell.is_head && cell.symbol.is_vacant() {
                    return Err(violation(
                        self.kind(),
                        format!("col {} row {row}: head without a glyph", column.col),
                    ));
                }
            }

            for run in column.runs() {
                if run.heads.iter().any(|&head| head != run.bottom()) {
                    return Err(violation(
                        self.kind(),
                        format!(
                            "col {} run {}..={}: heads {:?} above the leading edge",
                            column.col,
                            run.top,
                            run.bottom(),
                            run.heads
                        ),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Odd columns stay empty for the lifetime of the grid.
pub struct InactiveColumnsBlank;

impl Invariant for InactiveColumnsBlank {
    fn kind(&self) -> InvariantKind {
        InvariantKind::InactiveColumnsBlank
    }

    fn check(&self, state: &EngineSnapshot) -> InvariantResult {
        for column in state.columns.iter().filter(|column| column.col % 2 == 1) {
            if let Some(row) = column.cells.iter().position(|cell| *cell != Cell::default()) {
                return Err(violation(
                    self.kind(),
                    format!("inactive col {} row {row} is not blank", column.col),
                ));
            }
        }
        Ok(())
    }
}

/// Per-column randoms stay within the ranges drawn for the geometry, and
/// there is exactly one state per active column.
pub struct ColumnStateInBounds;

impl Invariant for ColumnStateInBounds {
    fn kind(&self) -> InvariantKind {
        InvariantKind::ColumnStateInBounds
    }

    fn check(&self, state: &EngineSnapshot) -> InvariantResult {
        let geometry = Geometry::new(state.rows, state.cols);
        let active = state.active_columns().count();
        if state.states.len() != active {
            return Err(violation(
                self.kind(),
                format!("{} column states for {active} active columns", state.states.len()),
            ));
        }

        for (col, column) in (0u16..).step_by(2).zip(&state.states) {
            if column.spaces_remaining > state.rows {
                return Err(violation(
                    self.kind(),
                    format!("col {col}: spaces {} > rows {}", column.spaces_remaining, state.rows),
                ));
            }
            if !geometry.stream_length_range().contains(&column.stream_length) {
                return Err(violation(
                    self.kind(),
                    format!(
                        "col {col}: stream length {} outside {:?}",
                        column.stream_length,
                        geometry.stream_length_range()
                    ),
                ));
            }
            if !geometry.cadence_range().contains(&column.cadence) {
                return Err(violation(
                    self.kind(),
                    format!("col {col}: cadence {} outside {:?}", column.cadence, geometry.cadence_range()),
                ));
            }
        }
        Ok(())
    }
}

/// No run is longer than the longest stream plus its unrolled top.
///
/// Streams stop lengthening once they exceed their target length, so the
/// bound is `rows / 2 + 3`.
pub struct RunLengthBounded;

impl Invariant for RunLengthBounded {
    fn kind(&self) -> InvariantKind {
        InvariantKind::RunLengthBounded
    }

    fn check(&self, state: &EngineSnapshot) -> InvariantResult {
        let limit = state.rows / 2 + 3;
        for column in state.active_columns() {
            if let Some(run) = column.runs().into_iter().find(|run| run.len > limit) {
                return Err(violation(
                    self.kind(),
                    format!(
                        "col {} run at row {} has {} glyphs, limit {limit}",
                        column.col, run.top, run.len
                    ),
                ));
            }
        }
        Ok(())
    }
}

fn violation(invariant: InvariantKind, message: String) -> Violation {
    Violation { invariant, message }
}

/// Count [`Symbol::PendingSpawn`] cells in an active column.
///
/// Not an invariant: markers accumulate as streams drain, but the count is a
/// useful diagnostic in failing tests.
pub fn pending_markers(state: &EngineSnapshot, col: u16) -> usize {
    state
        .columns
        .get(usize::from(col))
        .map_or(0, |column| column.cells.iter().filter(|c| c.symbol == Symbol::PendingSpawn).count())
}

#[cfg(test)]
mod tests {
    use glyphfall_core::EngineState;

    use super::*;

    fn snapshot() -> EngineSnapshot {
        EngineSnapshot::from_engine(&EngineState::with_seed(10, 10, 0).unwrap())
    }

    fn set(state: &mut EngineSnapshot, row: usize, col: usize, symbol: Symbol, is_head: bool) {
        state.columns[col].cells[row] = Cell { symbol, is_head };
    }

    #[test]
    fn head_without_glyph_is_violation() {
        let mut state = snapshot();
        set(&mut state, 4, 2, Symbol::Empty, true);

        let err = HeadAtLeadingEdge.check(&state).unwrap_err();
        assert_eq!(err.invariant, InvariantKind::HeadAtLeadingEdge);
        assert!(err.message.contains("without a glyph"));
    }

    #[test]
    fn head_above_bottom_is_violation() {
        let mut state = snapshot();
        set(&mut state, 3, 2, Symbol::Glyph(1), true);
        set(&mut state, 4, 2, Symbol::Glyph(1), false);

        assert!(HeadAtLeadingEdge.check(&state).is_err());

        set(&mut state, 3, 2, Symbol::Glyph(1), false);
        set(&mut state, 4, 2, Symbol::Glyph(1), true);
        assert!(HeadAtLeadingEdge.check(&state).is_ok());
    }

    #[test]
    fn glyph_in_odd_column_is_violation() {
        let mut state = snapshot();
        set(&mut state, 5, 3, Symbol::Glyph(9), false);

        assert!(InactiveColumnsBlank.check(&state).is_err());
    }

    #[test]
    fn state_out_of_range_is_violation() {
        let mut state = snapshot();
        state.states[1].stream_length = 2;
        assert!(ColumnStateInBounds.check(&state).is_err());

        let mut state = snapshot();
        state.states[0].spaces_remaining = 11;
        assert!(ColumnStateInBounds.check(&state).is_err());

        let mut state = snapshot();
        state.states.pop();
        assert!(ColumnStateInBounds.check(&state).is_err());
    }

    #[test]
    fn overlong_run_is_violation() {
        let mut state = snapshot();
        for row in 2..=9 {
            set(&mut state, row, 0, Symbol::Glyph(4), false);
        }
        // rows / 2 + 3 = 8
        assert!(RunLengthBounded.check(&state).is_ok());

        set(&mut state, 10, 0, Symbol::Glyph(4), false);
        assert!(RunLengthBounded.check(&state).is_err());
    }

    #[test]
    fn fresh_engine_has_one_marker_per_column() {
        let state = snapshot();
        assert_eq!(pending_markers(&state, 0), 1);
        assert_eq!(pending_markers(&state, 1), 0);
    }
}
