//! Stream engine
//!
//! Advances every active column once per tick and resolves the result into a
//! [`RenderedFrame`].
//!
//! # Column lifecycle
//!
//! A column counts down `spaces_remaining` while its staging cell is vacant.
//! Once the countdown is spent and the cell below the staging row is
//! [`Symbol::PendingSpawn`], a glyph is written into the staging cell. That
//! glyph is the top of the column's first run, which then grows one row per
//! tick until it exceeds the column's `stream_length`. From then on its top
//! is converted to `PendingSpawn` every tick while its head keeps advancing,
//! so the stream falls with a fixed length until it runs off the bottom.
//!
//! # Cap rule
//!
//! Only the first run found in a column during a tick may keep its top in
//! place. Every later run is capped as soon as it advances, and capping also
//! clears the staging cell. A column therefore never has more than one
//! lengthening stream, and detached segments can never re-attach to the top.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    config::Config,
    error::EngineError,
    glyph::GlyphSource,
    grid::{ColumnState, Grid, Symbol},
    render::{self, RenderedFrame},
};

/// Smallest number of visible rows the engine will simulate.
pub const MIN_ROWS: u16 = 10;

/// Smallest number of columns the engine will simulate.
pub const MIN_COLS: u16 = 10;

/// Length of the tick counter cycle that cadence is compared against.
pub const CADENCE_CYCLE: u8 = 4;

const MIN_STREAM_LENGTH: u16 = 3;
const MAX_CADENCE: u8 = 3;

/// Screen geometry in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    /// Visible rows.
    pub rows: u16,
    /// Columns.
    pub cols: u16,
}

impl Geometry {
    /// Geometry clamped to at least [`MIN_ROWS`] x [`MIN_COLS`].
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows: rows.max(MIN_ROWS), cols: cols.max(MIN_COLS) }
    }

    /// Inclusive bounds for a freshly drawn `stream_length`.
    pub fn stream_length_range(self) -> std::ops::RangeInclusive<u16> {
        MIN_STREAM_LENGTH..=self.rows / 2 + 2
    }

    /// Inclusive bounds for a freshly drawn `spaces_remaining`.
    pub fn spaces_range(self) -> std::ops::RangeInclusive<u16> {
        1..=self.rows
    }

    /// Inclusive bounds for `cadence`.
    pub fn cadence_range(self) -> std::ops::RangeInclusive<u8> {
        1..=MAX_CADENCE
    }
}

/// Grid, column states, glyph stream and RNG of one simulation.
///
/// Everything is rebuilt wholesale on [`EngineState::resize`]; in-flight
/// streams are not carried across geometry changes.
#[derive(Debug, Clone)]
pub struct EngineState {
    geometry: Geometry,
    grid: Grid,
    columns: Vec<ColumnState>,
    glyphs: GlyphSource,
    rng: ChaCha8Rng,
    tick: u8,
}

impl EngineState {
    /// Build an engine seeded from OS entropy.
    pub fn initialize(rows: u16, cols: u16) -> Result<Self, EngineError> {
        Self::with_rng(rows, cols, ChaCha8Rng::from_entropy())
    }

    /// Build an engine with a fixed seed. Same seed, same animation.
    pub fn with_seed(rows: u16, cols: u16, seed: u64) -> Result<Self, EngineError> {
        Self::with_rng(rows, cols, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(rows: u16, cols: u16, mut rng: ChaCha8Rng) -> Result<Self, EngineError> {
        let geometry = Geometry::new(rows, cols);
        let (grid, columns, glyphs) = build(geometry, &mut rng)?;
        Ok(Self { geometry, grid, columns, glyphs, rng, tick: 0 })
    }

    /// Discard all state and rebuild for a new geometry.
    ///
    /// On error the previous state is left untouched.
    pub fn resize(&mut self, rows: u16, cols: u16) -> Result<(), EngineError> {
        let geometry = Geometry::new(rows, cols);
        let (grid, columns, glyphs) = build(geometry, &mut self.rng)?;
        self.geometry = geometry;
        self.grid = grid;
        self.columns = columns;
        self.glyphs = glyphs;
        Ok(())
    }

    /// Run one tick and render the result.
    pub fn advance(&mut self, config: &Config) -> RenderedFrame {
        self.step(config);
        self.render(config)
    }

    /// Run one tick of the stream engine without rendering.
    ///
    /// The cadence counter advances even while paused; the grid does not.
    pub fn step(&mut self, config: &Config) {
        self.tick = self.tick % CADENCE_CYCLE + 1;
        if config.paused {
            return;
        }

        for col in self.grid.active_columns() {
            let Some(cadence) = self.column_state(col).map(ColumnState::cadence) else {
                continue;
            };
            if config.asynchronous && self.tick <= cadence {
                continue;
            }
            self.gate_spawn(col);
            self.advance_column(col, config.changes);
        }
    }

    /// Render the current grid without advancing it.
    pub fn render(&mut self, config: &Config) -> RenderedFrame {
        render::render(&self.grid, config, &mut self.rng)
    }

    /// Spawn gating on the staging row.
    fn gate_spawn(&mut self, col: u16) {
        let geometry = self.geometry;
        let Some(state) = self.columns.get_mut(usize::from(col / 2)) else {
            return;
        };
        if !self.grid.symbol(0, col).is_vacant() {
            return;
        }

        if state.spaces_remaining > 0 {
            state.spaces_remaining -= 1;
        } else if self.grid.symbol(1, col) == Symbol::PendingSpawn {
            state.stream_length = self.rng.gen_range(geometry.stream_length_range());
            self.grid.set_symbol(0, col, Symbol::Glyph(self.glyphs.next_index()));
            state.spaces_remaining = self.rng.gen_range(geometry.spaces_range());
            tracing::trace!(col, length = state.stream_length, "stream spawned");
        }
    }

    /// Downward traversal: grow, cap and retire every run in `col`.
    fn advance_column(&mut self, col: u16, changes: bool) {
        let last = u32::from(self.grid.rows());
        let Some(stream_length) = self.column_state(col).map(ColumnState::stream_length) else {
            return;
        };
        let vacant = |grid: &Grid, row: u32| grid.symbol(row as u16, col).is_vacant();

        let mut row = 0u32;
        let mut first_run_done = false;

        while row <= last {
            while row <= last && vacant(&self.grid, row) {
                row += 1;
            }
            if row > last {
                break;
            }

            let top = row as u16;
            let mut run_len = 0u32;
            while row <= last && !vacant(&self.grid, row) {
                if let Some(cell) = self.grid.cell_mut(row as u16, col) {
                    cell.is_head = false;
                    if changes && self.rng.gen_ratio(1, 8) {
                        cell.symbol = Symbol::Glyph(self.glyphs.next_index());
                    }
                }
                row += 1;
                run_len += 1;
            }

            if row > last {
                // Nothing below the run to grow into; it drains off the bottom.
                self.grid.set_symbol(top, col, Symbol::PendingSpawn);
                continue;
            }

            if let Some(cell) = self.grid.cell_mut(row as u16, col) {
                cell.symbol = Symbol::Glyph(self.glyphs.next_index());
                cell.is_head = true;
            }

            if run_len > u32::from(stream_length) || first_run_done {
                self.grid.set_symbol(top, col, Symbol::PendingSpawn);
                self.grid.set_symbol(0, col, Symbol::Empty);
            }
            first_run_done = true;
            row += 1;
        }
    }

    /// Current geometry.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// The cell grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// State of column `col`. `None` for odd or out-of-range columns.
    pub fn column_state(&self, col: u16) -> Option<&ColumnState> {
        if col % 2 != 0 {
            return None;
        }
        self.columns.get(usize::from(col / 2))
    }

    /// States of all active columns, left to right.
    pub fn column_states(&self) -> &[ColumnState] {
        &self.columns
    }

    /// The glyph index stream.
    pub fn glyphs(&self) -> &GlyphSource {
        &self.glyphs
    }

    /// Position in the cadence cycle, `1..=CADENCE_CYCLE` once ticking.
    pub fn tick(&self) -> u8 {
        self.tick
    }
}

/// Allocate a fresh grid, column states and glyph stream for `geometry`.
fn build(
    geometry: Geometry,
    rng: &mut ChaCha8Rng,
) -> Result<(Grid, Vec<ColumnState>, GlyphSource), EngineError> {
    let mut grid = Grid::allocate(geometry.rows, geometry.cols)?;

    let active = usize::from(geometry.cols.div_ceil(2));
    let mut columns = Vec::new();
    columns
        .try_reserve_exact(active)
        .map_err(|_| EngineError::Allocation { rows: geometry.rows, cols: geometry.cols })?;

    for col in grid.active_columns() {
        grid.set_symbol(1, col, Symbol::PendingSpawn);
        columns.push(ColumnState {
            spaces_remaining: rng.gen_range(geometry.spaces_range()),
            stream_length: rng.gen_range(geometry.stream_length_range()),
            cadence: rng.gen_range(geometry.cadence_range()),
        });
    }

    let glyphs = GlyphSource::generate(rng);
    tracing::debug!(rows = geometry.rows, cols = geometry.cols, "grid rebuilt");

    Ok((grid, columns, glyphs))
}
