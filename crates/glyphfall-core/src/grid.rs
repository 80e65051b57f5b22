//! Cell grid and per-column state.
//!
//! The grid is one row taller than the screen: row 0 is a hidden staging row
//! that gates when a column may start a new stream, and rows `1..=rows` map
//! to screen rows `0..rows`. Only even columns are active; odd columns stay
//! [`Symbol::Empty`] for the lifetime of the grid and give streams their
//! spacing.

use std::{iter::StepBy, ops::Range};

use crate::{error::EngineError, glyph::GlyphIndex};

/// Contents of one grid position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Nothing here.
    #[default]
    Empty,
    /// Vacant, and marks the column as ready to seed a new stream when found
    /// directly below the staging row.
    PendingSpawn,
    /// Part of a stream.
    Glyph(GlyphIndex),
}

impl Symbol {
    /// `true` for [`Symbol::Empty`] and [`Symbol::PendingSpawn`].
    pub fn is_vacant(self) -> bool {
        !matches!(self, Self::Glyph(_))
    }

    /// Glyph index, if this is a glyph.
    pub fn glyph(self) -> Option<GlyphIndex> {
        match self {
            Self::Glyph(index) => Some(index),
            Self::Empty | Self::PendingSpawn => None,
        }
    }
}

/// One grid position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    /// What the cell holds.
    pub symbol: Symbol,
    /// Most recently written glyph of a stream. Rendering emphasis only.
    pub is_head: bool,
}

/// Rectangular `(rows + 1) x cols` cell array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: u16,
    cols: u16,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocate an all-empty grid with `rows` visible rows.
    pub(crate) fn allocate(rows: u16, cols: u16) -> Result<Self, EngineError> {
        let alloc_err = || EngineError::Allocation { rows, cols };

        let len = (usize::from(rows) + 1).checked_mul(usize::from(cols)).ok_or_else(alloc_err)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| alloc_err())?;
        cells.resize(len, Cell::default());

        Ok(Self { rows, cols, cells })
    }

    /// Visible rows. Valid row indices are `0..=rows`.
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Columns.
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Whether `col` takes part in the simulation.
    pub fn is_active_column(&self, col: u16) -> bool {
        col < self.cols && col % 2 == 0
    }

    /// Active column indices, left to right.
    pub fn active_columns(&self) -> StepBy<Range<u16>> {
        (0..self.cols).step_by(2)
    }

    /// Cell at `(row, col)`. `None` outside `[0, rows] x [0, cols)`.
    pub fn cell(&self, row: u16, col: u16) -> Option<&Cell> {
        self.index(row, col).and_then(|i| self.cells.get(i))
    }

    pub(crate) fn cell_mut(&mut self, row: u16, col: u16) -> Option<&mut Cell> {
        self.index(row, col).and_then(|i| self.cells.get_mut(i))
    }

    /// Symbol at `(row, col)`, treating out-of-bounds positions as empty.
    pub fn symbol(&self, row: u16, col: u16) -> Symbol {
        self.cell(row, col).map_or(Symbol::Empty, |cell| cell.symbol)
    }

    pub(crate) fn set_symbol(&mut self, row: u16, col: u16, symbol: Symbol) {
        if let Some(cell) = self.cell_mut(row, col) {
            cell.symbol = symbol;
        }
    }

    /// Cells of `col` from the staging row down. Empty for out-of-range
    /// columns.
    pub fn column(&self, col: u16) -> impl Iterator<Item = &Cell> {
        let rows = if col < self.cols { 0..=self.rows } else { 1..=0 };
        rows.filter_map(move |row| self.cell(row, col))
    }

    fn index(&self, row: u16, col: u16) -> Option<usize> {
        (row <= self.rows && col < self.cols)
            .then(|| usize::from(row) * usize::from(self.cols) + usize::from(col))
    }
}

/// Simulation state of one active column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnState {
    pub(crate) spaces_remaining: u16,
    pub(crate) stream_length: u16,
    pub(crate) cadence: u8,
}

impl ColumnState {
    /// Ticks left before the column may spawn again.
    pub fn spaces_remaining(&self) -> u16 {
        self.spaces_remaining
    }

    /// Target length of the column's current stream.
    pub fn stream_length(&self) -> u16 {
        self.stream_length
    }

    /// Update cadence in asynchronous mode, `1..=3`.
    pub fn cadence(&self) -> u8 {
        self.cadence
    }
}
