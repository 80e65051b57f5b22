//! Frame rendering
//!
//! Resolves the visible rows of a [`Grid`] into a [`RenderedFrame`]: one
//! display glyph plus style hints per screen cell. Painting the frame onto a
//! terminal is the caller's job.

use rand::Rng;

use crate::{
    config::{BoldMode, Color, Config},
    glyph::LAMBDA,
    grid::{Cell, Grid, Symbol},
};

/// One resolved screen cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameCell {
    /// Character to paint.
    pub glyph: char,
    /// Foreground color.
    pub color: Color,
    /// Bold attribute.
    pub bold: bool,
    /// Cell is the leading edge of a stream.
    pub head: bool,
}

impl FrameCell {
    /// Blank cell in the terminal's default color.
    pub const BLANK: Self = Self { glyph: ' ', color: Color::Reset, bold: false, head: false };
}

impl Default for FrameCell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Full-screen snapshot, row-major over visible rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFrame {
    rows: u16,
    cols: u16,
    cells: Vec<FrameCell>,
}

impl RenderedFrame {
    /// All-blank frame.
    pub fn blank(rows: u16, cols: u16) -> Self {
        let len = usize::from(rows) * usize::from(cols);
        Self { rows, cols, cells: vec![FrameCell::BLANK; len] }
    }

    /// Screen rows.
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Screen columns.
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Cell at screen position `(row, col)`.
    pub fn cell(&self, row: u16, col: u16) -> Option<&FrameCell> {
        self.index(row, col).and_then(|i| self.cells.get(i))
    }

    /// Screen rows, top to bottom.
    pub fn lines(&self) -> impl Iterator<Item = &[FrameCell]> {
        self.cells.chunks(usize::from(self.cols).max(1))
    }

    /// Glyphs of screen row `row` as a string.
    pub fn line_text(&self, row: u16) -> String {
        (0..self.cols).filter_map(|col| self.cell(row, col)).map(|cell| cell.glyph).collect()
    }

    fn put(&mut self, row: u16, col: u16, cell: FrameCell) {
        if let Some(slot) = self.index(row, col).and_then(|i| self.cells.get_mut(i)) {
            *slot = cell;
        }
    }

    fn index(&self, row: u16, col: u16) -> Option<usize> {
        (row < self.rows && col < self.cols)
            .then(|| usize::from(row) * usize::from(self.cols) + usize::from(col))
    }
}

/// Resolve the visible rows of `grid` under `config`.
///
/// `rng` is only consulted in rainbow mode, once per non-highlighted cell.
pub fn render<R: Rng + ?Sized>(grid: &Grid, config: &Config, rng: &mut R) -> RenderedFrame {
    let mut frame = RenderedFrame::blank(grid.rows(), grid.cols());

    for col in grid.active_columns() {
        for row in 1..=grid.rows() {
            let Some(cell) = grid.cell(row, col) else {
                continue;
            };
            frame.put(row - 1, col, resolve(*cell, config, rng));
        }
    }

    if let Some(message) = config.overlay() {
        paint_overlay(&mut frame, message);
    }

    frame
}

fn resolve<R: Rng + ?Sized>(cell: Cell, config: &Config, rng: &mut R) -> FrameCell {
    let highlighted =
        cell.symbol == Symbol::PendingSpawn || (cell.is_head && !config.rainbow);

    if highlighted {
        return FrameCell {
            glyph: cell.symbol.glyph().map_or(' ', |index| config.catalog.glyph(index)),
            color: Color::White,
            bold: config.bold != BoldMode::Off,
            head: cell.is_head,
        };
    }

    let color = if config.rainbow {
        let pick = rng.gen_range(0..Color::RAINBOW.len());
        Color::RAINBOW.get(pick).copied().unwrap_or(config.color)
    } else {
        config.color
    };

    let bold = match config.bold {
        BoldMode::Off => false,
        BoldMode::All => true,
        BoldMode::Alternate => cell.symbol.glyph().is_some_and(|index| index % 2 == 0),
    };

    let glyph = match cell.symbol {
        Symbol::Glyph(_) if config.lambda => LAMBDA,
        Symbol::Glyph(index) => config.catalog.glyph(index),
        Symbol::Empty | Symbol::PendingSpawn => ' ',
    };

    FrameCell { glyph, color, bold, head: cell.is_head }
}

/// Center `message` with two blank columns either side and a blank row above
/// and below, clipped to the frame.
fn paint_overlay(frame: &mut RenderedFrame, message: &str) {
    let text: Vec<char> = message.chars().collect();
    let width = text.len() as i64 + 4;
    let center_row = i64::from(frame.rows) / 2;
    let left = i64::from(frame.cols) / 2 - text.len() as i64 / 2 - 2;

    for row in center_row - 1..=center_row + 1 {
        for offset in 0..width {
            let glyph = if row == center_row && (2..width - 2).contains(&offset) {
                text.get((offset - 2) as usize).copied().unwrap_or(' ')
            } else {
                ' '
            };
            let (Ok(r), Ok(c)) = (u16::try_from(row), u16::try_from(left + offset)) else {
                continue;
            };
            frame.put(r, c, FrameCell { glyph, ..FrameCell::BLANK });
        }
    }
}
