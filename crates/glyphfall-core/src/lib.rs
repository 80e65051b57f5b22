//! Stream simulation engine for glyphfall.
//!
//! Pure state machine that spawns, grows, caps and retires falling glyph
//! streams inside a fixed-size character grid, then resolves the grid into a
//! styled [`RenderedFrame`]. Completely decoupled from terminal I/O: the
//! caller supplies geometry and a [`Config`] each tick and paints whatever
//! frame comes back.
//!
//! # Components
//!
//! - [`GlyphSource`]: glyph catalogs plus a cyclic pre-drawn index stream
//! - [`Grid`]: cell array with a hidden staging row and even-only columns
//! - [`ColumnState`]: per-column spawn countdown, stream length, cadence
//! - [`EngineState`]: the stream engine (`initialize`/`advance`/`resize`)
//! - [`render`]: resolves a grid into a [`RenderedFrame`]
//!
//! # Determinism
//!
//! Every random draw goes through one seedable RNG owned by the
//! [`EngineState`]. Two engines built with the same seed and driven with the
//! same configurations produce identical frames.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod engine;
mod error;
mod glyph;
mod grid;
pub mod render;

pub use config::{BoldMode, Color, Config, ParseColorError};
pub use engine::{CADENCE_CYCLE, EngineState, Geometry, MIN_COLS, MIN_ROWS};
pub use error::EngineError;
pub use glyph::{Catalog, GLYPH_BUFFER_LEN, GlyphIndex, GlyphSource, LAMBDA};
pub use grid::{Cell, ColumnState, Grid, Symbol};
pub use render::{FrameCell, RenderedFrame};
