//! Error types for the stream engine.
//!
//! The engine has exactly one failure mode: the grid for a requested
//! geometry cannot be allocated. Undersized geometry is clamped, not
//! rejected, so it never shows up here.

use thiserror::Error;

/// Errors raised while (re)building engine state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Grid or column state storage could not be reserved.
    ///
    /// Fatal: there is no smaller working set to fall back to.
    #[error("cannot allocate a {rows}x{cols} grid")]
    Allocation {
        /// Visible rows requested
        rows: u16,
        /// Columns requested
        cols: u16,
    },
}
