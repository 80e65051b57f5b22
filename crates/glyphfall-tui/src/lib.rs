//! Terminal frontend for glyphfall
//!
//! A thin shell over [`glyphfall_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`glyphfall_app::Runtime`].
//!
//! This crate only handles argument parsing, terminal input and rendering.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cli;
pub mod terminal;
pub mod ui;

pub use cli::Args;
pub use glyphfall_app::{App, AppAction, AppEvent, Driver, KeyInput, Runtime, Settings};
pub use terminal::{TerminalDriver, TerminalError};
