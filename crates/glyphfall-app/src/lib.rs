//! Application layer for glyphfall
//!
//! Pure state machine and generic runtime around the stream engine, so the
//! same orchestration code runs in the terminal and in simulation.
//!
//! # Components
//!
//! - [`App`]: state machine (key bindings, resize, ticks)
//! - [`Settings`]: startup options that outlive a single frame
//! - [`Driver`]: trait for platform-specific I/O abstraction
//! - [`Runtime`]: generic frame loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod driver;
mod event;
mod input;
mod runtime;
mod settings;

pub use action::AppAction;
pub use app::App;
pub use driver::Driver;
pub use event::AppEvent;
pub use input::KeyInput;
pub use runtime::{Runtime, RuntimeError};
pub use settings::{DEFAULT_DELAY, LOCK_MESSAGE, MAX_DELAY, Settings};
