//! Application input events.
//!
//! [`AppEvent`] is the full set of inputs that drive the [`crate::App`]
//! state machine: user input, terminal changes, process signals and the
//! frame tick.

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Frame tick: advance the engine one step.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Interrupt or termination request (Ctrl-C, Ctrl-\, SIGTERM, SIGHUP).
    Interrupt,

    /// Suspend request (Ctrl-Z).
    Suspend,
}
