//! Application side-effects.
//!
//! [`AppAction`] values are produced by the [`crate::App`] state machine for
//! the runtime to execute.

/// Actions produced by the App state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Paint the current frame.
    Render,

    /// Quit the application.
    Quit,
}
