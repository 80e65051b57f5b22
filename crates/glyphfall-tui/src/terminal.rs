//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. Hangup and termination signals
//! are delivered as interrupt events.

use std::{
    io::{self, Stdout, stdout},
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use glyphfall_app::{App, AppEvent, Driver, KeyInput};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::ui;

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Owns the terminal for its whole lifetime: raw mode, the alternate screen
/// and the hidden cursor are all undone on drop, including on error paths.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    signals: Signals,
}

impl TerminalDriver {
    /// Take over the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be switched to raw mode or the
    /// signal handlers cannot be installed.
    pub fn new() -> Result<Self, TerminalError> {
        let signals = Signals::new()?;

        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        terminal.clear()?;
        let event_stream = EventStream::new();

        Ok(Self { terminal, event_stream, signals })
    }
}

/// Convert a crossterm event to an `AppEvent`. Key releases and other events
/// are dropped.
fn convert_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(convert_key(key)),
        Event::Resize(cols, rows) => Some(AppEvent::Resize(cols, rows)),
        _ => None,
    }
}

/// Raw mode swallows the terminal's own signal keys, so Ctrl-C, Ctrl-\ and
/// Ctrl-Z are mapped here.
fn convert_key(key: KeyEvent) -> AppEvent {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | '\\') => AppEvent::Interrupt,
            KeyCode::Char('z') => AppEvent::Suspend,
            _ => AppEvent::Key(KeyInput::Other),
        };
    }

    match key.code {
        KeyCode::Char(c) => AppEvent::Key(KeyInput::Char(c)),
        _ => AppEvent::Key(KeyInput::Other),
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    fn size(&self) -> Result<(u16, u16), Self::Error> {
        Ok(crossterm::terminal::size()?)
    }

    async fn poll_events(&mut self, timeout: Duration) -> Result<Vec<AppEvent>, Self::Error> {
        let deadline = tokio::time::Instant::now() + timeout;
        let mut events = Vec::new();

        loop {
            tokio::select! {
                biased;

                () = self.signals.recv() => {
                    events.push(AppEvent::Interrupt);
                }

                // Terminal events
                maybe_event = self.event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => events.extend(convert_event(event)),
                        Some(Err(e)) => return Err(TerminalError::Io(e)),
                        None => {
                            tokio::time::sleep_until(deadline).await;
                            break;
                        },
                    }
                }

                // Frame deadline
                () = tokio::time::sleep_until(deadline) => break,
            }
        }

        Ok(events)
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            ui::render(frame, app);
        })?;
        Ok(())
    }

    fn stop(&mut self) {
        tracing::debug!("terminal driver stopped");
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = self.terminal.show_cursor();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

/// Hangup and termination signals.
struct Signals {
    #[cfg(unix)]
    hangup: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
}

impl Signals {
    #[cfg(unix)]
    fn new() -> io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Self { hangup: signal(SignalKind::hangup())?, terminate: signal(SignalKind::terminate())? })
    }

    #[cfg(not(unix))]
    #[allow(clippy::unnecessary_wraps, reason = "matches the unix constructor")]
    fn new() -> io::Result<Self> {
        Ok(Self {})
    }

    /// Resolves when either signal arrives.
    #[cfg(unix)]
    async fn recv(&mut self) {
        tokio::select! {
            _ = self.hangup.recv() => tracing::info!("hangup received"),
            _ = self.terminate.recv() => tracing::info!("termination requested"),
        }
    }

    #[cfg(not(unix))]
    async fn recv(&mut self) {
        std::future::pending::<()>().await;
    }
}
