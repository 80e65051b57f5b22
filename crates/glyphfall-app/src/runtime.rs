//! Generic runtime for application orchestration.
//!
//! The Runtime drives the frame loop, coordinating between:
//! - [`App`]: engine and settings state machine
//! - [`Driver`]: platform-specific I/O

use glyphfall_core::EngineError;
use thiserror::Error;

use crate::{App, AppAction, AppEvent, Driver, Settings};

/// Errors that end the frame loop.
#[derive(Error, Debug)]
pub enum RuntimeError<E> {
    /// The driver failed.
    #[error("driver error: {0}")]
    Driver(#[source] E),

    /// The engine could not be rebuilt.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Generic runtime that orchestrates App and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
pub struct Runtime<D>
where
    D: Driver,
{
    driver: D,
    app: App,
}

impl<D> Runtime<D>
where
    D: Driver,
{
    /// Create a runtime around an existing App.
    pub fn new(driver: D, app: App) -> Self {
        Self { driver, app }
    }

    /// Create a runtime with an App sized to the driver's output.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be queried or the grid cannot be
    /// allocated.
    pub fn with_settings(driver: D, settings: Settings) -> Result<Self, RuntimeError<D::Error>> {
        let (cols, rows) = driver.size().map_err(RuntimeError::Driver)?;
        let app = App::new(settings, cols, rows)?;
        tracing::debug!(cols, rows, "runtime started");
        Ok(Self::new(driver, app))
    }

    /// Run the frame loop until the App asks to quit.
    ///
    /// Each cycle:
    /// 1. Polls the driver for input events for one frame delay
    /// 2. Feeds every event to the App, stopping on quit
    /// 3. Ticks the App and renders the resulting frame
    ///
    /// The driver is stopped on every exit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error or a resize
    /// cannot allocate the new grid.
    pub async fn run(mut self) -> Result<(), RuntimeError<D::Error>> {
        let result = self.run_loop().await;
        self.driver.stop();
        result
    }

    async fn run_loop(&mut self) -> Result<(), RuntimeError<D::Error>> {
        loop {
            let should_quit = self.process_cycle().await?;
            if should_quit {
                tracing::debug!("quit requested");
                return Ok(());
            }
        }
    }

    /// Process one cycle of the frame loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, RuntimeError<D::Error>> {
        let delay = self.app.frame_delay();
        let events = self.driver.poll_events(delay).await.map_err(RuntimeError::Driver)?;

        for event in events {
            let actions = self.app.handle(event)?;
            if self.process_actions(actions)? {
                return Ok(true);
            }
        }

        let actions = self.app.handle(AppEvent::Tick)?;
        self.process_actions(actions)
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, RuntimeError<D::Error>> {
        for action in actions {
            match action {
                AppAction::Render => self.driver.render(&self.app).map_err(RuntimeError::Driver)?,
                AppAction::Quit => return Ok(true),
            }
        }
        Ok(false)
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a reference to the driver
    pub fn driver(&self) -> &D {
        &self.driver
    }
}
