//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as the terminal driver but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`glyphfall_app::Runtime`] orchestration code runs in both production and
//! simulation.
//!
//! Time is virtual: each poll returns the next scripted batch immediately and
//! records the timeout it was asked to wait.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use glyphfall_app::{App, AppEvent, Driver};
use glyphfall_core::RenderedFrame;

use crate::invariants::{EngineSnapshot, InvariantRegistry};

/// Error type for simulation driver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimDriverError {
    /// Every scripted batch has been delivered.
    #[error("event script exhausted after {polls} polls")]
    ScriptExhausted {
        /// Polls served before running out.
        polls: usize,
    },
}

/// Shared state for event injection and inspection.
///
/// The runtime owns the driver, so tests observe it through a [`SimHandle`].
#[derive(Default)]
struct SharedState {
    batches: VecDeque<Vec<AppEvent>>,
    frames: Vec<RenderedFrame>,
    timeouts: Vec<Duration>,
    stopped: bool,
}

/// Simulation driver for deterministic testing.
///
/// Implements [`Driver`] trait so the same [`glyphfall_app::Runtime`]
/// orchestration code runs in both production TUI and simulation tests.
pub struct SimDriver {
    size: (u16, u16),
    state: Arc<Mutex<SharedState>>,
    invariants: Option<InvariantRegistry>,
}

impl SimDriver {
    /// Create a driver reporting a `cols x rows` output.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { size: (cols, rows), state: Arc::default(), invariants: None }
    }

    /// Enable invariant checking after every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Queue a batch of events delivered together by one poll.
    pub fn inject_batch(&self, events: Vec<AppEvent>) {
        lock(&self.state).batches.push_back(events);
    }

    /// Queue a single event as its own batch.
    pub fn inject_event(&self, event: AppEvent) {
        self.inject_batch(vec![event]);
    }

    /// Queue `frames` polls that deliver no input.
    pub fn inject_idle(&self, frames: usize) {
        let mut state = lock(&self.state);
        state.batches.extend(std::iter::repeat_with(Vec::new).take(frames));
    }

    /// Handle for inspecting the driver after the runtime takes ownership.
    pub fn handle(&self) -> SimHandle {
        SimHandle { state: Arc::clone(&self.state) }
    }

    /// Check invariants against App state.
    ///
    /// # Panics
    ///
    /// Panics if invariants are enabled and one is violated.
    pub fn check_invariants(&self, app: &App, context: &str) {
        if let Some(ref registry) = self.invariants {
            let snapshot = EngineSnapshot::from_app(app);
            registry.assert_all(&snapshot, context);
        }
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    fn size(&self) -> Result<(u16, u16), Self::Error> {
        Ok(self.size)
    }

    async fn poll_events(&mut self, timeout: Duration) -> Result<Vec<AppEvent>, Self::Error> {
        let mut state = lock(&self.state);
        state.timeouts.push(timeout);
        let polls = state.timeouts.len();
        state.batches.pop_front().ok_or(SimDriverError::ScriptExhausted { polls: polls - 1 })
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        let frame_no = {
            let mut state = lock(&self.state);
            state.frames.push(app.frame().clone());
            state.frames.len()
        };
        self.check_invariants(app, &format!("after frame {frame_no}"));
        Ok(())
    }

    fn stop(&mut self) {
        lock(&self.state).stopped = true;
        tracing::debug!("sim driver stopped");
    }
}

/// Read access to a [`SimDriver`]'s captured output.
#[derive(Clone)]
pub struct SimHandle {
    state: Arc<Mutex<SharedState>>,
}

impl SimHandle {
    /// Every frame rendered so far.
    pub fn frames(&self) -> Vec<RenderedFrame> {
        lock(&self.state).frames.clone()
    }

    /// Number of frames rendered so far.
    pub fn frame_count(&self) -> usize {
        lock(&self.state).frames.len()
    }

    /// Most recently rendered frame.
    pub fn last_frame(&self) -> Option<RenderedFrame> {
        lock(&self.state).frames.last().cloned()
    }

    /// Timeouts the runtime polled with, in order.
    pub fn timeouts(&self) -> Vec<Duration> {
        lock(&self.state).timeouts.clone()
    }

    /// Whether the runtime stopped the driver.
    pub fn is_stopped(&self) -> bool {
        lock(&self.state).stopped
    }

    /// Scripted batches not yet delivered.
    pub fn pending(&self) -> usize {
        lock(&self.state).batches.len()
    }
}

fn lock(state: &Mutex<SharedState>) -> MutexGuard<'_, SharedState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
