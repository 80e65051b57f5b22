//! Invariant checking for simulation testing.
//!
//! Invariants are properties that must always hold between engine ticks.
//! Unlike example-based tests that check specific scenarios, invariants
//! verify structural properties of every grid the engine can produce.
//!
//! # Architecture
//!
//! The invariant system extracts observable state from an engine into an
//! [`EngineSnapshot`], then runs registered [`Invariant`] checks against it.
//! Violations trigger panics with detailed context for debugging.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! let snapshot = EngineSnapshot::from_engine(&engine);
//! registry.assert_all(&snapshot, "after tick 12");
//! ```

mod checks;
mod snapshot;

use std::fmt;

pub use checks::{
    ColumnStateInBounds, HeadAtLeadingEdge, InactiveColumnsBlank, RunLengthBounded, pending_markers,
};
pub use snapshot::{ColumnSnapshot, EngineSnapshot, Run, StateSnapshot};

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Identifies an invariant in violation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvariantKind {
    /// See [`HeadAtLeadingEdge`].
    HeadAtLeadingEdge,
    /// See [`InactiveColumnsBlank`].
    InactiveColumnsBlank,
    /// See [`ColumnStateInBounds`].
    ColumnStateInBounds,
    /// See [`RunLengthBounded`].
    RunLengthBounded,
}

impl InvariantKind {
    /// Invariant name for error reporting.
    pub fn name(self) -> &'static str {
        match self {
            Self::HeadAtLeadingEdge => "head_at_leading_edge",
            Self::InactiveColumnsBlank => "inactive_columns_blank",
            Self::ColumnStateInBounds => "column_state_in_bounds",
            Self::RunLengthBounded => "run_length_bounded",
        }
    }
}

impl fmt::Display for InvariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Invariant violation with context.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{invariant}: {message}")]
pub struct Violation {
    /// The violated invariant.
    pub invariant: InvariantKind,
    /// Description of what went wrong.
    pub message: String,
}

/// An invariant that can be checked against engine state.
///
/// Invariants are structural properties that must always hold.
/// They capture WHAT must be true, not specific test scenarios.
pub trait Invariant: Send + Sync {
    /// Which invariant this is.
    fn kind(&self) -> InvariantKind;

    /// Check the invariant against a snapshot.
    ///
    /// Returns `Ok(())` if the invariant holds, or a [`Violation`]
    /// describing what went wrong.
    fn check(&self, state: &EngineSnapshot) -> InvariantResult;
}

/// Registry of invariants to check.
///
/// Collects multiple invariants and runs them all against engine state.
/// Use [`InvariantRegistry::standard()`] for the stream engine invariants.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with the stream engine invariants.
    ///
    /// Includes:
    /// - [`HeadAtLeadingEdge`]: heads hold glyphs at the bottom of their run
    /// - [`InactiveColumnsBlank`]: odd columns never hold anything
    /// - [`ColumnStateInBounds`]: per-column randoms stay in range
    /// - [`RunLengthBounded`]: no run outgrows the longest stream
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(HeadAtLeadingEdge);
        registry.add(InactiveColumnsBlank);
        registry.add(ColumnStateInBounds);
        registry.add(RunLengthBounded);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants against the given state.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    ///
    /// # Errors
    ///
    /// Returns every violation found.
    pub fn check_all(&self, state: &EngineSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking on first violation.
    ///
    /// Use this in tests where you want immediate failure with context.
    ///
    /// # Panics
    ///
    /// Panics if any invariant is violated.
    #[allow(clippy::panic, reason = "test assertion helper")]
    pub fn assert_all(&self, state: &EngineSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use glyphfall_core::EngineState;

    use super::*;

    #[test]
    fn standard_registry_has_invariants() {
        let registry = InvariantRegistry::standard();
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn fresh_engine_passes_invariants() {
        let registry = InvariantRegistry::standard();
        let engine = EngineState::with_seed(24, 80, 1).unwrap();

        assert!(registry.check_all(&EngineSnapshot::from_engine(&engine)).is_ok());
    }

    #[test]
    fn violation_display_names_invariant() {
        let violation =
            Violation { invariant: InvariantKind::RunLengthBounded, message: "col 4".into() };
        assert_eq!(violation.to_string(), "run_length_bounded: col 4");
    }

    #[test]
    #[should_panic(expected = "Invariant violation after tick 3")]
    fn assert_all_panics_with_context() {
        let mut snapshot = EngineSnapshot::from_engine(&EngineState::with_seed(10, 10, 0).unwrap());
        snapshot.states[0].cadence = 9;

        InvariantRegistry::standard().assert_all(&snapshot, "after tick 3");
    }
}
