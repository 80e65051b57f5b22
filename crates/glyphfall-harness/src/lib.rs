//! Simulation harness for glyphfall engine testing.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true of every grid the engine can
//! produce, not specific scenarios. Use [`InvariantRegistry::standard()`] for
//! the structural invariants of the stream engine.
//!
//! # Simulation
//!
//! [`SimDriver`] implements the app [`Driver`](glyphfall_app::Driver) trait
//! with scripted input and captured frames, so the production
//! [`Runtime`](glyphfall_app::Runtime) loop runs unchanged under test.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod sim_driver;

pub use invariants::{
    ColumnSnapshot, ColumnStateInBounds, EngineSnapshot, HeadAtLeadingEdge, InactiveColumnsBlank,
    Invariant, InvariantKind, InvariantRegistry, InvariantResult, Run, RunLengthBounded,
    StateSnapshot, Violation, pending_markers,
};
pub use sim_driver::{SimDriver, SimDriverError, SimHandle};
