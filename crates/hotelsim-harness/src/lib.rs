//! Deterministic simulation harness for hotelsim testing.
//!
//! Provides a seeded [`Environment`](hotelsim_core::Environment)
//! implementation, a sink that records every event, and invariant checks
//! that run over the recorded history.
//!
//! # Invariant Testing
//!
//! The `invariants` module verifies WHAT must be true of any run (exclusive
//! room holds, exact billing, revenue conservation, visit order), not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for all of
//! them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod recording;
pub mod sim_env;

pub use invariants::{
    ExclusiveRoomHold, Invariant, InvariantRegistry, InvariantResult, RevenueConservation,
    RunSnapshot, StayAccounting, Violation, VisitLifecycle,
};
pub use recording::RecordingSink;
pub use sim_env::SimEnv;
