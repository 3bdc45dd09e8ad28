//! Error types for Tripwire
//!
//! Configuration and I/O failures surface as [`TripwireError`]. Failures of a
//! guarded call are reported by the breaker itself through
//! [`crate::recovery::circuit_breaker::CircuitBreakerError`].

mod constructors;
mod types;

pub use types::{TripwireError, TripwireResult};
