//! Tripwire Core Library
//!
//! Circuit breakers for calls to unreliable dependencies: the per-dependency
//! state machine, a registry holding one breaker per name, and the
//! configuration that seeds them.

pub mod config;
pub mod error;
pub mod recovery;

// Re-export commonly used types
pub use config::{CircuitBreakerSettings, LoggingConfig, TripwireConfig, load_config};
pub use error::{TripwireError, TripwireResult};
pub use recovery::{
    CircuitBreaker, CircuitBreakerConfig, CircuitBreakerError, CircuitBreakerMetrics,
    CircuitBreakerOverrides, CircuitBreakerRegistry, CircuitState, with_circuit_breaker,
};
