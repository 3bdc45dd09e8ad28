//! Failure isolation for calls to unreliable dependencies
//!
//! Each dependency gets a circuit breaker that counts failures and
//! short-circuits calls while the dependency is considered down.

pub mod circuit_breaker;

pub use circuit_breaker::{
    CircuitBreaker, CircuitBreakerConfig, CircuitBreakerError, CircuitBreakerMetrics,
    CircuitBreakerOverrides, CircuitBreakerRegistry, CircuitState, with_circuit_breaker,
};
