//! Circuit breaker pattern for fault tolerance
//!
//! Prevents cascading failures by temporarily short-circuiting calls to a
//! dependency that keeps failing.
//!
//! ```text
//! Closed → Open:     failure_threshold consecutive failures
//! Open → Half-Open:  first call after timeout has elapsed
//! Half-Open → Closed: success_threshold consecutive successes
//! Half-Open → Open:  any failure
//! ```

mod breaker;
mod helper;
mod registry;
mod types;


pub use breaker::{CircuitBreaker, NoFallback};
pub use helper::with_circuit_breaker;
pub use registry::{CircuitBreakerRegistry, global, init_global};
pub use types::{
    CircuitBreakerConfig, CircuitBreakerError, CircuitBreakerMetrics, CircuitBreakerOverrides,
    CircuitState,
};
