//! Circuit breaker implementation

use std::future::{Future, Ready};

use parking_lot::Mutex;
use tokio::time::Instant;

use super::types::{CircuitBreakerConfig, CircuitBreakerError, CircuitBreakerMetrics, CircuitState};

/// Fallback type used when a call is made without one
pub type NoFallback<T, E> = fn() -> Ready<Result<T, E>>;

/// Mutable part of a breaker, always read and written under one lock
#[derive(Debug, Default)]
struct BreakerState {
    state: CircuitState,
    /// Consecutive failures
    failures: u32,
    /// Consecutive successes
    successes: u32,
    total_requests: u64,
    total_successes: u64,
    total_failures: u64,
    opened_at: Option<Instant>,
}

/// Circuit breaker for protecting against a failing dependency
#[derive(Debug)]
pub struct CircuitBreaker {
    /// Dependency name (for logging and metrics)
    name: String,
    config: CircuitBreakerConfig,
    inner: Mutex<BreakerState>,
}

impl CircuitBreaker {
    /// Create a new circuit breaker with default config
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, CircuitBreakerConfig::default())
    }

    /// Create a new circuit breaker with custom config
    pub fn with_config(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            name: name.into(),
            config,
            inner: Mutex::new(BreakerState::default()),
        }
    }

    /// Get the dependency name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    /// Current state as last recorded.
    ///
    /// An open circuit whose timeout has elapsed still reports `Open` until
    /// the next call moves it to half-open.
    pub fn state(&self) -> CircuitState {
        self.inner.lock().state
    }

    /// When the circuit last opened, if it is open or half-open
    pub fn opened_at(&self) -> Option<Instant> {
        self.inner.lock().opened_at
    }

    /// Whether a call made now would reach the dependency. Does not change state.
    pub fn is_call_permitted(&self) -> bool {
        let inner = self.inner.lock();
        let state = inner.state;
        match state {
            CircuitState::Closed | CircuitState::HalfOpen => true,
            CircuitState::Open => self.timeout_elapsed(&inner),
        }
    }

    /// Execute an operation with circuit breaker protection.
    ///
    /// When `fallback` is supplied it is returned in place of an error, both
    /// when the circuit rejects the call and when the operation fails. Its
    /// result never counts as a success.
    pub async fn execute<T, E, F, Fut, FB, FbFut>(
        &self,
        operation: F,
        fallback: Option<FB>,
    ) -> Result<T, CircuitBreakerError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        FB: FnOnce() -> FbFut,
        FbFut: Future<Output = Result<T, E>>,
    {
        if !self.acquire() {
            tracing::debug!(circuit = %self.name, "Call rejected, circuit is open");
            return match fallback {
                Some(fallback) => self.run_fallback(fallback).await,
                None => Err(CircuitBreakerError::Open {
                    name: self.name.clone(),
                }),
            };
        }

        match operation().await {
            Ok(result) => {
                self.record_success();
                Ok(result)
            }
            Err(e) => {
                self.record_failure();
                match fallback {
                    Some(fallback) => self.run_fallback(fallback).await,
                    None => Err(CircuitBreakerError::OperationFailed(e)),
                }
            }
        }
    }

    /// Execute an operation, surfacing every failure as an error
    pub async fn call<T, E, F, Fut>(&self, operation: F) -> Result<T, CircuitBreakerError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.execute(operation, None::<NoFallback<T, E>>).await
    }

    /// Execute an operation, answering from `fallback` when it cannot succeed
    pub async fn call_with_fallback<T, E, F, Fut, FB, FbFut>(
        &self,
        operation: F,
        fallback: FB,
    ) -> Result<T, CircuitBreakerError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        FB: FnOnce() -> FbFut,
        FbFut: Future<Output = Result<T, E>>,
    {
        self.execute(operation, Some(fallback)).await
    }

    /// Ask permission for a call.
    ///
    /// Moves an open circuit to half-open once its timeout has elapsed. Calls
    /// made outside [`execute`](Self::execute) pair this with
    /// [`record_success`](Self::record_success) or
    /// [`record_failure`](Self::record_failure).
    pub fn acquire(&self) -> bool {
        let mut inner = self.inner.lock();
        let state = inner.state;
        match state {
            CircuitState::Closed | CircuitState::HalfOpen => true,
            CircuitState::Open => {
                if self.timeout_elapsed(&inner) {
                    self.transition_to_half_open(&mut inner);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Record a successful operation
    pub fn record_success(&self) {
        let mut inner = self.inner.lock();
        inner.total_requests += 1;
        inner.total_successes += 1;

        let state = inner.state;
        match state {
            CircuitState::Closed => {
                inner.failures = 0;
                inner.successes += 1;
            }
            CircuitState::HalfOpen => {
                inner.successes += 1;
                if inner.successes >= self.config.success_threshold {
                    self.transition_to_closed(&mut inner);
                }
            }
            // Admitted before another call opened the circuit
            CircuitState::Open => {}
        }
    }

    /// Record a failed operation
    pub fn record_failure(&self) {
        let mut inner = self.inner.lock();
        inner.total_requests += 1;
        inner.total_failures += 1;
        inner.failures += 1;
        inner.successes = 0;

        let state = inner.state;
        match state {
            CircuitState::Closed => {
                if inner.failures >= self.config.failure_threshold {
                    self.transition_to_open(&mut inner);
                }
            }
            CircuitState::HalfOpen => {
                // Any failure in half-open state opens the circuit again
                self.transition_to_open(&mut inner);
            }
            CircuitState::Open => {}
        }
    }

    /// Get circuit breaker metrics
    pub fn metrics(&self) -> CircuitBreakerMetrics {
        let inner = self.inner.lock();
        CircuitBreakerMetrics {
            state: inner.state,
            failures: inner.failures,
            successes: inner.successes,
            total_requests: inner.total_requests,
            total_successes: inner.total_successes,
            total_failures: inner.total_failures,
        }
    }

    /// Return to a freshly constructed breaker, lifetime totals included
    pub fn reset(&self) {
        *self.inner.lock() = BreakerState::default();
        tracing::debug!(circuit = %self.name, "Circuit breaker has been reset");
    }

    /// Manually open the circuit breaker
    pub fn trip(&self) {
        let mut inner = self.inner.lock();
        self.transition_to_open(&mut inner);
    }

    async fn run_fallback<T, E, FB, FbFut>(&self, fallback: FB) -> Result<T, CircuitBreakerError<E>>
    where
        FB: FnOnce() -> FbFut,
        FbFut: Future<Output = Result<T, E>>,
    {
        tracing::debug!(circuit = %self.name, "Serving fallback");
        fallback().await.map_err(CircuitBreakerError::FallbackFailed)
    }

    fn timeout_elapsed(&self, inner: &BreakerState) -> bool {
        match inner.opened_at {
            Some(opened_at) => {
                Instant::now().saturating_duration_since(opened_at) >= self.config.timeout
            }
            None => true,
        }
    }

    fn transition_to_open(&self, inner: &mut BreakerState) {
        inner.state = CircuitState::Open;
        inner.opened_at = Some(Instant::now());
        inner.successes = 0;

        tracing::warn!(
            circuit = %self.name,
            "Circuit breaker opened after {} failures",
            inner.failures
        );
    }

    fn transition_to_half_open(&self, inner: &mut BreakerState) {
        inner.state = CircuitState::HalfOpen;
        inner.failures = 0;
        inner.successes = 0;

        tracing::info!(
            circuit = %self.name,
            "Circuit breaker transitioning to half-open"
        );
    }

    fn transition_to_closed(&self, inner: &mut BreakerState) {
        inner.state = CircuitState::Closed;
        inner.failures = 0;
        inner.successes = 0;
        inner.opened_at = None;

        tracing::info!(
            circuit = %self.name,
            "Circuit breaker closed"
        );
    }
}
