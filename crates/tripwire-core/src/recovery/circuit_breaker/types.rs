//! Circuit breaker types and configuration

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{TripwireError, TripwireResult};

/// Circuit breaker state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CircuitState {
    /// Circuit is closed, operations proceed normally
    #[default]
    Closed,
    /// Circuit is open, operations are rejected
    Open,
    /// Circuit is half-open, calls probe whether the dependency recovered
    HalfOpen,
}

impl CircuitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
            Self::HalfOpen => "half-open",
        }
    }
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for circuit breaker behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures in the closed state before opening the circuit
    pub failure_threshold: u32,
    /// How long the circuit stays open before a call may probe the dependency
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Consecutive successes needed in half-open state to close
    pub success_threshold: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            timeout: Duration::from_secs(60),
            success_threshold: 2,
        }
    }
}

impl CircuitBreakerConfig {
    /// Create a config for aggressive circuit breaking
    pub fn aggressive() -> Self {
        Self {
            failure_threshold: 3,
            timeout: Duration::from_secs(15),
            success_threshold: 2,
        }
    }

    /// Create a config for lenient circuit breaking
    pub fn lenient() -> Self {
        Self {
            failure_threshold: 10,
            timeout: Duration::from_secs(120),
            success_threshold: 5,
        }
    }

    /// Check that the thresholds and timeout can drive the state machine
    pub fn validate(&self) -> TripwireResult<()> {
        if self.failure_threshold == 0 {
            return Err(TripwireError::invalid_input_field(
                "failure_threshold must be at least 1",
                "failure_threshold",
            ));
        }
        if self.success_threshold == 0 {
            return Err(TripwireError::invalid_input_field(
                "success_threshold must be at least 1",
                "success_threshold",
            ));
        }
        if self.timeout.is_zero() {
            return Err(TripwireError::invalid_input_field(
                "timeout must be greater than zero",
                "timeout",
            ));
        }
        Ok(())
    }
}

/// Partial circuit breaker configuration.
///
/// Unset fields fall back to whatever base configuration the overrides are
/// applied to, usually the registry default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitBreakerOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_threshold: Option<u32>,
    #[serde(
        with = "humantime_serde",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_threshold: Option<u32>,
}

impl CircuitBreakerOverrides {
    pub fn failure_threshold(mut self, threshold: u32) -> Self {
        self.failure_threshold = Some(threshold);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn success_threshold(mut self, threshold: u32) -> Self {
        self.success_threshold = Some(threshold);
        self
    }

    /// Produce a full config from `base` with every set field replaced
    pub fn apply_to(&self, base: &CircuitBreakerConfig) -> CircuitBreakerConfig {
        CircuitBreakerConfig {
            failure_threshold: self.failure_threshold.unwrap_or(base.failure_threshold),
            timeout: self.timeout.unwrap_or(base.timeout),
            success_threshold: self.success_threshold.unwrap_or(base.success_threshold),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.failure_threshold.is_none() && self.timeout.is_none() && self.success_threshold.is_none()
    }
}

/// Error from circuit breaker operations
#[derive(Debug, Error, PartialEq)]
pub enum CircuitBreakerError<E> {
    /// Circuit is open and no fallback was supplied
    #[error("Circuit breaker open for dependency: {name}")]
    Open { name: String },
    /// The guarded operation failed and no fallback was supplied
    #[error("Operation failed: {0}")]
    OperationFailed(E),
    /// The fallback itself failed
    #[error("Fallback failed: {0}")]
    FallbackFailed(E),
}

impl<E> CircuitBreakerError<E> {
    /// True when the call was short-circuited without reaching the dependency
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// The error produced by the operation or fallback, if there was one
    pub fn into_inner(self) -> Option<E> {
        match self {
            Self::Open { .. } => None,
            Self::OperationFailed(e) | Self::FallbackFailed(e) => Some(e),
        }
    }
}

/// Point-in-time counters of a circuit breaker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitBreakerMetrics {
    pub state: CircuitState,
    pub failures: u32,
    pub successes: u32,
    pub total_requests: u64,
    pub total_successes: u64,
    pub total_failures: u64,
}

impl CircuitBreakerMetrics {
    /// Calculate failure rate as a percentage
    pub fn failure_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            (self.total_failures as f64 / self.total_requests as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&CircuitState::HalfOpen).unwrap(),
            "\"half-open\""
        );
        assert_eq!(CircuitState::Open.to_string(), "open");
    }

    #[test]
    fn test_config_validation() {
        assert!(CircuitBreakerConfig::default().validate().is_ok());
        assert!(CircuitBreakerConfig::aggressive().validate().is_ok());

        let zero_failures = CircuitBreakerConfig {
            failure_threshold: 0,
            ..Default::default()
        };
        assert!(zero_failures.validate().is_err());

        let zero_timeout = CircuitBreakerConfig {
            timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn test_overrides_apply_only_set_fields() {
        let base = CircuitBreakerConfig::default();
        let merged = CircuitBreakerOverrides::default()
            .failure_threshold(3)
            .apply_to(&base);

        assert_eq!(merged.failure_threshold, 3);
        assert_eq!(merged.timeout, base.timeout);
        assert_eq!(merged.success_threshold, base.success_threshold);
        assert!(CircuitBreakerOverrides::default().is_empty());
    }

    #[test]
    fn test_config_deserializes_humantime() {
        let config: CircuitBreakerConfig =
            toml::from_str("failure_threshold = 3\ntimeout = \"1500ms\"").unwrap();
        assert_eq!(config.failure_threshold, 3);
        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert_eq!(config.success_threshold, 2);
    }

    #[test]
    fn test_error_helpers() {
        let open: CircuitBreakerError<&str> = CircuitBreakerError::Open {
            name: "payments".into(),
        };
        assert!(open.is_open());
        assert_eq!(open.to_string(), "Circuit breaker open for dependency: payments");
        assert_eq!(open.into_inner(), None);

        let failed = CircuitBreakerError::OperationFailed("boom");
        assert!(!failed.is_open());
        assert_eq!(failed.into_inner(), Some("boom"));
    }

    #[test]
    fn test_failure_rate() {
        let metrics = CircuitBreakerMetrics {
            state: CircuitState::Closed,
            failures: 0,
            successes: 0,
            total_requests: 4,
            total_successes: 3,
            total_failures: 1,
        };
        assert!((metrics.failure_rate() - 25.0).abs() < f64::EPSILON);
    }
}
