//! Circuit breaker registry for managing one breaker per dependency

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::OnceCell;

use super::breaker::CircuitBreaker;
use super::types::{
    CircuitBreakerConfig, CircuitBreakerError, CircuitBreakerMetrics, CircuitBreakerOverrides,
};
use crate::config::CircuitBreakerSettings;
use crate::error::{TripwireError, TripwireResult};

static GLOBAL_REGISTRY: OnceCell<CircuitBreakerRegistry> = OnceCell::new();

/// Collection of circuit breakers keyed by dependency name.
///
/// Breakers are created on first access and live as long as the registry.
#[derive(Debug)]
pub struct CircuitBreakerRegistry {
    breakers: DashMap<String, Arc<CircuitBreaker>>,
    default_config: CircuitBreakerConfig,
    /// Per-dependency overrides applied when a breaker is first created
    overrides: HashMap<String, CircuitBreakerOverrides>,
}

impl CircuitBreakerRegistry {
    /// Create a new registry with default config
    pub fn new() -> Self {
        Self::with_config(CircuitBreakerConfig::default())
    }

    /// Create a registry with custom default config
    pub fn with_config(config: CircuitBreakerConfig) -> Self {
        Self {
            breakers: DashMap::new(),
            default_config: config,
            overrides: HashMap::new(),
        }
    }

    /// Create a registry from loaded settings
    pub fn from_settings(settings: &CircuitBreakerSettings) -> Self {
        Self {
            breakers: DashMap::new(),
            default_config: settings.defaults.clone(),
            overrides: settings
                .breakers
                .iter()
                .map(|(name, overrides)| (name.clone(), overrides.clone()))
                .collect(),
        }
    }

    pub fn default_config(&self) -> &CircuitBreakerConfig {
        &self.default_config
    }

    /// Config a breaker named `name` would be created with
    pub fn config_for(&self, name: &str) -> CircuitBreakerConfig {
        match self.overrides.get(name) {
            Some(overrides) => overrides.apply_to(&self.default_config),
            None => self.default_config.clone(),
        }
    }

    /// Get or create a circuit breaker for a dependency
    pub fn get(&self, name: &str) -> Arc<CircuitBreaker> {
        self.breakers
            .entry(name.to_string())
            .or_insert_with(|| {
                tracing::debug!(circuit = %name, "Registering circuit breaker");
                Arc::new(CircuitBreaker::with_config(name, self.config_for(name)))
            })
            .clone()
    }

    /// Get or create with overrides.
    ///
    /// The overrides only take effect when this call creates the breaker; an
    /// existing breaker is returned unchanged.
    pub fn get_with_config(
        &self,
        name: &str,
        overrides: CircuitBreakerOverrides,
    ) -> Arc<CircuitBreaker> {
        self.breakers
            .entry(name.to_string())
            .or_insert_with(|| {
                tracing::debug!(circuit = %name, "Registering circuit breaker");
                let config = overrides.apply_to(&self.config_for(name));
                Arc::new(CircuitBreaker::with_config(name, config))
            })
            .clone()
    }

    /// Run an operation through the breaker for `name`
    pub async fn execute<T, E, F, Fut, FB, FbFut>(
        &self,
        name: &str,
        operation: F,
        fallback: Option<FB>,
    ) -> Result<T, CircuitBreakerError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        FB: FnOnce() -> FbFut,
        FbFut: Future<Output = Result<T, E>>,
    {
        let breaker = self.get(name);
        breaker.execute(operation, fallback).await
    }

    /// Get all circuit breaker names
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.breakers.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.breakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breakers.is_empty()
    }

    /// Get metrics for all circuit breakers, keyed by name
    pub fn all_metrics(&self) -> BTreeMap<String, CircuitBreakerMetrics> {
        self.breakers
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().metrics()))
            .collect()
    }

    /// Reset all circuit breakers
    pub fn reset_all(&self) {
        for entry in self.breakers.iter() {
            entry.value().reset();
        }
    }
}

impl Default for CircuitBreakerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide registry, created with default config on first use
pub fn global() -> &'static CircuitBreakerRegistry {
    GLOBAL_REGISTRY.get_or_init(CircuitBreakerRegistry::new)
}

/// Install the process-wide registry.
///
/// Must run before anything calls [`global`]; afterwards the registry is fixed.
pub fn init_global(registry: CircuitBreakerRegistry) -> TripwireResult<()> {
    GLOBAL_REGISTRY
        .set(registry)
        .map_err(|_| TripwireError::config("global circuit breaker registry is already initialized"))
}
