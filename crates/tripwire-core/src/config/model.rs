//! Configuration data model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::logging_config::LoggingConfig;
use crate::recovery::circuit_breaker::{CircuitBreakerConfig, CircuitBreakerOverrides};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripwireConfig {
    pub logging: LoggingConfig,
    pub circuit_breakers: CircuitBreakerSettings,
}

/// Registry defaults plus per-dependency overrides
///
/// ```toml
/// [circuit_breakers.defaults]
/// failure_threshold = 5
/// timeout = "30s"
///
/// [circuit_breakers.breakers.payments]
/// failure_threshold = 3
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitBreakerSettings {
    pub defaults: CircuitBreakerConfig,
    pub breakers: BTreeMap<String, CircuitBreakerOverrides>,
}

impl CircuitBreakerSettings {
    /// Effective config for a named dependency
    pub fn config_for(&self, name: &str) -> CircuitBreakerConfig {
        match self.breakers.get(name) {
            Some(overrides) => overrides.apply_to(&self.defaults),
            None => self.defaults.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_settings_config_for() {
        let mut settings = CircuitBreakerSettings::default();
        settings.breakers.insert(
            "payments".to_string(),
            CircuitBreakerOverrides::default().timeout(Duration::from_secs(5)),
        );

        assert_eq!(settings.config_for("payments").timeout, Duration::from_secs(5));
        assert_eq!(settings.config_for("search"), CircuitBreakerConfig::default());
    }

    #[test]
    fn test_parse_toml_sections() {
        let config: TripwireConfig = toml::from_str(
            r#"
            [logging]
            level = "debug"

            [circuit_breakers.defaults]
            failure_threshold = 4
            timeout = "2s"

            [circuit_breakers.breakers.payments]
            success_threshold = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.circuit_breakers.defaults.failure_threshold, 4);
        assert_eq!(config.circuit_breakers.defaults.success_threshold, 2);

        let payments = config.circuit_breakers.config_for("payments");
        assert_eq!(payments.failure_threshold, 4);
        assert_eq!(payments.timeout, Duration::from_secs(2));
        assert_eq!(payments.success_threshold, 3);
    }
}
