//! Configuration validation

use super::model::TripwireConfig;
use crate::error::{TripwireError, TripwireResult};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration
    pub fn validate(config: &TripwireConfig) -> TripwireResult<()> {
        Self::validate_logging(config)?;
        Self::validate_breakers(config)?;
        Ok(())
    }

    fn validate_logging(config: &TripwireConfig) -> TripwireResult<()> {
        let level = config.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(TripwireError::config(format!(
                "Unknown log level '{}'. Valid levels are: {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    fn validate_breakers(config: &TripwireConfig) -> TripwireResult<()> {
        let settings = &config.circuit_breakers;

        settings.defaults.validate().map_err(|e| {
            TripwireError::config_with_context(e.to_string(), "circuit_breakers.defaults")
        })?;

        for name in settings.breakers.keys() {
            if name.trim().is_empty() {
                return Err(TripwireError::config(
                    "Circuit breaker names must not be empty",
                ));
            }
            settings.config_for(name).validate().map_err(|e| {
                TripwireError::config_with_context(
                    e.to_string(),
                    format!("circuit_breakers.breakers.{}", name),
                )
            })?;
        }

        Ok(())
    }
}
