//! Environment variable overrides
//!
//! | Variable                     | Field                                   |
//! |------------------------------|-----------------------------------------|
//! | `TRIPWIRE_FAILURE_THRESHOLD` | `circuit_breakers.defaults.failure_threshold` |
//! | `TRIPWIRE_SUCCESS_THRESHOLD` | `circuit_breakers.defaults.success_threshold` |
//! | `TRIPWIRE_TIMEOUT_MS`        | `circuit_breakers.defaults.timeout`     |
//! | `TRIPWIRE_LOG_LEVEL`         | `logging.level`                         |
//! | `TRIPWIRE_LOG_FORMAT`        | `logging.format`                        |

use std::env;
use std::str::FromStr;
use std::time::Duration;

use super::model::TripwireConfig;
use crate::error::{TripwireError, TripwireResult};

/// Apply `TRIPWIRE_*` environment variables on top of `config`
pub fn apply_env_overrides(config: &mut TripwireConfig) -> TripwireResult<()> {
    apply_overrides_from(config, |key| env::var(key).ok())
}

pub(crate) fn apply_overrides_from<F>(config: &mut TripwireConfig, lookup: F) -> TripwireResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = &mut config.circuit_breakers.defaults;

    if let Some(value) = lookup("TRIPWIRE_FAILURE_THRESHOLD") {
        defaults.failure_threshold = parse_var("TRIPWIRE_FAILURE_THRESHOLD", &value)?;
    }
    if let Some(value) = lookup("TRIPWIRE_SUCCESS_THRESHOLD") {
        defaults.success_threshold = parse_var("TRIPWIRE_SUCCESS_THRESHOLD", &value)?;
    }
    if let Some(value) = lookup("TRIPWIRE_TIMEOUT_MS") {
        defaults.timeout = Duration::from_millis(parse_var("TRIPWIRE_TIMEOUT_MS", &value)?);
    }

    if let Some(level) = lookup("TRIPWIRE_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(format) = lookup("TRIPWIRE_LOG_FORMAT") {
        config.logging.format = format.parse()?;
    }

    Ok(())
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> TripwireResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| TripwireError::config(format!("Invalid {} value: '{}'", key, value)))
}
