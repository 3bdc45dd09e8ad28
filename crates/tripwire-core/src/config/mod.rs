//! Configuration management for Tripwire
//!
//! Configuration is layered: file (TOML, YAML or JSON), then `TRIPWIRE_*`
//! environment variables, then validation.

mod env_loader;
mod file_loader;
mod logging_config;
mod model;
mod validation;

pub use env_loader::apply_env_overrides;
pub use file_loader::load_from_file;
pub use logging_config::{LogFormat, LoggingConfig};
pub use model::{CircuitBreakerSettings, TripwireConfig};
pub use validation::ConfigValidator;

use crate::error::TripwireResult;
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "tripwire.toml";

/// Load configuration from a file, apply environment overrides and validate
pub fn load_config(path: impl AsRef<Path>) -> TripwireResult<TripwireConfig> {
    let path = path.as_ref();
    let mut config = load_from_file(path)?;
    apply_env_overrides(&mut config)?;
    ConfigValidator::validate(&config)?;

    tracing::debug!(
        path = %path.display(),
        breakers = config.circuit_breakers.breakers.len(),
        "Loaded configuration"
    );
    Ok(config)
}
