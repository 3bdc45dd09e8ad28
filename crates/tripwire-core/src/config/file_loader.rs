//! File-based configuration loading

use super::model::TripwireConfig;
use crate::error::{TripwireError, TripwireResult};
use std::fs;
use std::path::Path;

/// Load configuration from a file
///
/// Supports TOML, YAML and JSON based on file extension; anything else is
/// read as TOML. Returns the default config if the file doesn't exist.
pub fn load_from_file(path: &Path) -> TripwireResult<TripwireConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        return Ok(TripwireConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        TripwireError::io_with_path(
            format!("Failed to read config file: {}", e),
            path.display().to_string(),
        )
    })?;

    let config = match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| {
            TripwireError::config_with_context(
                format!("Failed to parse YAML config: {}", e),
                format!("Deserializing YAML configuration from '{}'", path.display()),
            )
        })?,
        Some("json") => serde_json::from_str(&content).map_err(|e| {
            TripwireError::config_with_context(
                format!("Failed to parse JSON config: {}", e),
                format!("Deserializing JSON configuration from '{}'", path.display()),
            )
        })?,
        _ => toml::from_str(&content).map_err(|e| {
            TripwireError::config_with_context(
                format!("Failed to parse TOML config: {}", e),
                format!("Deserializing TOML configuration from '{}'", path.display()),
            )
        })?,
    };

    Ok(config)
}
