//! Core error type for Tripwire

use thiserror::Error;

/// Result type alias for Tripwire operations
pub type TripwireResult<T> = Result<T, TripwireError>;

/// Main error type for Tripwire
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TripwireError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
    },
}

impl TripwireError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "TRIPWIRE_CONFIG",
            Self::Io { .. } => "TRIPWIRE_IO",
            Self::InvalidInput { .. } => "TRIPWIRE_INVALID_INPUT",
        }
    }

    /// Additional context attached to the error, if any
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. } => context.as_deref(),
            Self::Io { path, .. } => path.as_deref(),
            Self::InvalidInput { field, .. } => field.as_deref(),
        }
    }
}

impl From<std::io::Error> for TripwireError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}
