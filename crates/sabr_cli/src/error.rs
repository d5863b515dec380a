//! Error types for the command line.

use sabr_core::types::{PricingError, SolverError};
use sabr_models::models::SabrError;
use thiserror::Error;

/// Result alias used throughout the CLI.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by `sabr` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or holds invalid values
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model construction, pricing or calibration failed
    #[error("Model error: {0}")]
    Model(#[from] SabrError),

    /// Command line argument rejected after parsing
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON output could not be produced
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML output could not be produced
    #[error("TOML output error: {0}")]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<SolverError> for CliError {
    fn from(err: SolverError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<PricingError> for CliError {
    fn from(err: PricingError) -> Self {
        Self::Model(SabrError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::config("texp must be finite");
        assert_eq!(err.to_string(), "Configuration error: texp must be finite");

        let err = CliError::invalid_argument("no strikes");
        assert!(err.to_string().contains("no strikes"));
    }

    #[test]
    fn test_solver_error_is_config_error() {
        let err: CliError = SolverError::InvalidBracket { a: 5.0, b: 1.0 }.into();
        match err {
            CliError::Config(msg) => assert!(msg.contains("[5, 1]")),
            other => panic!("Expected Config, got {:?}", other),
        }
    }

    #[test]
    fn test_sabr_error_wraps() {
        let err: CliError = SabrError::ShapeMismatch {
            strikes: 3,
            forwards: 2,
        }
        .into();
        assert!(matches!(err, CliError::Model(_)));
    }
}
