//! Configuration validation.
//!
//! Serde handles syntax; this checks value ranges. All problems are
//! reported at once rather than stopping at the first.

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("max_attempts must be at least 1")]
    NoAttempts,

    #[error("store capacity must be at least 1")]
    ZeroCapacity,

    #[error("invalid log filter {filter:?}: {reason}")]
    LogFilter { filter: String, reason: String },
}

/// Error returned when a configuration is rejected.
#[derive(Debug, Error)]
#[error("invalid configuration: {}", list(.0))]
pub struct ConfigError(pub Vec<ValidationError>);

fn list(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check a configuration, returning every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if config.listener.max_attempts == 0 {
        errors.push(ValidationError::NoAttempts);
    }

    if config.store.capacity == 0 {
        errors.push(ValidationError::ZeroCapacity);
    }

    if let Err(e) = tracing_subscriber::EnvFilter::try_new(&config.logging.filter) {
        errors.push(ValidationError::LogFilter {
            filter: config.logging.filter.clone(),
            reason: e.to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError(errors))
    }
}
