//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags (clap)
//!     → schema.rs (ServerConfig with defaults)
//!     → validation.rs (range checks)
//!     → ServerConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - No config files or environment variables are read
//! - All fields have defaults so tests can override one field at a time

pub mod schema;
pub mod validation;

pub use schema::{ListenerConfig, LoggingConfig, ServerConfig, StoreConfig};
pub use validation::{validate_config, ConfigError, ValidationError};
