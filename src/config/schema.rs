//! Configuration schema definitions.
//!
//! All types derive Serde traits and carry defaults, so a config can be
//! assembled from CLI flags and overridden piecemeal in tests.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

use crate::store::MAX_MESSAGES;

/// Root configuration for the test server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket binding and port fallback.
    pub listener: ListenerConfig,

    /// Message buffer settings.
    pub store: StoreConfig,

    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind. Loopback unless told otherwise.
    pub host: IpAddr,

    /// First port to try. `0` asks the OS for an ephemeral port.
    pub port: u16,

    /// How many consecutive ports to try before giving up.
    pub max_attempts: u32,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 55155,
            max_attempts: 20,
        }
    }
}

/// Message buffer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Messages retained before the oldest are evicted.
    pub capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: MAX_MESSAGES,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive string.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "handy_test_server=info".to_string(),
        }
    }
}
