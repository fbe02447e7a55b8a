//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration
//! - Bind the listener (with port fallback)
//! - Tell the operator where the server ended up
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Banner lines go to stdout verbatim so scripts can scrape the port

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::{validate_config, ConfigError, ServerConfig};
use crate::net::{bind_with_fallback, BindError, BoundListener};

/// Errors that stop the server before it serves anything.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bind(#[from] BindError),
}

/// Validate `config`, bind a listener and print the startup banner.
pub async fn start_server(config: &ServerConfig) -> Result<BoundListener, StartupError> {
    validate_config(config)?;
    let bound = bind_with_fallback(&config.listener).await?;

    for line in banner(&bound, SocketAddr::new(config.listener.host, bound.port)) {
        println!("{line}");
    }
    tracing::info!(
        port = bound.port,
        requested = bound.requested,
        "Listener ready"
    );
    Ok(bound)
}

/// Operator-facing lines describing the bound address.
pub fn banner(bound: &BoundListener, addr: SocketAddr) -> Vec<String> {
    let mut lines = Vec::with_capacity(3);
    if bound.requested == 0 {
        lines.push(format!("Requested port 0. Using port {} instead.", bound.port));
    } else if bound.substituted() {
        lines.push(format!(
            "Requested port {} was busy. Using port {} instead.",
            bound.requested, bound.port
        ));
    }
    lines.push(format!("Handy test server listening on http://{addr}"));
    lines.push(format!(
        r#"POST http://{addr}/messages with {{"text":"hello"}} to queue a message."#
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_on_ephemeral_port() {
        let mut config = ServerConfig::default();
        config.listener.port = 0;

        let bound = start_server(&config).await.unwrap();
        let addr = SocketAddr::new(config.listener.host, bound.port);
        let lines = banner(&bound, addr);

        assert_eq!(
            lines[0],
            format!("Requested port 0. Using port {} instead.", bound.port)
        );
        assert_eq!(
            lines[1],
            format!("Handy test server listening on http://127.0.0.1:{}", bound.port)
        );
        assert!(lines[2].contains(r#"{"text":"hello"}"#));
    }

    #[tokio::test]
    async fn test_banner_reports_substitution() {
        let occupied = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let busy = occupied.local_addr().unwrap().port();

        let mut config = ServerConfig::default();
        config.listener.port = busy;
        config.listener.max_attempts = 5;

        let bound = start_server(&config).await.unwrap();
        let lines = banner(&bound, SocketAddr::new(config.listener.host, bound.port));
        assert_eq!(
            lines[0],
            format!("Requested port {busy} was busy. Using port {} instead.", bound.port)
        );
    }

    #[tokio::test]
    async fn test_invalid_config_is_fatal() {
        let mut config = ServerConfig::default();
        config.listener.max_attempts = 0;
        assert!(matches!(
            start_server(&config).await,
            Err(StartupError::Config(_))
        ));
    }
}
