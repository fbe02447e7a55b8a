//! TCP listener binding with port fallback.
//!
//! # Responsibilities
//! - Bind the configured host on the requested port
//! - Walk forward through the port range when a port is busy or blocked
//! - Report which port was actually chosen
//!
//! # Design Decisions
//! - Port 0 is a single attempt: the OS picks, it cannot be "busy"
//! - Busy and permission-denied ports are skipped; anything else is fatal

use std::io::ErrorKind;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Error type for listener binding.
#[derive(Debug, Error)]
pub enum BindError {
    /// A bind failed for a reason other than a busy or blocked port.
    #[error("failed to bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    /// Every port in the range was busy or blocked.
    #[error("Could not bind to a free port in range {start}..{end}.")]
    PortRangeExhausted { start: u16, end: u16 },

    /// Reading back the bound address failed.
    #[error("failed to read local address: {0}")]
    LocalAddr(#[source] std::io::Error),
}

/// A bound listener together with the port bookkeeping.
#[derive(Debug)]
pub struct BoundListener {
    pub listener: TcpListener,
    /// Port actually bound.
    pub port: u16,
    /// Port that was asked for.
    pub requested: u16,
}

impl BoundListener {
    /// Whether a different port than the requested one was used.
    pub fn substituted(&self) -> bool {
        self.port != self.requested
    }

    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.listener.local_addr()
    }
}

/// Bind according to `config`, falling forward through the port range.
pub async fn bind_with_fallback(config: &ListenerConfig) -> Result<BoundListener, BindError> {
    let requested = config.port;

    if requested == 0 {
        let listener = TcpListener::bind(SocketAddr::new(config.host, 0))
            .await
            .map_err(|source| BindError::Bind { port: 0, source })?;
        let port = listener.local_addr().map_err(BindError::LocalAddr)?.port();
        tracing::debug!(port, "Bound ephemeral port");
        return Ok(BoundListener {
            listener,
            port,
            requested,
        });
    }

    let attempts = config.max_attempts.max(1);
    let mut last = requested;

    for offset in 0..attempts {
        let Some(candidate) = u16::try_from(offset)
            .ok()
            .and_then(|offset| requested.checked_add(offset))
        else {
            break;
        };
        last = candidate;

        match TcpListener::bind(SocketAddr::new(config.host, candidate)).await {
            Ok(listener) => {
                tracing::debug!(port = candidate, attempt = offset + 1, "Listener bound");
                return Ok(BoundListener {
                    listener,
                    port: candidate,
                    requested,
                });
            }
            Err(e) if e.kind() == ErrorKind::AddrInUse => {
                tracing::warn!(port = candidate, "Port {candidate} is busy. Trying next port...");
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                tracing::warn!(
                    port = candidate,
                    "Port {candidate} is blocked or requires permission. Trying next port..."
                );
            }
            Err(source) => {
                return Err(BindError::Bind {
                    port: candidate,
                    source,
                })
            }
        }
    }

    Err(BindError::PortRangeExhausted {
        start: requested,
        end: last,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    fn loopback(port: u16, max_attempts: u32) -> ListenerConfig {
        ListenerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port,
            max_attempts,
        }
    }

    #[tokio::test]
    async fn test_ephemeral_port() {
        let bound = bind_with_fallback(&loopback(0, 1)).await.unwrap();
        assert_ne!(bound.port, 0);
        assert_eq!(bound.requested, 0);
        assert!(bound.substituted());
        assert_eq!(bound.local_addr().unwrap().port(), bound.port);
    }

    #[tokio::test]
    async fn test_busy_port_falls_through() {
        let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let busy = occupied.local_addr().unwrap().port();

        let bound = bind_with_fallback(&loopback(busy, 5)).await.unwrap();
        assert!(bound.port > busy && bound.port < busy + 5);
        assert_eq!(bound.requested, busy);
        assert!(bound.substituted());
    }

    #[tokio::test]
    async fn test_range_stops_at_top_port() {
        match bind_with_fallback(&loopback(65530, 20)).await {
            Ok(bound) => {
                assert!(bound.port >= 65530);
                assert_eq!(bound.requested, 65530);
            }
            Err(BindError::PortRangeExhausted { start, end }) => {
                assert_eq!(start, 65530);
                assert_eq!(end, u16::MAX);
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_exhausted_range_is_fatal() {
        let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let busy = occupied.local_addr().unwrap().port();

        let err = bind_with_fallback(&loopback(busy, 1)).await.unwrap_err();
        match err {
            BindError::PortRangeExhausted { start, end } => {
                assert_eq!(start, busy);
                assert_eq!(end, busy);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
