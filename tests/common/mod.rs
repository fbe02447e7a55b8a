//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use handy_test_server::config::ServerConfig;
use handy_test_server::lifecycle::start_server;
use handy_test_server::{HttpServer, Shutdown};

/// A server running on an ephemeral loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a server with a store holding at most `capacity` messages.
pub async fn spawn_server(capacity: usize) -> TestServer {
    let mut config = ServerConfig::default();
    config.listener.port = 0;
    config.store.capacity = capacity;

    let bound = start_server(&config).await.unwrap();
    let addr = bound.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::from_config(&config);

    let handle = tokio::spawn(async move {
        let _ = server.run(bound.listener, server_shutdown).await;
    });

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

/// A client that never pools connections, so shutdown tests are not
/// fooled by a kept-alive socket.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
