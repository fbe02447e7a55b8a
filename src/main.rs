//! Handy test server
//!
//! ```text
//!     POST /messages ──▶ ingest ──▶ store (ring buffer, last N)
//!     GET  /messages ◀── query(since) ◀──┘
//! ```

use clap::Parser;
use std::net::IpAddr;
use std::process::ExitCode;

use handy_test_server::config::{ListenerConfig, LoggingConfig, ServerConfig, StoreConfig};
use handy_test_server::lifecycle::start_server;
use handy_test_server::observability::init_logging;
use handy_test_server::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "handy-test-server")]
#[command(about = "In-memory message sink for tests", long_about = None)]
struct Cli {
    /// First port to try; 0 lets the OS choose
    #[arg(long, default_value_t = 55155)]
    port: u16,

    /// Number of consecutive ports to try
    #[arg(long, default_value_t = 20)]
    max_attempts: u32,

    /// Interface to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Log filter directive
    #[arg(long, default_value = "handy_test_server=info")]
    log_filter: String,
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        ServerConfig {
            listener: ListenerConfig {
                host: cli.host,
                port: cli.port,
                max_attempts: cli.max_attempts,
            },
            store: StoreConfig::default(),
            logging: LoggingConfig {
                filter: cli.log_filter,
            },
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::from(Cli::parse());
    init_logging(&config.logging);

    tracing::info!(
        host = %config.listener.host,
        port = config.listener.port,
        max_attempts = config.listener.max_attempts,
        capacity = config.store.capacity,
        "Configuration loaded"
    );

    let bound = match start_server(&config).await {
        Ok(bound) => bound,
        Err(e) => {
            println!("Failed to start server: {e}");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    let server = HttpServer::from_config(&config);
    if let Err(e) = server.run(bound.listener, server_shutdown).await {
        println!("Server error: {e}");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
