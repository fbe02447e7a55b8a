//! Structured logging.
//!
//! # Design Decisions
//! - Uses the tracing crate; events are rendered in the human-readable
//!   fmt format on stdout, next to the startup banner
//! - The filter comes from configuration, not from the environment

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(&config.filter)
        .unwrap_or_else(|_| EnvFilter::new(LoggingConfig::default().filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stdout),
        )
        .try_init();
}
