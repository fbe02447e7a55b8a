//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validate config → Bind listener → Print banner → Serve
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     SIGINT/SIGTERM → broadcast → serve loop drops the listener
//! ```
//!
//! # Design Decisions
//! - Any startup error is fatal and nothing is served
//! - Shutdown does not wait for in-flight requests

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{start_server, StartupError};
