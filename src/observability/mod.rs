//! Observability subsystem.
//!
//! All subsystems emit `tracing` events; `logging.rs` decides where they
//! go. Request spans come from tower-http's `TraceLayer`.

pub mod logging;

pub use logging::init_logging;
