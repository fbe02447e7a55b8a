//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig (host, port, max_attempts)
//!     → listener.rs (bind, skip busy / blocked ports)
//!     → BoundListener handed to the HTTP server
//! ```

pub mod listener;

pub use listener::{bind_with_fallback, BindError, BoundListener};
