//! Handy test server library.
//!
//! An in-memory message sink for tests: clients POST JSON or text, the
//! server normalizes each item into a `{id, text, ts, raw}` record kept in
//! a bounded ring buffer, and pollers GET them back with a timestamp cursor.

// Core subsystems
pub mod config;
pub mod http;
pub mod ingest;
pub mod net;
pub mod store;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::{Message, MessageStore};
