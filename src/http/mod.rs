//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → headers.rs (lowercase path)
//!     → server.rs (Axum router, trace layer)
//!     → handlers.rs (health / list / ingest / fallback)
//!     → response.rs (JSON body, no-store, length)
//!     → headers.rs (CORS headers on the way out)
//! ```

pub mod handlers;
pub mod headers;
pub mod response;
pub mod server;

pub use server::{app, router, AppState, HttpServer, ServerError};
