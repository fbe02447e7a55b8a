//! Message storage subsystem.
//!
//! # Data Flow
//! ```text
//! Draft (from ingest)
//!     → message.rs (fill id / ts defaults, coerce text)
//!     → ring.rs (append, evict oldest past capacity)
//!     → query(since) → Page { messages, next_cursor }
//! ```
//!
//! # Design Decisions
//! - One coarse mutex around the whole buffer
//! - Receipt order is the only order; timestamps are client data
//! - Nothing is persisted

pub mod message;
pub mod ring;

pub use message::{Draft, Message};
pub use ring::{MessageStore, Page, MAX_MESSAGES};
