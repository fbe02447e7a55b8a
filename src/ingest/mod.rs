//! Payload normalization subsystem.
//!
//! # Data Flow
//! ```text
//! POST body (bytes, lossy UTF-8)
//!     → payload.rs (parse JSON, tolerate garbage)
//!     → normalizer.rs (split into items, pick text / id / ts)
//!     → Vec<Draft> handed to the store
//! ```
//!
//! # Design Decisions
//! - Invalid JSON is never an error; the body becomes a plain-text item
//! - Field lookup is ordered: the first truthy candidate key wins

pub mod normalizer;
pub mod payload;

pub use normalizer::{extract_items, normalize, normalize_item};
pub use payload::{parse_body, Payload};
