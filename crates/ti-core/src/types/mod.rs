//! Domain types for bounded line reads.
//!
//! # Module Organization
//!
//! - [`request`] - Per-call read configuration
//! - [`outcome`] - The tagged result of a read
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use ti_core::{ReadOutcome, ReadRequest};
//! ```

mod outcome;
mod request;

pub use outcome::ReadOutcome;
pub use request::ReadRequest;
