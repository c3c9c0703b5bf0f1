//! Core types, configuration, and errors for timed-input.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - [`ReadRequest`] and [`ReadOutcome`], the input and result of a single
//!   bounded line read
//! - Configuration structures ([`Config`], [`PromptConfig`])
//! - Error types for configuration loading ([`ConfigError`])

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, PromptConfig};
pub use error::ConfigError;
pub use types::{ReadOutcome, ReadRequest};
