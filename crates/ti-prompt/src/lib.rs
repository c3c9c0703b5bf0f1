//! Console prompts built on bounded line reads.
//!
//! This crate layers the everyday prompt patterns on top of
//! [`ti_reader::BoundedLineReader`]:
//!
//! - Ask a question ([`Prompter::ask`])
//! - Fall back to a default on an empty answer ([`Prompter::ask_or_default`])
//! - Convert the answer to a number ([`Prompter::ask_parsed`])
//! - Yes/no confirmation ([`Prompter::confirm`])
//! - Pick from a numbered menu ([`Prompter::select`])
//!
//! Each prompt honours the timeout, retry, and trimming settings of a
//! [`PromptConfig`].
//!
//! # Usage
//!
//! ```no_run
//! use ti_core::PromptConfig;
//! use ti_prompt::{PromptError, Prompter};
//!
//! # fn main() -> Result<(), PromptError> {
//! let config = PromptConfig::default().with_timeout_ms(Some(10_000));
//! let mut prompter = Prompter::stdio(config);
//!
//! let name = prompter.ask_or_default("What is your name?", "stranger")?;
//! let age: u32 = prompter.ask_parsed("How old are you?")?;
//! let pet = prompter.select("Favourite pet?", &["cat", "dog", "axolotl"])?;
//!
//! if prompter.confirm("Save these answers?", Some(true))? {
//!     // ...
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! ```
//! use ti_prompt::PromptError;
//!
//! fn describe(err: &PromptError) -> &'static str {
//!     if err.is_timeout() {
//!         "too slow"
//!     } else if err.is_recoverable() {
//!         "try again"
//!     } else {
//!         "giving up"
//!     }
//! }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod parse;
pub mod prompter;

pub use error::PromptError;
pub use prompter::{Prompter, Selection};

pub use ti_core::PromptConfig;
