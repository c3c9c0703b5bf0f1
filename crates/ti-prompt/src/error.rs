//! Error types for the ti-prompt crate.
//!
//! This module provides the [`PromptError`] type for everything that can stop
//! a prompt from producing an answer.

use std::time::Duration;

/// Errors that can occur while prompting for input.
///
/// # Error Recovery Strategy
///
/// - **Timed out** ([`PromptError::TimedOut`]): Recoverable - ask again or use a default
/// - **End of input** ([`PromptError::EndOfInput`]): Fatal - nobody is left to answer
/// - **Too many attempts** ([`PromptError::TooManyAttempts`]): Recoverable - caller decides
/// - **Empty menu** ([`PromptError::EmptyMenu`]): Fatal - programming error
/// - **I/O errors** ([`PromptError::Io`]): Fatal - propagate immediately
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use ti_prompt::PromptError;
///
/// let err = PromptError::TimedOut { after: Duration::from_secs(5) };
/// assert!(err.is_timeout());
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PromptError {
    /// No answer arrived before the deadline.
    #[error("no answer within {}ms", .after.as_millis())]
    TimedOut {
        /// The deadline that elapsed.
        after: Duration,
    },

    /// Input was closed before an answer arrived.
    #[error("input closed before an answer was given")]
    EndOfInput,

    /// Every allowed attempt produced an invalid answer.
    #[error("no valid answer after {attempts} attempts (last: '{last_input}')")]
    TooManyAttempts {
        /// How many answers were rejected.
        attempts: u32,
        /// The last rejected answer.
        last_input: String,
    },

    /// A menu was shown with nothing to choose from.
    #[error("menu has no choices")]
    EmptyMenu,

    /// Reading the answer or writing the prompt failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PromptError {
    /// Creates a new [`PromptError::TooManyAttempts`] error.
    #[must_use]
    pub fn too_many_attempts(attempts: u32, last_input: impl Into<String>) -> Self {
        Self::TooManyAttempts {
            attempts,
            last_input: last_input.into(),
        }
    }

    /// Returns `true` if the prompt timed out.
    #[inline]
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }

    /// Returns `true` if asking again could succeed.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::TimedOut { .. } | Self::TooManyAttempts { .. })
    }
}
