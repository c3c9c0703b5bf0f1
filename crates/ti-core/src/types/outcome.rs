//! Read outcome types.
//!
//! This module provides the [`ReadOutcome`] enum, the single result produced
//! by every bounded line read.

use std::fmt;
use std::io;

/// The result of a single bounded line read.
///
/// Exactly one variant is produced per read. The three non-line variants are
/// kept apart so callers can tell a closed stream from a deadline from a
/// failure.
///
/// # Examples
///
/// ```
/// use ti_core::ReadOutcome;
///
/// let outcome = ReadOutcome::Line("hello".to_owned());
/// assert!(outcome.is_line());
/// assert_eq!(outcome.as_line(), Some("hello"));
///
/// assert!(ReadOutcome::TimedOut.is_timed_out());
/// assert_eq!(ReadOutcome::EndOfInput.into_line(), None);
/// ```
#[derive(Debug)]
pub enum ReadOutcome {
    /// A line was read; the trailing line terminator has been removed.
    Line(String),

    /// The source was closed before a line arrived.
    EndOfInput,

    /// The deadline elapsed before a line arrived.
    TimedOut,

    /// The read failed for a reason other than clean closure.
    ReadError(io::Error),
}

impl ReadOutcome {
    /// Returns `true` if a line was read.
    #[inline]
    #[must_use]
    pub const fn is_line(&self) -> bool {
        matches!(self, Self::Line(_))
    }

    /// Returns `true` if the source was closed.
    #[inline]
    #[must_use]
    pub const fn is_end_of_input(&self) -> bool {
        matches!(self, Self::EndOfInput)
    }

    /// Returns `true` if the deadline elapsed first.
    #[inline]
    #[must_use]
    pub const fn is_timed_out(&self) -> bool {
        matches!(self, Self::TimedOut)
    }

    /// Returns `true` if the read failed.
    #[inline]
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::ReadError(_))
    }

    /// Returns the line text if this is a [`Line`](Self::Line).
    #[inline]
    #[must_use]
    pub fn as_line(&self) -> Option<&str> {
        match self {
            Self::Line(text) => Some(text),
            Self::EndOfInput | Self::TimedOut | Self::ReadError(_) => None,
        }
    }

    /// Consumes the outcome and returns the line text, if any.
    #[must_use]
    pub fn into_line(self) -> Option<String> {
        match self {
            Self::Line(text) => Some(text),
            Self::EndOfInput | Self::TimedOut | Self::ReadError(_) => None,
        }
    }

    /// Returns a short, stable label for logging.
    ///
    /// # Examples
    ///
    /// ```
    /// use ti_core::ReadOutcome;
    ///
    /// assert_eq!(ReadOutcome::TimedOut.label(), "timed_out");
    /// assert_eq!(ReadOutcome::EndOfInput.label(), "end_of_input");
    /// ```
    #[inline]
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Line(_) => "line",
            Self::EndOfInput => "end_of_input",
            Self::TimedOut => "timed_out",
            Self::ReadError(_) => "read_error",
        }
    }
}

impl fmt::Display for ReadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line(text) => write!(f, "line ({} bytes)", text.len()),
            Self::EndOfInput => f.write_str("end of input"),
            Self::TimedOut => f.write_str("timed out"),
            Self::ReadError(err) => write!(f, "read error: {err}"),
        }
    }
}
