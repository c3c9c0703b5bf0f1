//! Read request types.
//!
//! This module provides the [`ReadRequest`] type describing a single bounded
//! line read.

use std::time::Duration;

/// Configuration for a single bounded line read.
///
/// A request is created when a read starts and consumed immediately; it is
/// never stored. A zero deadline means the request has already expired and
/// the read returns [`ReadOutcome::TimedOut`](crate::ReadOutcome::TimedOut)
/// without touching the input source.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use ti_core::ReadRequest;
///
/// let request = ReadRequest::from_millis(250);
/// assert_eq!(request.deadline(), Duration::from_millis(250));
/// assert!(!request.is_expired());
///
/// // Negative durations clamp to zero and are already expired
/// assert!(ReadRequest::from_secs_f64(-1.0).is_expired());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReadRequest {
    deadline: Duration,
}

impl ReadRequest {
    /// Creates a request that waits at most `deadline` for a line.
    #[inline]
    #[must_use]
    pub const fn new(deadline: Duration) -> Self {
        Self { deadline }
    }

    /// Creates a request with a deadline in milliseconds.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Creates a request from a signed number of seconds.
    ///
    /// Zero, negative, and NaN values produce an expired request. Values too
    /// large for a [`Duration`] saturate to [`Duration::MAX`].
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use ti_core::ReadRequest;
    ///
    /// assert_eq!(ReadRequest::from_secs_f64(1.5).deadline(), Duration::from_millis(1500));
    /// assert!(ReadRequest::from_secs_f64(0.0).is_expired());
    /// assert!(ReadRequest::from_secs_f64(f64::NAN).is_expired());
    /// ```
    #[must_use]
    pub fn from_secs_f64(secs: f64) -> Self {
        if secs.is_nan() || secs <= 0.0 {
            return Self::new(Duration::ZERO);
        }
        Self::new(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
    }

    /// Returns the maximum time to wait for a line.
    #[inline]
    #[must_use]
    pub const fn deadline(self) -> Duration {
        self.deadline
    }

    /// Returns `true` if the deadline has already passed.
    ///
    /// An expired request must not consume any input.
    #[inline]
    #[must_use]
    pub const fn is_expired(self) -> bool {
        self.deadline.is_zero()
    }
}

impl From<Duration> for ReadRequest {
    #[inline]
    fn from(deadline: Duration) -> Self {
        Self::new(deadline)
    }
}
