//! Bounded-wait line reading.
//!
//! This module provides [`BoundedLineReader`], which reads one line from a
//! blocking [`LineSource`] on a dedicated worker thread and races the read
//! against a deadline.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                  Worker Thread (one per read)                    │
//! │  ┌──────────────────┐    ┌──────────────────┐                    │
//! │  │ source.lock()    │ -> │ read_line()      │ -> ReadOutcome     │
//! │  └──────────────────┘    └──────────────────┘        │           │
//! └──────────────────────────────────────────────────────│───────────┘
//!                                                        │ send (1 slot)
//!                                                        ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         Caller                                   │
//! │   recv_timeout(deadline)  /  select! { rx, sleep(deadline) }     │
//! │        │                                  │                      │
//! │    worker won: Line/EndOfInput/Error   timer won: TimedOut       │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! When the timer wins, the worker is orphaned and its caller marks it
//! abandoned. An orphan already reading keeps its lock on the source until the
//! read completes, then sends into a channel whose receiver is gone and exits.
//! Its line is discarded. An orphan still waiting for the lock sees the mark
//! once it gets the lock and exits without reading.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;

use parking_lot::Mutex;
use ti_core::{ReadOutcome, ReadRequest};
use tokio::sync::oneshot;

use crate::source::{LineSource, strip_line_terminator};

/// Name given to worker threads, visible in debuggers and panic messages.
const WORKER_THREAD_NAME: &str = "ti-line-reader";

/// Reads single lines from a shared source with a deadline.
///
/// The reader is a cheap handle: cloning it shares the same source. Each
/// read spawns exactly one worker thread, which locks the source for the
/// duration of a single line read. Reads on one source are therefore
/// serialized, and a read issued after a timeout waits behind the orphaned
/// worker before reading the next line.
///
/// Callers must still issue reads on one source sequentially. Concurrent
/// outstanding reads are not arbitrated.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use std::time::Duration;
/// use ti_core::ReadOutcome;
/// use ti_reader::BoundedLineReader;
///
/// let reader = BoundedLineReader::new(Cursor::new("a\nb\n"));
///
/// let first = reader.read_line(Duration::from_secs(1));
/// assert_eq!(first.as_line(), Some("a"));
///
/// let second = reader.read_line(Duration::from_secs(1));
/// assert_eq!(second.as_line(), Some("b"));
///
/// assert!(reader.read_line(Duration::from_secs(1)).is_end_of_input());
/// ```
pub struct BoundedLineReader<S> {
    source: Arc<Mutex<S>>,
}

impl<S> Clone for BoundedLineReader<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S> std::fmt::Debug for BoundedLineReader<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedLineReader")
            .field("busy", &self.source.is_locked())
            .finish_non_exhaustive()
    }
}

impl<S: LineSource> BoundedLineReader<S> {
    /// Creates a reader over `source`.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(Mutex::new(source)),
        }
    }

    /// Reads one line, giving up once the deadline elapses.
    ///
    /// Blocks the calling thread for at most the request's deadline. An
    /// expired request (zero deadline) returns [`ReadOutcome::TimedOut`]
    /// without spawning a worker or touching the source.
    ///
    /// On timeout the worker is left running. If it was already reading, the
    /// line it reads is dropped and never seen by this or any later call. If
    /// it was still queued behind another read, it exits without reading.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use std::time::Duration;
    /// use ti_reader::BoundedLineReader;
    ///
    /// let reader = BoundedLineReader::new(Cursor::new("hello\n"));
    ///
    /// // Nothing is consumed by an expired request
    /// assert!(reader.read_line(Duration::ZERO).is_timed_out());
    /// assert_eq!(reader.read_line(Duration::from_secs(1)).as_line(), Some("hello"));
    /// ```
    pub fn read_line(&self, request: impl Into<ReadRequest>) -> ReadOutcome {
        let request = request.into();
        if request.is_expired() {
            return ReadOutcome::TimedOut;
        }

        // One slot: the worker's single send never blocks, even after the
        // receiver has been dropped.
        let (tx, rx) = mpsc::sync_channel(1);
        let abandoned = Arc::new(AtomicBool::new(false));
        let worker_abandoned = Arc::clone(&abandoned);
        if let Err(err) = self.spawn_worker(move |source| {
            if let Some(outcome) =
                read_unless_abandoned(source, || worker_abandoned.load(Ordering::Acquire))
            {
                let _ = tx.send(outcome);
            }
        }) {
            return ReadOutcome::ReadError(err);
        }

        match rx.recv_timeout(request.deadline()) {
            Ok(outcome) => outcome,
            Err(RecvTimeoutError::Timeout) => {
                abandoned.store(true, Ordering::Release);
                ReadOutcome::TimedOut
            }
            Err(RecvTimeoutError::Disconnected) => ReadOutcome::ReadError(worker_lost()),
        }
    }

    /// Reads one line, suspending the current task until the deadline.
    ///
    /// This is the async counterpart of [`read_line`](Self::read_line). The
    /// worker result arrives on a [`oneshot`] channel that is raced against
    /// [`tokio::time::sleep`]. Must be called within a tokio runtime with the
    /// time driver enabled.
    ///
    /// The worker is a plain thread rather than a `spawn_blocking` task: the
    /// runtime waits for blocking tasks when it shuts down, and an orphaned
    /// console read may never finish.
    pub async fn read_line_async(&self, request: impl Into<ReadRequest>) -> ReadOutcome {
        let request = request.into();
        if request.is_expired() {
            return ReadOutcome::TimedOut;
        }

        // Dropping `rx`, on timeout or when this future is dropped, closes
        // the channel and abandons the worker.
        let (tx, rx) = oneshot::channel();
        if let Err(err) = self.spawn_worker(move |source| {
            if let Some(outcome) = read_unless_abandoned(source, || tx.is_closed()) {
                let _ = tx.send(outcome);
            }
        }) {
            return ReadOutcome::ReadError(err);
        }

        tokio::select! {
            received = rx => match received {
                Ok(outcome) => outcome,
                Err(_recv_error) => ReadOutcome::ReadError(worker_lost()),
            },
            () = tokio::time::sleep(request.deadline()) => ReadOutcome::TimedOut,
        }
    }

    /// Reads one line on the calling thread with no deadline.
    ///
    /// Waits for any orphaned worker to release the source first.
    pub fn read_line_blocking(&self) -> ReadOutcome {
        read_one(&mut *self.source.lock())
    }

    /// Returns `true` if a worker currently holds the source.
    ///
    /// After a timeout this stays `true` until the orphaned worker's read
    /// completes.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.source.is_locked()
    }

    /// Returns `true` if both readers share the same underlying source.
    #[must_use]
    pub fn shares_source_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.source, &other.source)
    }

    /// Spawns a worker thread that runs `job` against the shared source.
    fn spawn_worker<F>(&self, job: F) -> io::Result<()>
    where
        F: FnOnce(&Mutex<S>) + Send + 'static,
    {
        let source = Arc::clone(&self.source);
        thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_owned())
            .spawn(move || job(&source))
            .map(drop)
    }
}

/// Locks the source and reads one line, unless the caller gave up while
/// this worker waited for the lock.
fn read_unless_abandoned<S: LineSource>(
    source: &Mutex<S>,
    is_abandoned: impl FnOnce() -> bool,
) -> Option<ReadOutcome> {
    let mut source = source.lock();
    if is_abandoned() {
        return None;
    }
    Some(read_one(&mut *source))
}

/// Performs a single blocking line read.
fn read_one<S: LineSource>(source: &mut S) -> ReadOutcome {
    let mut line = String::new();
    match source.read_line(&mut line) {
        Ok(0) => ReadOutcome::EndOfInput,
        Ok(_) => ReadOutcome::Line(strip_line_terminator(line)),
        Err(err) => ReadOutcome::ReadError(err),
    }
}

/// The error reported when a worker exits without sending a result.
fn worker_lost() -> io::Error {
    io::Error::other("line reader worker exited without a result")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::Cursor;
    use std::time::{Duration, Instant};

    /// A source that sleeps before yielding each scripted line.
    struct SlowSource {
        delay: Duration,
        lines: VecDeque<&'static str>,
    }

    impl SlowSource {
        fn new(delay: Duration, lines: &[&'static str]) -> Self {
            Self {
                delay,
                lines: lines.iter().copied().collect(),
            }
        }
    }

    impl LineSource for SlowSource {
        fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
            thread::sleep(self.delay);
            match self.lines.pop_front() {
                Some(line) => {
                    buf.push_str(line);
                    Ok(line.len())
                }
                None => Ok(0),
            }
        }
    }

    /// A source whose reads always fail.
    struct BrokenSource;

    impl LineSource for BrokenSource {
        fn read_line(&mut self, _buf: &mut String) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    /// A source whose read panics, taking the worker down with it.
    struct PanickingSource;

    impl LineSource for PanickingSource {
        #[allow(clippy::panic)]
        fn read_line(&mut self, _buf: &mut String) -> io::Result<usize> {
            panic!("source exploded");
        }
    }

    const GENEROUS: Duration = Duration::from_secs(5);

    #[test]
    fn test_reads_line_within_deadline() {
        let reader = BoundedLineReader::new(Cursor::new("hello\n"));
        let outcome = reader.read_line(GENEROUS);
        assert_eq!(outcome.as_line(), Some("hello"));
    }

    #[test]
    fn test_strips_crlf() {
        let reader = BoundedLineReader::new(Cursor::new("windows\r\n"));
        assert_eq!(reader.read_line(GENEROUS).as_line(), Some("windows"));
    }

    #[test]
    fn test_final_line_without_terminator() {
        let reader = BoundedLineReader::new(Cursor::new("last"));
        assert_eq!(reader.read_line(GENEROUS).as_line(), Some("last"));
        assert!(reader.read_line(GENEROUS).is_end_of_input());
    }

    #[test]
    fn test_empty_line_is_a_line() {
        let reader = BoundedLineReader::new(Cursor::new("\n"));
        assert_eq!(reader.read_line(GENEROUS).as_line(), Some(""));
    }

    #[test]
    fn test_closed_source_is_end_of_input() {
        let reader = BoundedLineReader::new(Cursor::new(""));
        assert!(reader.read_line(GENEROUS).is_end_of_input());
    }

    #[test]
    fn test_zero_deadline_does_not_consume() {
        let reader = BoundedLineReader::new(Cursor::new("kept\n"));
        assert!(reader.read_line(Duration::ZERO).is_timed_out());
        assert!(!reader.is_busy());
        assert_eq!(reader.read_line(GENEROUS).as_line(), Some("kept"));
    }

    #[test]
    fn test_times_out_promptly() {
        let reader =
            BoundedLineReader::new(SlowSource::new(Duration::from_millis(500), &["late\n"]));

        let start = Instant::now();
        let outcome = reader.read_line(Duration::from_millis(50));
        let elapsed = start.elapsed();

        assert!(outcome.is_timed_out());
        assert!(elapsed >= Duration::from_millis(50));
        assert!(elapsed < Duration::from_millis(400), "took {elapsed:?}");
    }

    #[test]
    fn test_io_error_is_surfaced() {
        let reader = BoundedLineReader::new(BrokenSource);
        match reader.read_line(GENEROUS) {
            ReadOutcome::ReadError(err) => assert_eq!(err.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("Expected ReadError, got {other:?}"),
        }
    }

    #[test]
    fn test_worker_panic_is_a_read_error() {
        let reader = BoundedLineReader::new(PanickingSource);
        assert!(reader.read_line(GENEROUS).is_error());
    }

    #[test]
    fn test_orphaned_line_is_discarded() {
        let reader = BoundedLineReader::new(SlowSource::new(
            Duration::from_millis(300),
            &["orphaned\n", "fresh\n"],
        ));

        assert!(reader.read_line(Duration::from_millis(50)).is_timed_out());
        assert!(reader.is_busy());

        // The orphan consumes "orphaned"; the fresh worker gets the next line.
        let outcome = reader.read_line(GENEROUS);
        assert_eq!(outcome.as_line(), Some("fresh"));
    }

    #[test]
    fn test_queued_orphans_do_not_read() {
        let reader = BoundedLineReader::new(SlowSource::new(
            Duration::from_millis(300),
            &["orphaned\n", "second\n", "third\n"],
        ));

        // The first worker is mid-read; the next two wait for the lock.
        for _ in 0..3 {
            assert!(reader.read_line(Duration::from_millis(50)).is_timed_out());
        }

        assert_eq!(reader.read_line(GENEROUS).as_line(), Some("second"));
        assert_eq!(reader.read_line(GENEROUS).as_line(), Some("third"));
    }

    #[tokio::test]
    async fn test_async_queued_orphans_do_not_read() {
        let reader = BoundedLineReader::new(SlowSource::new(
            Duration::from_millis(300),
            &["orphaned\n", "second\n"],
        ));

        for _ in 0..3 {
            let outcome = reader.read_line_async(Duration::from_millis(50)).await;
            assert!(outcome.is_timed_out());
        }

        let outcome = reader.read_line_async(GENEROUS).await;
        assert_eq!(outcome.as_line(), Some("second"));
    }

    #[test]
    fn test_clones_share_the_source() {
        let reader = BoundedLineReader::new(Cursor::new("x\ny\n"));
        let clone = reader.clone();
        assert!(reader.shares_source_with(&clone));
        assert_eq!(reader.read_line(GENEROUS).as_line(), Some("x"));
        assert_eq!(clone.read_line(GENEROUS).as_line(), Some("y"));
    }

    #[test]
    fn test_read_line_blocking() {
        let reader = BoundedLineReader::new(Cursor::new("sync\n"));
        assert_eq!(reader.read_line_blocking().as_line(), Some("sync"));
        assert!(reader.read_line_blocking().is_end_of_input());
    }

    #[tokio::test]
    async fn test_async_reads_line() {
        let reader = BoundedLineReader::new(Cursor::new("async\n"));
        let outcome = reader.read_line_async(GENEROUS).await;
        assert_eq!(outcome.as_line(), Some("async"));
    }

    #[tokio::test]
    async fn test_async_zero_deadline() {
        let reader = BoundedLineReader::new(Cursor::new("kept\n"));
        assert!(reader.read_line_async(Duration::ZERO).await.is_timed_out());
        assert_eq!(
            reader.read_line_async(GENEROUS).await.as_line(),
            Some("kept")
        );
    }

    #[tokio::test]
    async fn test_async_times_out_promptly() {
        let reader =
            BoundedLineReader::new(SlowSource::new(Duration::from_millis(500), &["late\n"]));

        let start = Instant::now();
        let outcome = reader.read_line_async(Duration::from_millis(50)).await;

        assert!(outcome.is_timed_out());
        assert!(start.elapsed() < Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_async_end_of_input_and_error() {
        let closed = BoundedLineReader::new(Cursor::new(""));
        assert!(closed.read_line_async(GENEROUS).await.is_end_of_input());

        let broken = BoundedLineReader::new(BrokenSource);
        assert!(broken.read_line_async(GENEROUS).await.is_error());
    }
}
