//! Process-wide standard input reader.
//!
//! Every read of standard input must go through one shared
//! [`BoundedLineReader`], so that a read issued after a timeout queues behind
//! the orphaned worker instead of racing it for the same bytes.

use std::io::{self, Stdin};
use std::sync::OnceLock;

use ti_core::{ReadOutcome, ReadRequest};

use crate::reader::BoundedLineReader;

static STDIN_READER: OnceLock<BoundedLineReader<Stdin>> = OnceLock::new();

/// Returns the shared reader over the process's standard input.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
///
/// let reader = ti_reader::stdin_reader();
/// let outcome = reader.read_line(Duration::from_secs(10));
/// ```
pub fn stdin_reader() -> BoundedLineReader<Stdin> {
    STDIN_READER
        .get_or_init(|| BoundedLineReader::new(io::stdin()))
        .clone()
}

/// Reads one line from standard input, giving up after `deadline`.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use ti_core::ReadOutcome;
///
/// match ti_reader::read_stdin_line(Duration::from_secs(5)) {
///     ReadOutcome::Line(name) => println!("Hello, {name}!"),
///     ReadOutcome::TimedOut => println!("Too slow."),
///     ReadOutcome::EndOfInput => println!("Goodbye."),
///     ReadOutcome::ReadError(err) => eprintln!("Could not read input: {err}"),
/// }
/// ```
pub fn read_stdin_line(deadline: impl Into<ReadRequest>) -> ReadOutcome {
    stdin_reader().read_line(deadline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_stdin_reader_is_shared() {
        let first = stdin_reader();
        let second = stdin_reader();
        assert!(first.shares_source_with(&second));
    }

    #[test]
    fn test_expired_stdin_read_never_touches_stdin() {
        assert!(read_stdin_line(Duration::ZERO).is_timed_out());
        assert!(!stdin_reader().is_busy());
    }
}
