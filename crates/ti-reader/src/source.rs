//! Blocking line sources.
//!
//! This module provides the [`LineSource`] trait, the only view the reader
//! has of its input, and implementations for the standard library's readers.

use std::io::{self, BufRead, BufReader, Cursor, Read, Stdin};

/// A blocking, line-oriented input stream.
///
/// Implementors append one line (including its terminator, if any) to `buf`
/// and return the number of bytes read. A return of `Ok(0)` means the stream
/// is closed. This matches [`BufRead::read_line`].
///
/// The source is moved onto a worker thread for each read, hence the
/// `Send + 'static` bound.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use ti_reader::LineSource;
///
/// let mut source = Cursor::new("first\nsecond\n");
/// let mut buf = String::new();
/// assert_eq!(source.read_line(&mut buf).unwrap(), 6);
/// assert_eq!(buf, "first\n");
/// ```
pub trait LineSource: Send + 'static {
    /// Reads one line into `buf`, blocking until it is available.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the underlying stream, including
    /// [`io::ErrorKind::InvalidData`] for input that is not valid UTF-8.
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl LineSource for Stdin {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        Self::read_line(self, buf)
    }
}

impl<R: Read + Send + 'static> LineSource for BufReader<R> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

impl<T: AsRef<[u8]> + Send + 'static> LineSource for Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

impl LineSource for Box<dyn LineSource> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        (**self).read_line(buf)
    }
}

/// Removes one trailing line terminator (`\n` or `\r\n`).
///
/// Only the terminator is removed; other whitespace is left alone. A line
/// without a terminator is returned unchanged.
///
/// # Examples
///
/// ```
/// use ti_reader::strip_line_terminator;
///
/// assert_eq!(strip_line_terminator("hello\n".to_owned()), "hello");
/// assert_eq!(strip_line_terminator("hello\r\n".to_owned()), "hello");
/// assert_eq!(strip_line_terminator("  spaced  \n".to_owned()), "  spaced  ");
/// assert_eq!(strip_line_terminator("tail".to_owned()), "tail");
/// ```
#[must_use]
pub fn strip_line_terminator(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
