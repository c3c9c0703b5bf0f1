//! Bounded-wait line reading from blocking input sources.
//!
//! This crate reads a single line of text from a blocking source, such as
//! standard input, and gives up once a deadline passes. The caller is never
//! blocked for longer than the deadline, even though the underlying read
//! cannot be interrupted.
//!
//! # Overview
//!
//! Each read spawns one worker thread that performs a blocking line read and
//! sends its result over a single-slot channel. The caller waits on that
//! channel for at most the deadline:
//!
//! - The worker wins: [`ReadOutcome::Line`], [`ReadOutcome::EndOfInput`], or
//!   [`ReadOutcome::ReadError`]
//! - The timer wins: [`ReadOutcome::TimedOut`], and the worker is orphaned
//!
//! An orphaned worker that has started reading is never cancelled. It finishes
//! its read whenever input arrives, finds nobody listening, and drops its line.
//! One still queued for the source gives up without reading.
//!
//! # Usage
//!
//! ## Reading standard input
//!
//! ```no_run
//! use std::time::Duration;
//! use ti_core::ReadOutcome;
//!
//! match ti_reader::read_stdin_line(Duration::from_secs(5)) {
//!     ReadOutcome::Line(answer) => println!("You said: {answer}"),
//!     ReadOutcome::TimedOut => println!("No answer in time."),
//!     ReadOutcome::EndOfInput => {}
//!     ReadOutcome::ReadError(err) => eprintln!("Read failed: {err}"),
//! }
//! ```
//!
//! ## Reading any source
//!
//! ```
//! use std::io::Cursor;
//! use std::time::Duration;
//! use ti_reader::BoundedLineReader;
//!
//! let reader = BoundedLineReader::new(Cursor::new("a\nb\n"));
//! assert_eq!(reader.read_line(Duration::from_secs(1)).as_line(), Some("a"));
//! assert_eq!(reader.read_line(Duration::from_secs(1)).as_line(), Some("b"));
//! ```
//!
//! ## Async
//!
//! ```no_run
//! use std::time::Duration;
//!
//! # async fn example() {
//! let reader = ti_reader::stdin_reader();
//! let outcome = reader.read_line_async(Duration::from_secs(5)).await;
//! # }
//! ```
//!
//! # Side Effects
//!
//! Nothing in this crate writes to the console or emits log events. Prompt
//! text, retries, and reporting belong to the caller.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod reader;
pub mod source;
pub mod stdin;

pub use reader::BoundedLineReader;
pub use source::{LineSource, strip_line_terminator};
pub use stdin::{read_stdin_line, stdin_reader};

// Re-exported so callers can match on outcomes without depending on ti-core.
pub use ti_core::{ReadOutcome, ReadRequest};
