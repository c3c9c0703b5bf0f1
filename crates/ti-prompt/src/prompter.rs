//! Interactive prompts.
//!
//! This module provides the [`Prompter`] type: write a question, read one
//! answer through a [`BoundedLineReader`], and turn it into a value.
//!
//! # Prompt Flow
//!
//! ```text
//! write prompt ──► flush ──► read line (deadline?) ──► trim ──► validate
//!                                                                 │
//!                         ◄──── invalid: explain, ask again ◄─────┘
//! ```

use std::fmt::Display;
use std::io::{self, Stdout, Write};
use std::str::FromStr;

use ti_core::{PromptConfig, ReadOutcome};
use ti_reader::{BoundedLineReader, LineSource};
use tracing::{debug, trace};

use crate::error::PromptError;
use crate::parse::{parse_choice, parse_value, parse_yes_no};

/// A menu answer: the chosen position and its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Zero-based index into the choices.
    pub index: usize,
    /// The chosen label.
    pub label: String,
}

/// Asks questions on an output stream and reads answers from a line source.
///
/// Every helper writes its prompt, flushes, and reads one line. When
/// [`PromptConfig::timeout_ms`] is set each read is bounded by it; otherwise
/// reads wait indefinitely. Helpers that validate their answer explain the
/// problem and ask again, up to [`PromptConfig::max_attempts`] answers.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use ti_core::PromptConfig;
/// use ti_prompt::Prompter;
/// use ti_reader::BoundedLineReader;
///
/// let input = BoundedLineReader::new(Cursor::new("Ada\n\n42\ny\n"));
/// let mut prompter = Prompter::new(input, Vec::new(), PromptConfig::default());
///
/// assert_eq!(prompter.ask("Name:").unwrap(), "Ada");
/// assert_eq!(prompter.ask_or_default("City:", "Paris").unwrap(), "Paris");
/// assert_eq!(prompter.ask_parsed::<u32>("Age:").unwrap(), 42);
/// assert!(prompter.confirm("Continue?", None).unwrap());
/// ```
pub struct Prompter<S, W> {
    reader: BoundedLineReader<S>,
    output: W,
    config: PromptConfig,
}

impl<S, W> std::fmt::Debug for Prompter<S, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prompter")
            .field("reader", &self.reader)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Prompter<io::Stdin, Stdout> {
    /// Creates a prompter over standard input and standard output.
    ///
    /// Uses the process-wide standard input reader, so answers orphaned by a
    /// timeout are never handed to a later prompt.
    #[must_use]
    pub fn stdio(config: PromptConfig) -> Self {
        Self::new(ti_reader::stdin_reader(), io::stdout(), config)
    }
}

impl<S: LineSource, W: Write> Prompter<S, W> {
    /// Creates a prompter from a reader, an output stream, and a configuration.
    #[must_use]
    pub const fn new(reader: BoundedLineReader<S>, output: W, config: PromptConfig) -> Self {
        Self {
            reader,
            output,
            config,
        }
    }

    /// Returns the prompt configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &PromptConfig {
        &self.config
    }

    /// Returns the output stream.
    #[inline]
    #[must_use]
    pub const fn output(&self) -> &W {
        &self.output
    }

    /// Consumes the prompter and returns its output stream.
    #[must_use]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Asks a question and returns the answer.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::TimedOut`], [`PromptError::EndOfInput`], or
    /// [`PromptError::Io`] when no answer could be read.
    pub fn ask(&mut self, message: &str) -> Result<String, PromptError> {
        self.write_prompt(message, None)?;
        self.read_answer()
    }

    /// Asks a question, returning `default` when the answer is empty.
    ///
    /// # Errors
    ///
    /// Same as [`ask`](Self::ask).
    pub fn ask_or_default(&mut self, message: &str, default: &str) -> Result<String, PromptError> {
        self.write_prompt(message, Some(default))?;
        let answer = self.read_answer()?;
        if answer.is_empty() {
            debug!("Empty answer, using default");
            return Ok(default.to_owned());
        }
        Ok(answer)
    }

    /// Asks for a value of type `T`, asking again while the answer does not parse.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::TooManyAttempts`] once every allowed answer was
    /// rejected, or any error from [`ask`](Self::ask).
    pub fn ask_parsed<T>(&mut self, message: &str) -> Result<T, PromptError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.retry(
            |prompter| prompter.write_prompt(message, None),
            |answer| {
                parse_value::<T>(answer)
                    .map_err(|reason| format!("Invalid value '{answer}': {reason}"))
            },
        )
    }

    /// Asks a yes/no question.
    ///
    /// An empty answer yields `default` when one is given.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::TooManyAttempts`] once every allowed answer was
    /// rejected, or any error from [`ask`](Self::ask).
    pub fn confirm(&mut self, message: &str, default: Option<bool>) -> Result<bool, PromptError> {
        let hint = match default {
            Some(true) => "Y/n",
            Some(false) => "y/N",
            None => "y/n",
        };
        self.retry(
            |prompter| prompter.write_prompt(message, Some(hint)),
            |answer| match (parse_yes_no(answer), default) {
                (Some(value), _) => Ok(value),
                (None, Some(value)) if answer.trim().is_empty() => Ok(value),
                (None, _) => Err("Please answer yes or no.".to_owned()),
            },
        )
    }

    /// Shows a numbered menu and asks for a choice.
    ///
    /// The answer may be the choice's number or its label.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::EmptyMenu`] if `choices` is empty,
    /// [`PromptError::TooManyAttempts`] once every allowed answer was
    /// rejected, or any error from [`ask`](Self::ask).
    pub fn select<C: AsRef<str>>(
        &mut self,
        message: &str,
        choices: &[C],
    ) -> Result<Selection, PromptError> {
        if choices.is_empty() {
            return Err(PromptError::EmptyMenu);
        }
        let range = format!("1-{}", choices.len());
        let index = self.retry(
            |prompter| {
                for (position, choice) in choices.iter().enumerate() {
                    writeln!(prompter.output, "  {}) {}", position + 1, choice.as_ref())?;
                }
                prompter.write_prompt(message, Some(&range))
            },
            |answer| {
                parse_choice(answer, choices).ok_or_else(|| {
                    format!("Please choose a number between 1 and {}.", choices.len())
                })
            },
        )?;
        Ok(Selection {
            index,
            label: choices[index].as_ref().to_owned(),
        })
    }

    /// Runs the ask/validate loop shared by the validating helpers.
    fn retry<T>(
        &mut self,
        mut prompt: impl FnMut(&mut Self) -> io::Result<()>,
        validate: impl Fn(&str) -> Result<T, String>,
    ) -> Result<T, PromptError> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut last_input = String::new();
        for attempt in 1..=max_attempts {
            prompt(self)?;
            let answer = self.read_answer()?;
            match validate(&answer) {
                Ok(value) => return Ok(value),
                Err(complaint) => {
                    debug!(attempt, max_attempts, "Rejected answer");
                    writeln!(self.output, "{complaint}")?;
                    last_input = answer;
                }
            }
        }
        Err(PromptError::too_many_attempts(max_attempts, last_input))
    }

    /// Writes `"{message} "` or `"{message} [{hint}] "` and flushes.
    fn write_prompt(&mut self, message: &str, hint: Option<&str>) -> io::Result<()> {
        let message = message.trim_end();
        match hint {
            Some(hint) => write!(self.output, "{message} [{hint}] ")?,
            None => write!(self.output, "{message} ")?,
        }
        self.output.flush()
    }

    /// Reads one answer, applying the timeout and trimming configuration.
    fn read_answer(&self) -> Result<String, PromptError> {
        let outcome = match self.config.timeout() {
            Some(deadline) => self.reader.read_line(deadline),
            None => self.reader.read_line_blocking(),
        };
        debug!(outcome = outcome.label(), "Prompt answered");

        match outcome {
            ReadOutcome::Line(line) => {
                trace!(answer = %line, "Raw answer");
                if self.config.trim_whitespace {
                    Ok(line.trim().to_owned())
                } else {
                    Ok(line)
                }
            }
            ReadOutcome::EndOfInput => Err(PromptError::EndOfInput),
            ReadOutcome::TimedOut => Err(PromptError::TimedOut {
                after: self.config.timeout().unwrap_or_default(),
            }),
            ReadOutcome::ReadError(err) => Err(PromptError::Io(err)),
        }
    }
}
