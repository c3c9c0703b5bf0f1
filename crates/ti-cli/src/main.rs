//! CLI entry point for the timed-input playground.
//!
//! This binary exposes each prompt pattern as a subcommand so it can be tried
//! from a terminal or scripted through a pipe.
//!
//! # Usage
//!
//! ```bash
//! timed-input [OPTIONS] <COMMAND>
//!
//! # Ask a question, giving up after five seconds
//! timed-input --timeout-ms 5000 ask --message "What is your name?"
//!
//! # Yes/no confirmation defaulting to yes
//! timed-input confirm --message "Deploy?" --default yes
//!
//! # Pick from a menu
//! timed-input menu --message "Pick a fruit" apple banana cherry
//!
//! # Async race between input, the deadline, and Ctrl-C
//! timed-input --timeout-ms 3000 wait
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{WrapErr, eyre};
use ti_core::{Config, ReadOutcome};
use ti_prompt::Prompter;
use ti_reader::LineSource;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Deadline used by `wait` when no timeout is configured.
const DEFAULT_WAIT: Duration = Duration::from_secs(10);

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Try out console prompts that give up after a deadline.
#[derive(Parser)]
#[command(name = "timed-input", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Give up on an answer after this many milliseconds.
    ///
    /// Overrides `prompt.timeout_ms` from the configuration file.
    #[arg(
        short,
        long,
        global = true,
        env = "TIMED_INPUT_TIMEOUT_MS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_ms: Option<u64>,

    /// Path to a JSON configuration file.
    #[arg(short, long, global = true, env = "TIMED_INPUT_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Prompt(PromptCommand),

    /// Wait for a line while also listening for Ctrl-C.
    Wait {
        /// Message to show.
        #[arg(short, long, default_value = "Press Enter before time runs out:")]
        message: String,
    },
}

/// Subcommands answered through a synchronous [`Prompter`].
#[derive(Subcommand)]
enum PromptCommand {
    /// Ask a free-form question.
    Ask {
        /// Question to show.
        #[arg(short, long, default_value = "What is your name?")]
        message: String,

        /// Answer to use when the reply is empty.
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Ask for a number, re-asking on invalid input.
    Number {
        /// Question to show.
        #[arg(short, long, default_value = "Enter a number:")]
        message: String,

        /// Accept decimal numbers instead of integers.
        #[arg(long)]
        float: bool,
    },

    /// Ask a yes/no question.
    Confirm {
        /// Question to show.
        #[arg(short, long, default_value = "Continue?")]
        message: String,

        /// Answer to use when the reply is empty.
        #[arg(short, long, value_enum)]
        default: Option<YesNo>,
    },

    /// Pick one entry from a numbered menu.
    Menu {
        /// Question to show below the menu.
        #[arg(short, long, default_value = "Choose an option:")]
        message: String,

        /// Menu entries.
        #[arg(required = true)]
        choices: Vec<String>,
    },
}

/// A yes/no default for `confirm`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum YesNo {
    /// Default to yes.
    Yes,
    /// Default to no.
    No,
}

impl From<YesNo> for bool {
    fn from(value: YesNo) -> Self {
        matches!(value, YesNo::Yes)
    }
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `warn` so logs stay out of the
/// way of prompts. Logs always go to stderr.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "warn" };
        EnvFilter::new(level)
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Builds a [`Config`] from the configuration file and CLI flags.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be loaded or the
/// resulting configuration is invalid.
fn build_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            Config::load(path).wrap_err_with(|| format!("Failed to load configuration {path}"))?
        }
        None => Config::default(),
    };

    if let Some(timeout_ms) = cli.timeout_ms {
        config.prompt.timeout_ms = Some(timeout_ms);
    }

    config.validate()?;
    debug!(?config, "Configuration resolved");
    Ok(config)
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Runs a prompt command against stdio on tokio's blocking pool.
///
/// # Errors
///
/// Returns an error if the prompt times out, input closes, or I/O fails.
async fn run_prompt(config: &Config, command: PromptCommand) -> color_eyre::Result<()> {
    let prompt = config.prompt;
    let reply = tokio::task::spawn_blocking(move || {
        let mut prompter = Prompter::stdio(prompt);
        answer(&mut prompter, &command)
    })
    .await??;

    print_reply(&reply)
}

/// Asks the question described by `command` and renders the reply.
fn answer<S: LineSource, W: Write>(
    prompter: &mut Prompter<S, W>,
    command: &PromptCommand,
) -> color_eyre::Result<String> {
    let reply = match command {
        PromptCommand::Ask { message, default } => match default {
            Some(default) => prompter.ask_or_default(message, default)?,
            None => prompter.ask(message)?,
        },
        PromptCommand::Number { message, float } => {
            if *float {
                prompter.ask_parsed::<f64>(message)?.to_string()
            } else {
                prompter.ask_parsed::<i64>(message)?.to_string()
            }
        }
        PromptCommand::Confirm { message, default } => {
            let confirmed = prompter.confirm(message, default.map(bool::from))?;
            if confirmed { "yes" } else { "no" }.to_owned()
        }
        PromptCommand::Menu { message, choices } => {
            let selection = prompter.select(message, choices.as_slice())?;
            format!("{} ({})", selection.label, selection.index + 1)
        }
    };

    Ok(reply)
}

/// Races a line of input against the deadline and Ctrl-C.
///
/// # Errors
///
/// Returns an error if no line arrives before the deadline, input closes,
/// or reading fails.
async fn run_wait(config: &Config, message: &str) -> color_eyre::Result<()> {
    let deadline = config.prompt.timeout().unwrap_or(DEFAULT_WAIT);
    info!(deadline_ms = deadline.as_millis(), "Waiting for input");

    {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        write!(handle, "{message} ({}s) ", deadline.as_secs_f32())?;
        handle.flush()?;
    }

    let reader = ti_reader::stdin_reader();

    tokio::select! {
        outcome = reader.read_line_async(deadline) => report_outcome(outcome, deadline),
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Received Ctrl-C, giving up");
            Err(eyre!("interrupted"))
        }
    }
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Prints a prompt's reply on its own line.
fn print_reply(reply: &str) -> color_eyre::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "You answered: {reply}")?;
    Ok(())
}

/// Turns a raw read outcome into a reply or an error.
fn report_outcome(outcome: ReadOutcome, deadline: Duration) -> color_eyre::Result<()> {
    match outcome {
        ReadOutcome::Line(line) => print_reply(&line),
        ReadOutcome::TimedOut => Err(eyre!("no input within {}ms", deadline.as_millis())),
        ReadOutcome::EndOfInput => Err(eyre!("input closed before a line arrived")),
        ReadOutcome::ReadError(err) => Err(err).wrap_err("Failed to read input"),
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Resolve configuration (file, then flags)
    let config = build_config(&cli)?;

    // 5. Route to appropriate command
    match cli.command {
        Commands::Prompt(command) => run_prompt(&config, command).await,
        Commands::Wait { message } => run_wait(&config, &message).await,
    }
}
