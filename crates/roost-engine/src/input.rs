//! Stdin input adapter.
//!
//! Lines are read on a dedicated OS thread (so a blocked read never holds
//! up runtime shutdown) and forwarded to an async driver that turns them
//! into session commands.

use std::io::{BufRead, Write};

use roost_core::control::{Command, SessionControl};
use roost_types::Heading;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::EngineError;

/// Capacity of the raw line channel.
const LINE_BUFFER: usize = 16;

/// A parsed line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    /// Steer the player chicken.
    Steer(Heading),
    /// Pause the game.
    Pause,
    /// Resume the game.
    Resume,
    /// Start a fresh game.
    Restart,
    /// Change the tick interval in milliseconds.
    Speed(u64),
    /// Print the current snapshot as JSON.
    Json,
    /// Stop the engine.
    Quit,
}

impl InputCommand {
    /// The runner command this input maps to, if it goes to the runner.
    pub const fn to_control(self) -> Option<Command> {
        match self {
            Self::Steer(heading) => Some(Command::SetHeading(heading)),
            Self::Pause => Some(Command::Pause),
            Self::Resume => Some(Command::Resume),
            Self::Restart => Some(Command::Restart),
            Self::Speed(ms) => Some(Command::SetTickInterval(ms)),
            Self::Quit => Some(Command::Stop),
            Self::Json => None,
        }
    }
}

/// Errors from parsing a line of input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The line was blank.
    #[error("empty input")]
    Empty,

    /// The first word is not a known command.
    #[error("unknown command: {input}")]
    Unknown {
        /// The unrecognized word.
        input: String,
    },

    /// `speed` was given a missing or non-numeric argument.
    #[error("speed needs a whole number of milliseconds, got {value:?}")]
    BadSpeed {
        /// The argument as typed, if any.
        value: Option<String>,
    },
}

/// Parse one line of input. Case-insensitive; surrounding whitespace is
/// ignored.
pub fn parse_command(line: &str) -> Result<InputCommand, ParseError> {
    let lowered = line.trim().to_ascii_lowercase();
    let mut words = lowered.split_whitespace();
    let Some(word) = words.next() else {
        return Err(ParseError::Empty);
    };

    let command = match word {
        "up" | "w" => InputCommand::Steer(Heading::Up),
        "down" | "s" => InputCommand::Steer(Heading::Down),
        "left" | "a" => InputCommand::Steer(Heading::Left),
        "right" | "d" => InputCommand::Steer(Heading::Right),
        "pause" | "p" => InputCommand::Pause,
        "resume" | "r" => InputCommand::Resume,
        "restart" | "n" => InputCommand::Restart,
        "quit" | "q" => InputCommand::Quit,
        "json" | "j" => InputCommand::Json,
        "speed" => {
            let value = words.next();
            let ms = value
                .and_then(|v| v.parse::<u64>().ok())
                .ok_or_else(|| ParseError::BadSpeed {
                    value: value.map(str::to_owned),
                })?;
            InputCommand::Speed(ms)
        }
        other => {
            return Err(ParseError::Unknown {
                input: other.to_owned(),
            });
        }
    };
    Ok(command)
}

/// Start the stdin reader thread and return the channel its lines arrive
/// on. The channel closes at end of input.
pub fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(LINE_BUFFER);
    let _reader = std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Forward parsed input to the session until input ends, the player
/// quits, or the runner stops.
///
/// # Errors
///
/// Returns [`EngineError::Output`] or [`EngineError::Json`] if a `json`
/// command cannot be written to stdout.
pub async fn drive_input(
    mut lines: mpsc::Receiver<String>,
    control: &SessionControl,
) -> Result<(), EngineError> {
    while let Some(line) = lines.recv().await {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(ParseError::Empty) => continue,
            Err(e) => {
                warn!(error = %e, "Ignoring input");
                continue;
            }
        };
        debug!(?command, "Input received");

        let Some(control_command) = command.to_control() else {
            let json = serde_json::to_string(&control.snapshot())?;
            writeln!(std::io::stdout().lock(), "{json}")?;
            continue;
        };
        if control.send(control_command).await.is_err() {
            debug!("Runner stopped, input adapter exiting");
            return Ok(());
        }
        if command == InputCommand::Quit {
            return Ok(());
        }
    }

    info!("Input closed, stopping session");
    // The runner may already be gone; nothing left to tell it then.
    let _ = control.stop().await;
    Ok(())
}
