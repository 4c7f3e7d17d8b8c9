//! Control handle for a running session.
//!
//! The session runner owns the [`GameSession`](crate::session::GameSession)
//! outright. Everything else (keyboard adapters, scripted drivers, tests)
//! talks to it through a [`SessionControl`]: commands go in over an `mpsc`
//! channel and are applied between ticks, snapshots come out over a
//! `watch` channel that always holds the latest one.
//!
//! Dropping every [`SessionControl`] stops the runner.

use roost_types::{Heading, SessionSnapshot};
use tokio::sync::{mpsc, watch};

/// Capacity of the command channel.
pub const COMMAND_BUFFER: usize = 64;

/// A command applied by the runner between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Request a new player heading (reversals are ignored).
    SetHeading(Heading),
    /// Pause a running game.
    Pause,
    /// Resume a paused game.
    Resume,
    /// Start a fresh game.
    Restart,
    /// Change the tick interval in milliseconds.
    SetTickInterval(u64),
    /// Stop the runner.
    Stop,
}

/// Errors returned by [`SessionControl`].
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    /// The runner has stopped and no longer accepts commands.
    #[error("session runner is not running")]
    Closed,
}

/// Cloneable handle to a running session.
#[derive(Debug, Clone)]
pub struct SessionControl {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl SessionControl {
    /// Wire a handle to the runner's channels.
    pub const fn new(
        commands: mpsc::Sender<Command>,
        snapshots: watch::Receiver<SessionSnapshot>,
    ) -> Self {
        Self {
            commands,
            snapshots,
        }
    }

    /// Send a command to the runner.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Closed`] if the runner has stopped.
    pub async fn send(&self, command: Command) -> Result<(), ControlError> {
        self.commands
            .send(command)
            .await
            .map_err(|_closed| ControlError::Closed)
    }

    /// Request a new player heading.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Closed`] if the runner has stopped.
    pub async fn set_heading(&self, heading: Heading) -> Result<(), ControlError> {
        self.send(Command::SetHeading(heading)).await
    }

    /// Pause the game.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Closed`] if the runner has stopped.
    pub async fn pause(&self) -> Result<(), ControlError> {
        self.send(Command::Pause).await
    }

    /// Resume the game.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Closed`] if the runner has stopped.
    pub async fn resume(&self) -> Result<(), ControlError> {
        self.send(Command::Resume).await
    }

    /// Start a fresh game.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Closed`] if the runner has stopped.
    pub async fn restart(&self) -> Result<(), ControlError> {
        self.send(Command::Restart).await
    }

    /// Stop the runner.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Closed`] if the runner has already stopped.
    pub async fn stop(&self) -> Result<(), ControlError> {
        self.send(Command::Stop).await
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }
}
