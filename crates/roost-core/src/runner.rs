//! Session runner: the timer loop around a game session.
//!
//! [`spawn_session`] moves a [`GameSession`] into a tokio task that:
//!
//! - **Ticks** on a fixed interval (first tick one interval after start)
//! - **Applies commands** from [`SessionControl`] handles between ticks, so a
//!   tick never observes a half-applied command
//! - **Publishes** a snapshot after every resolved tick and state change
//! - **Stops** on a stop command, when every control handle is dropped,
//!   after `max_ticks` resolved ticks, or on game over if configured
//!
//! Restarting or changing the interval resets the timer, so no tick
//! scheduled for a replaced session ever fires against the new one.

use roost_types::{SessionSnapshot, Winner};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::{MIN_TICK_INTERVAL_MS, RunnerConfig};
use crate::control::{COMMAND_BUFFER, Command, SessionControl};
use crate::session::GameSession;
use crate::tick::TickOutcome;

/// Errors that can occur while waiting on the runner.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The runner task panicked or was cancelled.
    #[error("session task failed: {source}")]
    Join {
        /// The underlying join error.
        #[from]
        source: tokio::task::JoinError,
    },
}

/// Reason why the runner stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEndReason {
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
    /// A stop command was received.
    OperatorStop,
    /// Every control handle was dropped.
    ControlDropped,
    /// A game ended and `exit_on_game_over` is set.
    GameOver {
        /// Who won.
        winner: Winner,
    },
}

/// Result of a session run.
#[derive(Debug, Clone)]
pub struct SessionRunResult {
    /// Why the runner stopped.
    pub end_reason: SessionEndReason,
    /// Number of resolved ticks across all games in this run.
    pub total_ticks: u64,
    /// State at the moment the runner stopped.
    pub final_snapshot: SessionSnapshot,
}

/// Callback invoked after every resolved tick.
pub trait TickCallback: Send {
    /// Called with the tick's outcome and the snapshot taken right after it.
    fn on_tick(&mut self, outcome: &TickOutcome, snapshot: &SessionSnapshot);
}

/// A no-op tick callback.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _outcome: &TickOutcome, _snapshot: &SessionSnapshot) {}
}

/// Timing and bounds for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    /// Milliseconds between ticks.
    pub tick_interval_ms: u64,
    /// Stop after this many resolved ticks (0 = unlimited).
    pub max_ticks: u64,
    /// Stop as soon as a game ends.
    pub exit_on_game_over: bool,
}

impl RunSettings {
    /// Combine the tick interval with the runner bounds.
    pub const fn new(tick_interval_ms: u64, bounds: &RunnerConfig) -> Self {
        Self {
            tick_interval_ms,
            max_ticks: bounds.max_ticks,
            exit_on_game_over: bounds.exit_on_game_over,
        }
    }
}

/// Move `session` into a new task and return a handle to it.
///
/// Must be called from within a tokio runtime.
pub fn spawn_session(
    session: GameSession,
    settings: RunSettings,
    mut callback: Box<dyn TickCallback>,
) -> (SessionControl, JoinHandle<SessionRunResult>) {
    let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
    let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());
    let control = SessionControl::new(command_tx, snapshot_rx);
    let task = tokio::spawn(async move {
        run_session(session, command_rx, &snapshot_tx, settings, callback.as_mut()).await
    });
    (control, task)
}

/// Wait for a spawned session task to finish.
///
/// # Errors
///
/// Returns [`RunnerError::Join`] if the task panicked or was aborted.
pub async fn join_session(
    task: JoinHandle<SessionRunResult>,
) -> Result<SessionRunResult, RunnerError> {
    Ok(task.await?)
}

/// Drive `session` until a stop condition is met.
pub async fn run_session(
    mut session: GameSession,
    mut commands: mpsc::Receiver<Command>,
    snapshots: &watch::Sender<SessionSnapshot>,
    settings: RunSettings,
    callback: &mut dyn TickCallback,
) -> SessionRunResult {
    let mut interval_ms = settings.tick_interval_ms.max(MIN_TICK_INTERVAL_MS);
    let mut interval = tick_interval(interval_ms);
    let mut total_ticks: u64 = 0;

    info!(
        session_id = %session.state().id,
        tick_interval_ms = interval_ms,
        max_ticks = settings.max_ticks,
        exit_on_game_over = settings.exit_on_game_over,
        "Session runner starting"
    );

    let end_reason = loop {
        tokio::select! {
            biased;

            command = commands.recv() => {
                let Some(command) = command else {
                    info!("All session controls dropped");
                    break SessionEndReason::ControlDropped;
                };
                match command {
                    Command::Stop => {
                        info!("Stop requested");
                        break SessionEndReason::OperatorStop;
                    }
                    Command::SetHeading(heading) => {
                        if session.set_human_heading(heading) {
                            let _ = snapshots.send_replace(session.snapshot());
                        }
                    }
                    Command::Pause => {
                        if session.pause() {
                            let _ = snapshots.send_replace(session.snapshot());
                        }
                    }
                    Command::Resume => {
                        if session.resume() {
                            let _ = snapshots.send_replace(session.snapshot());
                        }
                    }
                    Command::Restart => {
                        session.restart();
                        interval.reset();
                        let _ = snapshots.send_replace(session.snapshot());
                    }
                    Command::SetTickInterval(ms) => {
                        if ms < MIN_TICK_INTERVAL_MS {
                            warn!(requested_ms = ms, min_ms = MIN_TICK_INTERVAL_MS, "Tick interval rejected");
                        } else {
                            debug!(previous_ms = interval_ms, new_ms = ms, "Tick interval changed");
                            interval_ms = ms;
                            interval = tick_interval(interval_ms);
                        }
                    }
                }
            }

            _ = interval.tick() => {
                let outcome = session.tick();
                if matches!(outcome, TickOutcome::Skipped(_)) {
                    continue;
                }
                total_ticks = total_ticks.saturating_add(1);

                let snapshot = session.snapshot();
                callback.on_tick(&outcome, &snapshot);
                let _ = snapshots.send_replace(snapshot);

                if let Some(report) = outcome.game_over().filter(|_| settings.exit_on_game_over) {
                    break SessionEndReason::GameOver { winner: report.winner };
                }
                if settings.max_ticks > 0 && total_ticks >= settings.max_ticks {
                    info!(total_ticks, max_ticks = settings.max_ticks, "Tick limit reached");
                    break SessionEndReason::MaxTicksReached;
                }
            }
        }
    };

    // The interval is dropped with this frame; nothing fires after return.
    SessionRunResult {
        end_reason,
        total_ticks,
        final_snapshot: session.snapshot(),
    }
}

/// Log the end of a run.
pub fn log_session_end(result: &SessionRunResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_snapshot.tick,
        player_length = result.final_snapshot.player.length(),
        ai_length = result.final_snapshot.ai.length(),
        status = ?result.final_snapshot.status,
        game_over = result.final_snapshot.status.is_over(),
        "Session ended"
    );
}

/// An interval whose first tick is one full period away.
fn tick_interval(ms: u64) -> Interval {
    let period = Duration::from_millis(ms);
    let start = Instant::now().checked_add(period).unwrap_or_else(Instant::now);
    let mut interval = tokio::time::interval_at(start, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}
