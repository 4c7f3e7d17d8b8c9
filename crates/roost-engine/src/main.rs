//! Terminal front end for the Roost chicken duel.
//!
//! Wires the configuration, a [`GameSession`], the session runner, a stdin
//! command reader and a text board renderer together, then runs until the
//! player quits, input ends, or a runner bound is reached.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `roost-config.yaml` (or `$ROOST_CONFIG`)
//! 2. Initialize structured logging (tracing) on stderr
//! 3. Build the game session
//! 4. Spawn the session runner
//! 5. Start the board renderer and the stdin reader
//! 6. Wait for the runner and log the result
//!
//! The board goes to stdout and logs to stderr, so either can be
//! redirected on its own.

mod error;
mod input;
mod render;

use std::io::Write;
use std::path::{Path, PathBuf};

use roost_core::config::RoostConfig;
use roost_core::runner::{self, NoOpCallback, RunSettings};
use roost_core::session::GameSession;
use roost_types::SessionSnapshot;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Config file read when `ROOST_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "roost-config.yaml";

/// Environment variable that overrides the config file path.
const CONFIG_PATH_ENV: &str = "ROOST_CONFIG";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, session setup, output, or the
/// runner task fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging depends on it, so errors here are
    //    reported by `main`'s return value alone.
    let path = config_path();
    let loaded = load_config(&path)?;
    let found = loaded.is_some();
    let config = loaded.unwrap_or_default();

    // 2. Initialize structured logging. RUST_LOG overrides the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("roost-engine starting");
    if !found {
        info!(path = %path.display(), "Config file not found, using defaults");
    }
    info!(
        grid_size = config.game.grid_size,
        winning_score = config.game.winning_score,
        tick_interval_ms = config.game.tick_interval_ms,
        seed = ?config.game.seed,
        max_ticks = config.runner.max_ticks,
        exit_on_game_over = config.runner.exit_on_game_over,
        "Configuration loaded"
    );

    // 3. Build the session.
    let session = GameSession::new(&config)?;

    // 4. Spawn the runner.
    let settings = RunSettings::new(config.game.tick_interval_ms, &config.runner);
    let (control, session_task) =
        runner::spawn_session(session, settings, Box::new(NoOpCallback));

    // 5. Renderer and input adapter.
    let render_task = tokio::spawn(render_loop(control.subscribe()));
    let lines = input::spawn_stdin_reader();
    let input_task = tokio::spawn(async move { input::drive_input(lines, &control).await });
    info!("Controls: w/a/s/d steer, p pause, r resume, n restart, j json, q quit");

    // 6. Wait for the runner.
    let result = runner::join_session(session_task).await?;
    runner::log_session_end(&result);

    // The runner dropped its snapshot sender, so the renderer drains and exits.
    render_task.await??;
    if input_task.is_finished() {
        input_task.await??;
    } else {
        input_task.abort();
    }

    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        "roost-engine shutdown complete"
    );

    Ok(())
}

/// Path of the configuration file.
fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Load the configuration, or `None` if the file does not exist.
fn load_config(path: &Path) -> Result<Option<RoostConfig>, EngineError> {
    if path.exists() {
        Ok(Some(RoostConfig::from_file(path)?))
    } else {
        Ok(None)
    }
}

/// Print a board for the current snapshot and again for every update.
async fn render_loop(mut updates: watch::Receiver<SessionSnapshot>) -> Result<(), EngineError> {
    let frame = render::render(&updates.borrow_and_update());
    write_frame(&frame)?;
    while updates.changed().await.is_ok() {
        let frame = render::render(&updates.borrow_and_update());
        write_frame(&frame)?;
    }
    Ok(())
}

fn write_frame(frame: &str) -> Result<(), EngineError> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{frame}")?;
    out.flush()?;
    Ok(())
}
