//! Tick resolution: the step function that drives a game session.
//!
//! Every tick resolves both chickens together against the state captured at
//! the start of the tick. Nothing one chicken does this tick is visible to
//! the other's checks.
//!
//! 1. **Heads** -- the player's pending heading and the AI's freshly decided
//!    heading each give a wrapped prospective head.
//! 2. **Collisions** -- a prospective head on its own current body, or the
//!    two prospective heads on the same cell, ends the game. Mutual
//!    collision and player self-collision both hand the win to the AI; an
//!    AI self-collision alone hands it to the player. Bodies are left as
//!    they were.
//! 3. **Advance** -- both heads are prepended.
//! 4. **Consumption** -- heads are compared with the start-of-tick items.
//!    Growth keeps the tail. A treat drops the tail when the body (head
//!    included) is longer than 3, otherwise cuts the body back to the head.
//!    Eating nothing drops the tail. If both items share a cell, growth
//!    decides the body change.
//! 5. **Relocation** -- each item a head landed on respawns independently,
//!    so a shared cell moves both items.
//! 6. **Length win** -- checked against the lengths from the START of the
//!    tick, so a winning length is only acted on one tick after it is
//!    reached. Player first.

use roost_types::{Heading, ItemKind, ItemSet, Position, SessionId, SessionStatus, Winner};
use tracing::{debug, info};

use crate::chicken::Chicken;
use crate::decision::DecisionSource;
use crate::grid::Grid;
use crate::spawner::ItemSpawner;

/// Body length (after the new head is prepended) above which a treat only
/// costs one segment.
pub const TREAT_SHRINK_THRESHOLD: usize = 3;

/// The mutable state of one game, passed through the tick function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Identifier of this session.
    pub id: SessionId,
    /// The board.
    pub grid: Grid,
    /// The human-controlled chicken.
    pub player: Chicken,
    /// The AI-controlled chicken.
    pub ai: Chicken,
    /// Current item positions.
    pub items: ItemSet,
    /// Lifecycle state.
    pub status: SessionStatus,
    /// Number of resolved ticks.
    pub tick: u64,
    /// Body length that wins the game.
    pub winning_score: usize,
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Both prospective heads landed on the same cell.
    MutualCollision,
    /// The player's prospective head landed on its own body.
    PlayerSelfCollision,
    /// The AI's prospective head landed on its own body.
    AiSelfCollision,
    /// A chicken's start-of-tick length reached the winning score.
    LengthThreshold,
}

/// Report of the tick that ended a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverReport {
    /// The tick that ended the game.
    pub tick: u64,
    /// Who won.
    pub winner: Winner,
    /// What ended it.
    pub cause: GameOverCause,
}

/// Summary of a tick that left the game running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick that was resolved.
    pub tick: u64,
    /// Player body length after the tick.
    pub player_length: usize,
    /// AI body length after the tick.
    pub ai_length: usize,
    /// Heading the AI moved along.
    pub ai_heading: Heading,
    /// Item the player ate, if any.
    pub player_ate: Option<ItemKind>,
    /// Item the AI ate, if any.
    pub ai_ate: Option<ItemKind>,
    /// Whether the growth item was relocated.
    pub growth_respawned: bool,
    /// Whether the treat was relocated. True whenever a head landed on it,
    /// including a cell shared with the growth item.
    pub treat_respawned: bool,
}

/// Result of a call to [`run_tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick resolved and the game goes on.
    Advanced(TickSummary),
    /// The tick resolved and ended the game.
    GameOver(GameOverReport),
    /// Nothing happened because the session is paused or over.
    Skipped(SessionStatus),
}

impl TickOutcome {
    /// The game-over report, if this tick ended the game.
    pub const fn game_over(&self) -> Option<&GameOverReport> {
        match self {
            Self::GameOver(report) => Some(report),
            Self::Advanced(_) | Self::Skipped(_) => None,
        }
    }
}

/// Resolve one tick.
///
/// A no-op returning [`TickOutcome::Skipped`] unless the session is
/// running.
pub fn run_tick(
    state: &mut SessionState,
    decisions: &mut dyn DecisionSource,
    spawner: &mut dyn ItemSpawner,
) -> TickOutcome {
    if !state.status.is_running() {
        return TickOutcome::Skipped(state.status);
    }

    let tick = state.tick.saturating_add(1);
    let grid = state.grid;
    let items = state.items;

    // --- Heads ---
    let player_heading = state.player.heading();
    let ai_heading = decisions.decide(&state.ai, &items, &grid);
    let player_head = grid.step(state.player.head(), player_heading);
    let ai_head = grid.step(state.ai.head(), ai_heading);

    // Lengths for the delayed win check.
    let player_len_before = state.player.len();
    let ai_len_before = state.ai.len();

    // --- Collisions ---
    if let Some(cause) = detect_collision(state, player_head, ai_head) {
        return finish(state, tick, cause);
    }

    // --- Advance ---
    state.player.advance(player_head);
    state.ai.advance(ai_head);
    state.ai.set_heading(ai_heading);

    // --- Consumption ---
    let player_ate = consume(&mut state.player, &items);
    let ai_ate = consume(&mut state.ai, &items);

    // --- Relocation ---
    let growth_respawned =
        player_ate == Some(ItemKind::Growth) || ai_ate == Some(ItemKind::Growth);
    // Treat contact is positional, even when growth decided the body change.
    let treat_respawned = player_head == items.treat || ai_head == items.treat;
    if growth_respawned {
        state.items.growth = spawner.spawn(&grid);
    }
    if treat_respawned {
        state.items.treat = spawner.spawn(&grid);
    }

    state.tick = tick;

    // --- Length win (start-of-tick lengths, player first) ---
    let contenders = [
        (state.player.role(), player_len_before),
        (state.ai.role(), ai_len_before),
    ];
    for (role, len_before) in contenders {
        if len_before >= state.winning_score {
            return finish_with(state, tick, Winner::from(role), GameOverCause::LengthThreshold);
        }
    }

    let summary = TickSummary {
        tick,
        player_length: state.player.len(),
        ai_length: state.ai.len(),
        ai_heading,
        player_ate,
        ai_ate,
        growth_respawned,
        treat_respawned,
    };
    debug!(
        tick,
        player_head = %player_head,
        ai_head = %ai_head,
        %ai_heading,
        player_length = summary.player_length,
        ai_length = summary.ai_length,
        player_ate = ?player_ate,
        ai_ate = ?ai_ate,
        "Tick resolved"
    );
    TickOutcome::Advanced(summary)
}

/// Check both prospective heads against the start-of-tick bodies.
///
/// Returns the highest-priority collision, if any.
fn detect_collision(
    state: &SessionState,
    player_head: Position,
    ai_head: Position,
) -> Option<GameOverCause> {
    let mutual = player_head == ai_head;
    let player_self = state.player.occupies(player_head);
    let ai_self = state.ai.occupies(ai_head);

    if mutual {
        Some(GameOverCause::MutualCollision)
    } else if player_self {
        Some(GameOverCause::PlayerSelfCollision)
    } else if ai_self {
        Some(GameOverCause::AiSelfCollision)
    } else {
        None
    }
}

/// Apply item effects to a chicken whose new head is already prepended.
fn consume(chicken: &mut Chicken, items: &ItemSet) -> Option<ItemKind> {
    let head = chicken.head();
    if head == items.growth {
        return Some(ItemKind::Growth);
    }
    if head == items.treat {
        if chicken.len() > TREAT_SHRINK_THRESHOLD {
            chicken.drop_tail();
        } else {
            chicken.truncate_to_head();
        }
        return Some(ItemKind::Treat);
    }
    chicken.drop_tail();
    None
}

/// Winner implied by a game-over cause, for every cause except a
/// length win.
const fn winner_for(cause: GameOverCause) -> Winner {
    match cause {
        GameOverCause::MutualCollision | GameOverCause::PlayerSelfCollision => Winner::Ai,
        GameOverCause::AiSelfCollision | GameOverCause::LengthThreshold => Winner::Player,
    }
}

fn finish(state: &mut SessionState, tick: u64, cause: GameOverCause) -> TickOutcome {
    finish_with(state, tick, winner_for(cause), cause)
}

fn finish_with(
    state: &mut SessionState,
    tick: u64,
    winner: Winner,
    cause: GameOverCause,
) -> TickOutcome {
    state.tick = tick;
    state.status = SessionStatus::GameOver { winner };
    info!(
        session_id = %state.id,
        tick,
        %winner,
        cause = ?cause,
        player_length = state.player.len(),
        ai_length = state.ai.len(),
        "Game over"
    );
    TickOutcome::GameOver(GameOverReport {
        tick,
        winner,
        cause,
    })
}
