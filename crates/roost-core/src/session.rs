//! Game session: the state holder that external adapters talk to.
//!
//! A [`GameSession`] owns the [`SessionState`], the AI decision source and
//! the item spawner. It is the only place the state is mutated: ticks go
//! through [`run_tick`], input through [`GameSession::set_human_heading`],
//! lifecycle changes through pause, resume and restart.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use roost_types::{Heading, Role, SessionId, SessionSnapshot, SessionStatus};
use tracing::{debug, info};

use crate::chicken::Chicken;
use crate::config::{RoostConfig, SpawnConfig};
use crate::decision::{DecisionSource, GreedyPolicy};
use crate::grid::{Grid, GridError};
use crate::spawner::{ItemSpawner, RandomSpawner};
use crate::tick::{SessionState, TickOutcome, run_tick};

/// Errors that can occur when building a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The configured grid is unusable.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: GridError,
    },
}

/// One game between the player and the AI.
pub struct GameSession {
    state: SessionState,
    spawn: SpawnConfig,
    decisions: Box<dyn DecisionSource + Send>,
    spawner: Box<dyn ItemSpawner + Send>,
}

impl core::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("spawn", &self.spawn)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Build a session with the greedy AI and uniform item spawns.
    ///
    /// With `game.seed` set, the whole game is reproducible for a given
    /// input sequence; otherwise randomness comes from the OS.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Grid`] if the grid size is out of range.
    pub fn new(config: &RoostConfig) -> Result<Self, SessionError> {
        let mut master = match config.game.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let policy = GreedyPolicy::new(SmallRng::from_rng(&mut master));
        let spawner = RandomSpawner::new(SmallRng::from_rng(&mut master));
        Self::with_sources(config, Box::new(policy), Box::new(spawner))
    }

    /// Build a session with explicit AI and spawn sources.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Grid`] if the grid size is out of range.
    pub fn with_sources(
        config: &RoostConfig,
        decisions: Box<dyn DecisionSource + Send>,
        mut spawner: Box<dyn ItemSpawner + Send>,
    ) -> Result<Self, SessionError> {
        let grid = Grid::new(config.game.grid_size)?;
        let winning_score = usize::try_from(config.game.winning_score).unwrap_or(usize::MAX);
        let state = initial_state(grid, &config.spawn, winning_score, spawner.as_mut());
        info!(
            session_id = %state.id,
            grid_size = config.game.grid_size,
            winning_score,
            "Session created"
        );
        Ok(Self {
            state,
            spawn: config.spawn.clone(),
            decisions,
            spawner,
        })
    }

    /// Request a new player heading for the next tick.
    ///
    /// A direct reversal of the current heading is ignored. Returns whether
    /// the heading was accepted. Later calls before the next tick overwrite
    /// earlier ones.
    pub fn set_human_heading(&mut self, heading: Heading) -> bool {
        let current = self.state.player.heading();
        if heading.is_reverse_of(current) {
            debug!(%heading, %current, "Reversal ignored");
            return false;
        }
        self.state.player.set_heading(heading);
        true
    }

    /// Advance the game by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        run_tick(
            &mut self.state,
            self.decisions.as_mut(),
            self.spawner.as_mut(),
        )
    }

    /// Pause a running game. Returns whether the state changed.
    pub fn pause(&mut self) -> bool {
        if self.state.status.is_running() {
            self.state.status = SessionStatus::Paused;
            info!(session_id = %self.state.id, tick = self.state.tick, "Session paused");
            true
        } else {
            false
        }
    }

    /// Resume a paused game. Returns whether the state changed.
    pub fn resume(&mut self) -> bool {
        if self.state.status == SessionStatus::Paused {
            self.state.status = SessionStatus::Running;
            info!(session_id = %self.state.id, tick = self.state.tick, "Session resumed");
            true
        } else {
            false
        }
    }

    /// Throw the current game away and start a fresh one.
    ///
    /// Valid from any state. The new game gets a new [`SessionId`], fresh
    /// chickens at their start cells and freshly spawned items.
    pub fn restart(&mut self) {
        let previous = self.state.id;
        self.state = initial_state(
            self.state.grid,
            &self.spawn,
            self.state.winning_score,
            self.spawner.as_mut(),
        );
        info!(previous = %previous, session_id = %self.state.id, "Session restarted");
    }

    /// Read-only view for renderers.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.state.id,
            tick: self.state.tick,
            grid_size: self.state.grid.size_u32(),
            player: self.state.player.to_snapshot(),
            ai: self.state.ai.to_snapshot(),
            items: self.state.items,
            status: self.state.status,
        }
    }

    /// Current lifecycle state.
    pub const fn status(&self) -> SessionStatus {
        self.state.status
    }

    /// The underlying state.
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Mutable access to the underlying state, for scripted setups.
    pub const fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }
}

/// The state every game starts from.
fn initial_state(
    grid: Grid,
    spawn: &SpawnConfig,
    winning_score: usize,
    spawner: &mut dyn ItemSpawner,
) -> SessionState {
    let player = Chicken::new(
        Role::Player,
        grid.wrap_position(spawn.player.position()),
        spawn.player.heading,
    );
    let ai = Chicken::new(
        Role::Ai,
        grid.wrap_position(spawn.ai.position()),
        spawn.ai.heading,
    );
    SessionState {
        id: SessionId::new(),
        grid,
        player,
        ai,
        items: spawner.spawn_items(&grid),
        status: SessionStatus::Running,
        tick: 0,
        winning_score,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use roost_types::{Position, Winner};

    use super::*;
    use crate::decision::FixedDecisionSource;

    fn seeded(seed: u64) -> GameSession {
        let mut config = RoostConfig::default();
        config.game.seed = Some(seed);
        GameSession::new(&config).unwrap()
    }

    #[test]
    fn initial_session_matches_defaults() {
        let session = seeded(1);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.player.body, vec![Position::new(7, 7)]);
        assert_eq!(snapshot.player.heading, Heading::Right);
        assert_eq!(snapshot.ai.body, vec![Position::new(3, 3)]);
        assert_eq!(snapshot.ai.heading, Heading::Left);
        assert_eq!(snapshot.status, SessionStatus::Running);
        assert_eq!(snapshot.tick, 0);
        assert_eq!(snapshot.grid_size, 15);
    }

    #[test]
    fn rejects_bad_grid() {
        let mut config = RoostConfig::default();
        config.game.grid_size = 0;
        assert!(matches!(
            GameSession::new(&config),
            Err(SessionError::Grid { .. })
        ));
    }

    #[test]
    fn reversal_is_ignored() {
        let mut session = seeded(1);
        assert!(!session.set_human_heading(Heading::Left));
        assert_eq!(session.snapshot().player.heading, Heading::Right);
        assert!(session.set_human_heading(Heading::Up));
        assert_eq!(session.snapshot().player.heading, Heading::Up);
    }

    #[test]
    fn last_write_wins_before_tick() {
        let mut session = seeded(1);
        assert!(session.set_human_heading(Heading::Up));
        assert!(session.set_human_heading(Heading::Right));
        assert_eq!(session.snapshot().player.heading, Heading::Right);
    }

    #[test]
    fn pause_and_resume_transitions() {
        let mut session = seeded(2);
        assert!(!session.resume());
        assert!(session.pause());
        assert!(!session.pause());
        assert_eq!(session.status(), SessionStatus::Paused);

        let before = session.snapshot();
        assert!(matches!(session.tick(), TickOutcome::Skipped(SessionStatus::Paused)));
        assert_eq!(session.snapshot(), before);

        assert!(session.resume());
        assert_eq!(session.status(), SessionStatus::Running);
    }

    #[test]
    fn pause_is_refused_after_game_over() {
        let mut session = seeded(3);
        session.state_mut().status = SessionStatus::GameOver { winner: Winner::Ai };
        assert!(!session.pause());
        assert!(!session.resume());
    }

    #[test]
    fn restart_resets_everything() {
        let mut session = seeded(4);
        let first_id = session.snapshot().session_id;
        for _ in 0..5 {
            let _ = session.tick();
        }
        session.state_mut().status = SessionStatus::GameOver { winner: Winner::Player };

        session.restart();

        let snapshot = session.snapshot();
        assert_ne!(snapshot.session_id, first_id);
        assert_eq!(snapshot.player.body, vec![Position::new(7, 7)]);
        assert_eq!(snapshot.player.heading, Heading::Right);
        assert_eq!(snapshot.ai.body, vec![Position::new(3, 3)]);
        assert_eq!(snapshot.ai.heading, Heading::Left);
        assert_eq!(snapshot.status, SessionStatus::Running);
        assert_eq!(snapshot.tick, 0);
    }

    #[test]
    fn start_cells_wrap_onto_small_grids() {
        let mut config = RoostConfig::default();
        config.game.grid_size = 5;
        let session = GameSession::with_sources(
            &config,
            Box::new(FixedDecisionSource(Heading::Left)),
            Box::new(RandomSpawner::new(SmallRng::seed_from_u64(5))),
        )
        .unwrap();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.player.body, vec![Position::new(2, 2)]);
        assert_eq!(snapshot.ai.body, vec![Position::new(3, 3)]);
    }

    #[test]
    fn same_seed_same_game() {
        let mut a = seeded(99);
        let mut b = seeded(99);
        for _ in 0..30 {
            assert_eq!(a.tick(), b.tick());
            let (sa, sb) = (a.snapshot(), b.snapshot());
            assert_eq!(sa.player, sb.player);
            assert_eq!(sa.ai, sb.ai);
            assert_eq!(sa.items, sb.items);
        }
    }
}
