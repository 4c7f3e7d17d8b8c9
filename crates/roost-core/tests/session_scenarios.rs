//! End-to-end scenarios driven through the public [`GameSession`] API.
//!
//! Each test builds a session with scripted item spawns where exact item
//! positions matter, sets up the board through `state_mut`, and then only
//! uses the operations an adapter would: heading input, ticks, pause,
//! resume and restart.

#![allow(clippy::unwrap_used, clippy::panic, clippy::arithmetic_side_effects)]

use std::collections::VecDeque;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use roost_core::chicken::Chicken;
use roost_core::config::RoostConfig;
use roost_core::decision::FixedDecisionSource;
use roost_core::grid::Grid;
use roost_core::session::GameSession;
use roost_core::spawner::ItemSpawner;
use roost_core::tick::{GameOverCause, TickOutcome};
use roost_types::{Heading, ItemKind, ItemSet, Position, Role, SessionStatus, Winner};

/// Hands out queued positions, then a fixed corner cell forever.
struct Script(VecDeque<Position>);

impl Script {
    fn boxed(positions: &[Position]) -> Box<Self> {
        Box::new(Self(positions.iter().copied().collect()))
    }
}

impl ItemSpawner for Script {
    fn spawn(&mut self, _grid: &Grid) -> Position {
        self.0.pop_front().unwrap_or(Position::new(14, 14))
    }
}

fn p(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

/// Session whose AI always walks `ai_heading` and whose first items are the
/// given treat and growth.
fn scripted(ai_heading: Heading, treat: Position, growth: Position, rest: &[Position]) -> GameSession {
    let mut queue = vec![treat, growth];
    queue.extend_from_slice(rest);
    GameSession::with_sources(
        &RoostConfig::default(),
        Box::new(FixedDecisionSource(ai_heading)),
        Script::boxed(&queue),
    )
    .unwrap()
}

fn summary(outcome: TickOutcome) -> roost_core::tick::TickSummary {
    match outcome {
        TickOutcome::Advanced(summary) => summary,
        other => panic!("expected an advanced tick, got {other:?}"),
    }
}

#[test]
fn bodies_and_items_stay_on_board_over_long_play() {
    let mut config = RoostConfig::default();
    config.game.seed = Some(2024);
    config.game.grid_size = 9;
    let mut session = GameSession::new(&config).unwrap();
    let grid = Grid::new(9).unwrap();
    let mut input = SmallRng::seed_from_u64(7);
    let mut games = 0;

    for _ in 0..3_000 {
        let heading = *Heading::ALL.choose(&mut input).unwrap();
        let _ = session.set_human_heading(heading);
        if session.tick().game_over().is_some() {
            games += 1;
            session.restart();
        }

        let snapshot = session.snapshot();
        for cell in snapshot.player.body.iter().chain(&snapshot.ai.body) {
            assert!(grid.contains(*cell), "{cell} left the board");
        }
        assert!(grid.contains(snapshot.items.treat));
        assert!(grid.contains(snapshot.items.growth));
        assert!(snapshot.player.length() >= 1);
        assert!(snapshot.ai.length() >= 1);
    }
    assert!(games > 0, "random play on a 9x9 board should end some games");
}

#[test]
fn wrapped_heads_meeting_hand_the_win_to_the_ai() {
    let mut session = scripted(Heading::Left, p(5, 12), p(6, 12), &[]);
    let state = session.state_mut();
    state.player = Chicken::new(Role::Player, p(14, 7), Heading::Right);
    state.ai = Chicken::new(Role::Ai, p(1, 7), Heading::Left);

    let outcome = session.tick();
    let report = outcome.game_over().copied().unwrap();
    assert_eq!(report.winner, Winner::Ai);
    assert_eq!(report.cause, GameOverCause::MutualCollision);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.status, SessionStatus::GameOver { winner: Winner::Ai });
    assert_eq!(snapshot.player.body, vec![p(14, 7)]);
    assert_eq!(snapshot.ai.body, vec![p(1, 7)]);
}

#[test]
fn winning_length_is_acted_on_one_tick_late() {
    let mut session = scripted(Heading::Left, p(0, 14), p(8, 7), &[p(0, 13)]);
    let rest = (0..48).map(|i| p(i % 15, i / 15));
    let body = std::iter::once(p(7, 7)).chain(rest);
    let state = session.state_mut();
    state.player = Chicken::from_body(Role::Player, body, Heading::Right).unwrap();
    state.ai = Chicken::new(Role::Ai, p(10, 12), Heading::Left);

    let first = summary(session.tick());
    assert_eq!(first.player_ate, Some(ItemKind::Growth));
    assert_eq!(first.player_length, 50);
    assert_eq!(session.status(), SessionStatus::Running);

    let report = session.tick().game_over().copied().unwrap();
    assert_eq!(report.winner, Winner::Player);
    assert_eq!(report.cause, GameOverCause::LengthThreshold);
    assert_eq!(report.tick, 2);
}

#[test]
fn growth_adds_a_segment_and_respawns() {
    let mut session = scripted(Heading::Left, p(0, 14), p(8, 7), &[p(2, 2)]);

    let outcome = summary(session.tick());
    assert_eq!(outcome.player_ate, Some(ItemKind::Growth));
    assert!(outcome.growth_respawned);
    assert!(!outcome.treat_respawned);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.player.body, vec![p(8, 7), p(7, 7)]);
    assert_eq!(snapshot.items, ItemSet { treat: p(0, 14), growth: p(2, 2) });
}

#[test]
fn shared_item_cell_grows_and_moves_both_items() {
    let mut session = scripted(Heading::Left, p(8, 7), p(8, 7), &[p(10, 10), p(11, 11)]);

    let outcome = summary(session.tick());
    assert_eq!(outcome.player_ate, Some(ItemKind::Growth));
    assert!(outcome.growth_respawned);
    assert!(outcome.treat_respawned);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.player.body, vec![p(8, 7), p(7, 7)]);
    assert_eq!(snapshot.items, ItemSet { treat: p(11, 11), growth: p(10, 10) });
}

#[test]
fn treat_on_a_short_body_cuts_back_to_the_head() {
    let mut session = scripted(Heading::Left, p(9, 7), p(0, 14), &[]);
    let state = session.state_mut();
    state.player =
        Chicken::from_body(Role::Player, [p(8, 7), p(7, 7)], Heading::Right).unwrap();

    let outcome = summary(session.tick());
    assert_eq!(outcome.player_ate, Some(ItemKind::Treat));
    assert_eq!(session.snapshot().player.body, vec![p(9, 7)]);
}

#[test]
fn treat_on_a_long_body_keeps_its_length() {
    let mut session = scripted(Heading::Left, p(9, 7), p(0, 14), &[]);
    let body = [p(8, 7), p(7, 7), p(6, 7), p(5, 7), p(4, 7)];
    session.state_mut().player = Chicken::from_body(Role::Player, body, Heading::Right).unwrap();

    let outcome = summary(session.tick());
    assert_eq!(outcome.player_ate, Some(ItemKind::Treat));
    assert_eq!(
        session.snapshot().player.body,
        vec![p(9, 7), p(8, 7), p(7, 7), p(6, 7), p(5, 7)]
    );
}

#[test]
fn greedy_ai_takes_an_adjacent_growth_item() {
    let mut config = RoostConfig::default();
    config.game.seed = Some(11);
    let mut session = GameSession::new(&config).unwrap();
    session.state_mut().items = ItemSet { treat: p(12, 12), growth: p(3, 4) };

    let outcome = summary(session.tick());
    assert_eq!(outcome.ai_heading, Heading::Down);
    assert_eq!(outcome.ai_ate, Some(ItemKind::Growth));
    assert_eq!(session.snapshot().ai.body, vec![p(3, 4), p(3, 3)]);
}

#[test]
fn paused_session_ignores_ticks_and_keeps_input() {
    let mut session = scripted(Heading::Left, p(0, 14), p(0, 13), &[]);
    assert!(session.pause());
    assert!(session.set_human_heading(Heading::Down));

    let before = session.snapshot();
    for _ in 0..5 {
        assert!(matches!(session.tick(), TickOutcome::Skipped(SessionStatus::Paused)));
    }
    assert_eq!(session.snapshot(), before);

    assert!(session.resume());
    let _ = summary(session.tick());
    assert_eq!(session.snapshot().player.head(), Some(p(7, 8)));
}

#[test]
fn restart_twice_gives_equivalent_fresh_games() {
    let mut session = scripted(Heading::Left, p(0, 14), p(0, 13), &[]);
    for _ in 0..4 {
        let _ = session.tick();
    }

    session.restart();
    let first = session.snapshot();
    session.restart();
    let second = session.snapshot();

    assert_ne!(first.session_id, second.session_id);
    for snapshot in [&first, &second] {
        assert_eq!(snapshot.tick, 0);
        assert_eq!(snapshot.status, SessionStatus::Running);
        assert_eq!(snapshot.player.body, vec![p(7, 7)]);
        assert_eq!(snapshot.player.heading, Heading::Right);
        assert_eq!(snapshot.ai.body, vec![p(3, 3)]);
        assert_eq!(snapshot.ai.heading, Heading::Left);
    }
}

#[test]
fn game_over_is_terminal_until_restart() {
    let mut session = scripted(Heading::Left, p(5, 12), p(6, 12), &[]);
    let state = session.state_mut();
    state.player = Chicken::new(Role::Player, p(14, 7), Heading::Right);
    state.ai = Chicken::new(Role::Ai, p(1, 7), Heading::Left);
    assert!(session.tick().game_over().is_some());

    let frozen = session.snapshot();
    assert!(matches!(session.tick(), TickOutcome::Skipped(SessionStatus::GameOver { .. })));
    assert!(!session.pause());
    assert_eq!(session.snapshot(), frozen);

    session.restart();
    assert_eq!(session.status(), SessionStatus::Running);
}
