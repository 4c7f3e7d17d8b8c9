//! Text board renderer.
//!
//! Draws a [`SessionSnapshot`] as a grid of characters followed by a status
//! line. Later layers overwrite earlier ones: items, then bodies, then
//! heads, with the player drawn over the AI.

use roost_types::{ItemKind, Position, SessionSnapshot};

const EMPTY: char = '.';
const TREAT: char = '-';
const GROWTH: char = '+';
const PLAYER_HEAD: char = 'P';
const PLAYER_BODY: char = 'p';
const AI_HEAD: char = 'A';
const AI_BODY: char = 'a';

/// Render the board and status line, newline-terminated.
pub fn render(snapshot: &SessionSnapshot) -> String {
    let mut out = render_board(snapshot);
    out.push_str(&status_line(snapshot));
    out.push('\n');
    out
}

/// Render only the board, one newline-terminated row per line.
pub fn render_board(snapshot: &SessionSnapshot) -> String {
    let size = usize::try_from(snapshot.grid_size).unwrap_or(0);
    let mut cells = vec![vec![EMPTY; size]; size];

    let mut put = |pos: Position, glyph: char| {
        let (Ok(x), Ok(y)) = (usize::try_from(pos.x), usize::try_from(pos.y)) else {
            return;
        };
        if let Some(cell) = cells.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = glyph;
        }
    };

    // Growth last, so it shows when both items share a cell.
    for (kind, glyph) in [(ItemKind::Treat, TREAT), (ItemKind::Growth, GROWTH)] {
        put(snapshot.items.position(kind), glyph);
    }
    for &cell in snapshot.ai.body.iter().skip(1) {
        put(cell, AI_BODY);
    }
    for &cell in snapshot.player.body.iter().skip(1) {
        put(cell, PLAYER_BODY);
    }
    if let Some(head) = snapshot.ai.head() {
        put(head, AI_HEAD);
    }
    if let Some(head) = snapshot.player.head() {
        put(head, PLAYER_HEAD);
    }

    let mut out = String::with_capacity(size.saturating_add(1).saturating_mul(size));
    for row in &cells {
        out.extend(row.iter());
        out.push('\n');
    }
    out
}

/// One-line summary of scores and lifecycle state.
pub fn status_line(snapshot: &SessionSnapshot) -> String {
    let state = snapshot.status.winner().map_or_else(
        || {
            if snapshot.status.is_running() {
                "running".to_owned()
            } else {
                "paused (r to resume)".to_owned()
            }
        },
        |winner| format!("game over: {winner} wins (n to restart)"),
    );
    format!(
        "tick {} | player {} | ai {} | {state}",
        snapshot.tick,
        snapshot.player.length(),
        snapshot.ai.length(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use roost_types::{ChickenSnapshot, Heading, ItemSet, Role, SessionId, SessionStatus, Winner};

    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn snapshot(grid_size: u32) -> SessionSnapshot {
        SessionSnapshot {
            session_id: SessionId::new(),
            tick: 4,
            grid_size,
            player: ChickenSnapshot {
                role: Role::Player,
                body: vec![p(2, 1), p(1, 1)],
                heading: Heading::Right,
            },
            ai: ChickenSnapshot {
                role: Role::Ai,
                body: vec![p(0, 3)],
                heading: Heading::Left,
            },
            items: ItemSet {
                treat: p(3, 0),
                growth: p(0, 0),
            },
            status: SessionStatus::Running,
        }
    }

    #[test]
    fn draws_every_layer() {
        let board = render_board(&snapshot(4));
        assert_eq!(board, "+..-\n.pP.\n....\nA...\n");
    }

    #[test]
    fn heads_cover_items() {
        let mut snap = snapshot(4);
        snap.items.growth = p(2, 1);
        let board = render_board(&snap);
        assert_eq!(board.lines().nth(1).unwrap(), ".pP.");
    }

    #[test]
    fn growth_covers_treat_on_shared_cell() {
        let mut snap = snapshot(4);
        snap.items.treat = p(0, 0);
        let board = render_board(&snap);
        assert!(board.starts_with("+..."));
        assert!(!board.contains(TREAT));
    }

    #[test]
    fn status_line_reports_scores_and_state() {
        let mut snap = snapshot(4);
        assert_eq!(status_line(&snap), "tick 4 | player 2 | ai 1 | running");

        snap.status = SessionStatus::Paused;
        assert!(status_line(&snap).ends_with("paused (r to resume)"));

        snap.status = SessionStatus::GameOver { winner: Winner::Ai };
        assert!(status_line(&snap).ends_with("game over: ai wins (n to restart)"));
    }

    #[test]
    fn full_render_has_board_then_status() {
        let text = render(&snapshot(3));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.last().unwrap().starts_with("tick 4"));
    }
}
