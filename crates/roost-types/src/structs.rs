//! Core value structs and the read-only snapshot handed to renderers.
//!
//! Snapshots are plain data: a renderer may copy, serialize or diff them,
//! but nothing it does to a snapshot flows back into the running session.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Heading, ItemKind, Role, SessionStatus};
use crate::ids::SessionId;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A cell on the board.
///
/// Coordinates inside a session always lie in `[0, grid_size)`. Raw,
/// unwrapped positions (one step past an edge) only exist transiently
/// inside the AI seek rule.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Column, growing to the right.
    pub x: i32,
    /// Row, growing downward.
    pub y: i32,
}

impl Position {
    /// Create a position from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Positions of the two special items.
///
/// Items may share a cell with each other or with a chicken body; spawning
/// does not avoid occupied cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ItemSet {
    /// The item that shrinks its eater.
    pub treat: Position,
    /// The item that grows its eater.
    pub growth: Position,
}

impl ItemSet {
    /// Position of the given item.
    pub const fn position(&self, kind: ItemKind) -> Position {
        match kind {
            ItemKind::Treat => self.treat,
            ItemKind::Growth => self.growth,
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Read-only view of one chicken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ChickenSnapshot {
    /// Which actor this is.
    pub role: Role,
    /// Occupied cells, head first. Never empty.
    pub body: Vec<Position>,
    /// Current heading (the pending one, for the player).
    pub heading: Heading,
}

impl ChickenSnapshot {
    /// The head cell, if the body is non-empty.
    pub fn head(&self) -> Option<Position> {
        self.body.first().copied()
    }

    /// Body length, which doubles as the score.
    pub fn length(&self) -> usize {
        self.body.len()
    }
}

/// Read-only view of a whole session, published once per tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SessionSnapshot {
    /// Identifier of the session this view was taken from.
    pub session_id: SessionId,
    /// Number of resolved ticks since the session started.
    pub tick: u64,
    /// Side length of the square toroidal board.
    pub grid_size: u32,
    /// The human-controlled chicken.
    pub player: ChickenSnapshot,
    /// The AI-controlled chicken.
    pub ai: ChickenSnapshot,
    /// Current item positions.
    pub items: ItemSet,
    /// Lifecycle state.
    pub status: SessionStatus,
}
