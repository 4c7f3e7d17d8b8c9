//! Enumeration types for the Roost chicken duel.
//!
//! Headings, actor roles, winners, item kinds and the session state machine.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Heading
// ---------------------------------------------------------------------------

/// One of the four cardinal movement directions.
///
/// Screen coordinates: `y` grows downward, so [`Heading::Up`] is `(0, -1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Heading {
    /// Toward row 0.
    Up,
    /// Toward the last row.
    Down,
    /// Toward column 0.
    Left,
    /// Toward the last column.
    Right,
}

impl Heading {
    /// All four headings in evaluation order.
    ///
    /// The AI seek rule returns the first match in this order, so it is
    /// part of observable behavior.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit vector `(dx, dy)` for this heading.
    pub const fn vector(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// The heading pointing the other way.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether `self` is the direct reversal of `current`.
    pub fn is_reverse_of(self, current: Self) -> bool {
        self == current.opposite()
    }
}

impl core::fmt::Display for Heading {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Roles and winners
// ---------------------------------------------------------------------------

/// Which actor a chicken is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Role {
    /// Steered by external (human) input.
    Player,
    /// Steered by the AI policy.
    Ai,
}

/// The side that won a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Winner {
    /// The human-controlled chicken won.
    Player,
    /// The AI-controlled chicken won.
    Ai,
}

impl From<Role> for Winner {
    fn from(role: Role) -> Self {
        match role {
            Role::Player => Self::Player,
            Role::Ai => Self::Ai,
        }
    }
}

impl core::fmt::Display for Winner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Player => f.write_str("player"),
            Self::Ai => f.write_str("ai"),
        }
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// The two special items on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ItemKind {
    /// Shrinks the chicken that eats it.
    Treat,
    /// Grows the chicken that eats it by one segment.
    Growth,
}

// ---------------------------------------------------------------------------
// Session state machine
// ---------------------------------------------------------------------------

/// Lifecycle state of a game session.
///
/// ```text
/// Running --tick--> Running | GameOver
/// Running --pause--> Paused --resume--> Running
/// any --restart--> Running
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(tag = "state", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum SessionStatus {
    /// Ticks are being processed.
    Running,
    /// Ticks are ignored until resumed.
    Paused,
    /// The game has ended; only restart leaves this state.
    GameOver {
        /// Who won.
        winner: Winner,
    },
}

impl SessionStatus {
    /// Whether ticks are processed in this state.
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    /// Whether the game has ended.
    pub const fn is_over(self) -> bool {
        matches!(self, Self::GameOver { .. })
    }

    /// The winner, if the game has ended.
    pub const fn winner(self) -> Option<Winner> {
        match self {
            Self::GameOver { winner } => Some(winner),
            Self::Running | Self::Paused => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involution() {
        for heading in Heading::ALL {
            assert_eq!(heading.opposite().opposite(), heading);
            assert_ne!(heading.opposite(), heading);
        }
    }

    #[test]
    fn vectors_are_unit_and_cancel() {
        for heading in Heading::ALL {
            let (dx, dy) = heading.vector();
            let (ox, oy) = heading.opposite().vector();
            assert_eq!(dx.abs() + dy.abs(), 1);
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn reversal_detection() {
        assert!(Heading::Left.is_reverse_of(Heading::Right));
        assert!(Heading::Up.is_reverse_of(Heading::Down));
        assert!(!Heading::Up.is_reverse_of(Heading::Left));
        assert!(!Heading::Up.is_reverse_of(Heading::Up));
    }

    #[test]
    fn heading_serializes_snake_case() {
        let json = serde_json::to_string(&Heading::Right).ok();
        assert_eq!(json.as_deref(), Some("\"right\""));
    }

    #[test]
    fn status_serializes_with_tag() {
        let status = SessionStatus::GameOver {
            winner: Winner::Ai,
        };
        let json = serde_json::to_value(status).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({ "state": "game_over", "winner": "ai" }))
        );
    }

    #[test]
    fn status_queries() {
        assert!(SessionStatus::Running.is_running());
        assert!(!SessionStatus::Paused.is_running());
        assert!(!SessionStatus::Paused.is_over());
        let over = SessionStatus::GameOver {
            winner: Winner::Player,
        };
        assert!(over.is_over());
        assert_eq!(over.winner(), Some(Winner::Player));
        assert_eq!(SessionStatus::Running.winner(), None);
    }

    #[test]
    fn winner_from_role() {
        assert_eq!(Winner::from(Role::Player), Winner::Player);
        assert_eq!(Winner::from(Role::Ai), Winner::Ai);
    }
}
