//! The chicken: one actor's body and heading.
//!
//! A body is an ordered run of cells, head first. The Resolver grows a body
//! by prepending a new head with [`Chicken::advance`] and then decides,
//! based on what was eaten, whether to trim the tail. The chicken itself
//! never looks at items.

use std::collections::VecDeque;

use roost_types::{ChickenSnapshot, Heading, Position, Role};

/// One actor on the board.
///
/// Invariant: the body always holds at least one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chicken {
    role: Role,
    body: VecDeque<Position>,
    heading: Heading,
}

impl Chicken {
    /// Create a length-1 chicken at `start`.
    pub fn new(role: Role, start: Position, heading: Heading) -> Self {
        let mut body = VecDeque::with_capacity(8);
        body.push_back(start);
        Self {
            role,
            body,
            heading,
        }
    }

    /// Create a chicken from an explicit body, head first.
    ///
    /// Returns `None` if `body` is empty.
    pub fn from_body(
        role: Role,
        body: impl IntoIterator<Item = Position>,
        heading: Heading,
    ) -> Option<Self> {
        let body: VecDeque<Position> = body.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self {
            role,
            body,
            heading,
        })
    }

    /// Which actor this is.
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Current heading.
    pub const fn heading(&self) -> Heading {
        self.heading
    }

    /// Overwrite the heading. Reversal checks belong to the caller.
    pub const fn set_heading(&mut self, heading: Heading) {
        self.heading = heading;
    }

    /// The head cell.
    pub fn head(&self) -> Position {
        // The body is never empty; the fallback is unreachable in practice.
        self.body.front().copied().unwrap_or_default()
    }

    /// Body length, which doubles as the score.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always `false`; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterate over the body, head first.
    pub fn body(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Whether any segment of the body sits on `pos`.
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Prepend `new_head`, leaving the tail untouched.
    ///
    /// The caller guarantees `new_head` is already wrapped onto the board.
    pub fn advance(&mut self, new_head: Position) {
        self.body.push_front(new_head);
    }

    /// Remove the last segment, keeping at least the head.
    pub fn drop_tail(&mut self) {
        if self.body.len() > 1 {
            let _ = self.body.pop_back();
        }
    }

    /// Cut the body down to just the head.
    pub fn truncate_to_head(&mut self) {
        self.body.truncate(1);
    }

    /// Read-only view for renderers.
    pub fn to_snapshot(&self) -> ChickenSnapshot {
        ChickenSnapshot {
            role: self.role,
            body: self.body().collect(),
            heading: self.heading,
        }
    }
}
