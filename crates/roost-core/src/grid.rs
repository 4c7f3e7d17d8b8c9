//! Toroidal grid geometry.
//!
//! The board is a square of side `N` whose edges wrap: stepping off the
//! right edge lands in column 0, stepping above row 0 lands in row `N - 1`.
//! Wrapping is `((c mod N) + N) mod N`, i.e. Euclidean remainder, applied to
//! each axis independently.

use roost_types::{Heading, Position};

/// Smallest accepted board side.
pub const MIN_GRID_SIZE: u32 = 2;

/// Largest accepted board side.
pub const MAX_GRID_SIZE: u32 = 1024;

/// Errors that can occur when constructing a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The requested side length is outside the supported range.
    #[error("invalid grid size {size}: must be between {min} and {max}")]
    InvalidSize {
        /// The rejected side length.
        size: u32,
        /// Smallest accepted side length.
        min: u32,
        /// Largest accepted side length.
        max: u32,
    },
}

/// A square toroidal board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    /// Side length, always in `MIN_GRID_SIZE..=MAX_GRID_SIZE`.
    size: i32,
}

impl Grid {
    /// Create a grid with the given side length.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidSize`] if `size` is outside
    /// [`MIN_GRID_SIZE`]`..=`[`MAX_GRID_SIZE`].
    pub fn new(size: u32) -> Result<Self, GridError> {
        let invalid = GridError::InvalidSize {
            size,
            min: MIN_GRID_SIZE,
            max: MAX_GRID_SIZE,
        };
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            return Err(invalid);
        }
        let size = i32::try_from(size).map_err(|_conversion| invalid)?;
        Ok(Self { size })
    }

    /// Side length of the board.
    pub const fn size(&self) -> i32 {
        self.size
    }

    /// Side length as an unsigned value.
    pub fn size_u32(&self) -> u32 {
        u32::try_from(self.size).unwrap_or(MAX_GRID_SIZE)
    }

    /// Wrap one coordinate into `[0, N)`.
    pub const fn wrap(&self, coord: i32) -> i32 {
        // `size` is never zero, so the remainder always exists.
        match coord.checked_rem_euclid(self.size) {
            Some(wrapped) => wrapped,
            None => 0,
        }
    }

    /// Wrap both coordinates of a position into the board.
    pub const fn wrap_position(&self, pos: Position) -> Position {
        Position::new(self.wrap(pos.x), self.wrap(pos.y))
    }

    /// One step from `pos` along `heading`, without wrap correction.
    ///
    /// The result may lie one cell outside the board.
    pub const fn step_unwrapped(pos: Position, heading: Heading) -> Position {
        let (dx, dy) = heading.vector();
        Position::new(pos.x.saturating_add(dx), pos.y.saturating_add(dy))
    }

    /// One step from `pos` along `heading`, wrapped onto the board.
    pub const fn step(&self, pos: Position, heading: Heading) -> Position {
        self.wrap_position(Self::step_unwrapped(pos, heading))
    }

    /// Whether `pos` lies on the board.
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.size && pos.y >= 0 && pos.y < self.size
    }
}
