//! Item spawning.
//!
//! Items land uniformly at random anywhere on the board. Occupied cells are
//! not excluded: an item may appear under a chicken or on top of the other
//! item.

use rand::Rng;
use roost_types::{ItemSet, Position};

use crate::grid::Grid;

/// A source of item positions.
///
/// The Resolver calls [`spawn`](ItemSpawner::spawn) once for every item it
/// needs to relocate. Implementations must be callable indefinitely.
pub trait ItemSpawner {
    /// Produce a position with both coordinates in `[0, grid.size())`.
    fn spawn(&mut self, grid: &Grid) -> Position;

    /// Produce a fresh item set (treat first, then growth).
    fn spawn_items(&mut self, grid: &Grid) -> ItemSet {
        let treat = self.spawn(grid);
        let growth = self.spawn(grid);
        ItemSet { treat, growth }
    }
}

/// Uniform random spawner backed by any [`Rng`].
#[derive(Debug, Clone)]
pub struct RandomSpawner<R> {
    rng: R,
}

impl<R: Rng> RandomSpawner<R> {
    /// Wrap a random source.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> ItemSpawner for RandomSpawner<R> {
    fn spawn(&mut self, grid: &Grid) -> Position {
        let size = grid.size();
        Position::new(
            self.rng.random_range(0..size),
            self.rng.random_range(0..size),
        )
    }
}
