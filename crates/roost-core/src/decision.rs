//! AI heading policy and the decision-source seam.
//!
//! Each tick the Resolver asks a [`DecisionSource`] for the AI chicken's
//! next heading. The production source is [`GreedyPolicy`], a one-step
//! greedy heuristic with a random fallback:
//!
//! 1. **Seek** -- if a single unwrapped step in some direction lands exactly
//!    on the growth item, take it. Directions are tried in
//!    [`Heading::ALL`] order. Wrap-around shortcuts and the treat are
//!    ignored, and so is the AI's own body.
//! 2. **Avoid** -- keep the directions whose wrapped next cell is not part
//!    of the AI's current body.
//! 3. **Pick** -- choose uniformly among the safe directions.
//! 4. **Give up** -- if nothing is safe, choose uniformly among all four.
//!
//! [`FixedDecisionSource`] always answers with one heading and is used by
//! tests and scripted runs.

use rand::Rng;
use roost_types::{Heading, ItemSet};
use tracing::trace;

use crate::chicken::Chicken;
use crate::grid::Grid;

/// A source of AI headings.
pub trait DecisionSource {
    /// Choose the AI chicken's heading for the coming tick.
    ///
    /// Must always return one of the four headings; there is no "no move".
    fn decide(&mut self, ai: &Chicken, items: &ItemSet, grid: &Grid) -> Heading;
}

/// The greedy-plus-random AI policy.
#[derive(Debug, Clone)]
pub struct GreedyPolicy<R> {
    rng: R,
}

impl<R: Rng> GreedyPolicy<R> {
    /// Create a policy drawing from the given random source.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DecisionSource for GreedyPolicy<R> {
    fn decide(&mut self, ai: &Chicken, items: &ItemSet, grid: &Grid) -> Heading {
        decide_ai_heading(ai, items, grid, &mut self.rng)
    }
}

/// A decision source that always returns the same heading.
#[derive(Debug, Clone, Copy)]
pub struct FixedDecisionSource(pub Heading);

impl DecisionSource for FixedDecisionSource {
    fn decide(&mut self, _ai: &Chicken, _items: &ItemSet, _grid: &Grid) -> Heading {
        self.0
    }
}

/// Run the greedy policy once.
pub fn decide_ai_heading(
    ai: &Chicken,
    items: &ItemSet,
    grid: &Grid,
    rng: &mut impl Rng,
) -> Heading {
    if let Some(heading) = seek_growth(ai, items) {
        trace!(%heading, growth = %items.growth, "AI seeking growth item");
        return heading;
    }

    let safe = safe_headings(ai, grid);
    if let Some(heading) = pick(&safe, rng) {
        return heading;
    }

    trace!(head = %ai.head(), "AI trapped, picking any heading");
    pick(&Heading::ALL, rng).unwrap_or(ai.heading())
}

/// The first heading whose unwrapped step from the head lands on the
/// growth item, if any.
pub fn seek_growth(ai: &Chicken, items: &ItemSet) -> Option<Heading> {
    let head = ai.head();
    Heading::ALL
        .into_iter()
        .find(|&heading| Grid::step_unwrapped(head, heading) == items.growth)
}

/// Headings whose wrapped next cell is not on the chicken's current body.
pub fn safe_headings(chicken: &Chicken, grid: &Grid) -> Vec<Heading> {
    let head = chicken.head();
    Heading::ALL
        .into_iter()
        .filter(|&heading| !chicken.occupies(grid.step(head, heading)))
        .collect()
}

/// Uniform choice from a slice, `None` if it is empty.
fn pick(headings: &[Heading], rng: &mut impl Rng) -> Option<Heading> {
    if headings.is_empty() {
        return None;
    }
    let index = rng.random_range(0..headings.len());
    headings.get(index).copied()
}
