//! Tick engine, AI policy and session runner for the Roost chicken duel.
//!
//! Two chickens share a wrap-around square board. The player steers one,
//! a greedy policy steers the other, and every tick both move at once,
//! eat whatever they land on and race to the winning length.
//!
//! # Modules
//!
//! - [`grid`] -- Board geometry and toroidal wrapping.
//! - [`chicken`] -- Chicken bodies as head-first segment queues.
//! - [`spawner`] -- [`ItemSpawner`] trait and uniform [`RandomSpawner`].
//! - [`decision`] -- [`DecisionSource`] trait, the greedy AI policy and a
//!   fixed-heading source for scripted games.
//! - [`tick`] -- The per-tick step function: heads, collisions, advance,
//!   consumption, relocation and the length win.
//! - [`session`] -- [`GameSession`], the state holder adapters talk to.
//! - [`config`] -- Configuration loading from `roost-config.yaml` into
//!   strongly-typed structs.
//! - [`control`] -- Command channel and snapshot handle for a running
//!   session.
//! - [`runner`] -- The async timer loop that owns a session.
//!
//! [`ItemSpawner`]: spawner::ItemSpawner
//! [`RandomSpawner`]: spawner::RandomSpawner
//! [`DecisionSource`]: decision::DecisionSource
//! [`GameSession`]: session::GameSession

pub mod chicken;
pub mod config;
pub mod control;
pub mod decision;
pub mod grid;
pub mod runner;
pub mod session;
pub mod spawner;
pub mod tick;
