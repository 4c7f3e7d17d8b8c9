//! Shared type definitions for the Roost chicken duel.
//!
//! This crate holds the value types that cross the boundary between the
//! simulation core and whatever renders it. Types flow downstream to
//! `TypeScript` via `ts-rs` for browser renderers.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for session identifiers
//! - [`enums`] -- Headings, roles, winners, item kinds, session status
//! - [`structs`] -- Positions, item sets and session snapshots

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Heading, ItemKind, Role, SessionStatus, Winner};
pub use ids::SessionId;
pub use structs::{ChickenSnapshot, ItemSet, Position, SessionSnapshot};
