//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Wall-clock deltas come in as plain numbers, never read from the host
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, check_collisions};
pub use state::{GamePhase, GameSession, Obstacle, ObstacleId, SessionEvent};
pub use tick::{Command, handle_command, tick};
