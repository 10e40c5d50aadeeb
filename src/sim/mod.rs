//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Delta-time advanced only while running (pause never leaks into timers)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::within_radius;
pub use state::{Collectible, GamePhase, GameState, Obstacle, Player};
pub use tick::tick;
