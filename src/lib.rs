//! Dodge Dash - a dodge-and-collect canvas arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, session phase)
//! - `render`: Canvas-2D renderer, a pure read of simulation state (wasm only)
//! - `input`: Held-key tracking, sampled by the simulation each tick
//! - `assets`: Async image loading with per-asset failure tolerance
//! - `highscores`: Bridge to the external high-score service

pub mod assets;
pub mod highscores;
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod sim;

pub use highscores::ScoreBridge;
pub use input::{Key, KeySet};
pub use sim::{GamePhase, GameState, tick};

/// Game configuration constants
pub mod consts {
    /// Default timestep, matching the 60 Hz display cadence the per-frame
    /// unit deltas were tuned against
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Logical canvas size
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player movement bounds, inset from the canvas edges
    pub const PLAYER_MIN_X: f32 = 32.0;
    pub const PLAYER_MAX_X: f32 = 768.0;
    pub const PLAYER_MIN_Y: f32 = 32.0;
    pub const PLAYER_MAX_Y: f32 = 568.0;

    /// Player start position (centered-left)
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 300.0;

    /// Player speed (5 units per 60 Hz frame)
    pub const PLAYER_SPEED: f32 = 300.0;

    /// Obstacle spawn interval, drift speed (3 units per frame), box size,
    /// and the off-screen cull line
    pub const OBSTACLE_SPAWN_SECS: f32 = 2.0;
    pub const OBSTACLE_SPEED: f32 = 180.0;
    pub const OBSTACLE_SIZE: f32 = 60.0;
    pub const OBSTACLE_CULL_X: f32 = -100.0;

    /// Collectible spawn interval, drift speed (2 units per frame), cull line
    pub const COLLECTIBLE_SPAWN_SECS: f32 = 3.0;
    pub const COLLECTIBLE_SPEED: f32 = 120.0;
    pub const COLLECTIBLE_CULL_X: f32 = -50.0;

    /// Vertical range entities spawn in
    pub const SPAWN_MIN_Y: f32 = 50.0;
    pub const SPAWN_MAX_Y: f32 = 550.0;

    /// Center-distance thresholds for losing and for collecting
    pub const HIT_RADIUS: f32 = 40.0;
    pub const COLLECT_RADIUS: f32 = 40.0;

    /// Points per collectible (flat, non-scaling)
    pub const COLLECT_POINTS: u64 = 100;
}
