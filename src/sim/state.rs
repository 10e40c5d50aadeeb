//! Session state and entity types
//!
//! One `GameState` per playthrough; `start` replaces the session wholesale.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No session started yet
    Idle,
    /// Active gameplay
    Running,
    /// Advancement halted, state frozen in place
    Paused,
    /// Session ended by an obstacle hit; frozen until restart
    GameOver,
}

/// The player avatar
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub pos: Vec2,
    /// Vertical velocity, carried for the jump extension the space key
    /// reserves; current physics never reads it
    pub vel_y: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            vel_y: 0.0,
        }
    }
}

/// An axis-aligned box drifting in from the right
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// A point collectible worth a flat score bonus
#[derive(Debug, Clone, Copy)]
pub struct Collectible {
    pub pos: Vec2,
    /// Set on pickup; the item stays visible-inert for the rest of the frame
    /// and is culled on the next tick
    pub collected: bool,
}

/// Complete session state, owned and mutated only by the tick
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducible spawn sequences
    pub seed: u64,
    pub phase: GamePhase,
    pub player: Player,
    /// Spawn-ordered
    pub obstacles: Vec<Obstacle>,
    /// Spawn-ordered
    pub collectibles: Vec<Collectible>,
    pub score: u64,
    /// Simulation clock in seconds; advances only while Running
    pub time_secs: f32,
    pub last_obstacle_spawn: f32,
    pub last_collectible_spawn: f32,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Fresh idle state; nothing spawns or moves until `start`
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Idle,
            player: Player::default(),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            score: 0,
            time_secs: 0.0,
            last_obstacle_spawn: 0.0,
            last_collectible_spawn: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Begin a fresh session; valid from any phase
    pub fn start(&mut self, seed: u64) {
        *self = Self::new(seed);
        self.phase = GamePhase::Running;
    }

    /// Alias for `start`, the post-game-over affordance
    pub fn restart(&mut self, seed: u64) {
        self.start(seed);
    }

    /// Running → Paused; any other phase is a no-op
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
        }
    }

    /// Paused → Running; the simulation clock never saw the paused span, so
    /// spawn timers pick up exactly where they stopped
    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_resets_session() {
        let mut state = GameState::new(1);
        state.start(1);
        state.score = 700;
        state.obstacles.push(Obstacle {
            pos: Vec2::new(400.0, 200.0),
            size: Vec2::splat(OBSTACLE_SIZE),
        });
        state.collectibles.push(Collectible {
            pos: Vec2::new(400.0, 200.0),
            collected: false,
        });
        state.time_secs = 12.5;

        state.start(2);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert!(state.collectibles.is_empty());
        assert_eq!(state.player.pos, Vec2::new(PLAYER_START_X, PLAYER_START_Y));
        assert_eq!(state.time_secs, 0.0);
        assert!(state.is_playing());
        assert!(!state.is_game_over());
    }

    #[test]
    fn playing_and_game_over_are_exclusive() {
        let mut state = GameState::new(3);
        for phase in [
            GamePhase::Idle,
            GamePhase::Running,
            GamePhase::Paused,
            GamePhase::GameOver,
        ] {
            state.phase = phase;
            assert!(!(state.is_playing() && state.is_game_over()));
        }
    }

    #[test]
    fn pause_only_from_running() {
        let mut state = GameState::new(4);
        state.pause();
        assert_eq!(state.phase, GamePhase::Idle);

        state.start(4);
        state.pause();
        assert_eq!(state.phase, GamePhase::Paused);
        state.resume();
        assert_eq!(state.phase, GamePhase::Running);

        state.phase = GamePhase::GameOver;
        state.pause();
        assert_eq!(state.phase, GamePhase::GameOver);
        state.resume();
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn restart_leaves_game_over() {
        let mut state = GameState::new(5);
        state.start(5);
        state.phase = GamePhase::GameOver;
        state.restart(6);
        assert!(state.is_playing());
        assert_eq!(state.seed, 6);
    }
}
