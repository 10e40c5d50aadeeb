//! Per-frame simulation update
//!
//! Advances one session by `dt` seconds. The order within a tick is fixed:
//! movement, obstacle spawn/advance, collectible spawn/advance, obstacle hit
//! check, pickup check. Movement and advancement are committed before the hit
//! check, so the game-over frame keeps the positions that caused it.

use glam::Vec2;
use rand::Rng;

use super::collision::within_radius;
use super::state::{Collectible, GamePhase, GameState, Obstacle};
use crate::consts::*;
use crate::input::{Key, KeySet};

/// Advance the session by one tick; a no-op outside the Running phase
pub fn tick(state: &mut GameState, keys: &KeySet, dt: f32) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_secs += dt;

    // Keys apply in the fixed order Left, Right, Up, Down; holding an
    // opposing pair cancels exactly, except at a field edge where the
    // later-applied key wins
    let step = PLAYER_SPEED * dt;
    let player = &mut state.player;
    if keys.held(Key::Left) {
        player.pos.x = (player.pos.x - step).max(PLAYER_MIN_X);
    }
    if keys.held(Key::Right) {
        player.pos.x = (player.pos.x + step).min(PLAYER_MAX_X);
    }
    if keys.held(Key::Up) {
        player.pos.y = (player.pos.y - step).max(PLAYER_MIN_Y);
    }
    if keys.held(Key::Down) {
        player.pos.y = (player.pos.y + step).min(PLAYER_MAX_Y);
    }

    // Spawn timers compare against the simulation clock, which stands still
    // while paused, so resume never triggers a spawn burst
    if state.time_secs - state.last_obstacle_spawn >= OBSTACLE_SPAWN_SECS {
        let y = state.rng.random_range(SPAWN_MIN_Y..=SPAWN_MAX_Y);
        state.obstacles.push(Obstacle {
            pos: Vec2::new(FIELD_WIDTH, y),
            size: Vec2::splat(OBSTACLE_SIZE),
        });
        state.last_obstacle_spawn = state.time_secs;
    }

    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= OBSTACLE_SPEED * dt;
    }
    state.obstacles.retain(|o| o.pos.x > OBSTACLE_CULL_X);

    if state.time_secs - state.last_collectible_spawn >= COLLECTIBLE_SPAWN_SECS {
        let y = state.rng.random_range(SPAWN_MIN_Y..=SPAWN_MAX_Y);
        state.collectibles.push(Collectible {
            pos: Vec2::new(FIELD_WIDTH, y),
            collected: false,
        });
        state.last_collectible_spawn = state.time_secs;
    }

    for collectible in &mut state.collectibles {
        collectible.pos.x -= COLLECTIBLE_SPEED * dt;
    }
    // Items flagged on a previous tick leave here, together with anything
    // that drifted off the field
    state
        .collectibles
        .retain(|c| c.pos.x > COLLECTIBLE_CULL_X && !c.collected);

    // A hit ends the session immediately; no pickup is scored on this tick
    let player_pos = state.player.pos;
    for obstacle in &state.obstacles {
        if within_radius(player_pos, obstacle.center(), HIT_RADIUS) {
            state.phase = GamePhase::GameOver;
            return;
        }
    }

    for collectible in &mut state.collectibles {
        if !collectible.collected && within_radius(player_pos, collectible.pos, COLLECT_RADIUS) {
            collectible.collected = true;
            state.score += COLLECT_POINTS;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start(seed);
        state
    }

    /// Tick with no keys held for roughly `secs` of simulated time
    fn idle_for(state: &mut GameState, secs: f32) {
        let keys = KeySet::default();
        let frames = (secs / FRAME_DT).ceil() as u32;
        for _ in 0..frames {
            tick(state, &keys, FRAME_DT);
        }
    }

    #[test]
    fn nothing_happens_before_start() {
        let mut state = GameState::new(1);
        idle_for(&mut state, 5.0);
        assert!(state.obstacles.is_empty());
        assert!(state.collectibles.is_empty());
        assert_eq!(state.time_secs, 0.0);
    }

    #[test]
    fn first_obstacle_spawns_after_two_seconds_at_right_edge() {
        let mut state = running(7);
        idle_for(&mut state, 1.9);
        assert!(state.obstacles.is_empty());

        let keys = KeySet::default();
        let mut frames = 0;
        while state.obstacles.is_empty() {
            tick(&mut state, &keys, FRAME_DT);
            frames += 1;
            assert!(frames < 20, "obstacle should spawn once the clock hits 2s");
        }
        assert!(state.time_secs >= OBSTACLE_SPAWN_SECS);
        assert_eq!(state.obstacles.len(), 1);
        // Spawned at the right edge and advanced once within the same tick
        let obstacle = &state.obstacles[0];
        assert!((obstacle.pos.x - (FIELD_WIDTH - OBSTACLE_SPEED * FRAME_DT)).abs() < 1e-3);
        assert!(obstacle.pos.y >= SPAWN_MIN_Y && obstacle.pos.y <= SPAWN_MAX_Y);
        assert_eq!(obstacle.size, Vec2::splat(OBSTACLE_SIZE));
    }

    #[test]
    fn first_collectible_spawns_after_three_seconds() {
        let mut state = running(7);
        idle_for(&mut state, 2.9);
        assert!(state.collectibles.is_empty());

        idle_for(&mut state, 0.2);
        assert_eq!(state.collectibles.len(), 1);
        assert!(!state.collectibles[0].collected);
    }

    #[test]
    fn obstacles_drift_left_and_cull_off_screen() {
        let mut state = running(11);
        state.obstacles.push(Obstacle {
            pos: Vec2::new(OBSTACLE_CULL_X + 1.0, 500.0),
            size: Vec2::splat(OBSTACLE_SIZE),
        });
        tick(&mut state, &KeySet::default(), FRAME_DT);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn overlap_collects_and_scores_flat_hundred() {
        let mut state = running(13);
        let player_pos = state.player.pos;
        // Place the point so it lands exactly on the player after one frame
        state.collectibles.push(Collectible {
            pos: player_pos + Vec2::new(COLLECTIBLE_SPEED * FRAME_DT, 0.0),
            collected: false,
        });

        tick(&mut state, &KeySet::default(), FRAME_DT);
        assert_eq!(state.score, COLLECT_POINTS);
        assert_eq!(state.collectibles.len(), 1);
        assert!(state.collectibles[0].collected);

        // The flagged item is inert and leaves on the following tick
        tick(&mut state, &KeySet::default(), FRAME_DT);
        assert_eq!(state.score, COLLECT_POINTS);
        assert!(state.collectibles.is_empty());
    }

    #[test]
    fn proximity_to_obstacle_ends_the_session() {
        let mut state = running(17);
        let player_pos = state.player.pos;
        // Center within the hit radius after one frame of drift
        state.obstacles.push(Obstacle {
            pos: player_pos - Vec2::splat(OBSTACLE_SIZE / 2.0)
                + Vec2::new(10.0 + OBSTACLE_SPEED * FRAME_DT, 0.0),
            size: Vec2::splat(OBSTACLE_SIZE),
        });

        tick(&mut state, &KeySet::default(), FRAME_DT);
        assert!(state.is_game_over());
        assert!(!state.is_playing());
    }

    #[test]
    fn game_over_freezes_the_session_until_restart() {
        let mut state = running(19);
        state.phase = GamePhase::GameOver;
        let before_player = state.player.pos;
        let before_score = state.score;

        let mut keys = KeySet::default();
        keys.press(Key::Right);
        idle_for(&mut state, 3.0);
        tick(&mut state, &keys, FRAME_DT);

        assert_eq!(state.player.pos, before_player);
        assert_eq!(state.score, before_score);
        assert!(state.obstacles.is_empty());
        assert!(state.collectibles.is_empty());

        state.restart(20);
        assert!(state.is_playing());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn paused_ticks_neither_advance_nor_burst_on_resume() {
        let mut state = running(23);
        idle_for(&mut state, 1.0);
        state.pause();

        // A long paused stretch of frame callbacks changes nothing
        idle_for(&mut state, 30.0);
        assert_eq!(state.obstacles.len(), 0);
        assert!((state.time_secs - 1.0).abs() < FRAME_DT * 2.0);

        // After resume the original interval keeps counting from 1.0s
        state.resume();
        idle_for(&mut state, 0.5);
        assert!(state.obstacles.is_empty());
        idle_for(&mut state, 0.6);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn opposing_keys_cancel_mid_field() {
        let mut state = running(29);
        let mut keys = KeySet::default();
        keys.press(Key::Left);
        keys.press(Key::Right);
        let before = state.player.pos;
        tick(&mut state, &keys, FRAME_DT);
        assert_eq!(state.player.pos, before);
    }

    #[test]
    fn opposing_keys_at_left_edge_favor_the_later_key() {
        let mut state = running(31);
        state.player.pos.x = PLAYER_MIN_X;
        let mut keys = KeySet::default();
        keys.press(Key::Left);
        keys.press(Key::Right);
        tick(&mut state, &keys, FRAME_DT);
        // Left clamps in place, then Right moves a full step
        assert!((state.player.pos.x - (PLAYER_MIN_X + PLAYER_SPEED * FRAME_DT)).abs() < 1e-3);
    }

    #[test]
    fn held_left_never_escapes_the_field() {
        let mut state = running(37);
        let mut keys = KeySet::default();
        keys.press(Key::Left);
        for _ in 0..600 {
            tick(&mut state, &keys, FRAME_DT);
            if !state.is_playing() {
                break;
            }
            assert!(state.player.pos.x >= PLAYER_MIN_X);
        }
    }

    fn key_combo() -> impl Strategy<Value = KeySet> {
        proptest::bits::u8::between(0, 5).prop_map(|bits| {
            let mut keys = KeySet::default();
            for (i, key) in [Key::Up, Key::Down, Key::Left, Key::Right, Key::Space]
                .into_iter()
                .enumerate()
            {
                if bits & (1 << i) != 0 {
                    keys.press(key);
                }
            }
            keys
        })
    }

    proptest! {
        #[test]
        fn player_stays_in_bounds(combos in proptest::collection::vec(key_combo(), 1..240), seed in 0u64..1000) {
            let mut state = running(seed);
            for keys in &combos {
                tick(&mut state, keys, FRAME_DT);
                prop_assert!(state.player.pos.x >= PLAYER_MIN_X);
                prop_assert!(state.player.pos.x <= PLAYER_MAX_X);
                prop_assert!(state.player.pos.y >= PLAYER_MIN_Y);
                prop_assert!(state.player.pos.y <= PLAYER_MAX_Y);
            }
        }

        #[test]
        fn score_never_decreases(combos in proptest::collection::vec(key_combo(), 1..240), seed in 0u64..1000) {
            let mut state = running(seed);
            let mut last_score = state.score;
            for keys in &combos {
                tick(&mut state, keys, FRAME_DT);
                prop_assert!(state.score >= last_score);
                prop_assert_eq!((state.score - last_score) % COLLECT_POINTS, 0);
                last_score = state.score;
            }
        }

        #[test]
        fn same_seed_same_spawns(seed in 0u64..1000) {
            let mut a = running(seed);
            let mut b = running(seed);
            let keys = KeySet::default();
            for _ in 0..300 {
                tick(&mut a, &keys, FRAME_DT);
                tick(&mut b, &keys, FRAME_DT);
            }
            prop_assert_eq!(a.obstacles.len(), b.obstacles.len());
            for (oa, ob) in a.obstacles.iter().zip(&b.obstacles) {
                prop_assert_eq!(oa.pos, ob.pos);
            }
        }
    }
}
