//! Distance-based hit tests
//!
//! Both the losing check (player vs obstacle center) and the pickup check
//! (player vs collectible point) are plain center-distance circles, which
//! gives the generous arcade feel the game is tuned around.

use glam::Vec2;

/// True when `a` and `b` are strictly closer than `radius`
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::HIT_RADIUS;

    #[test]
    fn inside_radius_hits() {
        let player = Vec2::new(400.0, 300.0);
        let center = Vec2::new(430.0, 300.0);
        assert!(within_radius(player, center, HIT_RADIUS));
    }

    #[test]
    fn exact_radius_is_a_miss() {
        // The threshold is strict: distance == radius does not collide
        let player = Vec2::new(400.0, 300.0);
        let center = Vec2::new(440.0, 300.0);
        assert!(!within_radius(player, center, HIT_RADIUS));
    }

    #[test]
    fn diagonal_distance_is_euclidean() {
        let player = Vec2::ZERO;
        // 3-4-5 triangle scaled to distance 50
        let center = Vec2::new(30.0, 40.0);
        assert!(!within_radius(player, center, HIT_RADIUS));
        assert!(within_radius(player, center, 50.1));
    }

    #[test]
    fn coincident_points_hit() {
        let p = Vec2::new(123.0, 456.0);
        assert!(within_radius(p, p, HIT_RADIUS));
    }
}
