//! Held-key tracking
//!
//! DOM key handlers mutate a `KeySet`; the simulation samples it read-only
//! once per tick, decoupled from the event cadence. Pausing freezes the
//! simulation without clearing the set, so movement continues seamlessly on
//! resume.

/// Recognized keys. Space is tracked but unused by current physics; it is
/// reserved for the jump extension alongside `Player::vel_y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
}

impl Key {
    /// Map a DOM `KeyboardEvent::key` value; anything else is ignored and
    /// keeps its default browser handling
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            " " => Some(Key::Space),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Key::Up => 1 << 0,
            Key::Down => 1 << 1,
            Key::Left => 1 << 2,
            Key::Right => 1 << 3,
            Key::Space => 1 << 4,
        }
    }
}

/// Set of currently-held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySet {
    bits: u8,
}

impl KeySet {
    /// Add a key; repeats from key auto-repeat are idempotent
    pub fn press(&mut self, key: Key) {
        self.bits |= key.bit();
    }

    /// Remove a key; releasing an unheld key is a no-op
    pub fn release(&mut self, key: Key) {
        self.bits &= !key.bit();
    }

    pub fn held(&self, key: Key) -> bool {
        self.bits & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_idempotent() {
        let mut keys = KeySet::default();
        keys.press(Key::Left);
        keys.press(Key::Left);
        assert!(keys.held(Key::Left));
        keys.release(Key::Left);
        assert!(!keys.held(Key::Left));
        assert!(keys.is_empty());
    }

    #[test]
    fn release_of_unheld_key_is_a_no_op() {
        let mut keys = KeySet::default();
        keys.press(Key::Up);
        keys.release(Key::Down);
        assert!(keys.held(Key::Up));
        assert!(!keys.held(Key::Down));
    }

    #[test]
    fn keys_track_independently() {
        let mut keys = KeySet::default();
        keys.press(Key::Left);
        keys.press(Key::Right);
        keys.press(Key::Space);
        assert!(keys.held(Key::Left));
        assert!(keys.held(Key::Right));
        assert!(keys.held(Key::Space));
        keys.release(Key::Right);
        assert!(keys.held(Key::Left));
        assert!(!keys.held(Key::Right));
    }

    #[test]
    fn dom_mapping_recognizes_exactly_five_keys() {
        assert_eq!(Key::from_dom_key("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::from_dom_key("ArrowDown"), Some(Key::Down));
        assert_eq!(Key::from_dom_key("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_dom_key("ArrowRight"), Some(Key::Right));
        assert_eq!(Key::from_dom_key(" "), Some(Key::Space));
        assert_eq!(Key::from_dom_key("Enter"), None);
        assert_eq!(Key::from_dom_key("w"), None);
        assert_eq!(Key::from_dom_key(""), None);
    }
}
