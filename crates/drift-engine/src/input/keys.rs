//! Live set of currently-held keys.
//!
//! Key codes are the browser's numeric `KeyboardEvent.keyCode` values.
//! State is polled, never drained: a key held across ticks stays pressed
//! until its key-up arrives.

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct KeyState {
    pressed: HashSet<u32>,
    /// When set, presses of any other code are ignored.
    tracked: Option<HashSet<u32>>,
}

impl KeyState {
    /// Track every key code.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track only the given codes. An empty slice tracks every code.
    pub fn tracking(codes: &[u32]) -> Self {
        let tracked = if codes.is_empty() {
            None
        } else {
            Some(codes.iter().copied().collect())
        };
        Self {
            pressed: HashSet::new(),
            tracked,
        }
    }

    /// Whether presses of `key_code` are recorded.
    pub fn is_tracked(&self, key_code: u32) -> bool {
        self.tracked.as_ref().map_or(true, |t| t.contains(&key_code))
    }

    /// Mark a key as held. Returns `false` if the code is not tracked.
    pub fn press(&mut self, key_code: u32) -> bool {
        if !self.is_tracked(key_code) {
            return false;
        }
        self.pressed.insert(key_code);
        true
    }

    /// Mark a key as released. Releasing a key that is not held is a no-op.
    pub fn release(&mut self, key_code: u32) {
        self.pressed.remove(&key_code);
    }

    pub fn is_pressed(&self, key_code: u32) -> bool {
        self.pressed.contains(&key_code)
    }

    /// Number of keys currently held.
    pub fn pressed_count(&self) -> usize {
        self.pressed.len()
    }

    /// Release every key (e.g. when the page loses focus).
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}
