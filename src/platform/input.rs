//! Input collection
//!
//! Browsers deliver key events; the simulation wants a level-triggered
//! snapshot once per frame. `KeyState` sits in between.

use std::collections::HashMap;

use crate::sim::TickInput;

/// Anything that can produce this frame's input snapshot
pub trait InputSource {
    fn sample(&mut self) -> TickInput;
}

/// A fixed snapshot (held forever)
impl InputSource for TickInput {
    fn sample(&mut self) -> TickInput {
        *self
    }
}

/// Scripted input, e.g. an autopilot or a test sequence
impl<F: FnMut() -> TickInput> InputSource for F {
    fn sample(&mut self) -> TickInput {
        self()
    }
}

/// Game action a key maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Shoot,
}

/// Map a `KeyboardEvent.key` value to an action
pub fn action_for_key(key: &str) -> Option<Action> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Action::Left),
        "ArrowRight" | "d" | "D" => Some(Action::Right),
        " " | "Spacebar" => Some(Action::Shoot),
        _ => None,
    }
}

/// Fold a key value so press and release match across Shift/Caps Lock
fn fold_key(key: &str) -> String {
    if key.chars().count() == 1 {
        key.to_lowercase()
    } else {
        key.to_string()
    }
}

/// Currently held keys and the action each one drives
#[derive(Debug, Default, Clone)]
pub struct KeyState {
    held: HashMap<String, Action>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keydown. Returns true if the key maps to a game action.
    pub fn key_down(&mut self, key: &str) -> bool {
        let Some(action) = action_for_key(key) else {
            return false;
        };
        self.held.insert(fold_key(key), action);
        true
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.held.remove(&fold_key(key)).is_some()
    }

    /// Forget everything (window lost focus, keyups will never arrive)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    fn is_active(&self, action: Action) -> bool {
        self.held.values().any(|held| *held == action)
    }

    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.is_active(Action::Left),
            right: self.is_active(Action::Right),
            shoot: self.is_active(Action::Shoot),
        }
    }
}

impl InputSource for KeyState {
    fn sample(&mut self) -> TickInput {
        self.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(action_for_key("ArrowLeft"), Some(Action::Left));
        assert_eq!(action_for_key("d"), Some(Action::Right));
        assert_eq!(action_for_key(" "), Some(Action::Shoot));
        assert_eq!(action_for_key("Enter"), None);
    }

    #[test]
    fn test_held_keys_are_level_triggered() {
        let mut keys = KeyState::new();
        assert!(keys.key_down(" "));
        // Holding keeps reporting shoot every frame
        assert!(keys.sample().shoot);
        assert!(keys.sample().shoot);
        keys.key_up(" ");
        assert!(!keys.sample().shoot);
    }

    #[test]
    fn test_two_keys_same_action() {
        let mut keys = KeyState::new();
        keys.key_down("ArrowLeft");
        keys.key_down("a");
        keys.key_up("ArrowLeft");
        // "a" is still down
        assert!(keys.snapshot().left);
        keys.key_up("a");
        assert!(!keys.snapshot().left);
    }

    #[test]
    fn test_release_with_shift_changed_case() {
        let mut keys = KeyState::new();
        keys.key_down("a");
        // Shift pressed while holding: the keyup reports "A"
        assert!(keys.key_up("A"));
        assert!(!keys.snapshot().left);

        keys.key_down("D");
        assert!(keys.key_up("d"));
        assert_eq!(keys.snapshot(), TickInput::default());
    }

    #[test]
    fn test_named_keys_not_folded() {
        let mut keys = KeyState::new();
        keys.key_down("ArrowRight");
        assert!(!keys.key_up("arrowright"));
        assert!(keys.snapshot().right);
        assert!(keys.key_up("ArrowRight"));
    }

    #[test]
    fn test_unmapped_keys_ignored() {
        let mut keys = KeyState::new();
        assert!(!keys.key_down("Escape"));
        assert_eq!(keys.snapshot(), TickInput::default());
    }

    #[test]
    fn test_release_all() {
        let mut keys = KeyState::new();
        keys.key_down("ArrowRight");
        keys.key_down(" ");
        keys.release_all();
        assert_eq!(keys.snapshot(), TickInput::default());
    }

    #[test]
    fn test_closure_source() {
        let mut frame = 0;
        let mut source = move || {
            frame += 1;
            TickInput {
                shoot: frame % 2 == 0,
                ..Default::default()
            }
        };
        assert!(!source.sample().shoot);
        assert!(source.sample().shoot);
    }
}
