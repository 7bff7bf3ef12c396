//! Keyboard state adapter
//!
//! Collects key events between ticks and turns them into a [`TickInput`]
//! snapshot. Keys are identified by their `KeyboardEvent.code` strings.

use std::collections::HashSet;

use crate::sim::TickInput;

const LEFT: &[&str] = &["ArrowLeft", "KeyA"];
const RIGHT: &[&str] = &["ArrowRight", "KeyD"];
const UP: &[&str] = &["ArrowUp", "KeyW"];
const DOWN: &[&str] = &["ArrowDown", "KeyS"];
const JUMP: &[&str] = &["Space", "ArrowUp", "KeyW"];
const FIRE: &[&str] = &["KeyJ", "KeyZ"];
const RESTART: &str = "KeyR";
const CONFIRM: &str = "Enter";

/// Held keys plus keys pressed since the last tick
#[derive(Debug, Default, Clone)]
pub struct InputState {
    held: HashSet<String>,
    just_pressed: HashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Auto-repeat of a held key is not a new press.
    pub fn key_down(&mut self, code: &str) {
        if self.held.insert(code.to_string()) {
            self.just_pressed.insert(code.to_string());
        }
    }

    pub fn key_up(&mut self, code: &str) {
        self.held.remove(code);
    }

    /// Release everything, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.held.clear();
        self.just_pressed.clear();
    }

    pub fn is_down(&self, code: &str) -> bool {
        self.held.contains(code)
    }

    /// Pressed since the last `end_tick`
    pub fn just_pressed(&self, code: &str) -> bool {
        self.just_pressed.contains(code)
    }

    fn any_down(&self, codes: &[&str]) -> bool {
        codes.iter().any(|c| self.is_down(c))
    }

    /// -1 left, 1 right, 0 for none or both
    pub fn axis_x(&self) -> i8 {
        self.any_down(RIGHT) as i8 - self.any_down(LEFT) as i8
    }

    /// -1 up, 1 down, 0 for none or both
    pub fn axis_y(&self) -> i8 {
        self.any_down(DOWN) as i8 - self.any_down(UP) as i8
    }

    /// Input for the next simulation tick
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            axis_x: self.axis_x(),
            axis_y: self.axis_y(),
            jump: self.any_down(JUMP),
            fire: self.any_down(FIRE),
            restart: self.just_pressed(RESTART),
            confirm: self.just_pressed(CONFIRM),
        }
    }

    /// Forget edge-triggered presses once a tick has consumed them
    pub fn end_tick(&mut self) {
        self.just_pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_from_held_keys() {
        let mut input = InputState::new();
        assert_eq!(input.axis_x(), 0);

        input.key_down("ArrowLeft");
        assert_eq!(input.axis_x(), -1);

        input.key_down("KeyD");
        assert_eq!(input.axis_x(), 0);

        input.key_up("ArrowLeft");
        assert_eq!(input.axis_x(), 1);
    }

    #[test]
    fn test_restart_is_edge_triggered_for_single_tick() {
        let mut input = InputState::new();
        input.key_down("KeyR");

        assert!(input.snapshot().restart);
        input.end_tick();
        // Still held, but no longer a fresh press
        assert!(!input.snapshot().restart);
    }

    #[test]
    fn test_autorepeat_does_not_retrigger() {
        let mut input = InputState::new();
        input.key_down("Enter");
        input.end_tick();
        input.key_down("Enter");
        assert!(!input.snapshot().confirm);

        input.key_up("Enter");
        input.key_down("Enter");
        assert!(input.snapshot().confirm);
    }

    #[test]
    fn test_fire_and_jump_are_level_triggered() {
        let mut input = InputState::new();
        input.key_down("Space");
        input.key_down("KeyJ");
        input.end_tick();

        let snapshot = input.snapshot();
        assert!(snapshot.jump);
        assert!(snapshot.fire);
        assert_eq!(snapshot.axis_y, 0);
    }

    #[test]
    fn test_release_all() {
        let mut input = InputState::new();
        input.key_down("ArrowRight");
        input.key_down("KeyR");
        input.release_all();
        assert_eq!(input.snapshot(), TickInput::default());
    }
}
