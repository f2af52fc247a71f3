//! Input handling for keyboard, pointer, and touch/joystick axes.
//!
//! The simulation consumes three signals: a discrete gravity-flip trigger
//! and two held steering booleans. Keyboard and pointer events map onto
//! them directly; an analog axis (touch drag, joystick) maps onto the
//! steering booleans at a ±0.5 threshold.

use std::collections::HashSet;

/// Analog steer axis magnitude required before it counts as held steering.
pub const STEER_AXIS_THRESHOLD: f32 = 0.5;

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
    /// Keys released this frame.
    keys_released: HashSet<KeyCode>,

    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,
    /// Mouse buttons pressed this frame.
    mouse_pressed: HashSet<MouseButton>,

    /// A tap (touch start) happened this frame.
    tapped: bool,

    /// Latest analog steer axis in [-1, 1]; negative steers left.
    steer_axis: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.tapped = false;
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
                self.keys_released.insert(key);
            }
        }
    }

    /// Process a mouse button event.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.mouse_held.contains(&button) {
                    self.mouse_pressed.insert(button);
                }
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
            }
        }
    }

    /// Register a touch tap (counts as a flip trigger, like a click).
    pub fn process_tap(&mut self) {
        self.tapped = true;
    }

    /// Feed the analog steer axis (touch drag or joystick), in [-1, 1].
    pub fn set_steer_axis(&mut self, axis: f32) {
        self.steer_axis = axis.clamp(-1.0, 1.0);
    }

    // Query methods

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Gravity flip trigger: Space/ArrowUp press, any click, or a tap.
    pub fn is_flip_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Space)
            || self.is_key_pressed(KeyCode::ArrowUp)
            || !self.mouse_pressed.is_empty()
            || self.tapped
    }

    /// Steer-left held (ArrowLeft/A, or axis past the left threshold).
    pub fn is_steer_left(&self) -> bool {
        self.is_key_held(KeyCode::ArrowLeft)
            || self.is_key_held(KeyCode::KeyA)
            || self.steer_axis <= -STEER_AXIS_THRESHOLD
    }

    /// Steer-right held (ArrowRight/D, or axis past the right threshold).
    pub fn is_steer_right(&self) -> bool {
        self.is_key_held(KeyCode::ArrowRight)
            || self.is_key_held(KeyCode::KeyD)
            || self.steer_axis >= STEER_AXIS_THRESHOLD
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_fires_on_press_not_hold() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        assert!(input.is_flip_pressed());

        // Held across the next frame: no repeat trigger.
        input.begin_frame();
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        assert!(!input.is_flip_pressed());

        input.process_keyboard(KeyCode::Space, ElementState::Released);
        input.begin_frame();
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        assert!(input.is_flip_pressed());
    }

    #[test]
    fn click_and_tap_trigger_flip() {
        let mut input = InputState::new();
        input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(input.is_flip_pressed());

        input.begin_frame();
        input.process_tap();
        assert!(input.is_flip_pressed());
        input.begin_frame();
        assert!(!input.is_flip_pressed());
    }

    #[test]
    fn steer_axis_maps_at_half_threshold() {
        let mut input = InputState::new();
        input.set_steer_axis(-0.4);
        assert!(!input.is_steer_left());
        input.set_steer_axis(-0.5);
        assert!(input.is_steer_left());
        input.set_steer_axis(0.7);
        assert!(input.is_steer_right());
        assert!(!input.is_steer_left());
    }
}
