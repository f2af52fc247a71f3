//! Gravity-flip state machine.
//!
//! A flip does not snap gravity to its new direction: the vertical
//! component eases toward the target over a short transition, and flip
//! requests arriving mid-transition are dropped.

/// Magnitude of gravity along the vertical axis, m/s².
pub const GRAVITY_ACCEL: f32 = 9.82;
/// Transition progress gained per second; a flip completes in 1/3 s.
pub const TRANSITION_RATE: f32 = 3.0;

/// Which way gravity currently pulls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityState {
    Down,
    Up,
}

/// Tracks the current gravity direction and the easing of a flip in flight.
#[derive(Debug)]
pub struct GravityFlip {
    /// +1 when gravity pulls down, -1 when it pulls up.
    direction: f32,
    /// Transition progress in [0, 1]; 1 means settled.
    progress: f32,
    transitioning: bool,
}

impl Default for GravityFlip {
    fn default() -> Self {
        Self::new()
    }
}

impl GravityFlip {
    pub fn new() -> Self {
        Self {
            direction: 1.0,
            progress: 1.0,
            transitioning: false,
        }
    }

    /// Request a flip. Returns false (and changes nothing) while a
    /// transition is still in progress.
    pub fn request_flip(&mut self) -> bool {
        if self.transitioning {
            return false;
        }
        self.direction = -self.direction;
        self.progress = 0.0;
        self.transitioning = true;
        true
    }

    pub fn state(&self) -> GravityState {
        if self.direction > 0.0 {
            GravityState::Down
        } else {
            GravityState::Up
        }
    }

    /// +1 for down, -1 for up. Lift flips with this sign so the plane
    /// keeps gliding toward the current "floor".
    pub fn direction_sign(&self) -> f32 {
        self.direction
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// The vertical gravity the transition is easing toward.
    pub fn target_gravity_y(&self) -> f32 {
        -GRAVITY_ACCEL * self.direction
    }

    /// Advance the transition by `dt` given the currently applied vertical
    /// gravity. Returns the gravity to apply this frame, or None when no
    /// transition is active.
    pub fn advance(&mut self, dt: f32, current_y: f32) -> Option<f32> {
        if !self.transitioning {
            return None;
        }
        self.progress = (self.progress + dt * TRANSITION_RATE).min(1.0);
        if self.progress >= 1.0 {
            self.transitioning = false;
        }
        let target = self.target_gravity_y();
        Some(current_y + (target - current_y) * self.progress)
    }
}
