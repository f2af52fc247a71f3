//! Time management for the game loop.

use std::time::{Duration, Instant};

/// Longest frame delta fed into the simulation, in seconds. A 5 second
/// hitch is processed as one 0.1 s frame rather than a physics explosion.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Manages frame timing, delta clamping, and a windowed FPS counter.
#[derive(Debug)]
pub struct Time {
    /// Time when the engine started.
    start_time: Instant,
    /// Time of the last frame.
    last_frame: Instant,
    /// Duration of the last frame.
    delta: Duration,
    /// Total elapsed time since start.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
    /// Frames accumulated in the current FPS window.
    fps_frames: u32,
    /// Seconds accumulated in the current FPS window.
    fps_window: f32,
    /// FPS measured over the last completed one-second window.
    fps: f32,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_frame: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            fps_frames: 0,
            fps_window: 0.0,
            fps: 0.0,
        }
    }

    /// Update timing at the start of a new frame.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_frame;
        self.last_frame = now;
        self.elapsed = now - self.start_time;
        self.frame_count += 1;
        self.advance_fps_window(self.delta.as_secs_f32());
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Delta time clamped to [`MAX_FRAME_DELTA`]. Simulation consumers use
    /// this; the raw delta stays available for wall-clock bookkeeping.
    pub fn clamped_delta(&self) -> f32 {
        self.delta.as_secs_f32().min(MAX_FRAME_DELTA)
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// FPS averaged over the last one-second window.
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Feed one frame of `dt` seconds into the FPS window. Split out so the
    /// counter can be driven by synthetic deltas in tests.
    pub fn advance_fps_window(&mut self, dt: f32) {
        self.fps_frames += 1;
        self.fps_window += dt;
        if self.fps_window >= 1.0 {
            self.fps = self.fps_frames as f32 / self.fps_window;
            self.fps_frames = 0;
            self.fps_window = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_delta_caps_long_frames() {
        let mut time = Time::new();
        time.delta = Duration::from_secs_f32(5.0);
        assert_eq!(time.clamped_delta(), MAX_FRAME_DELTA);
        time.delta = Duration::from_secs_f32(0.016);
        assert!((time.clamped_delta() - 0.016).abs() < 1e-6);
    }

    #[test]
    fn fps_window_averages_one_second() {
        let mut time = Time::new();
        // 60 frames of 1/60 s fill exactly one window.
        for _ in 0..60 {
            time.advance_fps_window(1.0 / 60.0);
        }
        assert!((time.fps() - 60.0).abs() < 0.5);
    }
}
