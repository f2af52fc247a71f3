//! Read-only snapshot of run state for HUD and logging.

use crate::gravity::GravityState;

/// One frame's worth of displayable run state.
#[derive(Debug, Clone, Copy)]
pub struct GameStats {
    pub score: u32,
    /// Best distance reached this run, in meters.
    pub distance: f32,
    pub combo: u32,
    pub gravity: GravityState,
    pub has_shield: bool,
    pub high_score: u32,
    pub fps: f32,
}
