//! Chase camera that smoothly tracks the plane.

use glam::{Mat4, Vec3};

/// Per-frame exponential smoothing factor toward the follow target.
pub const FOLLOW_SMOOTHING: f32 = 0.1;

/// Third-person chase camera with configurable FOV and clipping planes.
#[derive(Debug, Clone)]
pub struct ChaseCamera {
    /// Current camera position.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Offset from the followed body to the desired camera position.
    pub offset: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
}

impl Default for ChaseCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 5.0, 10.0),
            target: Vec3::ZERO,
            offset: Vec3::new(0.0, 5.0, 10.0),
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl ChaseCamera {
    /// Create a camera following at the given offset.
    pub fn with_offset(offset: Vec3) -> Self {
        Self {
            position: offset,
            offset,
            ..Default::default()
        }
    }

    /// Update aspect ratio (call on window resize).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Ease toward `followed + offset` and look at the followed point.
    pub fn follow(&mut self, followed: Vec3) {
        self.position = self.position.lerp(followed + self.offset, FOLLOW_SMOOTHING);
        self.target = followed;
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
