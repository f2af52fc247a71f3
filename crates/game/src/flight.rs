//! Paper-plane flight model.
//!
//! Forces are recomputed from scratch every physics sub-step: forward
//! propulsion always, plus speed-dependent lift, drag, and steering torque
//! once the plane is actually moving.

use engine_core::Vec3;
use physics::{PhysicsWorld, RigidBodyHandle};

/// Baseline forward propulsion, in newtons.
pub const PROPULSION_FORCE: f32 = 0.5;
/// Below this speed, lift, drag, and steering are inert.
pub const SPEED_THRESHOLD: f32 = 0.1;
/// Lift scales with speed squared.
pub const LIFT_COEFFICIENT: f32 = 0.02;
/// Drag scales with speed squared, opposing velocity.
pub const DRAG_COEFFICIENT: f32 = 0.015;
/// Roll torque applied while steering, in newton-meters.
pub const STEER_TORQUE: f32 = 0.3;

/// Steering held this frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct SteerInput {
    pub left: bool,
    pub right: bool,
}

/// Propulsion multiplier at a given best distance. Ratchets up 10% per
/// 100 m and never decreases within a run (distance is monotonic).
pub fn difficulty_multiplier(distance: f32) -> f32 {
    1.0 + (distance / 100.0).floor() * 0.1
}

/// Compute and install this sub-step's forces on the plane body.
pub fn apply_forces(
    physics: &mut PhysicsWorld,
    plane: RigidBodyHandle,
    steer: SteerInput,
    gravity_sign: f32,
    distance: f32,
) {
    let Some(velocity) = physics.body_velocity(plane) else {
        return;
    };
    let speed = velocity.length();

    let mut force = Vec3::new(0.0, 0.0, PROPULSION_FORCE * difficulty_multiplier(distance));
    let mut torque = Vec3::ZERO;

    if speed > SPEED_THRESHOLD {
        // Lift pushes toward the current ceiling-or-floor, following gravity.
        force.y += speed * speed * LIFT_COEFFICIENT * gravity_sign;
        // Drag: magnitude speed² x coefficient, opposing velocity.
        force += velocity * (-speed * DRAG_COEFFICIENT);
        if steer.left {
            torque.z += STEER_TORQUE;
        }
        if steer.right {
            torque.z -= STEER_TORQUE;
        }
    }

    physics.set_forces(plane, force, torque);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_ratchets_every_hundred_meters() {
        assert!((difficulty_multiplier(0.0) - 1.0).abs() < 1e-6);
        assert!((difficulty_multiplier(99.9) - 1.0).abs() < 1e-6);
        assert!((difficulty_multiplier(100.0) - 1.1).abs() < 1e-6);
        assert!((difficulty_multiplier(250.0) - 1.2).abs() < 1e-6);
        assert!((difficulty_multiplier(1000.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn propulsion_accelerates_a_resting_plane_forward() {
        let mut world = PhysicsWorld::new();
        world.set_gravity_y(0.0);
        let plane = world.add_dynamic_body(Vec3::ZERO, 0.1);
        apply_forces(&mut world, plane, SteerInput::default(), 1.0, 0.0);
        world.step();
        let v = world.body_velocity(plane).unwrap();
        assert!(v.z > 0.0, "propulsion must push along +Z, got {:?}", v);
        // Below the speed threshold there is no lift.
        assert!(v.y.abs() < 1e-4);
    }

    #[test]
    fn lift_follows_the_gravity_sign() {
        for sign in [1.0f32, -1.0] {
            let mut world = PhysicsWorld::new();
            world.set_gravity_y(0.0);
            let plane = world.add_dynamic_body(Vec3::ZERO, 0.1);
            // Get the plane moving well past the threshold first.
            world.set_body_velocity(plane, Vec3::new(0.0, 0.0, 5.0));
            apply_forces(&mut world, plane, SteerInput::default(), sign, 0.0);
            world.step();
            let v = world.body_velocity(plane).unwrap();
            assert!(
                v.y * sign > 0.0,
                "lift should push with gravity sign {}, got {:?}",
                sign,
                v
            );
        }
    }

    #[test]
    fn drag_opposes_velocity() {
        let mut world = PhysicsWorld::new();
        world.set_gravity_y(0.0);
        let plane = world.add_dynamic_body(Vec3::ZERO, 0.1);
        world.set_body_velocity(plane, Vec3::new(4.0, 0.0, 0.0));
        apply_forces(&mut world, plane, SteerInput::default(), 1.0, 0.0);
        world.step();
        let v = world.body_velocity(plane).unwrap();
        assert!(v.x < 4.0, "drag must slow lateral motion, got {:?}", v);
    }
}
