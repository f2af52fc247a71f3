//! Physics world management with Rapier3D.

use crate::collision::CollisionGroup;
use crate::events::ContactEvents;
use engine_core::{Transform, Vec3};
use rapier3d::na::{UnitQuaternion, Vector3};
use rapier3d::prelude::*;

/// Fixed physics sub-step, in seconds.
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
/// Most sub-steps consumed from one outer frame.
pub const MAX_SUBSTEPS: u32 = 3;

fn groups(pair: (Group, Group)) -> InteractionGroups {
    InteractionGroups::new(pair.0, pair.1)
}

/// Main physics world containing all simulation state.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,
    /// Contact starts buffered during `step`, drained once per tick.
    pub events: ContactEvents,
    /// Unconsumed frame time carried between frames.
    accumulator: f32,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create a new physics world with gravity pointing down at 9.82 m/s².
    pub fn new() -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = FIXED_TIMESTEP;
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: vector![0.0, -9.82, 0.0],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            events: ContactEvents::new(),
            accumulator: 0.0,
        }
    }

    /// Vertical gravity component.
    pub fn gravity_y(&self) -> f32 {
        self.gravity.y
    }

    /// Set the vertical gravity component (runtime gravity flipping).
    pub fn set_gravity_y(&mut self, y: f32) {
        self.gravity.y = y;
    }

    /// Consume `dt` seconds from the accumulator and return how many fixed
    /// sub-steps to run this frame (0..=[`MAX_SUBSTEPS`]). The accumulator
    /// is capped so a stall cannot schedule a catch-up burst.
    pub fn take_substeps(&mut self, dt: f32) -> u32 {
        let cap = FIXED_TIMESTEP * MAX_SUBSTEPS as f32;
        self.accumulator = (self.accumulator + dt).min(cap);
        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP && steps < MAX_SUBSTEPS {
            self.accumulator -= FIXED_TIMESTEP;
            steps += 1;
        }
        steps
    }

    /// Step the physics simulation by one fixed sub-step.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.events,
        );
    }

    /// Add a dynamic rigid body and return its handle.
    pub fn add_dynamic_body(&mut self, position: Vec3, mass: f32) -> RigidBodyHandle {
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y, position.z])
            .additional_mass(mass)
            .build();
        self.rigid_body_set.insert(rigid_body)
    }

    /// Add a kinematic rigid body (for scripted obstacles).
    pub fn add_kinematic_body(&mut self, position: Vec3) -> RigidBodyHandle {
        let rigid_body = RigidBodyBuilder::kinematic_position_based()
            .translation(vector![position.x, position.y, position.z])
            .build();
        self.rigid_body_set.insert(rigid_body)
    }

    /// Add a fixed rigid body (for trigger anchors).
    pub fn add_fixed_body(&mut self, position: Vec3) -> RigidBodyHandle {
        let rigid_body = RigidBodyBuilder::fixed()
            .translation(vector![position.x, position.y, position.z])
            .build();
        self.rigid_body_set.insert(rigid_body)
    }

    /// Add a box collider to a rigid body, in the given collision group.
    pub fn add_box_collider(
        &mut self,
        body_handle: RigidBodyHandle,
        half_extents: Vec3,
        group: (Group, Group),
        friction: f32,
        restitution: f32,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .collision_groups(groups(group))
            .friction(friction)
            .restitution(restitution)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        self.collider_set
            .insert_with_parent(collider, body_handle, &mut self.rigid_body_set)
    }

    /// Add a static cuboid collider with no parent body (room geometry).
    pub fn add_static_cuboid(&mut self, translation: Vec3, half_extents: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![translation.x, translation.y, translation.z])
            .collision_groups(groups(CollisionGroup::environment()))
            .build();
        self.collider_set.insert(collider)
    }

    /// Add a sensor ball attached to a body: detects overlap with the plane
    /// but produces no physical collision response (trigger volume).
    pub fn add_sensor_ball(&mut self, body_handle: RigidBodyHandle, radius: f32) -> ColliderHandle {
        let collider = ColliderBuilder::ball(radius)
            .sensor(true)
            .collision_groups(groups(CollisionGroup::pickup()))
            .build();
        self.collider_set
            .insert_with_parent(collider, body_handle, &mut self.rigid_body_set)
    }

    /// Get the transform of a rigid body.
    pub fn body_transform(&self, handle: RigidBodyHandle) -> Option<Transform> {
        self.rigid_body_set.get(handle).map(|body| {
            let pos = body.translation();
            let rot = body.rotation();
            Transform {
                position: Vec3::new(pos.x, pos.y, pos.z),
                rotation: glam::Quat::from_xyzw(rot.i, rot.j, rot.k, rot.w),
                scale: Vec3::ONE,
            }
        })
    }

    /// Get the linear velocity of a rigid body.
    pub fn body_velocity(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_body_set.get(handle).map(|body| {
            let v = body.linvel();
            Vec3::new(v.x, v.y, v.z)
        })
    }

    /// Set the linear velocity of a rigid body.
    pub fn set_body_velocity(&mut self, handle: RigidBodyHandle, velocity: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_linvel(vector![velocity.x, velocity.y, velocity.z], true);
        }
    }

    /// Teleport a dynamic body and zero its velocities (degenerate-state reset).
    pub fn reset_body(&mut self, handle: RigidBodyHandle, transform: Transform) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            log::debug!("resetting body {:?} to {:?}", handle, transform.position);
            body.set_translation(
                vector![
                    transform.position.x,
                    transform.position.y,
                    transform.position.z
                ],
                true,
            );
            let r = transform.rotation;
            body.set_rotation(
                UnitQuaternion::from_quaternion(rapier3d::na::Quaternion::new(r.w, r.x, r.y, r.z)),
                true,
            );
            body.set_linvel(vector![0.0, 0.0, 0.0], true);
            body.set_angvel(vector![0.0, 0.0, 0.0], true);
        }
    }

    /// Clear accumulated forces/torques, then apply fresh ones. Forces are
    /// re-applied each sub-step, never carried over.
    pub fn set_forces(&mut self, handle: RigidBodyHandle, force: Vec3, torque: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.reset_forces(true);
            body.reset_torques(true);
            body.add_force(vector![force.x, force.y, force.z], true);
            body.add_torque(vector![torque.x, torque.y, torque.z], true);
        }
    }

    /// Set the target position of a kinematic body for the next step.
    pub fn set_kinematic_position(&mut self, handle: RigidBodyHandle, position: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_next_kinematic_translation(vector![position.x, position.y, position.z]);
        }
    }

    /// Set the target yaw of a kinematic body for the next step.
    pub fn set_kinematic_yaw(&mut self, handle: RigidBodyHandle, yaw: f32) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_next_kinematic_rotation(UnitQuaternion::from_axis_angle(
                &Vector3::y_axis(),
                yaw,
            ));
        }
    }

    /// Remove a collider by its handle.
    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.collider_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.rigid_body_set,
            true,
        );
    }

    /// Remove a rigid body and its colliders.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }
}
