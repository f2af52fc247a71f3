//! Short-lived particle bursts for collects and crashes.
//!
//! Particles live entirely outside the physics world: plain entities with
//! a velocity, a lifetime, and a scene node, integrated by hand each frame.

use engine_core::{Lifetime, Transform, Vec3, Velocity, World};
use rand::Rng;
use scene::{NodeId, Primitive, SceneGraph};

/// Tag component for burst particles.
pub struct Particle;

/// Particles spawned by a crash burst.
pub const CRASH_BURST_COUNT: usize = 24;
/// Particles spawned when a pickup is collected.
pub const COLLECT_BURST_COUNT: usize = 10;

const PARTICLE_DRAG: f32 = 2.0;
const PARTICLE_GRAVITY: f32 = 3.0;

/// Spawn a radial burst of particles at `origin`.
pub fn spawn_burst(
    world: &mut World,
    scene: &mut SceneGraph,
    origin: Vec3,
    color: [f32; 3],
    count: usize,
) {
    let mut rng = rand::thread_rng();
    for _ in 0..count {
        let direction = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        )
        .normalize_or_zero();
        let speed = rng.gen_range(2.0..8.0);
        let radius = rng.gen_range(0.08..0.2);
        let lifetime = rng.gen_range(0.4..1.2);

        let node = scene.acquire(
            Primitive::Ball { radius },
            color,
            Transform::from_position(origin),
        );
        world.spawn((
            Particle,
            Transform::from_position(origin),
            Velocity::new(direction * speed),
            Lifetime::new(lifetime),
            node,
        ));
    }
}

/// Integrate particle motion, mirror it into the scene, and cull the dead.
pub fn update(world: &mut World, scene: &mut SceneGraph, dt: f32) {
    let mut dead = Vec::new();
    for (entity, (_, transform, velocity, lifetime, node)) in world.query_mut::<(
        &Particle,
        &mut Transform,
        &mut Velocity,
        &mut Lifetime,
        &NodeId,
    )>() {
        velocity.linear *= 1.0 - (PARTICLE_DRAG * dt).min(1.0);
        velocity.linear.y -= PARTICLE_GRAVITY * dt;
        transform.position += velocity.linear * dt;
        scene.set_transform(*node, *transform);
        if lifetime.update(dt) {
            dead.push((entity, *node));
        }
    }
    for (entity, node) in dead {
        scene.release(node);
        let _ = world.despawn(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_spawns_entities_and_nodes() {
        let mut world = World::new();
        let mut scene = SceneGraph::new();
        spawn_burst(&mut world, &mut scene, Vec3::ZERO, [1.0, 0.5, 0.0], 12);
        assert_eq!(world.query::<&Particle>().iter().count(), 12);
        assert_eq!(scene.len(), 12);
    }

    #[test]
    fn particles_expire_and_release_their_nodes() {
        let mut world = World::new();
        let mut scene = SceneGraph::new();
        spawn_burst(&mut world, &mut scene, Vec3::ZERO, [1.0, 1.0, 1.0], 8);
        // Longest possible lifetime is 1.2 s.
        for _ in 0..200 {
            update(&mut world, &mut scene, 1.0 / 60.0);
        }
        assert_eq!(world.query::<&Particle>().iter().count(), 0);
        assert!(scene.is_empty());
    }

    #[test]
    fn particles_drift_from_their_origin() {
        let mut world = World::new();
        let mut scene = SceneGraph::new();
        let origin = Vec3::new(0.0, 5.0, 20.0);
        spawn_burst(&mut world, &mut scene, origin, [1.0, 1.0, 1.0], 6);
        for _ in 0..10 {
            update(&mut world, &mut scene, 1.0 / 60.0);
        }
        let moved = world
            .query::<(&Particle, &Transform)>()
            .iter()
            .any(|(_, (_, t))| t.position.distance(origin) > 0.01);
        assert!(moved);
    }
}
