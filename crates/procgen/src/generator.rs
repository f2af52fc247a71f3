//! Seeded room plan generation.
//!
//! The generator owns an injected RNG so a given seed always yields the
//! same stream of rooms; determinism is part of the contract and covered
//! by tests.

use crate::templates::{template, Motion, RoomKind, RoomTemplate};
use glam::Vec3;
use rand::prelude::*;

/// Chance a room contains a collectible ring.
pub const RING_PROBABILITY: f64 = 0.7;
/// Chance a room contains a shield power-up (independent of the ring roll).
pub const POWER_UP_PROBABILITY: f64 = 0.15;

/// One obstacle resolved to world space.
#[derive(Debug, Clone, Copy)]
pub struct ObstaclePlacement {
    /// World-space center of the box.
    pub position: Vec3,
    /// Full extents of the box.
    pub size: Vec3,
    pub motion: Option<Motion>,
}

/// Everything needed to materialize one room: dimensions, color, resolved
/// obstacle placements, and optional pickup positions.
#[derive(Debug, Clone)]
pub struct RoomPlan {
    /// World Z of the room center along the travel axis.
    pub spawn_z: f32,
    pub kind: RoomKind,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub base_color: [f32; 3],
    pub obstacles: Vec<ObstaclePlacement>,
    /// Collectible ring position, when the room rolled one.
    pub ring: Option<Vec3>,
    /// Shield power-up position, when the room rolled one.
    pub power_up: Option<Vec3>,
}

/// Plans rooms from a seeded RNG.
pub struct RoomGenerator {
    rng: StdRng,
}

impl RoomGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Plan the next room at `spawn_z`, with a random kind.
    pub fn next_plan(&mut self, spawn_z: f32) -> RoomPlan {
        let kind = RoomKind::ALL[self.rng.gen_range(0..RoomKind::ALL.len())];
        self.plan(spawn_z, kind)
    }

    /// Plan a room of a specific kind at `spawn_z`.
    pub fn plan(&mut self, spawn_z: f32, kind: RoomKind) -> RoomPlan {
        let t = template(kind);

        let obstacles = t
            .obstacles
            .iter()
            .map(|o| ObstaclePlacement {
                position: o.offset + Vec3::new(0.0, 0.0, spawn_z),
                size: o.size,
                motion: o.motion,
            })
            .collect();

        let ring = self
            .rng
            .gen_bool(RING_PROBABILITY)
            .then(|| self.sample_interior(&t, spawn_z));
        let power_up = self
            .rng
            .gen_bool(POWER_UP_PROBABILITY)
            .then(|| self.sample_interior(&t, spawn_z));

        RoomPlan {
            spawn_z,
            kind,
            width: t.width,
            height: t.height,
            depth: t.depth,
            base_color: t.base_color,
            obstacles,
            ring,
            power_up,
        }
    }

    /// Uniform position within the middle third of the room's bounding box.
    fn sample_interior(&mut self, t: &RoomTemplate, spawn_z: f32) -> Vec3 {
        Vec3::new(
            self.rng.gen_range(-t.width / 3.0..t.width / 3.0),
            self.rng.gen_range(-t.height / 3.0..t.height / 3.0),
            spawn_z + self.rng.gen_range(-t.depth / 3.0..t.depth / 3.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_room_stream() {
        let mut a = RoomGenerator::new(4242);
        let mut b = RoomGenerator::new(4242);
        for i in 0..50 {
            let z = i as f32 * 30.0;
            let pa = a.next_plan(z);
            let pb = b.next_plan(z);
            assert_eq!(pa.kind, pb.kind, "room {} kind diverged", i);
            assert_eq!(pa.ring, pb.ring, "room {} ring diverged", i);
            assert_eq!(pa.power_up, pb.power_up, "room {} power-up diverged", i);
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = RoomGenerator::new(1);
        let mut b = RoomGenerator::new(2);
        let kinds_a: Vec<_> = (0..20).map(|i| a.next_plan(i as f32 * 30.0).kind).collect();
        let kinds_b: Vec<_> = (0..20).map(|i| b.next_plan(i as f32 * 30.0).kind).collect();
        assert_ne!(kinds_a, kinds_b);
    }

    #[test]
    fn pickups_stay_inside_the_room_third() {
        let mut gen = RoomGenerator::new(7);
        for i in 0..200 {
            let z = i as f32 * 30.0;
            let plan = gen.next_plan(z);
            for pos in plan.ring.iter().chain(plan.power_up.iter()) {
                assert!(pos.x.abs() <= plan.width / 3.0);
                assert!(pos.y.abs() <= plan.height / 3.0);
                assert!((pos.z - z).abs() <= plan.depth / 3.0);
            }
        }
    }

    #[test]
    fn spawn_probabilities_are_roughly_honored() {
        let mut gen = RoomGenerator::new(99);
        let n = 2000;
        let mut rings = 0;
        let mut power_ups = 0;
        for i in 0..n {
            let plan = gen.next_plan(i as f32 * 30.0);
            rings += plan.ring.is_some() as u32;
            power_ups += plan.power_up.is_some() as u32;
        }
        let ring_rate = rings as f64 / n as f64;
        let power_rate = power_ups as f64 / n as f64;
        assert!((ring_rate - RING_PROBABILITY).abs() < 0.05, "{}", ring_rate);
        assert!(
            (power_rate - POWER_UP_PROBABILITY).abs() < 0.04,
            "{}",
            power_rate
        );
    }

    #[test]
    fn obstacles_are_offset_by_spawn_z() {
        let mut gen = RoomGenerator::new(3);
        let plan = gen.plan(90.0, RoomKind::Office);
        let t = template(RoomKind::Office);
        for (placed, spec) in plan.obstacles.iter().zip(t.obstacles.iter()) {
            assert_eq!(placed.position.z, spec.offset.z + 90.0);
            assert_eq!(placed.position.x, spec.offset.x);
        }
    }
}
