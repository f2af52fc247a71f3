//! Room materialization and world streaming.
//!
//! The generator hands over plans; this module turns them into physics
//! colliders, scene nodes, and pickup entities, and owns the sliding
//! window of live rooms around the plane. A room's resources are created
//! together and destroyed together.

use engine_core::{Entity, Quat, Transform, Vec3, World};
use physics::{ColliderHandle, CollisionGroup, PhysicsBody, PhysicsWorld};
use procgen::{Motion, ObstaclePlacement, RoomGenerator, RoomKind, RoomPlan};
use scene::{NodeId, Primitive, SceneGraph};

/// Rooms whose center falls this far behind the plane are destroyed.
pub const EVICT_MARGIN: f32 = 50.0;
/// Rooms are spawned until coverage reaches this far ahead of the plane.
pub const SPAWN_AHEAD: f32 = 100.0;
/// Distance between consecutive room centers along the travel axis.
pub const ROOM_SPACING: f32 = 30.0;
/// Rooms materialized up front at run start.
pub const INITIAL_ROOMS: usize = 5;

const WALL_HALF_THICKNESS: f32 = 0.1;
const OBSTACLE_FRICTION: f32 = 0.5;
const OBSTACLE_COLOR: [f32; 3] = [0.55, 0.27, 0.07];
const RING_COLOR: [f32; 3] = [1.0, 0.84, 0.0];
const SHIELD_COLOR: [f32; 3] = [0.3, 0.8, 1.0];

/// Collectible ring entity.
pub struct Ring {
    pub position: Vec3,
}

/// Shield power-up entity.
pub struct Shield {
    pub position: Vec3,
}

/// Kinematic obstacle entity driven from the simulation clock.
pub struct MovingObstacle {
    pub origin: Vec3,
    pub motion: Motion,
}

/// One live room and every resource it owns.
pub struct Room {
    pub spawn_z: f32,
    pub kind: RoomKind,
    /// Static colliders: shell geometry and fixed obstacles.
    colliders: Vec<ColliderHandle>,
    /// Scene nodes for the static geometry.
    nodes: Vec<NodeId>,
    /// Ring, power-up, and moving obstacle entities.
    entities: Vec<Entity>,
}

impl Room {
    /// Tear down everything the room owns. Already-collected pickups are
    /// skipped; their entities were despawned at collection time.
    pub fn despawn(self, physics: &mut PhysicsWorld, scene: &mut SceneGraph, world: &mut World) {
        for collider in self.colliders {
            physics.remove_collider(collider);
        }
        for node in self.nodes {
            scene.release(node);
        }
        for entity in self.entities {
            let body = world.get::<&PhysicsBody>(entity).map(|b| *b).ok();
            if let Some(body) = body {
                physics.remove_body(body.rigid_body);
            }
            let node = world.get::<&NodeId>(entity).map(|n| *n).ok();
            if let Some(node) = node {
                scene.release(node);
            }
            let _ = world.despawn(entity);
        }
    }
}

/// Materialize a room plan into physics, scene, and entity state.
pub fn spawn_room(
    plan: &RoomPlan,
    physics: &mut PhysicsWorld,
    scene: &mut SceneGraph,
    world: &mut World,
) -> Room {
    let mut room = Room {
        spawn_z: plan.spawn_z,
        kind: plan.kind,
        colliders: Vec::new(),
        nodes: Vec::new(),
        entities: Vec::new(),
    };

    spawn_shell(plan, physics, scene, &mut room);
    for obstacle in &plan.obstacles {
        match obstacle.motion {
            None => spawn_static_obstacle(obstacle, physics, scene, &mut room),
            Some(motion) => spawn_moving_obstacle(obstacle, motion, physics, scene, world, &mut room),
        }
    }
    if let Some(position) = plan.ring {
        room.entities.push(spawn_ring(position, physics, scene, world));
    }
    if let Some(position) = plan.power_up {
        room.entities.push(spawn_shield(position, physics, scene, world));
    }

    log::debug!(
        "spawned {} room at z={} ({} colliders, {} entities)",
        room.kind.name(),
        room.spawn_z,
        room.colliders.len(),
        room.entities.len()
    );
    room
}

/// Floor, ceiling, and side walls: static colliders plus quad nodes.
fn spawn_shell(plan: &RoomPlan, physics: &mut PhysicsWorld, scene: &mut SceneGraph, room: &mut Room) {
    let (w, h, d, z) = (plan.width, plan.height, plan.depth, plan.spawn_z);
    let half = Vec3::new(w / 2.0, h / 2.0, d / 2.0);

    struct Panel {
        center: Vec3,
        half_extents: Vec3,
        quad: Primitive,
        rotation: Quat,
    }
    let panels = [
        // floor
        Panel {
            center: Vec3::new(0.0, -half.y, z),
            half_extents: Vec3::new(half.x, WALL_HALF_THICKNESS, half.z),
            quad: Primitive::Quad { width: w, height: d },
            rotation: Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
        },
        // ceiling
        Panel {
            center: Vec3::new(0.0, half.y, z),
            half_extents: Vec3::new(half.x, WALL_HALF_THICKNESS, half.z),
            quad: Primitive::Quad { width: w, height: d },
            rotation: Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
        },
        // left wall
        Panel {
            center: Vec3::new(-half.x, 0.0, z),
            half_extents: Vec3::new(WALL_HALF_THICKNESS, half.y, half.z),
            quad: Primitive::Quad { width: d, height: h },
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        },
        // right wall
        Panel {
            center: Vec3::new(half.x, 0.0, z),
            half_extents: Vec3::new(WALL_HALF_THICKNESS, half.y, half.z),
            quad: Primitive::Quad { width: d, height: h },
            rotation: Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2),
        },
    ];

    for panel in panels {
        room.colliders
            .push(physics.add_static_cuboid(panel.center, panel.half_extents));
        room.nodes.push(scene.acquire(
            panel.quad,
            plan.base_color,
            Transform::from_position_rotation(panel.center, panel.rotation),
        ));
    }
}

fn spawn_static_obstacle(
    obstacle: &ObstaclePlacement,
    physics: &mut PhysicsWorld,
    scene: &mut SceneGraph,
    room: &mut Room,
) {
    let half = obstacle.size / 2.0;
    room.colliders
        .push(physics.add_static_cuboid(obstacle.position, half));
    room.nodes.push(scene.acquire(
        Primitive::Cuboid { half_extents: half },
        OBSTACLE_COLOR,
        Transform::from_position(obstacle.position),
    ));
}

fn spawn_moving_obstacle(
    obstacle: &ObstaclePlacement,
    motion: Motion,
    physics: &mut PhysicsWorld,
    scene: &mut SceneGraph,
    world: &mut World,
    room: &mut Room,
) {
    let half = obstacle.size / 2.0;
    let body = physics.add_kinematic_body(obstacle.position);
    let collider = physics.add_box_collider(
        body,
        half,
        CollisionGroup::environment(),
        OBSTACLE_FRICTION,
        0.0,
    );
    let node = scene.acquire(
        Primitive::Cuboid { half_extents: half },
        OBSTACLE_COLOR,
        Transform::from_position(obstacle.position),
    );
    room.entities.push(world.spawn((
        MovingObstacle {
            origin: obstacle.position,
            motion,
        },
        PhysicsBody::with_collider(body, collider),
        node,
    )));
}

fn spawn_ring(
    position: Vec3,
    physics: &mut PhysicsWorld,
    scene: &mut SceneGraph,
    world: &mut World,
) -> Entity {
    let body = physics.add_fixed_body(position);
    let collider = physics.add_sensor_ball(body, 1.5);
    let node = scene.acquire(
        Primitive::Torus {
            radius: 1.0,
            tube: 0.2,
        },
        RING_COLOR,
        Transform::from_position(position),
    );
    if let Some(n) = scene.node_mut(node) {
        n.opacity = 0.8;
    }
    world.spawn((Ring { position }, PhysicsBody::with_collider(body, collider), node))
}

fn spawn_shield(
    position: Vec3,
    physics: &mut PhysicsWorld,
    scene: &mut SceneGraph,
    world: &mut World,
) -> Entity {
    let body = physics.add_fixed_body(position);
    let collider = physics.add_sensor_ball(body, 1.0);
    let node = scene.acquire(
        Primitive::Ball { radius: 0.6 },
        SHIELD_COLOR,
        Transform::from_position(position),
    );
    if let Some(n) = scene.node_mut(node) {
        n.opacity = 0.7;
    }
    world.spawn((Shield { position }, PhysicsBody::with_collider(body, collider), node))
}

/// One streaming pass: evict rooms behind the plane, then extend coverage
/// ahead of it. `next_room_z` is the first not-yet-spawned room position.
pub fn stream(
    rooms: &mut Vec<Room>,
    next_room_z: &mut f32,
    generator: &mut RoomGenerator,
    plane_z: f32,
    physics: &mut PhysicsWorld,
    scene: &mut SceneGraph,
    world: &mut World,
) {
    let mut index = 0;
    while index < rooms.len() {
        if rooms[index].spawn_z < plane_z - EVICT_MARGIN {
            let room = rooms.remove(index);
            log::debug!("evicting {} room at z={}", room.kind.name(), room.spawn_z);
            room.despawn(physics, scene, world);
        } else {
            index += 1;
        }
    }

    while *next_room_z < plane_z + SPAWN_AHEAD {
        let plan = generator.next_plan(*next_room_z);
        rooms.push(spawn_room(&plan, physics, scene, world));
        *next_room_z += ROOM_SPACING;
    }
}

/// Drive every kinematic obstacle from the simulation clock. Motion is a
/// pure function of `sim_time`, so pause and resume cannot desynchronize
/// obstacles from each other.
pub fn animate_obstacles(
    world: &mut World,
    physics: &mut PhysicsWorld,
    scene: &mut SceneGraph,
    sim_time: f32,
) {
    for (_, (obstacle, body, node)) in
        world.query_mut::<(&MovingObstacle, &PhysicsBody, &NodeId)>()
    {
        match obstacle.motion {
            Motion::Slide {
                axis,
                amplitude,
                rate,
            } => {
                let position = obstacle.origin + axis * ((sim_time * rate).sin() * amplitude);
                physics.set_kinematic_position(body.rigid_body, position);
                scene.set_transform(*node, Transform::from_position(position));
            }
            Motion::Spin { speed } => {
                let yaw = sim_time * speed;
                physics.set_kinematic_yaw(body.rigid_body, yaw);
                scene.set_transform(
                    *node,
                    Transform::from_position_rotation(obstacle.origin, Quat::from_rotation_y(yaw)),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (PhysicsWorld, SceneGraph, World, RoomGenerator) {
        (
            PhysicsWorld::new(),
            SceneGraph::new(),
            World::new(),
            RoomGenerator::new(11),
        )
    }

    #[test]
    fn spawn_then_despawn_leaves_nothing_behind() {
        let (mut physics, mut scene, mut world, mut generator) = fixture();
        let colliders_before = physics.collider_set.len();
        let bodies_before = physics.rigid_body_set.len();

        let plan = generator.next_plan(0.0);
        let room = spawn_room(&plan, &mut physics, &mut scene, &mut world);
        assert!(physics.collider_set.len() > colliders_before);
        assert!(!scene.is_empty());

        room.despawn(&mut physics, &mut scene, &mut world);
        assert_eq!(physics.collider_set.len(), colliders_before);
        assert_eq!(physics.rigid_body_set.len(), bodies_before);
        assert!(scene.is_empty());
        assert_eq!(world.len(), 0);
    }

    #[test]
    fn stream_covers_ahead_and_evicts_behind() {
        let (mut physics, mut scene, mut world, mut generator) = fixture();
        let mut rooms = Vec::new();
        let mut next_room_z = 0.0;

        stream(
            &mut rooms,
            &mut next_room_z,
            &mut generator,
            0.0,
            &mut physics,
            &mut scene,
            &mut world,
        );
        assert!(next_room_z >= SPAWN_AHEAD);
        assert!(!rooms.is_empty());

        // Fly far forward: everything behind the margin must be gone and
        // coverage must extend ahead of the new position.
        let plane_z = 400.0;
        stream(
            &mut rooms,
            &mut next_room_z,
            &mut generator,
            plane_z,
            &mut physics,
            &mut scene,
            &mut world,
        );
        assert!(rooms.iter().all(|r| r.spawn_z >= plane_z - EVICT_MARGIN));
        assert!(next_room_z >= plane_z + SPAWN_AHEAD);
    }

    #[test]
    fn moving_obstacles_track_the_simulation_clock() {
        let (mut physics, mut scene, mut world, _) = fixture();
        let origin = Vec3::new(0.0, 4.0, 5.0);
        let body = physics.add_kinematic_body(origin);
        let node = scene.acquire(
            Primitive::Cuboid {
                half_extents: Vec3::ONE,
            },
            [1.0, 1.0, 1.0],
            Transform::from_position(origin),
        );
        world.spawn((
            MovingObstacle {
                origin,
                motion: Motion::Slide {
                    axis: Vec3::X,
                    amplitude: 6.0,
                    rate: 0.8,
                },
            },
            PhysicsBody::new(body),
            node,
        ));

        // sin(pi/2) puts the slide at full amplitude; the same clock value
        // must always give the same pose.
        let t = std::f32::consts::FRAC_PI_2 / 0.8;
        animate_obstacles(&mut world, &mut physics, &mut scene, t);
        let x1 = scene.node(node).unwrap().transform.position.x;
        assert!((x1 - 6.0).abs() < 1e-3);
        animate_obstacles(&mut world, &mut physics, &mut scene, t);
        let x2 = scene.node(node).unwrap().transform.position.x;
        assert_eq!(x1, x2);
    }
}
