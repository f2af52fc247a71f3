//! The single authoritative simulation state and its lifecycle.

use crate::config::GameConfig;
use crate::flight::SteerInput;
use crate::gravity::GravityFlip;
use crate::rooms::{self, Room, INITIAL_ROOMS, ROOM_SPACING};
use crate::score::HighScoreStore;
use crate::stats::GameStats;
use audio::{AudioSystem, Cue};
use engine_core::{Time, Transform, Vec3, World};
use input::InputState;
use physics::{ColliderHandle, CollisionGroup, PhysicsWorld, RigidBodyHandle};
use procgen::RoomGenerator;
use scene::{ChaseCamera, NodeId, Primitive, SceneGraph};
use std::time::{Duration, Instant};

/// Where the plane starts each run.
pub const PLANE_SPAWN: Vec3 = Vec3::new(0.0, 5.0, 0.0);
/// Plane body mass, in kilograms.
pub const PLANE_MASS: f32 = 0.1;
/// Plane collider half extents.
pub const PLANE_HALF_EXTENTS: Vec3 = Vec3::new(1.0, 0.1, 0.5);
const PLANE_FRICTION: f32 = 0.1;
const PLANE_RESTITUTION: f32 = 0.1;
const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 5.0, 10.0);

/// Run phase. A crashed run stays inspectable; only a new state starts over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    GameOver,
}

/// The plane's handles into physics and scene state.
#[derive(Debug, Clone, Copy)]
pub struct PlaneBody {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
    pub node: NodeId,
}

/// Per-run player progress.
#[derive(Debug, Default)]
pub struct PlayerState {
    pub score: u32,
    /// Best distance reached, in meters. Monotonic within a run.
    pub distance: f32,
    pub combo: u32,
    pub has_shield: bool,
    /// Wall-clock end of the post-shield invulnerability window.
    invulnerable_until: Option<Instant>,
}

impl PlayerState {
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_until
            .is_some_and(|deadline| Instant::now() < deadline)
    }

    pub fn grant_invulnerability(&mut self, window: Duration) {
        self.invulnerable_until = Some(Instant::now() + window);
    }
}

/// Everything one run owns: physics, scene, entities, pickups, progress,
/// and the streaming window. Dropping it (or calling [`shutdown`]) tears
/// the whole run down at once.
///
/// [`shutdown`]: GameState::shutdown
pub struct GameState {
    pub config: GameConfig,
    pub seed: u64,
    pub time: Time,
    /// Simulation clock: sum of clamped frame deltas. Drives obstacle motion.
    pub sim_time: f32,

    pub physics: PhysicsWorld,
    pub scene: SceneGraph,
    pub world: World,
    pub camera: ChaseCamera,
    /// None when no audio device is available or the config says mute.
    pub audio: Option<AudioSystem>,

    pub gravity: GravityFlip,
    pub generator: RoomGenerator,
    pub rooms: Vec<Room>,
    /// First not-yet-spawned room position along the travel axis.
    pub next_room_z: f32,

    pub plane: PlaneBody,
    pub steer: SteerInput,
    pub player: PlayerState,
    pub phase: GamePhase,
    /// Last known-finite plane transform, used to recover from NaN poses.
    pub last_good_plane: Transform,

    pub score_store: HighScoreStore,
    pub high_score: u32,

    running: bool,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        Self::with_store(config, HighScoreStore::default_path())
    }

    /// Build a run against an explicit score store (tests inject a
    /// temp-file store here).
    pub fn with_store(config: GameConfig, score_store: HighScoreStore) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!("starting run with seed {}", seed);

        let audio = if config.mute {
            None
        } else {
            match AudioSystem::new() {
                Ok(mut system) => {
                    system.set_master_volume(config.master_volume);
                    load_cues(&mut system);
                    Some(system)
                }
                Err(e) => {
                    log::warn!("no audio device, running silent: {}", e);
                    None
                }
            }
        };

        let mut physics = PhysicsWorld::new();
        let mut scene = SceneGraph::new();
        let mut world = World::new();
        let mut generator = RoomGenerator::new(seed);

        let body = physics.add_dynamic_body(PLANE_SPAWN, PLANE_MASS);
        let collider = physics.add_box_collider(
            body,
            PLANE_HALF_EXTENTS,
            CollisionGroup::plane(),
            PLANE_FRICTION,
            PLANE_RESTITUTION,
        );
        let node = scene.acquire(
            Primitive::Cone {
                radius: 0.5,
                height: 2.0,
            },
            [1.0, 1.0, 1.0],
            Transform::from_position(PLANE_SPAWN),
        );
        let plane = PlaneBody {
            body,
            collider,
            node,
        };

        let mut rooms = Vec::with_capacity(INITIAL_ROOMS);
        for i in 0..INITIAL_ROOMS {
            let plan = generator.next_plan(i as f32 * ROOM_SPACING);
            rooms.push(rooms::spawn_room(&plan, &mut physics, &mut scene, &mut world));
        }
        let next_room_z = INITIAL_ROOMS as f32 * ROOM_SPACING;

        let high_score = score_store.load();

        Self {
            config,
            seed,
            time: Time::new(),
            sim_time: 0.0,
            physics,
            scene,
            world,
            camera: ChaseCamera::with_offset(CAMERA_OFFSET),
            audio,
            gravity: GravityFlip::new(),
            generator,
            rooms,
            next_room_z,
            plane,
            steer: SteerInput::default(),
            player: PlayerState::default(),
            phase: GamePhase::Playing,
            last_good_plane: Transform::from_position(PLANE_SPAWN),
            score_store,
            high_score,
            running: true,
        }
    }

    /// Map this frame's input onto the simulation: one possible flip
    /// trigger plus the held steering pair.
    pub fn handle_input(&mut self, input: &InputState) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if input.is_flip_pressed() && self.gravity.request_flip() {
            if let Some(audio) = self.audio.as_mut() {
                audio.play_cue(Cue::Flip);
            }
        }
        self.steer = SteerInput {
            left: input.is_steer_left(),
            right: input.is_steer_right(),
        };
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// HUD/logging snapshot of the current run.
    pub fn stats(&self) -> GameStats {
        GameStats {
            score: self.player.score,
            distance: self.player.distance,
            combo: self.player.combo,
            gravity: self.gravity.state(),
            has_shield: self.player.has_shield,
            high_score: self.high_score,
            fps: self.time.fps(),
        }
    }

    /// Tear the run down in one pass: stop sounds, drop every room, drop
    /// the plane, clear remaining entities and nodes.
    pub fn shutdown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        if let Some(audio) = self.audio.as_mut() {
            audio.stop_all();
        }
        for room in self.rooms.drain(..).collect::<Vec<_>>() {
            room.despawn(&mut self.physics, &mut self.scene, &mut self.world);
        }
        self.physics.remove_body(self.plane.body);
        self.scene.release(self.plane.node);
        // Particles and any stragglers.
        let leftovers: Vec<_> = self
            .world
            .query::<&NodeId>()
            .iter()
            .map(|(entity, node)| (entity, *node))
            .collect();
        for (entity, node) in leftovers {
            self.scene.release(node);
            let _ = self.world.despawn(entity);
        }
        self.world.clear();
        log::info!(
            "run over: score {} distance {:.0}m",
            self.player.score,
            self.player.distance
        );
    }
}

/// Load cue files from `assets/sounds/` when present. Missing files just
/// leave that cue silent.
fn load_cues(system: &mut AudioSystem) {
    let sounds = [
        (Cue::Flip, "flip.ogg"),
        (Cue::Collect, "collect.ogg"),
        (Cue::Crash, "crash.ogg"),
    ];
    for (cue, file) in sounds {
        let path = std::path::Path::new("assets/sounds").join(file);
        if !path.exists() {
            continue;
        }
        if let Err(e) = system.load_cue(cue, &path) {
            log::warn!("could not load {:?} cue from {:?}: {}", cue, path, e);
        }
    }
}

impl Drop for GameState {
    fn drop(&mut self) {
        self.shutdown();
    }
}
