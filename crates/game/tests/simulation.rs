//! End-to-end simulation behavior: streaming, pickups, crashes, and the
//! frame-time guardrails, driven through the public `GameState` API.

use engine_core::{Transform, Vec3};
use game::rooms::{Ring, EVICT_MARGIN, SPAWN_AHEAD};
use game::state::GamePhase;
use game::{flight, resolver, update, GameConfig, GameState, HighScoreStore};
use physics::PhysicsBody;

fn test_config(seed: u64) -> GameConfig {
    GameConfig {
        seed: Some(seed),
        master_volume: 1.0,
        mute: true,
    }
}

fn test_store(tag: &str) -> HighScoreStore {
    let path = std::env::temp_dir().join(format!(
        "paperdrift_sim_{}_{}.ron",
        tag,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    HighScoreStore::new(path)
}

fn new_state(tag: &str, seed: u64) -> GameState {
    GameState::with_store(test_config(seed), test_store(tag))
}

#[test]
fn streaming_keeps_the_window_around_the_plane() {
    let mut state = new_state("stream", 21);

    // Jump the plane far forward and run one frame.
    let z = 400.0;
    state
        .physics
        .reset_body(state.plane.body, Transform::from_position(Vec3::new(0.0, 5.0, z)));
    update::advance(&mut state, 1.0 / 60.0);

    assert!(
        state.rooms.iter().all(|r| r.spawn_z >= z - EVICT_MARGIN - 1.0),
        "rooms behind the eviction margin must be destroyed"
    );
    assert!(
        state.next_room_z >= z + SPAWN_AHEAD,
        "coverage must extend at least {}m ahead, next spawn at {}",
        SPAWN_AHEAD,
        state.next_room_z
    );
}

#[test]
fn ring_collection_is_idempotent() {
    let mut state = new_state("ring", 5);

    // Park the plane away from any generated room content, then put one
    // ring right on top of it.
    let plane_pos = Vec3::new(0.0, 5.0, -40.0);
    state
        .physics
        .reset_body(state.plane.body, Transform::from_position(plane_pos));

    let body = state.physics.add_fixed_body(plane_pos);
    let collider = state.physics.add_sensor_ball(body, 1.5);
    let node = state.scene.acquire(
        scene::Primitive::Torus {
            radius: 1.0,
            tube: 0.2,
        },
        [1.0, 0.84, 0.0],
        Transform::from_position(plane_pos),
    );
    state.world.spawn((
        Ring {
            position: plane_pos,
        },
        PhysicsBody::with_collider(body, collider),
        node,
    ));

    resolver::resolve(&mut state);
    assert_eq!(state.player.score, 100);
    assert_eq!(state.player.combo, 1);

    // A second pass must not find the consumed ring again.
    resolver::resolve(&mut state);
    assert_eq!(state.player.score, 100);
    assert_eq!(state.player.combo, 1);
    assert_eq!(state.world.query::<&Ring>().iter().count(), 0);
}

#[test]
fn shield_absorbs_exactly_one_hit() {
    let mut state = new_state("shield", 8);
    state.player.has_shield = true;

    resolver::handle_plane_contact(&mut state);
    assert_eq!(state.phase, GamePhase::Playing, "shield must absorb the hit");
    assert!(!state.player.has_shield, "shield is consumed");
    assert!(state.player.is_invulnerable(), "grace window must be active");

    // Contacts inside the invulnerability window are ignored.
    resolver::handle_plane_contact(&mut state);
    assert_eq!(state.phase, GamePhase::Playing);
}

#[test]
fn crash_without_shield_ends_the_run() {
    let mut state = new_state("crash", 8);
    assert!(!state.player.has_shield);
    resolver::handle_plane_contact(&mut state);
    assert_eq!(state.phase, GamePhase::GameOver);
}

#[test]
fn high_score_persists_once_on_game_over() {
    let store = test_store("highscore");
    store.save(500);

    let mut state = GameState::with_store(test_config(3), store.clone());
    assert_eq!(state.high_score, 500);
    state.player.score = 600;

    resolver::handle_plane_contact(&mut state);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.high_score, 600);
    assert_eq!(store.load(), 600);

    // Repeated contacts after game over change nothing.
    resolver::handle_plane_contact(&mut state);
    assert_eq!(store.load(), 600);
}

#[test]
fn lower_score_never_overwrites_the_stored_best() {
    let store = test_store("keepbest");
    store.save(500);

    let mut state = GameState::with_store(test_config(3), store.clone());
    state.player.score = 200;
    resolver::handle_plane_contact(&mut state);
    assert_eq!(store.load(), 500);
    assert_eq!(state.high_score, 500);
}

#[test]
fn long_stall_is_processed_as_one_bounded_frame() {
    let mut state = new_state("stall", 13);
    update::advance(&mut state, 5.0);
    assert!(
        (state.sim_time - 0.1).abs() < 1e-6,
        "a 5 s hitch must advance the simulation clock by at most 0.1 s, got {}",
        state.sim_time
    );
}

#[test]
fn gravity_flip_converges_through_the_frame_loop() {
    let mut state = new_state("flipconv", 17);
    let mut input = input::InputState::new();
    input.process_tap();
    state.handle_input(&input);

    for _ in 0..60 {
        update::advance(&mut state, 1.0 / 60.0);
    }
    assert!(!state.gravity.is_transitioning());
    assert!(
        (state.physics.gravity_y() - 9.82).abs() < 1e-3,
        "gravity must settle at +9.82 after an up-flip, got {}",
        state.physics.gravity_y()
    );
}

#[test]
fn distance_is_monotonic_while_playing() {
    let mut state = new_state("distance", 29);
    let mut last = state.player.distance;
    for _ in 0..120 {
        update::advance(&mut state, 1.0 / 60.0);
        assert!(state.player.distance >= last);
        last = state.player.distance;
    }
    // Propulsion gets stronger as the run progresses.
    assert!(flight::difficulty_multiplier(250.0) > flight::difficulty_multiplier(0.0));
}
