//! The fixed-order simulation tick.
//!
//! Every frame runs the same sequence: gravity transition, flight forces
//! and physics sub-steps, visual sync, camera, streaming, pickup/contact
//! resolution, obstacle animation, particles, distance bookkeeping.

use crate::flight;
use crate::resolver;
use crate::rooms;
use crate::state::{GamePhase, GameState};
use engine_core::MAX_FRAME_DELTA;

/// Advance the simulation by one frame of `dt` seconds. The delta is
/// clamped so a long stall is processed as one bounded frame.
pub fn advance(state: &mut GameState, dt: f32) {
    if !state.is_running() {
        return;
    }
    let dt = dt.clamp(0.0, MAX_FRAME_DELTA);
    if dt == 0.0 {
        return;
    }
    state.sim_time += dt;

    // Gravity eases toward its target while a flip is in flight.
    if let Some(gravity_y) = state.gravity.advance(dt, state.physics.gravity_y()) {
        state.physics.set_gravity_y(gravity_y);
    }

    // Fixed-step physics with fresh flight forces each sub-step.
    let substeps = state.physics.take_substeps(dt);
    for _ in 0..substeps {
        if state.phase == GamePhase::Playing {
            flight::apply_forces(
                &mut state.physics,
                state.plane.body,
                state.steer,
                state.gravity.direction_sign(),
                state.player.distance,
            );
        }
        state.physics.step();
    }

    // Sync the plane's visual proxy, recovering from a diverged body.
    let plane_transform = match state.physics.body_transform(state.plane.body) {
        Some(t) if t.is_finite() => {
            state.last_good_plane = t;
            t
        }
        Some(_) => {
            log::warn!("plane body diverged, resetting to last good pose");
            state.physics.reset_body(state.plane.body, state.last_good_plane);
            state.last_good_plane
        }
        None => state.last_good_plane,
    };
    state.scene.set_transform(state.plane.node, plane_transform);
    state.camera.follow(plane_transform.position);

    rooms::stream(
        &mut state.rooms,
        &mut state.next_room_z,
        &mut state.generator,
        plane_transform.position.z,
        &mut state.physics,
        &mut state.scene,
        &mut state.world,
    );

    resolver::resolve(state);

    rooms::animate_obstacles(
        &mut state.world,
        &mut state.physics,
        &mut state.scene,
        state.sim_time,
    );

    crate::particles::update(&mut state.world, &mut state.scene, dt);

    if state.phase == GamePhase::Playing {
        state.player.distance = state.player.distance.max(plane_transform.position.z.abs());
    }

    if let Some(audio) = state.audio.as_mut() {
        audio.cleanup();
    }
}
