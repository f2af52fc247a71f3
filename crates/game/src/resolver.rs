//! Pickup collection and crash resolution.
//!
//! Runs once per tick after physics: proximity checks collect rings and
//! shields, then the contact queue decides whether the plane crashed.
//! Each pickup resolves at most once; contacts during the post-shield
//! invulnerability window are ignored.

use crate::particles;
use crate::rooms::{Ring, Shield};
use crate::state::{GamePhase, GameState};
use audio::Cue;
use engine_core::{Entity, Vec3};
use physics::PhysicsBody;
use scene::NodeId;
use std::time::Duration;

/// Ring collection radius around the plane, in meters.
pub const RING_COLLECT_DISTANCE: f32 = 2.0;
/// Points per collected ring.
pub const RING_SCORE: u32 = 100;
/// Shield collection radius around the plane, in meters.
pub const SHIELD_COLLECT_DISTANCE: f32 = 1.5;
/// Wall-clock grace period after a shield absorbs a hit.
pub const INVULNERABILITY_WINDOW: Duration = Duration::from_secs(2);

const COLLECT_BURST_COLOR: [f32; 3] = [1.0, 0.84, 0.0];
const SHIELD_BURST_COLOR: [f32; 3] = [0.3, 0.8, 1.0];
const CRASH_BURST_COLOR: [f32; 3] = [1.0, 0.4, 0.1];

/// Resolve this tick's pickups and contacts.
pub fn resolve(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        // Drop stale contacts so they cannot fire on a later run state.
        state.physics.events.drain();
        return;
    }
    let Some(plane) = state.physics.body_transform(state.plane.body) else {
        return;
    };
    let plane_pos = plane.position;

    collect_rings(state, plane_pos);
    collect_shields(state, plane_pos);

    for (a, b) in state.physics.events.drain() {
        if state.phase != GamePhase::Playing {
            break;
        }
        if a != state.plane.collider && b != state.plane.collider {
            continue;
        }
        let other = if a == state.plane.collider { b } else { a };
        // Sensor overlaps are pickups, handled by proximity above.
        let solid = state
            .physics
            .collider_set
            .get(other)
            .is_some_and(|c| !c.is_sensor());
        if solid {
            handle_plane_contact(state);
        }
    }
}

fn collect_rings(state: &mut GameState, plane_pos: Vec3) {
    let collected: Vec<(Entity, PhysicsBody, NodeId, Vec3)> = state
        .world
        .query::<(&Ring, &PhysicsBody, &NodeId)>()
        .iter()
        .filter(|(_, (ring, _, _))| ring.position.distance(plane_pos) < RING_COLLECT_DISTANCE)
        .map(|(entity, (ring, body, node))| (entity, *body, *node, ring.position))
        .collect();

    for (entity, body, node, position) in collected {
        state.physics.remove_body(body.rigid_body);
        state.scene.release(node);
        let _ = state.world.despawn(entity);

        state.player.score += RING_SCORE;
        state.player.combo += 1;
        particles::spawn_burst(
            &mut state.world,
            &mut state.scene,
            position,
            COLLECT_BURST_COLOR,
            particles::COLLECT_BURST_COUNT,
        );
        if let Some(audio) = state.audio.as_mut() {
            audio.play_cue(Cue::Collect);
        }
        log::debug!(
            "ring collected, score {} combo {}",
            state.player.score,
            state.player.combo
        );
    }
}

fn collect_shields(state: &mut GameState, plane_pos: Vec3) {
    let collected: Vec<(Entity, PhysicsBody, NodeId, Vec3)> = state
        .world
        .query::<(&Shield, &PhysicsBody, &NodeId)>()
        .iter()
        .filter(|(_, (shield, _, _))| {
            shield.position.distance(plane_pos) < SHIELD_COLLECT_DISTANCE
        })
        .map(|(entity, (shield, body, node))| (entity, *body, *node, shield.position))
        .collect();

    for (entity, body, node, position) in collected {
        state.physics.remove_body(body.rigid_body);
        state.scene.release(node);
        let _ = state.world.despawn(entity);

        state.player.has_shield = true;
        particles::spawn_burst(
            &mut state.world,
            &mut state.scene,
            position,
            SHIELD_BURST_COLOR,
            particles::COLLECT_BURST_COUNT,
        );
        if let Some(audio) = state.audio.as_mut() {
            audio.play_cue(Cue::Collect);
        }
        log::debug!("shield collected");
    }
}

/// The plane touched solid scenery. Invulnerability ignores it, a held
/// shield absorbs it, anything else ends the run.
pub fn handle_plane_contact(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    if state.player.is_invulnerable() {
        return;
    }
    if state.player.has_shield {
        state.player.has_shield = false;
        state.player.grant_invulnerability(INVULNERABILITY_WINDOW);
        log::debug!("shield absorbed a hit");
        return;
    }
    game_over(state);
}

fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    let crash_pos = state
        .physics
        .body_transform(state.plane.body)
        .map(|t| t.position)
        .unwrap_or(Vec3::ZERO);
    particles::spawn_burst(
        &mut state.world,
        &mut state.scene,
        crash_pos,
        CRASH_BURST_COLOR,
        particles::CRASH_BURST_COUNT,
    );
    if let Some(audio) = state.audio.as_mut() {
        audio.play_cue(Cue::Crash);
    }
    if state.player.score > state.high_score {
        state.high_score = state.player.score;
        state.score_store.save(state.high_score);
        log::info!("new high score: {}", state.high_score);
    }
    log::info!(
        "game over at {:.0}m with score {}",
        state.player.distance,
        state.player.score
    );
}
