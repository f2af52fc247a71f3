//! Contact event queue: collision starts reported by the physics pipeline
//! are buffered here and drained once per simulation tick, so gameplay
//! reacts in deterministic single-threaded order instead of inside an
//! engine callback.

use rapier3d::prelude::*;
use std::sync::Mutex;

/// Buffers `CollisionEvent::Started` pairs produced during a physics step.
#[derive(Default)]
pub struct ContactEvents {
    started: Mutex<Vec<(ColliderHandle, ColliderHandle)>>,
}

impl ContactEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all contact-start pairs buffered since the last drain.
    pub fn drain(&self) -> Vec<(ColliderHandle, ColliderHandle)> {
        match self.started.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl EventHandler for ContactEvents {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        if let CollisionEvent::Started(a, b, _) = event {
            if let Ok(mut queue) = self.started.lock() {
                queue.push((a, b));
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}
