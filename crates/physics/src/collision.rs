//! Collision groups and filtering.

use rapier3d::prelude::*;

/// Collision groups for different entity types.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Static room geometry (floor, ceiling, walls, obstacles)
    Environment = 1 << 0,
    /// The paper plane
    Plane = 1 << 1,
    /// Collectible rings and power-up triggers
    Pickup = 1 << 2,
}

impl CollisionGroup {
    /// Groups for room geometry: collides with the plane (and other scenery).
    pub fn environment() -> (Group, Group) {
        let membership = Group::from_bits_retain(Self::Environment as u32);
        let filter = Group::from_bits_retain(Self::Environment as u32 | Self::Plane as u32);
        (membership, filter)
    }

    /// Groups for the plane: pairs with scenery and with pickup triggers.
    pub fn plane() -> (Group, Group) {
        let membership = Group::from_bits_retain(Self::Plane as u32);
        let filter = Group::from_bits_retain(Self::Environment as u32 | Self::Pickup as u32);
        (membership, filter)
    }

    /// Groups for pickup triggers: detect only the plane, never scenery.
    pub fn pickup() -> (Group, Group) {
        let membership = Group::from_bits_retain(Self::Pickup as u32);
        let filter = Group::from_bits_retain(Self::Plane as u32);
        (membership, filter)
    }
}

/// Component linking a game entity to its physics handles.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub rigid_body: RigidBodyHandle,
    pub collider: Option<ColliderHandle>,
}

impl PhysicsBody {
    pub fn new(rigid_body: RigidBodyHandle) -> Self {
        Self {
            rigid_body,
            collider: None,
        }
    }

    pub fn with_collider(rigid_body: RigidBodyHandle, collider: ColliderHandle) -> Self {
        Self {
            rigid_body,
            collider: Some(collider),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(a: (Group, Group), b: (Group, Group)) -> bool {
        // Rapier's pair test: each membership must intersect the other's filter.
        (a.0 & b.1) != Group::NONE && (b.0 & a.1) != Group::NONE
    }

    #[test]
    fn plane_pairs_with_environment_and_pickups() {
        assert!(pairs(CollisionGroup::plane(), CollisionGroup::environment()));
        assert!(pairs(CollisionGroup::plane(), CollisionGroup::pickup()));
    }

    #[test]
    fn pickups_never_pair_with_scenery() {
        assert!(!pairs(CollisionGroup::pickup(), CollisionGroup::environment()));
        assert!(!pairs(CollisionGroup::pickup(), CollisionGroup::pickup()));
    }
}
