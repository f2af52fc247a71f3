//! Physics simulation using Rapier3D.
//!
//! Wraps the rigid-body world behind the operations the game needs:
//! body/collider management, runtime-settable gravity, fixed-step
//! integration with a bounded sub-step budget, and a drainable contact
//! event queue.

pub mod collision;
pub mod events;
pub mod physics_world;

pub use collision::*;
pub use events::*;
pub use physics_world::*;

// Re-export rapier types used at the boundary
pub use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};
