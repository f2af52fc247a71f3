//! Scene graph of visual proxy nodes.
//!
//! A node is a primitive shape plus a color and transform — the renderable
//! projection of some piece of simulation state. Nodes are never
//! authoritative: the simulation copies physics transforms into them every
//! frame. Storage is a free-list pool so continuous room churn reuses node
//! slots instead of reallocating.

use crate::pool::{Handle, Pool};
use engine_core::Transform;
use glam::Vec3;

/// Identifier of a scene node.
pub type NodeId = Handle;

/// Primitive shapes a node can render as.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Flat quad (floors, ceilings, walls), width x height in local XY.
    Quad { width: f32, height: f32 },
    /// Axis-aligned box given by half extents.
    Cuboid { half_extents: Vec3 },
    /// Ring collectible.
    Torus { radius: f32, tube: f32 },
    /// The paper plane.
    Cone { radius: f32, height: f32 },
    /// Particles and shield orbs.
    Ball { radius: f32 },
}

/// One renderable node: primitive + material color + transform.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub primitive: Primitive,
    pub color: [f32; 3],
    pub opacity: f32,
    pub transform: Transform,
}

/// The scene graph. Hosts consume it read-only each frame ("mesh +
/// transform"); the simulation owns all mutation.
#[derive(Default)]
pub struct SceneGraph {
    nodes: Pool<SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, reusing a freed slot when available.
    pub fn acquire(&mut self, primitive: Primitive, color: [f32; 3], transform: Transform) -> NodeId {
        self.nodes.insert(SceneNode {
            primitive,
            color,
            opacity: 1.0,
            transform,
        })
    }

    /// Remove a node. Safe to call with an already-released id.
    pub fn release(&mut self, id: NodeId) {
        if self.nodes.remove(id).is_none() {
            log::debug!("release of dead scene node {:?}", id);
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    /// Mirror a transform onto a node (physics → visual sync).
    pub fn set_transform(&mut self, id: NodeId, transform: Transform) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.transform = transform;
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate all live nodes for rendering.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_release_cycle_reuses_slots() {
        let mut graph = SceneGraph::new();
        let quad = graph.acquire(
            Primitive::Quad {
                width: 2.0,
                height: 2.0,
            },
            [1.0, 1.0, 1.0],
            Transform::default(),
        );
        graph.release(quad);
        let ball = graph.acquire(
            Primitive::Ball { radius: 0.5 },
            [1.0, 0.0, 0.0],
            Transform::default(),
        );
        assert_eq!(graph.len(), 1);
        assert!(graph.node(quad).is_none());
        assert!(matches!(
            graph.node(ball).map(|n| n.primitive),
            Some(Primitive::Ball { .. })
        ));
    }

    #[test]
    fn set_transform_mirrors_position() {
        let mut graph = SceneGraph::new();
        let id = graph.acquire(
            Primitive::Ball { radius: 1.0 },
            [1.0, 1.0, 1.0],
            Transform::default(),
        );
        graph.set_transform(id, Transform::from_position(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(
            graph.node(id).map(|n| n.transform.position),
            Some(Vec3::new(1.0, 2.0, 3.0))
        );
    }
}
