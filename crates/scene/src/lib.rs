//! Scene graph and camera for Paper Drift.
//!
//! Rendering itself is a host concern; this crate only owns the "mesh +
//! transform" projection of simulation state (visual proxies in a pooled
//! scene graph) and the chase camera math.

pub mod camera;
pub mod graph;
pub mod pool;

pub use camera::*;
pub use graph::*;
pub use pool::*;
