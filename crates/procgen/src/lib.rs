//! Procedural room generation for Paper Drift.
//!
//! Templates describe each room theme as data; the seeded generator turns
//! them into world-space room plans (obstacles, rings, power-ups) that the
//! game materializes into physics and scene state.

pub mod generator;
pub mod templates;

pub use generator::*;
pub use templates::*;
