//! Paper Drift: an endless paper-plane runner built on the engine crates.
//!
//! The library exposes the whole simulation core so hosts (the bundled
//! headless binary, a windowed front end, tests) can drive it frame by
//! frame and read back scene and HUD state.

pub mod config;
pub mod flight;
pub mod gravity;
pub mod particles;
pub mod resolver;
pub mod rooms;
pub mod score;
pub mod state;
pub mod stats;
pub mod update;

pub use config::GameConfig;
pub use score::HighScoreStore;
pub use state::{GamePhase, GameState};
pub use stats::GameStats;
