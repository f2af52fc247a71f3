//! Headless demo host: runs the simulation at 60 Hz with a scripted
//! pilot, logging HUD state once a second. A rendering front end would
//! drive [`GameState`] the same way and draw `state.scene` each frame.

use game::state::GamePhase;
use game::{update, GameConfig, GameState};
use input::InputState;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);
const MAX_FRAMES: u64 = 3600;

fn main() {
    env_logger::init();

    let config = GameConfig::load();
    let mut state = GameState::new(config);
    let mut input = InputState::new();

    log::info!("paperdrift demo, seed {}", state.seed);

    for frame in 0..MAX_FRAMES {
        state.time.update();
        input.begin_frame();

        // Scripted pilot: flip gravity every four seconds, weave gently.
        if frame > 0 && frame % 240 == 0 {
            input.process_tap();
        }
        input.set_steer_axis(((frame as f32) * 0.01).sin() * 0.8);

        state.handle_input(&input);
        let dt = state.time.clamped_delta();
        update::advance(&mut state, dt);

        if frame % 60 == 0 {
            let stats = state.stats();
            log::info!(
                "z={:.1}m score={} combo={} gravity={:?} shield={} nodes={} fps={:.0}",
                stats.distance,
                stats.score,
                stats.combo,
                stats.gravity,
                stats.has_shield,
                state.scene.len(),
                stats.fps,
            );
        }
        if state.phase == GamePhase::GameOver {
            log::info!("crashed after {} frames", frame);
            break;
        }
        std::thread::sleep(FRAME);
    }

    let stats = state.stats();
    log::info!(
        "final: score {} (best {}) distance {:.0}m",
        stats.score,
        stats.high_score,
        stats.distance
    );
    state.shutdown();
}
