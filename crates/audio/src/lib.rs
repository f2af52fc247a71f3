//! Audio system using Kira for one-shot gameplay cues.
//!
//! The simulation core treats sound as fire-and-forget: a cue that cannot
//! be loaded or played is logged and skipped, never an error the game
//! reacts to.

use anyhow::Result;
use kira::{
    manager::{backend::DefaultBackend, AudioManager, AudioManagerSettings},
    sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    tween::Tween,
};
use std::collections::HashMap;
use std::path::Path;

/// Gameplay sound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Gravity flip triggered.
    Flip,
    /// Ring or power-up collected.
    Collect,
    /// Plane crashed into scenery.
    Crash,
}

/// Main audio system managing cue playback.
pub struct AudioSystem {
    manager: AudioManager,
    cues: HashMap<Cue, StaticSoundData>,
    active_sounds: Vec<StaticSoundHandle>,
}

impl AudioSystem {
    /// Create a new audio system. Fails when no audio device is available;
    /// callers are expected to treat that as "run silent".
    pub fn new() -> Result<Self> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())?;
        Ok(Self {
            manager,
            cues: HashMap::new(),
            active_sounds: Vec::new(),
        })
    }

    /// Load a cue from a sound file.
    pub fn load_cue(&mut self, cue: Cue, path: &Path) -> Result<()> {
        let sound_data = StaticSoundData::from_file(path)?;
        self.cues.insert(cue, sound_data);
        Ok(())
    }

    /// Play a cue. Missing or unplayable cues are silently skipped.
    pub fn play_cue(&mut self, cue: Cue) {
        let Some(sound_data) = self.cues.get(&cue) else {
            return;
        };
        match self.manager.play(sound_data.clone()) {
            Ok(handle) => self.active_sounds.push(handle),
            Err(e) => log::debug!("could not play {:?} cue: {}", cue, e),
        }
    }

    /// Play a cue at a specific volume. Same non-fatal contract as `play_cue`.
    pub fn play_cue_with_volume(&mut self, cue: Cue, volume: f64) {
        let Some(sound_data) = self.cues.get(&cue) else {
            return;
        };
        let settings = StaticSoundSettings::new().volume(volume);
        let modified = sound_data.clone().with_settings(settings);
        match self.manager.play(modified) {
            Ok(handle) => self.active_sounds.push(handle),
            Err(e) => log::debug!("could not play {:?} cue: {}", cue, e),
        }
    }

    /// Clean up finished sounds. Call once per frame.
    pub fn cleanup(&mut self) {
        self.active_sounds
            .retain(|handle| handle.state() != kira::sound::PlaybackState::Stopped);
    }

    /// Stop all sounds (teardown).
    pub fn stop_all(&mut self) {
        for handle in &mut self.active_sounds {
            let _ = handle.stop(Tween::default());
        }
        self.active_sounds.clear();
    }

    /// Set master volume (0.0 to 1.0).
    pub fn set_master_volume(&mut self, volume: f64) {
        let _ = self.manager.main_track().set_volume(volume, Tween::default());
    }
}

// Re-export for convenience
pub use kira;
