//! Game configuration. Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};

/// Persistent game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// World seed. When absent, a random seed is drawn at startup.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Master volume (0.0 to 1.0).
    #[serde(default = "default_volume")]
    pub master_volume: f64,
    /// Run without an audio device (also the mode tests use).
    #[serde(default)]
    pub mute: bool,
}

fn default_volume() -> f64 {
    1.0
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            master_volume: default_volume(),
            mute: false,
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid,
    /// returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if let Ok(data) = std::fs::read_to_string(&path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(&path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }
}

fn config_path() -> std::path::PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| std::path::PathBuf::from("."))
        .join("config.ron")
}
