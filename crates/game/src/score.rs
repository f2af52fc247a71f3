//! High-score persistence: a single best-score value in a ron file.
//!
//! Storage trouble is never surfaced to the player: a missing or corrupt
//! file reads as zero, and write failures are logged and swallowed.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScore {
    best: u32,
}

/// Key-value store for the single "high score" integer.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store next to the binary's working directory.
    pub fn default_path() -> Self {
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(dir.join("highscore.ron"))
    }

    /// Read the stored best score. Any failure reads as zero.
    pub fn load(&self) -> u32 {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => match ron::from_str::<HighScore>(&data) {
                Ok(hs) => hs.best,
                Err(e) => {
                    log::warn!("Invalid high score at {:?}: {}", self.path, e);
                    0
                }
            },
            Err(_) => 0,
        }
    }

    /// Persist a new best score. Failures are logged, never propagated.
    pub fn save(&self, best: u32) {
        let record = HighScore { best };
        match ron::ser::to_string_pretty(&record, ron::ser::PrettyConfig::default()) {
            Ok(s) => {
                if let Err(e) = std::fs::write(&self.path, s) {
                    log::warn!("Could not write high score to {:?}: {}", self.path, e);
                }
            }
            Err(e) => log::warn!("Could not serialize high score: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> HighScoreStore {
        let path = std::env::temp_dir().join(format!(
            "paperdrift_score_{}_{}.ron",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        HighScoreStore::new(path)
    }

    #[test]
    fn missing_file_reads_as_zero() {
        let store = temp_store("missing");
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = temp_store("roundtrip");
        store.save(600);
        assert_eq!(store.load(), 600);
    }

    #[test]
    fn corrupt_file_reads_as_zero() {
        let store = temp_store("corrupt");
        std::fs::write(&store.path, "not ron at all {{{").unwrap();
        assert_eq!(store.load(), 0);
    }
}
