//! Arena run settings.
use std::env;
use std::path::PathBuf;

use game_core::{Difficulty, PlayerClass};

/// Everything that shapes one arena run besides the content files.
#[derive(Clone, Debug)]
pub struct ArenaSettings {
    pub hero_name: String,
    pub class: PlayerClass,
    pub difficulty: Difficulty,
    /// Number of stages to clear; every third stage ends with a boss.
    pub stages: u32,
    pub monsters_per_stage: usize,
    /// RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Simulated seconds per frame.
    pub frame_dt: f32,
    /// Upper bound on frames per battle before the run is aborted.
    pub max_frames: u32,
    pub data_dir: Option<PathBuf>,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            hero_name: "Hero".to_owned(),
            class: PlayerClass::Knight,
            difficulty: Difficulty::Medium,
            stages: 3,
            monsters_per_stage: 3,
            seed: None,
            frame_dt: 1.0 / 60.0,
            max_frames: 200_000,
            data_dir: None,
        }
    }
}

impl ArenaSettings {
    /// Settings from environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_DATA_DIR` - content directory (default: bundled data)
    /// - `ARENA_SEED` - RNG seed (default: entropy)
    /// - `ARENA_FRAME_DT` - seconds per simulated frame (default: 1/60)
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Ok(dir) = env::var("ARENA_DATA_DIR") {
            settings.data_dir = Some(PathBuf::from(dir));
        }
        settings.seed = read_env::<u64>("ARENA_SEED");
        if let Some(dt) = read_env::<f32>("ARENA_FRAME_DT") {
            settings.frame_dt = dt.max(0.001);
        }

        settings
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
