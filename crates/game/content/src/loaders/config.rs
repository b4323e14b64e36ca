//! Game configuration loader.

use std::path::Path;

use anyhow::Context;
use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`GameConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig =
            toml::from_str(content).context("Failed to parse config TOML")?;
        anyhow::ensure!(
            config.turn_delay >= 0.0,
            "turn_delay must not be negative (got {})",
            config.turn_delay
        );
        anyhow::ensure!(
            config.escape.min <= config.escape.max,
            "escape.min ({}) exceeds escape.max ({})",
            config.escape.min,
            config.escape.max
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("turn_delay = 0.25\n[escape]\nbase = 0.5\n").unwrap();
        assert_eq!(config.turn_delay, 0.25);
        assert_eq!(config.escape.base, 0.5);
        assert_eq!(config.escape.max, 0.9);
        assert_eq!(config.durability_loss, 5);
    }

    #[test]
    fn rejects_inverted_escape_bounds() {
        let err = ConfigLoader::parse("[escape]\nmin = 0.8\nmax = 0.2\n").unwrap_err();
        assert!(err.to_string().contains("escape.min"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ConfigLoader::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
