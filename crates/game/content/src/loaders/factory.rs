//! Content factory for loading every data file from one directory.

use std::path::{Path, PathBuf};

use game_core::{BuffTable, GameConfig, ItemCatalog};

use crate::loaders::{BuffLoader, ConfigLoader, ItemLoader, LoadResult};

/// Everything the engine needs from data files.
#[derive(Clone, Debug)]
pub struct Content {
    pub config: GameConfig,
    pub buffs: BuffTable,
    pub items: ItemCatalog,
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// └── buffs.txt
/// ```
///
/// `config.toml` and `buffs.txt` are optional and fall back to the engine's
/// built-in values; `items.ron` falls back to the built-in catalog.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data directory bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(crate::BUNDLED_DATA_DIR)
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the buff table from `buffs.txt`.
    pub fn load_buffs(&self) -> LoadResult<BuffTable> {
        let path = self.data_dir.join("buffs.txt");
        if !path.exists() {
            tracing::info!(path = %path.display(), "no buff table, using built-in values");
            return Ok(BuffTable::builtin());
        }
        BuffLoader::load(&path)
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        let path = self.data_dir.join("items.ron");
        if !path.exists() {
            tracing::info!(path = %path.display(), "no item catalog, using built-in catalog");
            return Ok(ItemCatalog::builtin());
        }
        ItemLoader::load(&path)
    }

    /// Load every content file.
    pub fn load_all(&self) -> LoadResult<Content> {
        Ok(Content {
            config: self.load_config()?,
            buffs: self.load_buffs()?,
            items: self.load_items()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
