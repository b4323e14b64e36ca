//! Data-driven content and its loaders.
//!
//! This crate reads the balance and loot data the engine consumes:
//! - Game configuration (`config.toml`, TOML)
//! - Item catalog (`items.ron`, RON)
//! - Buff table (`buffs.txt`, `KEY=VALUE` lines)
//!
//! Content is handed to `game-core` through its service types (`GameConfig`,
//! `ItemCatalog`, `BuffTable`) and never appears in battle state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{BuffLoader, ConfigLoader, Content, ContentFactory, ItemLoader};

/// The data directory shipped with this crate.
pub const BUNDLED_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
