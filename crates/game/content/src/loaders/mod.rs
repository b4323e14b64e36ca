//! Content loaders for reading game data from files.
//!
//! Each loader turns one file into the `game-core` type that consumes it.
//! Errors carry the offending path as `anyhow` context.

pub mod buffs;
pub mod config;
pub mod factory;
pub mod item;

pub use buffs::BuffLoader;
pub use config::ConfigLoader;
pub use factory::{Content, ContentFactory};
pub use item::ItemLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
