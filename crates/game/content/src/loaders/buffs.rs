//! Buff table loader.

use std::path::Path;

use anyhow::Context;
use game_core::BuffTable;

use crate::loaders::{LoadResult, read_file};

/// Loader for the `KEY=VALUE` buff table.
pub struct BuffLoader;

impl BuffLoader {
    pub fn load(path: &Path) -> LoadResult<BuffTable> {
        let content = read_file(path)?;
        let table = BuffTable::parse(&content)
            .with_context(|| format!("Failed to parse buff table {}", path.display()))?;
        tracing::debug!(entries = table.len(), path = %path.display(), "loaded buff table");
        Ok(table)
    }
}
