//! Item catalog loader.

use std::path::Path;

use anyhow::Context;
use game_core::env::ItemTemplate;
use game_core::ItemCatalog;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalogFile {
    pub items: Vec<ItemTemplate>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parse an item catalog from RON text. An empty catalog is an error:
    /// monsters could never carry drops.
    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let file: ItemCatalogFile =
            ron::from_str(content).context("Failed to parse item catalog RON")?;
        anyhow::ensure!(!file.items.is_empty(), "item catalog has no entries");
        tracing::debug!(templates = file.items.len(), "loaded item catalog");
        Ok(ItemCatalog::new(file.items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::state::{EquipmentKind, PotionType, WeaponKind};

    #[test]
    fn parses_named_and_unnamed_templates() {
        let catalog = ItemLoader::parse(
            r#"(
                items: [
                    Equipment(kind: Weapon(Sword), name: Some("Rusty Blade")),
                    Potion(potion_type: Healing),
                ],
            )"#,
        )
        .unwrap();
        assert_eq!(
            catalog.templates(),
            &[
                ItemTemplate::Equipment {
                    kind: EquipmentKind::Weapon(WeaponKind::Sword),
                    name: Some("Rusty Blade".into()),
                },
                ItemTemplate::Potion {
                    potion_type: PotionType::Healing,
                    name: None,
                },
            ]
        );
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(ItemLoader::parse("(items: [])").is_err());
        assert!(ItemLoader::parse("(items: [Dragon])").is_err());
    }
}
