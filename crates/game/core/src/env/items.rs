//! Item catalog: the pool random loot is drawn from.
//!
//! The catalog holds templates (what kind of item, optional display name);
//! concrete items are stamped out at a requested tier so one catalog entry
//! serves every stage.

use std::cell::Cell;

use strum::IntoEnumIterator;

use crate::state::{
    ArmorSlot, Equipment, EquipmentKind, Item, ItemId, Potion, PotionType, WeaponKind,
};

use super::rng::{RngOracle, pick};

/// What a catalog entry produces.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemTemplate {
    Equipment {
        kind: EquipmentKind,
        #[cfg_attr(feature = "serde", serde(default))]
        name: Option<String>,
    },
    Potion {
        potion_type: PotionType,
        #[cfg_attr(feature = "serde", serde(default))]
        name: Option<String>,
    },
}

impl ItemTemplate {
    pub fn is_equipment(&self) -> bool {
        matches!(self, ItemTemplate::Equipment { .. })
    }
}

/// Loot templates plus an id allocator for the items made from them.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemCatalog {
    templates: Vec<ItemTemplate>,
    next_id: Cell<u32>,
}

impl ItemCatalog {
    /// First id handed out; lower ids are free for hand-placed items.
    pub const FIRST_ID: u32 = 10_000;

    pub fn new(templates: Vec<ItemTemplate>) -> Self {
        Self {
            templates,
            next_id: Cell::new(Self::FIRST_ID),
        }
    }

    /// Every equipment kind and every potion type, unnamed.
    pub fn builtin() -> Self {
        let weapons = WeaponKind::iter().map(EquipmentKind::Weapon);
        let armor = ArmorSlot::iter().map(EquipmentKind::Armor);
        let mut templates: Vec<ItemTemplate> = weapons
            .chain(armor)
            .map(|kind| ItemTemplate::Equipment { kind, name: None })
            .collect();
        templates.extend(PotionType::iter().map(|potion_type| ItemTemplate::Potion {
            potion_type,
            name: None,
        }));
        Self::new(templates)
    }

    pub fn templates(&self) -> &[ItemTemplate] {
        &self.templates
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Hands out a fresh item id.
    pub fn allocate_id(&self) -> ItemId {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        ItemId(id)
    }

    /// Stamps out one item from `template` at `tier`.
    pub fn create(&self, template: &ItemTemplate, tier: u32) -> Item {
        let id = self.allocate_id();
        match template {
            ItemTemplate::Equipment { kind, name } => {
                let mut equipment = Equipment::new(id, *kind, tier);
                if let Some(name) = name {
                    equipment.name = name.clone();
                }
                Item::Equipment(equipment)
            }
            ItemTemplate::Potion { potion_type, name } => {
                let mut potion = Potion::new(id, *potion_type, tier, 1);
                if let Some(name) = name {
                    potion.name = name.clone();
                }
                Item::Potion(potion)
            }
        }
    }

    /// Any template, uniformly.
    pub fn random_drop(&self, rng: &mut dyn RngOracle, tier: u32) -> Option<Item> {
        let template = pick(rng, &self.templates)?;
        Some(self.create(template, tier))
    }

    pub fn random_equipment(&self, rng: &mut dyn RngOracle, tier: u32) -> Option<Equipment> {
        let pool: Vec<&ItemTemplate> = self.templates.iter().filter(|t| t.is_equipment()).collect();
        let template = *pick(rng, &pool)?;
        match self.create(template, tier) {
            Item::Equipment(equipment) => Some(equipment),
            Item::Potion(_) => None,
        }
    }

    pub fn random_potion(&self, rng: &mut dyn RngOracle, tier: u32) -> Option<Potion> {
        let pool: Vec<&ItemTemplate> = self
            .templates
            .iter()
            .filter(|t| !t.is_equipment())
            .collect();
        let template = *pick(rng, &pool)?;
        match self.create(template, tier) {
            Item::Potion(potion) => Some(potion),
            Item::Equipment(_) => None,
        }
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
