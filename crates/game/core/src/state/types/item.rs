//! Items: equipment and potions.
//!
//! # Design: Base + Kind Pattern
//!
//! - [`Item`] is the closed set of things an inventory can hold
//! - [`EquipmentKind`] / [`PotionType`] carry the sub-kind used for slot
//!   resolution and forge compatibility
//! - Bonus and price tables are functions of (sub-kind, tier), so a
//!   forged item's numbers are derived the same way a catalog item's are

use crate::config::GameConfig;
use crate::stats::EquipmentBonus;

/// Identifier of an item instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Equipment slots of an inventory.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumCount,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slot {
    Helmet,
    Chest,
    Legs,
    Gloves,
    Weapon,
    Ring,
    Bracelet,
}

impl Slot {
    /// Position of this slot in slot-indexed arrays.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Weapon families.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum WeaponKind {
    Sword,
    Bow,
    Staff,
    Axe,
}

/// Armor and accessory pieces; each maps to exactly one [`Slot`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum ArmorSlot {
    Helmet,
    Chest,
    Legs,
    Gloves,
    Ring,
    Bracelet,
}

impl ArmorSlot {
    pub const fn slot(self) -> Slot {
        match self {
            ArmorSlot::Helmet => Slot::Helmet,
            ArmorSlot::Chest => Slot::Chest,
            ArmorSlot::Legs => Slot::Legs,
            ArmorSlot::Gloves => Slot::Gloves,
            ArmorSlot::Ring => Slot::Ring,
            ArmorSlot::Bracelet => Slot::Bracelet,
        }
    }
}

/// Equipment sub-kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipmentKind {
    Weapon(WeaponKind),
    Armor(ArmorSlot),
}

impl EquipmentKind {
    pub const fn slot(self) -> Slot {
        match self {
            EquipmentKind::Weapon(_) => Slot::Weapon,
            EquipmentKind::Armor(piece) => piece.slot(),
        }
    }

    pub fn label(self) -> String {
        match self {
            EquipmentKind::Weapon(kind) => kind.to_string(),
            EquipmentKind::Armor(piece) => piece.to_string(),
        }
    }

    /// Bonuses granted by this kind at `tier`.
    pub fn bonus_at(self, tier: u32) -> EquipmentBonus {
        let t = f64::from(tier);
        let n = tier as i32;
        let none = EquipmentBonus::NONE;
        match self {
            EquipmentKind::Weapon(WeaponKind::Sword) => EquipmentBonus {
                attack: 6.0 * t,
                critical_rate: 0.02 * t,
                ..none
            },
            EquipmentKind::Weapon(WeaponKind::Bow) => EquipmentBonus {
                attack: 5.0 * t,
                critical_rate: 0.04 * t,
                ..none
            },
            EquipmentKind::Weapon(WeaponKind::Staff) => EquipmentBonus {
                attack: 7.0 * t,
                mana: 10 * n,
                ..none
            },
            EquipmentKind::Weapon(WeaponKind::Axe) => EquipmentBonus {
                attack: 8.0 * t,
                critical_rate: 0.01 * t,
                ..none
            },
            EquipmentKind::Armor(ArmorSlot::Helmet) => EquipmentBonus {
                defense: 3.0 * t,
                hp: 10 * n,
                ..none
            },
            EquipmentKind::Armor(ArmorSlot::Chest) => EquipmentBonus {
                defense: 6.0 * t,
                hp: 20 * n,
                ..none
            },
            EquipmentKind::Armor(ArmorSlot::Legs) => EquipmentBonus {
                defense: 4.0 * t,
                speed: 1.0 * t,
                ..none
            },
            EquipmentKind::Armor(ArmorSlot::Gloves) => EquipmentBonus {
                attack: 2.0 * t,
                defense: 2.0 * t,
                ..none
            },
            EquipmentKind::Armor(ArmorSlot::Ring) => EquipmentBonus {
                mana: 15 * n,
                critical_rate: 0.03 * t,
                ..none
            },
            EquipmentKind::Armor(ArmorSlot::Bracelet) => EquipmentBonus {
                speed: 2.0 * t,
                critical_rate: 0.02 * t,
                ..none
            },
        }
    }

    /// Shop price at `tier`.
    pub fn price_at(self, tier: u32) -> u32 {
        let per_tier = match self {
            EquipmentKind::Weapon(_) => 25,
            EquipmentKind::Armor(ArmorSlot::Chest) => 30,
            EquipmentKind::Armor(ArmorSlot::Ring | ArmorSlot::Bracelet) => 35,
            EquipmentKind::Armor(_) => 20,
        };
        per_tier * tier
    }
}

/// Adjective used in generated item names.
pub fn tier_name(tier: u32) -> &'static str {
    match tier {
        0 | 1 => "Worn",
        2 => "Sturdy",
        3 => "Fine",
        4 => "Superior",
        5 => "Masterwork",
        _ => "Legendary",
    }
}

/// A weapon or armor piece.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub kind: EquipmentKind,
    pub tier: u32,
    /// 0–100; the item breaks at 0.
    pub durability: i32,
    pub price: u32,
    pub bonus: EquipmentBonus,
}

impl Equipment {
    /// Builds a full-durability item with table-derived name, bonus and price.
    pub fn new(id: ItemId, kind: EquipmentKind, tier: u32) -> Self {
        let tier = tier.max(1);
        Self {
            id,
            name: format!("{} {}", tier_name(tier), kind.label()),
            description: format!("A tier {} {}.", tier, kind.label().to_lowercase()),
            kind,
            tier,
            durability: GameConfig::MAX_DURABILITY,
            price: kind.price_at(tier),
            bonus: kind.bonus_at(tier),
        }
    }

    pub fn with_price(mut self, price: u32) -> Self {
        self.price = price;
        self
    }

    pub fn slot(&self) -> Slot {
        self.kind.slot()
    }

    pub fn weapon_kind(&self) -> Option<WeaponKind> {
        match self.kind {
            EquipmentKind::Weapon(kind) => Some(kind),
            EquipmentKind::Armor(_) => None,
        }
    }

    /// Reduces durability, floored at 0.
    pub fn degrade(&mut self, amount: i32) {
        self.durability = (self.durability - amount).max(0);
    }

    pub fn is_broken(&self) -> bool {
        self.durability <= 0
    }
}

/// Potion effects.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum PotionType {
    Healing,
    Mana,
    ReduceCooldown,
    ExpBoost,
}

impl PotionType {
    /// Potions that make sense as a battle action.
    pub const fn usable_in_battle(self) -> bool {
        !matches!(self, PotionType::ExpBoost)
    }

    /// Effect size at `tier` (HP, mana, turns or exp).
    pub const fn magnitude_at(self, tier: u32) -> i32 {
        let t = tier as i32;
        match self {
            PotionType::Healing => 40 * t,
            PotionType::Mana => 30 * t,
            PotionType::ReduceCooldown => t,
            PotionType::ExpBoost => 50 * t,
        }
    }

    pub const fn price_at(self, tier: u32) -> u32 {
        match self {
            PotionType::Healing | PotionType::Mana => 15 * tier,
            PotionType::ReduceCooldown => 25 * tier,
            PotionType::ExpBoost => 40 * tier,
        }
    }

    fn label(self) -> &'static str {
        match self {
            PotionType::Healing => "Healing Potion",
            PotionType::Mana => "Mana Potion",
            PotionType::ReduceCooldown => "Elixir of Haste",
            PotionType::ExpBoost => "Tome Draught",
        }
    }
}

/// A stack of identical consumables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Potion {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub potion_type: PotionType,
    pub magnitude: i32,
    pub tier: u32,
    pub price: u32,
    pub quantity: u32,
}

impl Potion {
    pub fn new(id: ItemId, potion_type: PotionType, tier: u32, quantity: u32) -> Self {
        let tier = tier.max(1);
        Self {
            id,
            name: format!("{} {}", tier_name(tier), potion_type.label()),
            description: format!("A tier {} {}.", tier, potion_type.label().to_lowercase()),
            potion_type,
            magnitude: potion_type.magnitude_at(tier),
            tier,
            price: potion_type.price_at(tier),
            quantity,
        }
    }

    /// True if `other` can merge into this stack.
    pub fn stacks_with(&self, other: &Potion) -> bool {
        self.potion_type == other.potion_type
            && self.tier == other.tier
            && self.magnitude == other.magnitude
    }
}

/// Anything an inventory can hold.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Item {
    Equipment(Equipment),
    Potion(Potion),
}

impl Item {
    pub fn id(&self) -> ItemId {
        match self {
            Item::Equipment(e) => e.id,
            Item::Potion(p) => p.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Item::Equipment(e) => &e.name,
            Item::Potion(p) => &p.name,
        }
    }

    pub fn tier(&self) -> u32 {
        match self {
            Item::Equipment(e) => e.tier,
            Item::Potion(p) => p.tier,
        }
    }

    pub fn price(&self) -> u32 {
        match self {
            Item::Equipment(e) => e.price,
            Item::Potion(p) => p.price,
        }
    }

    pub fn as_equipment(&self) -> Option<&Equipment> {
        match self {
            Item::Equipment(e) => Some(e),
            Item::Potion(_) => None,
        }
    }

    pub fn as_potion(&self) -> Option<&Potion> {
        match self {
            Item::Potion(p) => Some(p),
            Item::Equipment(_) => None,
        }
    }
}

impl From<Equipment> for Item {
    fn from(equipment: Equipment) -> Self {
        Item::Equipment(equipment)
    }
}

impl From<Potion> for Item {
    fn from(potion: Potion) -> Self {
        Item::Potion(potion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn every_armor_piece_has_a_distinct_slot() {
        let mut slots: Vec<Slot> = ArmorSlot::iter().map(ArmorSlot::slot).collect();
        slots.push(EquipmentKind::Weapon(WeaponKind::Sword).slot());
        slots.sort_by_key(|s| s.index());
        slots.dedup();
        assert_eq!(slots.len(), Slot::COUNT);
    }

    #[test]
    fn tier_one_sword_matches_shop_table() {
        let sword = Equipment::new(ItemId(101), EquipmentKind::Weapon(WeaponKind::Sword), 1);
        assert_eq!(sword.name, "Worn Sword");
        assert_eq!(sword.price, 25);
        assert_eq!(sword.durability, 100);
        assert_eq!(sword.bonus.attack, 6.0);
        assert_eq!(sword.slot(), Slot::Weapon);
    }

    #[test]
    fn degrade_floors_at_zero() {
        let mut helm = Equipment::new(ItemId(1), EquipmentKind::Armor(ArmorSlot::Helmet), 1);
        helm.degrade(60);
        assert!(!helm.is_broken());
        helm.degrade(60);
        assert_eq!(helm.durability, 0);
        assert!(helm.is_broken());
    }

    #[test]
    fn exp_potions_are_not_battle_items() {
        assert!(PotionType::Healing.usable_in_battle());
        assert!(!PotionType::ExpBoost.usable_in_battle());
        let potion = Potion::new(ItemId(9), PotionType::Healing, 2, 1);
        assert_eq!(potion.magnitude, 80);
        assert_eq!(potion.name, "Sturdy Healing Potion");
    }
}
