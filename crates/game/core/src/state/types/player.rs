//! The player character: a unit with a class and an inventory.

use crate::stats::{Archetype, BaseStats, BonusStack, PlayerClass, UnitStats};

use super::inventory::Inventory;
use super::item::{Equipment, Item, ItemId, PotionType, Slot};
use super::unit::Unit;

/// Why a potion could not be drunk.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    #[error("{0} is not in the inventory")]
    NotFound(ItemId),

    #[error("{name} cannot be consumed")]
    NotConsumable { name: String },

    #[error("{name} cannot be used during battle")]
    NotUsableInBattle { name: String },
}

impl crate::error::GameError for ItemError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        match self {
            Self::NotFound(_) => crate::error::ErrorSeverity::Validation,
            Self::NotConsumable { .. } | Self::NotUsableInBattle { .. } => {
                crate::error::ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "ITEM_NOT_FOUND",
            Self::NotConsumable { .. } => "ITEM_NOT_CONSUMABLE",
            Self::NotUsableInBattle { .. } => "ITEM_NOT_USABLE_IN_BATTLE",
        }
    }
}

/// What a consumed potion did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PotionEffect {
    Healed(i32),
    ManaRestored(i32),
    CooldownsReduced(u32),
    ExpGained { amount: u32, levels: u32 },
}

impl core::fmt::Display for PotionEffect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PotionEffect::Healed(hp) => write!(f, "recovered {hp} HP"),
            PotionEffect::ManaRestored(mana) => write!(f, "recovered {mana} mana"),
            PotionEffect::CooldownsReduced(turns) => {
                write!(f, "skill cooldowns reduced by {turns}")
            }
            PotionEffect::ExpGained { amount, levels: 0 } => write!(f, "gained {amount} exp"),
            PotionEffect::ExpGained { amount, levels } => {
                write!(f, "gained {amount} exp and {levels} level(s)")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub unit: Unit,
    pub class: PlayerClass,
    pub inventory: Inventory,
}

impl Player {
    /// A level-1 character with an empty inventory.
    pub fn new(name: impl Into<String>, class: PlayerClass) -> Self {
        let stats = UnitStats::from_base(&class.base_stats(1), 1);
        let mut unit = Unit::new(name, stats);
        for skill in class.skills_up_to(1) {
            unit.learn_skill(skill);
        }
        Self {
            unit,
            class,
            inventory: Inventory::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.unit.name
    }

    pub fn level(&self) -> u32 {
        self.unit.level()
    }

    pub fn stats(&self) -> &UnitStats {
        &self.unit.stats
    }

    pub fn is_alive(&self) -> bool {
        self.unit.is_alive()
    }

    // ===== table lookups =====

    fn base(&self) -> BaseStats {
        self.class.base_stats(self.level())
    }

    pub fn base_hp(&self) -> i32 {
        self.base().hp
    }

    pub fn base_damage(&self) -> f64 {
        self.base().damage
    }

    pub fn base_defense(&self) -> f64 {
        self.base().defense
    }

    pub fn base_speed(&self) -> f64 {
        self.base().speed
    }

    pub fn base_critical_rate(&self) -> f64 {
        self.base().critical_rate
    }

    pub fn base_mana(&self) -> i32 {
        self.base().mana
    }

    pub fn class_weapon_bonus(&self, weapon: &Equipment) -> (f64, f64) {
        self.class.class_weapon_bonus(weapon)
    }

    pub fn exp_to_next(&self) -> u32 {
        PlayerClass::exp_to_next(self.level())
    }

    // ===== derived stats =====

    /// Rebuilds every derived stat from base, gear, affinity and buffs.
    ///
    /// A unit at full HP (or mana) stays full; otherwise the current value is
    /// kept and clamped to the new maximum.
    pub fn recalculate_stats(&mut self) {
        let base = self.base();
        let gear = self.inventory.equipment_bonus();
        let (affinity_damage, affinity_crit) = self
            .inventory
            .weapon()
            .map(|weapon| self.class.class_weapon_bonus(weapon))
            .unwrap_or((0.0, 0.0));
        let buffs = self.unit.buff_totals();
        let alive = self.unit.is_alive();

        let stats = &mut self.unit.stats;
        let was_full_hp = stats.hp == stats.max_hp;
        let was_full_mana = stats.mana == stats.max_mana;

        stats.max_hp = BonusStack::new().flat(f64::from(gear.hp)).apply_rounded(base.hp);
        stats.max_mana = BonusStack::new()
            .flat(f64::from(gear.mana))
            .apply_rounded(base.mana);
        stats.damage = BonusStack::new()
            .flat(gear.attack)
            .flat(affinity_damage)
            .flat(buffs.attack)
            .apply(base.damage);
        stats.defense = BonusStack::new()
            .flat(gear.defense)
            .flat(buffs.defense)
            .apply(base.defense);
        stats.speed = BonusStack::new()
            .flat(gear.speed)
            .flat(buffs.speed)
            .apply(base.speed);
        stats.critical_rate = BonusStack::new()
            .flat(gear.critical_rate)
            .flat(affinity_crit)
            .flat(buffs.critical_rate)
            .apply(base.critical_rate);

        if alive && was_full_hp {
            stats.hp = stats.max_hp;
        } else {
            stats.hp = stats.hp.min(stats.max_hp);
        }
        if was_full_mana {
            stats.mana = stats.max_mana;
        } else {
            stats.mana = stats.mana.min(stats.max_mana);
        }
    }

    // ===== progression =====

    /// Advances one level, recomputes stats and learns that level's skills.
    ///
    /// Returns the names of newly learned skills.
    pub fn level_up(&mut self) -> Vec<String> {
        self.unit.stats.level += 1;
        self.recalculate_stats();

        let level = self.level();
        let mut learned = Vec::new();
        for skill in self.class.skills_learned_at(level) {
            let name = skill.name.clone();
            if self.unit.learn_skill(skill) {
                learned.push(name);
            }
        }
        tracing::debug!(player = %self.unit.name, level, ?learned, "level up");
        learned
    }

    /// Adds experience and levels up as many times as it allows.
    ///
    /// Returns the number of levels gained.
    pub fn gain_exp(&mut self, amount: u32) -> u32 {
        self.unit.stats.exp = self.unit.stats.exp.saturating_add(amount);
        let mut levels = 0;
        while self.unit.stats.exp >= self.exp_to_next() {
            self.unit.stats.exp -= self.exp_to_next();
            self.level_up();
            levels += 1;
        }
        levels
    }

    // ===== equipment =====

    pub fn equip(&mut self, id: ItemId) -> bool {
        let equipped = self.inventory.equip(id);
        if equipped {
            self.recalculate_stats();
        }
        equipped
    }

    pub fn unequip(&mut self, slot: Slot) -> bool {
        let removed = self.inventory.unequip(slot);
        if removed {
            self.recalculate_stats();
        }
        removed
    }

    /// Destroys broken gear, notifying `on_broken` for each piece.
    pub fn remove_broken(&mut self, on_broken: impl FnMut(&Equipment)) -> usize {
        let removed = self.inventory.remove_broken(on_broken);
        if removed > 0 {
            self.recalculate_stats();
        }
        removed
    }

    /// Wears all gear down by `amount` and destroys what broke.
    ///
    /// Returns the names of destroyed pieces.
    pub fn degrade_equipment(&mut self, amount: i32) -> Vec<String> {
        self.inventory.degrade_equipped(amount);
        let mut broken = Vec::new();
        self.remove_broken(|piece| broken.push(piece.name.clone()));
        broken
    }

    // ===== potions =====

    /// Drinks one potion from the stack `id`.
    ///
    /// With `in_battle`, potions that only make sense outside a fight are
    /// rejected and the stack is left untouched.
    pub fn use_potion(&mut self, id: ItemId, in_battle: bool) -> Result<PotionEffect, ItemError> {
        let item = self.inventory.find(id).ok_or(ItemError::NotFound(id))?;
        let potion = match item {
            Item::Potion(potion) => potion,
            Item::Equipment(equipment) => {
                return Err(ItemError::NotConsumable {
                    name: equipment.name.clone(),
                });
            }
        };
        if in_battle && !potion.potion_type.usable_in_battle() {
            return Err(ItemError::NotUsableInBattle {
                name: potion.name.clone(),
            });
        }
        let potion_type = potion.potion_type;
        let magnitude = potion.magnitude;
        self.inventory.take_one(id);

        let effect = match potion_type {
            PotionType::Healing => PotionEffect::Healed(self.unit.heal(magnitude)),
            PotionType::Mana => PotionEffect::ManaRestored(self.unit.restore_mana(magnitude)),
            PotionType::ReduceCooldown => {
                let turns = magnitude.max(0) as u32;
                self.unit.reduce_cooldowns(turns);
                PotionEffect::CooldownsReduced(turns)
            }
            PotionType::ExpBoost => {
                let amount = magnitude.max(0) as u32;
                let levels = self.gain_exp(amount);
                PotionEffect::ExpGained { amount, levels }
            }
        };
        Ok(effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::types::item::{ArmorSlot, EquipmentKind, Potion, WeaponKind};
    use crate::state::types::status::{Buff, BuffType};

    fn knight() -> Player {
        Player::new("Aldric", PlayerClass::Knight)
    }

    #[test]
    fn equip_then_unequip_restores_stats() {
        let mut player = knight();
        player.inventory.add(Equipment::new(
            ItemId(1),
            EquipmentKind::Weapon(WeaponKind::Sword),
            1,
        ));
        let before = player.stats().clone();

        assert!(player.equip(ItemId(1)));
        assert_eq!(player.stats().damage, 12.0 + 6.0 + 5.0);
        assert!((player.stats().critical_rate - (0.05 + 0.02 + 0.05)).abs() < 1e-12);

        assert!(player.unequip(Slot::Weapon));
        assert_eq!(player.stats(), &before);
    }

    #[test]
    fn armor_hp_fills_only_when_already_full() {
        let mut player = knight();
        player.inventory.add(Equipment::new(
            ItemId(2),
            EquipmentKind::Armor(ArmorSlot::Chest),
            1,
        ));
        player.inventory.add(Equipment::new(
            ItemId(3),
            EquipmentKind::Armor(ArmorSlot::Helmet),
            1,
        ));

        player.equip(ItemId(2));
        assert_eq!(player.stats().max_hp, 140);
        assert_eq!(player.stats().hp, 140);

        player.unit.take_damage(40);
        player.equip(ItemId(3));
        assert_eq!(player.stats().max_hp, 150);
        assert_eq!(player.stats().hp, 100);

        player.unequip(Slot::Chest);
        player.unequip(Slot::Helmet);
        assert_eq!(player.stats().hp, 100);
        assert_eq!(player.stats().max_hp, 120);
    }

    #[test]
    fn recalculation_keeps_active_buffs() {
        let mut player = knight();
        player.unit.add_buff(Buff::of_type(BuffType::Attack, 5.0, 3, 1));
        player.recalculate_stats();
        assert_eq!(player.stats().damage, 17.0);
    }

    #[test]
    fn exp_overflow_levels_repeatedly() {
        let mut player = knight();
        // 100 to reach 2, 150 to reach 3
        assert_eq!(player.gain_exp(260), 2);
        assert_eq!(player.level(), 3);
        assert_eq!(player.stats().exp, 10);
        assert_eq!(player.unit.skills.len(), 1);
        assert_eq!(player.stats().hp, player.stats().max_hp);
    }

    #[test]
    fn exp_potions_are_rejected_in_battle() {
        let mut player = knight();
        player
            .inventory
            .add(Potion::new(ItemId(7), PotionType::ExpBoost, 2, 1));

        assert!(matches!(
            player.use_potion(ItemId(7), true),
            Err(ItemError::NotUsableInBattle { .. })
        ));
        assert!(player.inventory.contains(ItemId(7)));

        let effect = player.use_potion(ItemId(7), false);
        assert_eq!(
            effect,
            Ok(PotionEffect::ExpGained {
                amount: 100,
                levels: 1
            })
        );
        assert!(!player.inventory.contains(ItemId(7)));
    }

    #[test]
    fn worn_out_gear_is_destroyed() {
        let mut player = knight();
        player.inventory.add(Equipment::new(
            ItemId(1),
            EquipmentKind::Weapon(WeaponKind::Sword),
            1,
        ));
        player.equip(ItemId(1));
        for _ in 0..19 {
            assert!(player.degrade_equipment(5).is_empty());
        }
        assert_eq!(player.degrade_equipment(5), vec!["Worn Sword".to_string()]);
        assert_eq!(player.stats().damage, 12.0);
    }
}
