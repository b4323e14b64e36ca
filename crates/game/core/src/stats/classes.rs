//! Player classes.
//!
//! A class is a tag that selects const tables: level-1 stats, per-level
//! growth, the skills learned at levels 3/6/9 and the weapon it handles best.

use crate::state::{BuffTarget, BuffTemplate, Equipment, Skill, WeaponKind};

use super::core::BaseStats;
use super::modifiers::StatDelta;

/// Table-driven capabilities shared by player classes and monster kinds.
pub trait Archetype {
    /// Stats at `level` before equipment and buffs.
    fn base_stats(&self, level: u32) -> BaseStats;

    /// Skills that become available exactly at `level`.
    fn skills_learned_at(&self, level: u32) -> Vec<Skill>;

    /// Every skill learned at or below `level`, in learning order.
    fn skills_up_to(&self, level: u32) -> Vec<Skill> {
        (1..=level)
            .flat_map(|lvl| self.skills_learned_at(lvl))
            .collect()
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum PlayerClass {
    Knight,
    Archer,
    Mage,
}

impl PlayerClass {
    const fn level_one(self) -> BaseStats {
        match self {
            PlayerClass::Knight => BaseStats::new(120, 12.0, 10.0, 8.0, 0.05, 40),
            PlayerClass::Archer => BaseStats::new(90, 15.0, 5.0, 12.0, 0.12, 50),
            PlayerClass::Mage => BaseStats::new(80, 18.0, 4.0, 9.0, 0.08, 100),
        }
    }

    const fn growth(self) -> BaseStats {
        match self {
            PlayerClass::Knight => BaseStats::new(12, 2.0, 2.0, 0.5, 0.005, 4),
            PlayerClass::Archer => BaseStats::new(8, 3.0, 1.0, 1.0, 0.01, 5),
            PlayerClass::Mage => BaseStats::new(6, 4.0, 1.0, 0.5, 0.005, 10),
        }
    }

    /// The weapon family this class gets an affinity bonus with.
    pub const fn favoured_weapon(self) -> WeaponKind {
        match self {
            PlayerClass::Knight => WeaponKind::Sword,
            PlayerClass::Archer => WeaponKind::Bow,
            PlayerClass::Mage => WeaponKind::Staff,
        }
    }

    /// Extra `(damage, critical_rate)` for wielding `weapon`.
    ///
    /// Only the favoured weapon family grants anything; damage scales with tier.
    pub fn class_weapon_bonus(self, weapon: &Equipment) -> (f64, f64) {
        if weapon.weapon_kind() != Some(self.favoured_weapon()) {
            return (0.0, 0.0);
        }
        let tier = f64::from(weapon.tier);
        match self {
            PlayerClass::Knight => (5.0 * tier, 0.05),
            PlayerClass::Archer => (4.0 * tier, 0.08),
            PlayerClass::Mage => (6.0 * tier, 0.03),
        }
    }

    /// Experience needed to advance from `level`.
    pub const fn exp_to_next(level: u32) -> u32 {
        50 + 50 * level
    }
}

impl Archetype for PlayerClass {
    fn base_stats(&self, level: u32) -> BaseStats {
        self.level_one()
            .grown(&self.growth(), level.saturating_sub(1))
    }

    fn skills_learned_at(&self, level: u32) -> Vec<Skill> {
        let skill = match (self, level) {
            (PlayerClass::Knight, 3) => Skill::attack("Shield Bash", 12.0, 10, 2),
            (PlayerClass::Knight, 6) => Skill::status(
                "Iron Will",
                15,
                4,
                BuffTemplate::new("Iron Will", StatDelta::defense(8.0), 3, BuffTarget::Caster),
            ),
            (PlayerClass::Knight, 9) => Skill::attack_status(
                "Holy Strike",
                20.0,
                25,
                4,
                BuffTemplate::new("Judged", StatDelta::attack(-5.0), 3, BuffTarget::Opponent),
            ),
            (PlayerClass::Archer, 3) => Skill::attack("Focus Shoot", 18.0, 12, 2),
            (PlayerClass::Archer, 6) => Skill::status(
                "Eagle Eye",
                15,
                4,
                BuffTemplate::new(
                    "Eagle Eye",
                    StatDelta::critical_rate(0.15),
                    3,
                    BuffTarget::Caster,
                ),
            ),
            (PlayerClass::Archer, 9) => Skill::attack_status(
                "Crippling Arrow",
                15.0,
                20,
                3,
                BuffTemplate::new("Crippled", StatDelta::speed(-4.0), 3, BuffTarget::Opponent),
            ),
            (PlayerClass::Mage, 3) => Skill::attack("Fireball", 25.0, 20, 2),
            (PlayerClass::Mage, 6) => Skill::status(
                "Arcane Shield",
                20,
                4,
                BuffTemplate::new(
                    "Arcane Shield",
                    StatDelta::defense(10.0),
                    3,
                    BuffTarget::Caster,
                ),
            ),
            (PlayerClass::Mage, 9) => Skill::attack_status(
                "Frost Nova",
                20.0,
                30,
                4,
                BuffTemplate::new("Frozen", StatDelta::speed(-5.0), 2, BuffTarget::Opponent),
            ),
            _ => return Vec::new(),
        };
        vec![skill]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ArmorSlot, EquipmentKind, ItemId};

    #[test]
    fn level_one_matches_class_table() {
        let archer = PlayerClass::Archer.base_stats(1);
        assert_eq!(archer.hp, 90);
        assert_eq!(archer.damage, 15.0);
        assert_eq!(archer.critical_rate, 0.12);
    }

    #[test]
    fn skills_unlock_at_three_six_nine() {
        for class in [PlayerClass::Knight, PlayerClass::Archer, PlayerClass::Mage] {
            assert_eq!(class.skills_up_to(2).len(), 0);
            assert_eq!(class.skills_up_to(5).len(), 1);
            assert_eq!(class.skills_up_to(8).len(), 2);
            assert_eq!(class.skills_up_to(20).len(), 3);
        }
        assert_eq!(PlayerClass::Mage.skills_learned_at(3)[0].name, "Fireball");
    }

    #[test]
    fn affinity_requires_favoured_weapon() {
        let sword = Equipment::new(ItemId(1), EquipmentKind::Weapon(WeaponKind::Sword), 2);
        let bow = Equipment::new(ItemId(2), EquipmentKind::Weapon(WeaponKind::Bow), 1);
        let helm = Equipment::new(ItemId(3), EquipmentKind::Armor(ArmorSlot::Helmet), 1);

        assert_eq!(PlayerClass::Knight.class_weapon_bonus(&sword), (10.0, 0.05));
        assert_eq!(PlayerClass::Knight.class_weapon_bonus(&bow), (0.0, 0.0));
        assert_eq!(PlayerClass::Archer.class_weapon_bonus(&bow), (4.0, 0.08));
        assert_eq!(PlayerClass::Mage.class_weapon_bonus(&helm), (0.0, 0.0));
    }

    #[test]
    fn exp_curve() {
        assert_eq!(PlayerClass::exp_to_next(1), 100);
        assert_eq!(PlayerClass::exp_to_next(4), 250);
    }
}
