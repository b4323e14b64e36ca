//! Monster tables: kinds, prefixes and difficulty.
//!
//! Scaling is always applied in the same order through one [`BonusStack`]
//! per stat: level flats, then the prefix factor, then difficulty.

use crate::state::{BuffTarget, BuffTemplate, Skill};

use super::bonus::BonusStack;
use super::classes::Archetype;
use super::core::BaseStats;
use super::modifiers::StatDelta;

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
pub enum MonsterKind {
    Goblin,
    Slime,
    Skeleton,
    Boss,
}

impl MonsterKind {
    /// Regular kinds that populate a stage.
    pub const REGULAR: [MonsterKind; 3] =
        [MonsterKind::Goblin, MonsterKind::Slime, MonsterKind::Skeleton];

    /// Unscaled table row.
    pub const fn table(self) -> BaseStats {
        match self {
            MonsterKind::Goblin => BaseStats::new(60, 10.0, 3.0, 11.0, 0.08, 30),
            MonsterKind::Slime => BaseStats::new(80, 7.0, 6.0, 5.0, 0.03, 20),
            MonsterKind::Skeleton => BaseStats::new(70, 12.0, 5.0, 7.0, 0.06, 25),
            MonsterKind::Boss => BaseStats::new(400, 25.0, 15.0, 9.0, 0.10, 100),
        }
    }

    pub const fn exp_reward(self) -> u32 {
        match self {
            MonsterKind::Goblin => 20,
            MonsterKind::Slime => 15,
            MonsterKind::Skeleton => 25,
            MonsterKind::Boss => 200,
        }
    }

    pub const fn money_reward(level: u32) -> u32 {
        5 * level + 30
    }

    pub const fn is_boss(self) -> bool {
        matches!(self, MonsterKind::Boss)
    }
}

impl Archetype for MonsterKind {
    /// Table row plus level flats.
    fn base_stats(&self, level: u32) -> BaseStats {
        let table = self.table();
        let lvl = f64::from(level);
        BaseStats {
            hp: BonusStack::new().flat(10.0 * lvl).apply(f64::from(table.hp)).round() as i32,
            damage: BonusStack::new().flat(2.0 * lvl).apply(table.damage),
            defense: BonusStack::new().flat(lvl).apply(table.defense),
            speed: table.speed,
            critical_rate: BonusStack::new().flat(0.01 * lvl).apply(table.critical_rate),
            mana: table.mana,
        }
    }

    fn skills_learned_at(&self, level: u32) -> Vec<Skill> {
        match (self, level) {
            (MonsterKind::Goblin, 1) => vec![Skill::attack("Quick Stab", 6.0, 5, 2)],
            (MonsterKind::Goblin, 4) => vec![Skill::status(
                "Smoke Bomb",
                10,
                4,
                BuffTemplate::new("Smoked", StatDelta::speed(-3.0), 2, BuffTarget::Opponent),
            )],
            (MonsterKind::Slime, 2) => vec![Skill::attack_status(
                "Acid Splash",
                5.0,
                8,
                3,
                BuffTemplate::new("Corroded", StatDelta::defense(-3.0), 3, BuffTarget::Opponent),
            )],
            (MonsterKind::Slime, 5) => vec![Skill::status(
                "Harden",
                10,
                4,
                BuffTemplate::new("Harden", StatDelta::defense(6.0), 3, BuffTarget::Caster),
            )],
            (MonsterKind::Skeleton, 1) => vec![Skill::attack("Bone Throw", 8.0, 6, 2)],
            (MonsterKind::Skeleton, 4) => vec![Skill::status(
                "Rattle",
                10,
                4,
                BuffTemplate::new("Rattled", StatDelta::attack(-4.0), 3, BuffTarget::Opponent),
            )],
            (MonsterKind::Boss, 1) => vec![
                Skill::attack("Dark Slash", 20.0, 15, 2),
                Skill::attack_status(
                    "Shadow Curse",
                    15.0,
                    25,
                    4,
                    BuffTemplate::new("Cursed", StatDelta::defense(-6.0), 3, BuffTarget::Opponent),
                ),
                Skill::status(
                    "War Cry",
                    20,
                    5,
                    BuffTemplate::new("War Cry", StatDelta::attack(10.0), 3, BuffTarget::Caster),
                ),
            ],
            _ => Vec::new(),
        }
    }
}

/// Optional name prefix that reshapes a monster's stats.
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
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Prefix {
    Feral,
    Ancient,
    Giant,
    Armored,
    Savage,
    Cursed,
    Keen,
    Elder,
}

/// How a prefix reshapes stats: multipliers on HP/attack/defense and a crit flat.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrefixEffect {
    pub hp: f64,
    pub attack: f64,
    pub defense: f64,
    pub critical_rate: f64,
}

impl Prefix {
    pub const fn effect(self) -> PrefixEffect {
        let (hp, attack, defense, critical_rate) = match self {
            Prefix::Feral => (1.0, 1.25, 1.0, 0.0),
            Prefix::Ancient => (1.3, 1.0, 1.3, 0.0),
            Prefix::Giant => (1.5, 1.0, 1.0, 0.0),
            Prefix::Armored => (1.0, 1.0, 1.5, 0.0),
            Prefix::Savage => (1.0, 1.15, 1.0, 0.05),
            Prefix::Cursed => (0.9, 1.3, 1.0, 0.0),
            Prefix::Keen => (1.0, 1.0, 1.0, 0.10),
            Prefix::Elder => (1.2, 1.2, 1.2, 0.0),
        };
        PrefixEffect {
            hp,
            attack,
            defense,
            critical_rate,
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Multiplier on HP and attack.
    pub const fn factor(self) -> f64 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.2,
        }
    }
}
