//! Monsters: a unit plus kind-specific state and rewards.

use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::stats::{Difficulty, MonsterKind, Prefix, UnitStats};

use super::common::Position;
use super::item::Item;
use super::unit::Unit;

/// Boss transformation stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BossPhase {
    #[default]
    One,
    Two,
}

/// Outcome of a hit on a monster, after kind-specific reactions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageReaction {
    /// Took the hit and is still standing.
    Alive,
    /// Killing blow; the monster is out of the fight.
    Died,
    /// Killing blow absorbed by a skeleton's one-time revive.
    Revived { hp: i32 },
    /// A boss crossed its threshold and transformed instead of taking the hit.
    PhaseChanged,
}

impl DamageReaction {
    pub fn is_terminal(self) -> bool {
        matches!(self, DamageReaction::Died)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monster {
    pub unit: Unit,
    pub kind: MonsterKind,
    pub prefix: Option<Prefix>,
    pub difficulty: Difficulty,
    pub exp_reward: u32,
    pub money_reward: u32,
    pub drops: Vec<Item>,
    pub row: i32,
    pub col: i32,
    revive_used: bool,
    phase: BossPhase,
}

impl Monster {
    /// A monster with table rewards for its kind and level and no drops.
    pub fn new(
        name: impl Into<String>,
        kind: MonsterKind,
        stats: UnitStats,
        difficulty: Difficulty,
    ) -> Self {
        let level = stats.level;
        Self {
            unit: Unit::new(name, stats),
            kind,
            prefix: None,
            difficulty,
            exp_reward: kind.exp_reward(),
            money_reward: MonsterKind::money_reward(level),
            drops: Vec::new(),
            row: 0,
            col: 0,
            revive_used: false,
            phase: BossPhase::One,
        }
    }

    /// Places the monster on the grid.
    pub fn at(mut self, row: i32, col: i32) -> Self {
        self.row = row;
        self.col = col;
        self.unit.position = Position::from_grid(row, col);
        self
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

    pub fn phase(&self) -> BossPhase {
        self.phase
    }

    pub fn revive_used(&self) -> bool {
        self.revive_used
    }

    /// Applies a hit and runs the kind's reaction to it.
    ///
    /// - Boss in phase one: crossing `boss_phase_threshold × MaxHP` (or
    ///   reaching 0) transforms it instead of applying the hit.
    /// - Skeleton: the first killing blow rolls the revive chance once.
    pub fn take_damage(
        &mut self,
        amount: i32,
        config: &GameConfig,
        rng: &mut dyn RngOracle,
    ) -> DamageReaction {
        if !self.is_alive() {
            return DamageReaction::Died;
        }

        if self.kind.is_boss() && self.phase == BossPhase::One {
            let stats = &self.unit.stats;
            let remaining = f64::from(stats.hp - amount.max(0));
            if remaining < config.boss_phase_threshold * f64::from(stats.max_hp) {
                self.enter_phase_two();
                return DamageReaction::PhaseChanged;
            }
        }

        if !self.unit.take_damage(amount) {
            return DamageReaction::Alive;
        }

        if self.kind == MonsterKind::Skeleton && !self.revive_used {
            self.revive_used = true;
            let chance = crate::combat::special::revive_chance(self.level());
            if rng.chance(chance) {
                let hp = ((f64::from(self.unit.stats.max_hp) * 0.5) as i32).max(1);
                self.unit.revive(hp);
                return DamageReaction::Revived { hp };
            }
        }
        DamageReaction::Died
    }

    /// Boss transformation: strips buffs and skills, reshapes stats and
    /// refills HP to the new maximum. Only happens once.
    pub fn enter_phase_two(&mut self) {
        if self.phase == BossPhase::Two {
            return;
        }
        self.unit.clear_buffs();

        let stats = &mut self.unit.stats;
        stats.max_hp = ((f64::from(stats.max_hp) * 0.8).round() as i32).max(1);
        stats.damage *= 2.0;
        stats.defense *= 0.7;
        stats.speed *= 1.5;
        stats.hp = stats.max_hp;

        self.unit.skills.clear();
        self.phase = BossPhase::Two;
        tracing::debug!(monster = %self.unit.name, max_hp = self.unit.stats.max_hp, "boss phase two");
    }
}
