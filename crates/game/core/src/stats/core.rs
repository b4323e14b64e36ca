//! Core stat blocks.
//!
//! [`BaseStats`] is what a class or monster table yields for a given level;
//! [`UnitStats`] is the live, mutable block a unit fights with. Integer
//! resources (HP, mana, exp) stay integers; combat multipliers are `f64`.

use super::modifiers::StatDelta;

/// Table-driven stats before equipment, affinity and buffs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub hp: i32,
    pub damage: f64,
    pub defense: f64,
    pub speed: f64,
    pub critical_rate: f64,
    pub mana: i32,
}

impl BaseStats {
    pub const fn new(
        hp: i32,
        damage: f64,
        defense: f64,
        speed: f64,
        critical_rate: f64,
        mana: i32,
    ) -> Self {
        Self {
            hp,
            damage,
            defense,
            speed,
            critical_rate,
            mana,
        }
    }

    /// `self + growth × steps`, used for per-level progression tables.
    pub fn grown(&self, growth: &BaseStats, steps: u32) -> Self {
        let n = steps as i32;
        let f = f64::from(steps);
        Self {
            hp: self.hp + growth.hp * n,
            damage: self.damage + growth.damage * f,
            defense: self.defense + growth.defense * f,
            speed: self.speed + growth.speed * f,
            critical_rate: self.critical_rate + growth.critical_rate * f,
            mana: self.mana + growth.mana * n,
        }
    }
}

/// Live stats of a unit.
///
/// Read freely; mutate HP and mana through [`crate::state::Unit`] so the
/// `0 ≤ hp ≤ max_hp` invariant and the alive flag stay consistent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitStats {
    pub hp: i32,
    pub max_hp: i32,
    pub damage: f64,
    pub defense: f64,
    pub speed: f64,
    pub critical_rate: f64,
    pub mana: i32,
    pub max_mana: i32,
    pub exp: u32,
    pub level: u32,
}

impl UnitStats {
    /// Fresh stats at full HP and mana.
    pub fn from_base(base: &BaseStats, level: u32) -> Self {
        Self {
            hp: base.hp,
            max_hp: base.hp,
            damage: base.damage,
            defense: base.defense,
            speed: base.speed,
            critical_rate: base.critical_rate,
            mana: base.mana,
            max_mana: base.mana,
            exp: 0,
            level,
        }
    }

    pub fn apply_delta(&mut self, delta: &StatDelta) {
        self.damage += delta.attack;
        self.defense += delta.defense;
        self.speed += delta.speed;
        self.critical_rate += delta.critical_rate;
    }

    pub fn remove_delta(&mut self, delta: &StatDelta) {
        self.apply_delta(&-*delta);
    }

    /// Current HP as a fraction of MaxHP, for health bars.
    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        f64::from(self.hp) / f64::from(self.max_hp)
    }

    /// Current mana as a fraction of MaxMana.
    pub fn mana_ratio(&self) -> f64 {
        if self.max_mana <= 0 {
            return 0.0;
        }
        f64::from(self.mana) / f64::from(self.max_mana)
    }

    pub fn is_full_hp(&self) -> bool {
        self.hp == self.max_hp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_is_linear_in_steps() {
        let base = BaseStats::new(90, 15.0, 5.0, 12.0, 0.12, 50);
        let growth = BaseStats::new(8, 3.0, 1.0, 1.0, 0.01, 5);
        let grown = base.grown(&growth, 4);
        assert_eq!(grown.hp, 122);
        assert_eq!(grown.damage, 27.0);
        assert_eq!(grown.mana, 70);
    }

    #[test]
    fn delta_round_trip() {
        let mut stats = UnitStats::from_base(&BaseStats::new(100, 10.0, 5.0, 8.0, 0.1, 20), 1);
        let before = stats.clone();
        let delta = StatDelta::new(3.0, -2.0, 1.0, 0.05);
        stats.apply_delta(&delta);
        assert_eq!(stats.damage, 13.0);
        stats.remove_delta(&delta);
        assert_eq!(stats.damage, before.damage);
        assert_eq!(stats.defense, before.defense);
        assert_eq!(stats.speed, before.speed);
        assert!((stats.critical_rate - before.critical_rate).abs() < 1e-12);
    }

    #[test]
    fn ratios_handle_zero_maximum() {
        let stats = UnitStats::from_base(&BaseStats::new(0, 1.0, 0.0, 1.0, 0.0, 0), 1);
        assert_eq!(stats.hp_ratio(), 0.0);
        assert_eq!(stats.mana_ratio(), 0.0);
    }
}
