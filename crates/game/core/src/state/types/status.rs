//! Buff system for units.
//!
//! A buff is a timed [`StatDelta`]. Its deltas are added to the holder's
//! stats when it is applied and subtracted when it is removed; the
//! `applied` guard makes both operations idempotent so a buff can never be
//! double-applied or double-removed.
//!
//! # Turn-based Duration
//!
//! Buffs count remaining turns of their holder. `update_after_turn` is
//! called once per owner turn; the owner removes the buff the first time
//! `is_expired` reports true.

use crate::stats::{StatDelta, UnitStats};

/// Identifier of a buff, unique within the unit that holds it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffId(pub u32);

/// Whether a buff helps or hinders its holder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    /// Classifies a delta by its net effect.
    pub fn of(delta: &StatDelta) -> Self {
        if delta.is_harmful() {
            Polarity::Negative
        } else {
            Polarity::Positive
        }
    }
}

/// Stat axis used by reference-data buffs (`ATTACK_1=5,3`).
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
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum BuffType {
    Attack,
    Defense,
    Speed,
    Critical,
}

impl BuffType {
    /// A delta of `magnitude` along this type's stat.
    pub fn delta(&self, magnitude: f64) -> StatDelta {
        match self {
            BuffType::Attack => StatDelta::attack(magnitude),
            BuffType::Defense => StatDelta::defense(magnitude),
            BuffType::Speed => StatDelta::speed(magnitude),
            BuffType::Critical => StatDelta::critical_rate(magnitude),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BuffType::Attack => "Attack",
            BuffType::Defense => "Defense",
            BuffType::Speed => "Speed",
            BuffType::Critical => "Critical",
        }
    }
}

/// A timed stat modifier attached to a unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buff {
    pub id: BuffId,
    pub name: String,
    pub delta: StatDelta,
    pub polarity: Polarity,
    pub tier: u32,
    duration: u32,
    remaining: u32,
    applied: bool,
}

impl Buff {
    /// Creates an unapplied buff. The id is assigned by the unit that receives it.
    pub fn new(
        name: impl Into<String>,
        delta: StatDelta,
        duration: u32,
        polarity: Polarity,
        tier: u32,
    ) -> Self {
        Self {
            id: BuffId(0),
            name: name.into(),
            delta,
            polarity,
            tier,
            duration,
            remaining: duration,
            applied: false,
        }
    }

    /// A single-stat buff; polarity follows the sign of `magnitude`.
    pub fn of_type(buff_type: BuffType, magnitude: f64, duration: u32, tier: u32) -> Self {
        let delta = buff_type.delta(magnitude);
        let polarity = Polarity::of(&delta);
        let name = match polarity {
            Polarity::Positive => format!("{} Up", buff_type.label()),
            Polarity::Negative => format!("{} Down", buff_type.label()),
        };
        Self::new(name, delta, duration, polarity, tier)
    }

    /// Adds the deltas to `stats`. Returns false if already applied.
    pub fn apply(&mut self, stats: &mut UnitStats) -> bool {
        if self.applied {
            return false;
        }
        stats.apply_delta(&self.delta);
        self.applied = true;
        true
    }

    /// Subtracts the deltas from `stats`. Returns false if not applied.
    pub fn remove(&mut self, stats: &mut UnitStats) -> bool {
        if !self.applied {
            return false;
        }
        stats.remove_delta(&self.delta);
        self.applied = false;
        true
    }

    /// Decrements remaining turns, floored at 0.
    pub fn update_after_turn(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn remaining_turns(&self) -> u32 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::BaseStats;

    fn stats() -> UnitStats {
        UnitStats::from_base(&BaseStats::new(100, 20.0, 10.0, 8.0, 0.1, 30), 1)
    }

    #[test]
    fn apply_and_remove_are_idempotent() {
        let mut stats = stats();
        let mut buff = Buff::of_type(BuffType::Attack, 5.0, 3, 1);

        assert!(buff.apply(&mut stats));
        assert!(!buff.apply(&mut stats));
        assert_eq!(stats.damage, 25.0);

        assert!(buff.remove(&mut stats));
        assert!(!buff.remove(&mut stats));
        assert_eq!(stats.damage, 20.0);
    }

    #[test]
    fn expires_after_exactly_duration_turns() {
        let mut buff = Buff::of_type(BuffType::Speed, -2.0, 3, 1);
        assert_eq!(buff.polarity, Polarity::Negative);
        assert_eq!(buff.name, "Speed Down");

        buff.update_after_turn();
        buff.update_after_turn();
        assert!(!buff.is_expired());
        buff.update_after_turn();
        assert!(buff.is_expired());

        buff.update_after_turn();
        assert_eq!(buff.remaining_turns(), 0);
    }

    #[test]
    fn buff_type_parses_reference_keys() {
        assert_eq!("ATTACK".parse::<BuffType>().unwrap(), BuffType::Attack);
        assert_eq!("critical".parse::<BuffType>().unwrap(), BuffType::Critical);
        assert!("LUCK".parse::<BuffType>().is_err());
        assert_eq!(BuffType::Defense.to_string(), "DEFENSE");
    }
}
