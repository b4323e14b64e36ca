//! Additive stat modifiers: buff deltas and equipment bonus blocks.

use core::iter::Sum;
use core::ops::{Add, AddAssign, Neg, Sub};

/// Temporary change to the four combat stats a buff can touch.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatDelta {
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    pub critical_rate: f64,
}

impl StatDelta {
    pub const ZERO: Self = Self {
        attack: 0.0,
        defense: 0.0,
        speed: 0.0,
        critical_rate: 0.0,
    };

    pub const fn new(attack: f64, defense: f64, speed: f64, critical_rate: f64) -> Self {
        Self {
            attack,
            defense,
            speed,
            critical_rate,
        }
    }

    pub const fn attack(value: f64) -> Self {
        Self::new(value, 0.0, 0.0, 0.0)
    }

    pub const fn defense(value: f64) -> Self {
        Self::new(0.0, value, 0.0, 0.0)
    }

    pub const fn speed(value: f64) -> Self {
        Self::new(0.0, 0.0, value, 0.0)
    }

    pub const fn critical_rate(value: f64) -> Self {
        Self::new(0.0, 0.0, 0.0, value)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// True if the delta makes its holder weaker overall.
    pub fn is_harmful(&self) -> bool {
        self.attack + self.defense + self.speed + self.critical_rate < 0.0
    }
}

impl Add for StatDelta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.attack + rhs.attack,
            self.defense + rhs.defense,
            self.speed + rhs.speed,
            self.critical_rate + rhs.critical_rate,
        )
    }
}

impl AddAssign for StatDelta {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for StatDelta {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + -rhs
    }
}

impl Neg for StatDelta {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(
            -self.attack,
            -self.defense,
            -self.speed,
            -self.critical_rate,
        )
    }
}

impl Sum for StatDelta {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Permanent bonuses granted by one piece of equipment.
///
/// Which fields are non-zero depends on the equipment kind (weapons grant
/// attack, chest pieces grant defense and HP, rings grant mana, ...).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EquipmentBonus {
    pub attack: f64,
    pub defense: f64,
    pub hp: i32,
    pub speed: f64,
    pub mana: i32,
    pub critical_rate: f64,
}

impl EquipmentBonus {
    pub const NONE: Self = Self {
        attack: 0.0,
        defense: 0.0,
        hp: 0,
        speed: 0.0,
        mana: 0,
        critical_rate: 0.0,
    };
}

impl Add for EquipmentBonus {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            attack: self.attack + rhs.attack,
            defense: self.defense + rhs.defense,
            hp: self.hp + rhs.hp,
            speed: self.speed + rhs.speed,
            mana: self.mana + rhs.mana,
            critical_rate: self.critical_rate + rhs.critical_rate,
        }
    }
}

impl Sum for EquipmentBonus {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::NONE, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_negation_cancels() {
        let delta = StatDelta::new(4.0, -2.0, 1.5, 0.05);
        assert!((delta + -delta).is_zero());
        assert!((delta - delta).is_zero());
    }

    #[test]
    fn harmful_detection() {
        assert!(StatDelta::speed(-3.0).is_harmful());
        assert!(!StatDelta::defense(6.0).is_harmful());
    }

    #[test]
    fn bonuses_sum() {
        let total: EquipmentBonus = [
            EquipmentBonus {
                attack: 6.0,
                ..EquipmentBonus::NONE
            },
            EquipmentBonus {
                defense: 3.0,
                hp: 10,
                ..EquipmentBonus::NONE
            },
        ]
        .into_iter()
        .sum();
        assert_eq!(total.attack, 6.0);
        assert_eq!(total.defense, 3.0);
        assert_eq!(total.hp, 10);
    }
}
