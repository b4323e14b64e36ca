//! Attack resolution and its result.

use crate::env::RngOracle;

use super::damage::{AttackerSide, mitigated_damage};

/// How hard an attack landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CritTier {
    Normal,
    Critical,
    Ultimate,
}

impl CritTier {
    pub const fn player_multiplier(self) -> f64 {
        match self {
            CritTier::Normal => 1.0,
            CritTier::Critical => 2.0,
            CritTier::Ultimate => 3.0,
        }
    }
}

/// Result of a combat resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub crit: CritTier,
    /// Final damage, always at least 1.
    pub damage: i32,
}

/// Resolves one hit.
///
/// # Player
///
/// Two independent rolls: `roll₁ < crit` doubles, `roll₂ < crit + 0.1`
/// triples and overrides the double. The result is truncated.
///
/// # Monster
///
/// `roll < crit` multiplies by 1.5, then a uniform `[0.9, 1.1]` variation is
/// applied. The result is rounded.
///
/// Both sides deal at least 1 damage.
pub fn resolve_attack(
    side: AttackerSide,
    attacker_damage: f64,
    critical_rate: f64,
    defense: f64,
    rng: &mut dyn RngOracle,
) -> AttackResult {
    let raw = mitigated_damage(attacker_damage, defense);

    match side {
        AttackerSide::Player => {
            let critical = rng.next_f64() < critical_rate;
            let ultimate = rng.next_f64() < critical_rate + 0.1;
            let crit = if ultimate {
                CritTier::Ultimate
            } else if critical {
                CritTier::Critical
            } else {
                CritTier::Normal
            };
            let damage = ((raw * crit.player_multiplier()) as i32).max(1);
            AttackResult { crit, damage }
        }
        AttackerSide::Monster => {
            let crit = if rng.next_f64() < critical_rate {
                CritTier::Critical
            } else {
                CritTier::Normal
            };
            let multiplier = if crit == CritTier::Critical { 1.5 } else { 1.0 };
            let variation = rng.range_f64(0.9, 1.1);
            let damage = ((raw * multiplier * variation).round() as i32).max(1);
            AttackResult { crit, damage }
        }
    }
}
