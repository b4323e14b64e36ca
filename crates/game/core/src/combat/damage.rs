//! Damage calculation.

// ============================================================================
// Attacker Side
// ============================================================================

/// Which crit/variance rules an attack follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackerSide {
    /// Two crit tiers, truncated result, no variance.
    Player,
    /// One crit tier, ±10% variance, rounded result.
    Monster,
}

// ============================================================================
// Damage Calculation
// ============================================================================

/// Damage after defense, before crits.
///
/// # Formula
///
/// ```text
/// raw = attacker_damage × 100 / (100 + max(defense, 0))
/// ```
///
/// Negative defense (heavy debuffs) counts as zero, so the result never
/// exceeds the attacker's damage and the division is always defined.
pub fn mitigated_damage(attacker_damage: f64, defense: f64) -> f64 {
    attacker_damage * 100.0 / (100.0 + defense.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defense_reduces_hyperbolically() {
        assert_eq!(mitigated_damage(30.0, 0.0), 30.0);
        assert_eq!(mitigated_damage(30.0, 100.0), 15.0);
        assert_eq!(mitigated_damage(30.0, -20.0), 30.0);
    }
}
