//! Flee chance.

use crate::config::EscapeRules;

/// `clamp(base + per_speed × (player_speed − monster_speed), min, max)`.
pub fn escape_chance(player_speed: f64, monster_speed: f64, rules: &EscapeRules) -> f64 {
    (rules.base + rules.per_speed * (player_speed - monster_speed)).clamp(rules.min, rules.max)
}
