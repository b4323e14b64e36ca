/// Game configuration constants and tunable parameters.
///
/// Everything here is balance data: changing a value never changes which
/// rules run, only their magnitudes. Content loaders deserialize this from
/// `config.toml`; missing keys fall back to [`GameConfig::default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Seconds the turn gate stays closed after an action resolves.
    pub turn_delay: f32,
    /// Durability lost by every equipped item per Attack / Skill.
    pub durability_loss: i32,
    /// Probability that a monster picks a skill over a plain attack.
    pub monster_skill_chance: f64,
    /// Skill probability for a Boss in its second phase.
    pub boss_phase_two_skill_chance: f64,
    /// Fraction of MaxHP below which a phase-one Boss transforms.
    pub boss_phase_threshold: f64,
    pub escape: EscapeRules,
    pub prefix: PrefixRules,
    /// Fraction of MaxHP dealt by a trap tile.
    pub trap_damage_fraction: f64,
    /// Probability that a trap also applies a speed debuff.
    pub trap_slow_chance: f64,
}

impl GameConfig {
    // ===== compile-time constants =====
    pub const MAX_DURABILITY: i32 = 100;
    pub const DEFAULT_BUFF_DURATION: u32 = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TURN_DELAY: f32 = 0.6;
    pub const DEFAULT_DURABILITY_LOSS: i32 = 5;
    pub const DEFAULT_MONSTER_SKILL_CHANCE: f64 = 0.3;
    pub const DEFAULT_BOSS_PHASE_TWO_SKILL_CHANCE: f64 = 0.6;
    pub const DEFAULT_BOSS_PHASE_THRESHOLD: f64 = 0.45;
    pub const DEFAULT_TRAP_DAMAGE_FRACTION: f64 = 0.15;
    pub const DEFAULT_TRAP_SLOW_CHANCE: f64 = 0.5;

    pub fn new() -> Self {
        Self {
            turn_delay: Self::DEFAULT_TURN_DELAY,
            durability_loss: Self::DEFAULT_DURABILITY_LOSS,
            monster_skill_chance: Self::DEFAULT_MONSTER_SKILL_CHANCE,
            boss_phase_two_skill_chance: Self::DEFAULT_BOSS_PHASE_TWO_SKILL_CHANCE,
            boss_phase_threshold: Self::DEFAULT_BOSS_PHASE_THRESHOLD,
            escape: EscapeRules::default(),
            prefix: PrefixRules::default(),
            trap_damage_fraction: Self::DEFAULT_TRAP_DAMAGE_FRACTION,
            trap_slow_chance: Self::DEFAULT_TRAP_SLOW_CHANCE,
        }
    }

    /// Config with no turn-transition delay, handy for headless simulation.
    pub fn instant() -> Self {
        Self {
            turn_delay: 0.0,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape chance: `clamp(base + per_speed × (player − monster), min, max)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EscapeRules {
    pub base: f64,
    pub per_speed: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for EscapeRules {
    fn default() -> Self {
        Self {
            base: 0.4,
            per_speed: 0.05,
            min: 0.1,
            max: 0.9,
        }
    }
}

/// Prefix roll chance: `base + per_stage × (stage − 1)`, intentionally unclamped.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrefixRules {
    pub base_chance: f64,
    pub per_stage: f64,
}

impl PrefixRules {
    pub fn chance(&self, stage: u32) -> f64 {
        self.base_chance + self.per_stage * f64::from(stage.saturating_sub(1))
    }
}

impl Default for PrefixRules {
    fn default() -> Self {
        Self {
            base_chance: 0.3,
            per_stage: 0.1,
        }
    }
}
