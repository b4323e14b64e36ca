//! Skill system for units.
//!
//! Skills are cooldown-gated abilities learned at fixed levels. Three kinds
//! share the same shape:
//!
//! - **Attack**: deals damage through the caster's normal attack pathway
//! - **Status**: applies a buff only
//! - **AttackStatus**: deals damage, then applies a buff
//!
//! Using a skill spends its mana and sets `cooldown = duration`. Cooldowns
//! tick down once at the end of each turn their owner takes, except on the
//! turn the skill was cast.

use crate::stats::StatDelta;

use super::status::{Buff, Polarity};

/// Skill category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillKind {
    Attack,
    Status,
    AttackStatus,
}

/// Who receives the buff attached to a skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuffTarget {
    /// The unit the skill is used on.
    Opponent,
    /// The unit using the skill.
    Caster,
}

/// Blueprint for the buff a skill creates each time it is used.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffTemplate {
    pub name: String,
    pub delta: StatDelta,
    pub duration: u32,
    pub tier: u32,
    pub target: BuffTarget,
}

impl BuffTemplate {
    pub fn new(name: impl Into<String>, delta: StatDelta, duration: u32, target: BuffTarget) -> Self {
        Self {
            name: name.into(),
            delta,
            duration,
            tier: 1,
            target,
        }
    }

    /// A fresh, unapplied buff.
    pub fn instantiate(&self) -> Buff {
        Buff::new(
            self.name.clone(),
            self.delta,
            self.duration,
            Polarity::of(&self.delta),
            self.tier,
        )
    }
}

/// Reasons a skill cannot be used right now.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SkillError {
    #[error("no skill in slot {index}")]
    UnknownSkill { index: usize },

    #[error("{name} is on cooldown for {turns} more turn(s)")]
    OnCooldown { name: String, turns: u32 },

    #[error("not enough mana for {name} (need {required}, have {available})")]
    InsufficientMana {
        name: String,
        required: i32,
        available: i32,
    },
}

impl crate::error::GameError for SkillError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        match self {
            Self::UnknownSkill { .. } => crate::error::ErrorSeverity::Validation,
            Self::OnCooldown { .. } | Self::InsufficientMana { .. } => {
                crate::error::ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownSkill { .. } => "SKILL_UNKNOWN",
            Self::OnCooldown { .. } => "SKILL_ON_COOLDOWN",
            Self::InsufficientMana { .. } => "SKILL_INSUFFICIENT_MANA",
        }
    }
}

/// A learned ability.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub name: String,
    pub kind: SkillKind,
    /// Added to the caster's damage for the skill's hit.
    pub damage: f64,
    pub mana_cost: i32,
    /// Remaining turns before the skill may be reused.
    pub cooldown: u32,
    /// Value the cooldown is reset to on use.
    pub duration: u32,
    pub buff: Option<BuffTemplate>,
}

impl Skill {
    pub fn attack(name: impl Into<String>, damage: f64, mana_cost: i32, duration: u32) -> Self {
        Self {
            name: name.into(),
            kind: SkillKind::Attack,
            damage,
            mana_cost,
            cooldown: 0,
            duration,
            buff: None,
        }
    }

    pub fn status(
        name: impl Into<String>,
        mana_cost: i32,
        duration: u32,
        buff: BuffTemplate,
    ) -> Self {
        Self {
            name: name.into(),
            kind: SkillKind::Status,
            damage: 0.0,
            mana_cost,
            cooldown: 0,
            duration,
            buff: Some(buff),
        }
    }

    pub fn attack_status(
        name: impl Into<String>,
        damage: f64,
        mana_cost: i32,
        duration: u32,
        buff: BuffTemplate,
    ) -> Self {
        Self {
            name: name.into(),
            kind: SkillKind::AttackStatus,
            damage,
            mana_cost,
            cooldown: 0,
            duration,
            buff: Some(buff),
        }
    }

    pub fn deals_damage(&self) -> bool {
        matches!(self.kind, SkillKind::Attack | SkillKind::AttackStatus)
    }

    /// Checks cooldown and mana without changing anything.
    pub fn check_ready(&self, available_mana: i32) -> Result<(), SkillError> {
        if self.cooldown > 0 {
            return Err(SkillError::OnCooldown {
                name: self.name.clone(),
                turns: self.cooldown,
            });
        }
        if available_mana < self.mana_cost {
            return Err(SkillError::InsufficientMana {
                name: self.name.clone(),
                required: self.mana_cost,
                available: available_mana,
            });
        }
        Ok(())
    }

    pub fn is_ready(&self, available_mana: i32) -> bool {
        self.check_ready(available_mana).is_ok()
    }

    /// Puts the skill on cooldown.
    pub fn start_cooldown(&mut self) {
        self.cooldown = self.duration;
    }

    /// Decrements the cooldown, floored at 0.
    pub fn tick_cooldown(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }

    /// Shortens the cooldown by `turns` (cooldown-reduction potions).
    pub fn reduce_cooldown(&mut self, turns: u32) {
        self.cooldown = self.cooldown.saturating_sub(turns);
    }
}
