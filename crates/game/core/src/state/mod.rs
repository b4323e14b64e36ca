//! Combat state: units, their gear, buffs and skills.
//!
//! Everything here is plain data plus the invariant-keeping mutators
//! (`take_damage`, `add_buff`, `equip`, ...). Turn flow lives in
//! [`crate::engine`]; randomness and logging are injected through
//! [`crate::env`].
pub mod types;

pub use types::{
    AnimationState, ArmorSlot, BossPhase, Buff, BuffId, BuffTarget, BuffTemplate, BuffType,
    DamageReaction, Equipment, EquipmentKind, Facing, Inventory, Item, ItemError, ItemId, Monster,
    Player, Polarity, Position, Potion, PotionEffect, PotionType, Skill, SkillError, SkillKind,
    Slot, Unit, WeaponKind, tier_name,
};
