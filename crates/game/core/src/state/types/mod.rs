pub mod abilities;
pub mod common;
pub mod inventory;
pub mod item;
pub mod monster;
pub mod player;
pub mod status;
pub mod unit;

// Re-export skill types
pub use abilities::{BuffTarget, BuffTemplate, Skill, SkillError, SkillKind};

// Re-export renderer-facing types
pub use common::{AnimationState, Facing, Position};

// Re-export inventory and item types
pub use inventory::Inventory;
pub use item::{
    ArmorSlot, Equipment, EquipmentKind, Item, ItemId, Potion, PotionType, Slot, WeaponKind,
    tier_name,
};

// Re-export combatants
pub use monster::{BossPhase, DamageReaction, Monster};
pub use player::{ItemError, Player, PotionEffect};
pub use unit::Unit;

// Re-export buff types
pub use status::{Buff, BuffId, BuffType, Polarity};
