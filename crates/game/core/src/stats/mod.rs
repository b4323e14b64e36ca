//! Stat model.
//!
//! ```text
//! [ Class / monster tables ]   base(level)
//!          ↓
//! [ Equipment + affinity ]     permanent flats
//!          ↓
//! [ Buff deltas ]              temporary flats
//!          ↓
//! [ UnitStats ]                what combat reads
//! ```
//!
//! Every layer is folded through [`BonusStack`], so the player recomputation
//! and monster scaling share one arithmetic rule: flats first, then
//! multipliers in order.

pub mod bonus;
pub mod classes;
pub mod core;
pub mod modifiers;
pub mod monsters;

pub use bonus::{Bonus, BonusStack};
pub use classes::{Archetype, PlayerClass};
pub use core::{BaseStats, UnitStats};
pub use modifiers::{EquipmentBonus, StatDelta};
pub use monsters::{Difficulty, MonsterKind, Prefix, PrefixEffect};
