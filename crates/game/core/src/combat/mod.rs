//! Combat resolution.
//!
//! Pure formulas plus the monster special actions. The engine calls these;
//! nothing here knows about turns.
//!
//! # Core Functions
//!
//! - `resolve_attack`: damage formula with the attacker side's crit rules
//! - `try_action`: per-kind monster special action before its main action
//! - `escape_chance`: clamped speed-based flee chance

pub mod damage;
pub mod escape;
pub mod result;
pub mod special;

pub use damage::{AttackerSide, mitigated_damage};
pub use escape::escape_chance;
pub use result::{AttackResult, CritTier, resolve_attack};
pub use special::{SpecialAction, try_action};
