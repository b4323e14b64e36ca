//! Turn-based combat and progression rules.
//!
//! `game-core` owns the stat model, equipment, buffs, skills, damage
//! resolution, monster generation, the item forge and the battle state
//! machine. It performs no I/O: randomness, logging and reference tables are
//! injected through [`env::GameEnv`], and hosts drive fights through
//! [`engine::Battle`].
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod forge;
pub mod generation;
pub mod state;
pub mod stats;

pub use combat::{AttackResult, CritTier, SpecialAction, escape_chance, resolve_attack};
pub use config::GameConfig;
pub use engine::{ActionOutcome, ActionReport, Battle, BattleError, BattleState, Side};
pub use env::{
    BuffTable, EventCategory, EventSink, GameEnv, ItemCatalog, MemorySink, PcgRng, RngOracle,
    SequenceRng, TileEvent, TileOracle, TracingSink,
};
pub use error::{ErrorSeverity, GameError};
pub use forge::{ForgeError, ForgeOutcome, can_combine, combine, combine_cost, forge};
pub use generation::{GenerationError, MonsterGenerator};
pub use state::{
    Buff, BuffType, Equipment, Inventory, Item, ItemId, Monster, Player, Position, Potion,
    PotionType, Skill, SkillError, Unit,
};
pub use stats::{Archetype, Difficulty, MonsterKind, PlayerClass, Prefix, UnitStats};
