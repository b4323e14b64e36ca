//! Error types for battle actions.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{ItemError, ItemId, SkillError};

use super::BattleState;

/// Reasons a player action was rejected. A rejected action never consumes
/// the turn.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("battle is already over ({state})")]
    BattleOver { state: BattleState },

    #[error("not the player's turn ({state})")]
    NotPlayerTurn { state: BattleState },

    #[error("previous action is still resolving")]
    TurnInProgress,

    #[error(transparent)]
    Skill(#[from] SkillError),

    #[error("{0} is not in the inventory")]
    ItemNotFound(ItemId),

    #[error("{name} cannot be used in battle")]
    ItemNotUsable { name: String },
}

impl From<ItemError> for BattleError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(id) => BattleError::ItemNotFound(id),
            ItemError::NotConsumable { name } | ItemError::NotUsableInBattle { name } => {
                BattleError::ItemNotUsable { name }
            }
        }
    }
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::BattleOver { .. }
            | Self::NotPlayerTurn { .. }
            | Self::TurnInProgress
            | Self::ItemNotFound(_) => ErrorSeverity::Validation,
            Self::Skill(err) => err.severity(),
            Self::ItemNotUsable { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BattleOver { .. } => "BATTLE_OVER",
            Self::NotPlayerTurn { .. } => "BATTLE_NOT_PLAYER_TURN",
            Self::TurnInProgress => "BATTLE_TURN_IN_PROGRESS",
            Self::Skill(err) => err.error_code(),
            Self::ItemNotFound(_) => "BATTLE_ITEM_NOT_FOUND",
            Self::ItemNotUsable { .. } => "BATTLE_ITEM_NOT_USABLE",
        }
    }
}
