//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (`BattleError`, `SkillError`, `ForgeError`,
//! `GenerationError`, `BuffTableError`) live next to the code that produces
//! them. This module only provides the shared classification so callers can
//! decide how to react without matching on every variant.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each subsystem has its own error type with specific variants
//! - **Soft Rejections**: Player mistakes (skill on cooldown, not enough gold)
//!   are `Recoverable` and never advance the turn
//! - **Fatal Content Errors**: Data mismatches (unknown monster type) are `Fatal`

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the player may pick another action.
    ///
    /// Examples: skill on cooldown, insufficient mana, insufficient money
    Recoverable,

    /// Validation error - the request was malformed for the current state.
    ///
    /// Examples: action issued outside the player's turn, unknown item id
    Validation,

    /// Fatal error - content data does not match the engine.
    ///
    /// Examples: unknown monster type, malformed reference data
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error should abort the session.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
