//! Buff reference table.
//!
//! Plain-text `KEY=VALUE` data, one entry per line:
//!
//! ```text
//! # magnitude,duration
//! ATTACK_1=5,3
//! CRITICAL_2=0.08,3
//! ```
//!
//! Keys are `<BUFFTYPE>_<TIER>`. Lookups for keys that were never defined
//! fall back to `magnitude = 0, duration = 3`.

use std::collections::HashMap;

use strum::IntoEnumIterator;

use crate::config::GameConfig;
use crate::state::{Buff, BuffType};

use super::rng::RngOracle;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuffTableError {
    #[error("line {line}: expected KEY=VALUE")]
    MissingSeparator { line: usize },

    #[error("line {line}: key `{key}` is not <BUFFTYPE>_<TIER>")]
    InvalidKey { line: usize, key: String },

    #[error("line {line}: unknown buff type `{name}`")]
    UnknownBuffType { line: usize, name: String },

    #[error("line {line}: value `{value}` is not <magnitude>,<duration>")]
    InvalidValue { line: usize, value: String },
}

impl BuffTableError {
    pub fn line(&self) -> usize {
        match self {
            Self::MissingSeparator { line }
            | Self::InvalidKey { line, .. }
            | Self::UnknownBuffType { line, .. }
            | Self::InvalidValue { line, .. } => *line,
        }
    }
}

impl crate::error::GameError for BuffTableError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingSeparator { .. } => "BUFF_TABLE_MISSING_SEPARATOR",
            Self::InvalidKey { .. } => "BUFF_TABLE_INVALID_KEY",
            Self::UnknownBuffType { .. } => "BUFF_TABLE_UNKNOWN_TYPE",
            Self::InvalidValue { .. } => "BUFF_TABLE_INVALID_VALUE",
        }
    }
}

/// One table row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuffEntry {
    pub magnitude: f64,
    pub duration: u32,
}

impl BuffEntry {
    pub const MISSING: Self = Self {
        magnitude: 0.0,
        duration: GameConfig::DEFAULT_BUFF_DURATION,
    };
}

const BUILTIN: [(BuffType, u32, f64, u32); 12] = [
    (BuffType::Attack, 1, 5.0, 3),
    (BuffType::Attack, 2, 8.0, 3),
    (BuffType::Attack, 3, 12.0, 4),
    (BuffType::Defense, 1, 4.0, 3),
    (BuffType::Defense, 2, 7.0, 3),
    (BuffType::Defense, 3, 10.0, 4),
    (BuffType::Speed, 1, 2.0, 3),
    (BuffType::Speed, 2, 3.0, 3),
    (BuffType::Speed, 3, 5.0, 4),
    (BuffType::Critical, 1, 0.05, 3),
    (BuffType::Critical, 2, 0.08, 3),
    (BuffType::Critical, 3, 0.12, 4),
];

/// Magnitudes and durations for random buffs, keyed by type and tier.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuffTable {
    entries: HashMap<(BuffType, u32), BuffEntry>,
}

impl BuffTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The table shipped with the engine.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for (buff_type, tier, magnitude, duration) in BUILTIN {
            table.insert(buff_type, tier, BuffEntry { magnitude, duration });
        }
        table
    }

    /// Parses `KEY=VALUE` text. Blank lines and `#` comments are skipped.
    pub fn parse(text: &str) -> Result<Self, BuffTableError> {
        let mut table = Self::empty();
        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let (key, value) = trimmed
                .split_once('=')
                .ok_or(BuffTableError::MissingSeparator { line })?;
            let (key, value) = (key.trim(), value.trim());

            let (type_name, tier) = key
                .rsplit_once('_')
                .and_then(|(name, tier)| Some((name, tier.parse::<u32>().ok()?)))
                .ok_or_else(|| BuffTableError::InvalidKey {
                    line,
                    key: key.to_owned(),
                })?;
            let buff_type =
                type_name
                    .parse::<BuffType>()
                    .map_err(|_| BuffTableError::UnknownBuffType {
                        line,
                        name: type_name.to_owned(),
                    })?;

            let entry = value
                .split_once(',')
                .and_then(|(magnitude, duration)| {
                    Some(BuffEntry {
                        magnitude: magnitude.trim().parse().ok()?,
                        duration: duration.trim().parse().ok()?,
                    })
                })
                .ok_or_else(|| BuffTableError::InvalidValue {
                    line,
                    value: value.to_owned(),
                })?;

            table.insert(buff_type, tier, entry);
        }
        Ok(table)
    }

    pub fn insert(&mut self, buff_type: BuffType, tier: u32, entry: BuffEntry) {
        self.entries.insert((buff_type, tier), entry);
    }

    /// Row for `(buff_type, tier)`, or [`BuffEntry::MISSING`].
    pub fn get(&self, buff_type: BuffType, tier: u32) -> BuffEntry {
        self.entries
            .get(&(buff_type, tier))
            .copied()
            .unwrap_or(BuffEntry::MISSING)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A positive buff from the table.
    pub fn buff(&self, buff_type: BuffType, tier: u32) -> Buff {
        let entry = self.get(buff_type, tier);
        Buff::of_type(buff_type, entry.magnitude, entry.duration, tier)
    }

    /// The negated variant of [`BuffTable::buff`].
    pub fn debuff(&self, buff_type: BuffType, tier: u32) -> Buff {
        let entry = self.get(buff_type, tier);
        Buff::of_type(buff_type, -entry.magnitude, entry.duration, tier)
    }

    /// Uniform buff type; a coin flip turns it into a debuff.
    pub fn random_buff(&self, rng: &mut dyn RngOracle, tier: u32) -> Buff {
        let types: Vec<BuffType> = BuffType::iter().collect();
        let buff_type = types[rng.index(types.len())];
        if rng.chance(0.5) {
            self.debuff(buff_type, tier)
        } else {
            self.buff(buff_type, tier)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SequenceRng;
    use crate::state::Polarity;

    #[test]
    fn parses_entries_and_skips_comments() {
        let table = BuffTable::parse("# header\n\nATTACK_1=5,3\n  defense_2 = 7 , 4 \n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get(BuffType::Defense, 2),
            BuffEntry {
                magnitude: 7.0,
                duration: 4
            }
        );
    }

    #[test]
    fn missing_keys_fall_back() {
        let table = BuffTable::empty();
        assert_eq!(table.get(BuffType::Speed, 9), BuffEntry::MISSING);
        assert_eq!(table.buff(BuffType::Speed, 9).duration(), 3);
    }

    #[test]
    fn malformed_lines_report_line_numbers() {
        let err = BuffTable::parse("ATTACK_1=5,3\nATTACK_2 5,3").unwrap_err();
        assert_eq!(err, BuffTableError::MissingSeparator { line: 2 });

        let err = BuffTable::parse("LUCK_1=5,3").unwrap_err();
        assert!(matches!(err, BuffTableError::UnknownBuffType { line: 1, .. }));

        let err = BuffTable::parse("\nATTACK=5,3").unwrap_err();
        assert_eq!(err.line(), 2);

        let err = BuffTable::parse("SPEED_1=fast,3").unwrap_err();
        assert!(matches!(err, BuffTableError::InvalidValue { .. }));
    }

    #[test]
    fn random_buff_can_roll_a_debuff() {
        let table = BuffTable::builtin();
        // index roll 0.0 -> Attack, coin 0.1 -> debuff
        let mut rng = SequenceRng::new([0.0, 0.1]);
        let buff = table.random_buff(&mut rng, 1);
        assert_eq!(buff.polarity, Polarity::Negative);
        assert_eq!(buff.delta.attack, -5.0);

        let mut rng = SequenceRng::new([0.99, 0.9]);
        let buff = table.random_buff(&mut rng, 2);
        assert_eq!(buff.polarity, Polarity::Positive);
        assert_eq!(buff.delta.critical_rate, 0.08);
    }
}
