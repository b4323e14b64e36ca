//! Bonus application stack.
//!
//! Every derived number in the crate is computed the same way:
//! `(base + Σ flat) × Π scale`, with flat bonuses summed first and scale
//! factors applied in insertion order. Monster generation relies on that
//! ordering (level flats, then prefix, then difficulty).

/// A single bonus that can be applied to a stat value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    /// Flat additive bonus (applied first).
    Flat(f64),

    /// Multiplicative factor (applied sequentially after all flats).
    /// `1.2` = +20%, `0.8` = −20%.
    Scale(f64),
}

impl Bonus {
    /// Create a flat bonus
    pub fn flat(value: f64) -> Self {
        Bonus::Flat(value)
    }

    /// Create a multiplicative factor
    pub fn scale(factor: f64) -> Self {
        Bonus::Scale(factor)
    }
}

/// A collection of bonuses that will be applied in the correct order.
///
/// # Example
/// ```
/// # use game_core::stats::bonus::{Bonus, BonusStack};
/// let mut stack = BonusStack::new();
/// stack.add(Bonus::flat(10.0));   // level scaling
/// stack.add(Bonus::scale(1.5));   // prefix
/// stack.add(Bonus::scale(0.8));   // difficulty
///
/// // (60 + 10) × 1.5 × 0.8 = 84
/// assert_eq!(stack.apply(60.0).round(), 84.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    /// Create a new empty bonus stack
    pub fn new() -> Self {
        Self {
            bonuses: Vec::new(),
        }
    }

    /// Add a bonus to the stack
    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    /// Add multiple bonuses at once
    pub fn extend(&mut self, bonuses: impl IntoIterator<Item = Bonus>) {
        self.bonuses.extend(bonuses);
    }

    /// Apply all bonuses to a base value.
    ///
    /// # Formula
    /// ```text
    /// result = (base + flat_sum) × scale₁ × scale₂ × …
    /// ```
    pub fn apply(&self, base: f64) -> f64 {
        let flat_sum: f64 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Flat(v) => Some(*v),
                Bonus::Scale(_) => None,
            })
            .sum();

        self.bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Scale(f) => Some(*f),
                Bonus::Flat(_) => None,
            })
            .fold(base + flat_sum, |acc, factor| acc * factor)
    }

    /// Apply and round to the nearest integer (HP, mana).
    pub fn apply_rounded(&self, base: i32) -> i32 {
        self.apply(f64::from(base)).round() as i32
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    /// Get the number of bonuses in the stack
    pub fn len(&self) -> usize {
        self.bonuses.len()
    }
}

/// Builder-style helpers.
///
/// ```
/// # use game_core::stats::bonus::BonusStack;
/// let result = BonusStack::new().flat(5.0).scale(2.0).apply(10.0);
/// assert_eq!(result, 30.0);
/// ```
impl BonusStack {
    /// Add a flat bonus (builder pattern)
    pub fn flat(mut self, value: f64) -> Self {
        self.add(Bonus::flat(value));
        self
    }

    /// Add a multiplicative factor (builder pattern)
    pub fn scale(mut self, factor: f64) -> Self {
        self.add(Bonus::scale(factor));
        self
    }
}
