//! Dice values and the randomness seam.
//!
//! The engine never generates randomness itself. It asks a [`DiceProvider`]
//! for one value per roll and validates it.

use crate::action::ContractViolation;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// A validated die face, 1-6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DiceValue(u8);

impl DiceValue {
    /// The face that grants releases and extra turns.
    pub const SIX: DiceValue = DiceValue(6);

    /// Validates a raw value.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::DiceOutOfRange`] outside 1-6.
    pub fn new(value: u8) -> Result<Self, ContractViolation> {
        if (1..=6).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ContractViolation::DiceOutOfRange(value))
        }
    }

    /// Returns the face value.
    pub fn get(self) -> u8 {
        self.0
    }

    /// True for a six.
    pub fn is_six(self) -> bool {
        self.0 == 6
    }
}

impl TryFrom<u8> for DiceValue {
    type Error = ContractViolation;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DiceValue> for u8 {
    fn from(value: DiceValue) -> Self {
        value.0
    }
}

impl std::fmt::Display for DiceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of die values. Implementations should return 1-6.
pub trait DiceProvider {
    /// Produces the next die value.
    fn next(&mut self) -> u8;
}

impl<D: DiceProvider + ?Sized> DiceProvider for Box<D> {
    fn next(&mut self) -> u8 {
        (**self).next()
    }
}

/// Uniform dice backed by a seedable ChaCha stream.
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: ChaCha8Rng,
}

impl SeededDice {
    /// Deterministic dice for a given seed.
    #[instrument]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Dice seeded from operating-system entropy.
    #[instrument]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl DiceProvider for SeededDice {
    fn next(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }
}

/// Replays a fixed sequence of values.
///
/// Once the script runs out it yields 0, which the engine rejects as a
/// contract violation.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    values: VecDeque<u8>,
}

impl ScriptedDice {
    /// Creates dice that replay `values` in order.
    pub fn new(values: impl IntoIterator<Item = u8>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Queues more values.
    pub fn push(&mut self, value: u8) {
        self.values.push_back(value);
    }

    /// Number of values left.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl DiceProvider for ScriptedDice {
    fn next(&mut self) -> u8 {
        let value = self.values.pop_front().unwrap_or(0);
        debug!(value, remaining = self.values.len(), "Scripted roll");
        value
    }
}
