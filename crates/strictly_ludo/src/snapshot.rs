//! Serializable snapshot of a game.
//!
//! A snapshot is the plain turn state plus a format version. Loading one
//! validates everything the engine relies on before handing the state back.

use crate::action::ContractViolation;
use crate::invariants::{check_turn_state, describe};
use crate::state::TurnState;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Current snapshot format.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A versioned copy of the turn state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    version: u32,
    state: TurnState,
}

impl Snapshot {
    /// Captures the given state.
    pub fn capture(state: &TurnState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            state: state.clone(),
        }
    }

    /// Format version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The captured state.
    pub fn state(&self) -> &TurnState {
        &self.state
    }

    /// Consumes the snapshot.
    pub fn into_state(self) -> TurnState {
        self.state
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::InvalidSnapshot`] if serialization fails.
    #[instrument(skip(self))]
    pub fn to_json(&self) -> Result<String, ContractViolation> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ContractViolation::InvalidSnapshot(e.to_string()))
    }

    /// Parses and validates a snapshot.
    ///
    /// # Errors
    ///
    /// [`ContractViolation::InvalidSnapshot`] for malformed JSON or an
    /// unknown version; [`ContractViolation::InvariantViolation`] if the
    /// state is one the engine could not have produced.
    #[instrument(skip(json), fields(len = json.len()))]
    pub fn from_json(json: &str) -> Result<Self, ContractViolation> {
        let snapshot: Self = serde_json::from_str(json).map_err(|e| {
            warn!(error = %e, "Snapshot failed to parse");
            ContractViolation::InvalidSnapshot(e.to_string())
        })?;
        snapshot.validate()?;
        debug!(phase = %snapshot.state.phase(), "Snapshot loaded");
        Ok(snapshot)
    }

    fn validate(&self) -> Result<(), ContractViolation> {
        if self.version != SNAPSHOT_VERSION {
            return Err(ContractViolation::InvalidSnapshot(format!(
                "unsupported version {}",
                self.version
            )));
        }
        check_turn_state(&self.state).map_err(|violations| {
            let descriptions = describe(&violations);
            warn!(%descriptions, "Snapshot breaks an invariant");
            ContractViolation::InvariantViolation(descriptions)
        })
    }
}
