//! Sixes bound: the consecutive-sixes counter never rests at the limit.

use super::Invariant;
use crate::rules::turn::SIXES_LIMIT;
use crate::state::TurnState;

/// Invariant: `consecutive_sixes < 3` between transitions.
pub struct SixesBoundInvariant;

impl Invariant<TurnState> for SixesBoundInvariant {
    fn holds(state: &TurnState) -> bool {
        state.consecutive_sixes() < SIXES_LIMIT
    }

    fn description() -> &'static str {
        "Consecutive sixes stay below the forfeit limit"
    }
}
