//! Travel bounds: every piece sits between home and the finish, and its
//! position agrees with how far it has travelled.

use super::Invariant;
use crate::state::TurnState;
use crate::types::FINISH;

/// Invariant: `travel_count <= 57` and `pos == travel_count` for every piece.
pub struct TravelBoundsInvariant;

impl Invariant<TurnState> for TravelBoundsInvariant {
    fn holds(state: &TurnState) -> bool {
        state
            .all_pieces()
            .all(|p| p.travel_count() <= FINISH && p.pos() == p.travel_count())
    }

    fn description() -> &'static str {
        "Pieces stay within 0-57 and position matches travel"
    }
}
