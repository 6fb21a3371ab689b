//! History consistency: replaying the log reproduces the board.

use super::Invariant;
use crate::state::TurnState;

/// Invariant: replaying logged moves and captures from the log's origin
/// yields every piece's current travel distance.
pub struct HistoryConsistentInvariant;

impl Invariant<TurnState> for HistoryConsistentInvariant {
    fn holds(state: &TurnState) -> bool {
        state.log().replay_positions() == state.travel_table()
    }

    fn description() -> &'static str {
        "Move and capture history is consistent with piece positions"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceId, Player};

    #[test]
    fn test_logged_moves_hold() {
        let a1 = PieceId::parse("A1").unwrap();
        let mut state = TurnState::new();
        state.piece_mut(a1).place(1);
        state.log.record_move(a1, 0, 1);
        assert!(HistoryConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_unlogged_move_violates() {
        let mut state = TurnState::new();
        state.piece_mut(PieceId::new(Player::Yellow, 2).unwrap()).place(1);
        assert!(!HistoryConsistentInvariant::holds(&state));
    }
}
