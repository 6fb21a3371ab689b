//! Winner consistency: the winner is exactly the player with every piece
//! finished.

use super::Invariant;
use crate::state::TurnState;
use crate::types::Player;
use strum::IntoEnumIterator;

/// Invariant: `winner == Some(p)` iff `p` has all four pieces at 57.
///
/// Only one player can finish first, so at most one player qualifies.
pub struct WinnerConsistentInvariant;

impl Invariant<TurnState> for WinnerConsistentInvariant {
    fn holds(state: &TurnState) -> bool {
        let finished: Vec<Player> = Player::iter().filter(|&p| state.all_finished(p)).collect();
        match state.winner() {
            Some(winner) => finished == [winner],
            None => finished.is_empty(),
        }
    }

    fn description() -> &'static str {
        "Winner is the player who finished all pieces"
    }
}
