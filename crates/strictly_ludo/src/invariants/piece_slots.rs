//! Piece slots: every slot holds the piece it is addressed by, and the
//! stored die is a real die face.

use super::Invariant;
use crate::state::TurnState;
use crate::types::{PieceId, Player};
use strum::IntoEnumIterator;

/// Invariant: slot `n` of each player's row holds piece `n` of that player.
///
/// Piece lookups index by slot, so a misplaced id would make one piece
/// unreachable and alias another.
pub struct PieceSlotsInvariant;

impl Invariant<TurnState> for PieceSlotsInvariant {
    fn holds(state: &TurnState) -> bool {
        Player::iter().all(|player| {
            state
                .pieces_of(player)
                .iter()
                .zip(PieceId::all_for(player))
                .all(|(piece, id)| piece.id() == id)
        })
    }

    fn description() -> &'static str {
        "Each piece sits in its own slot"
    }
}

/// Invariant: the last rolled value is between 1 and 6.
pub struct DiceFaceInvariant;

impl Invariant<TurnState> for DiceFaceInvariant {
    fn holds(state: &TurnState) -> bool {
        (1..=6).contains(&state.dice_no())
    }

    fn description() -> &'static str {
        "The stored die shows a face from 1 to 6"
    }
}
