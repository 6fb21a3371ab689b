//! Who plays after a move.

use crate::dice::DiceValue;
use tracing::instrument;

/// Sixes in a row that forfeit the turn.
pub const SIXES_LIMIT: u8 = 3;

/// How the turn is handed on after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff {
    /// The mover rolled a six and plays again.
    ExtraTurn,
    /// Third six in a row: the turn passes regardless of the move.
    Forfeit,
    /// Ordinary hand-off to the next player.
    Next,
}

/// Decides the hand-off and the new consecutive-sixes count.
#[instrument]
pub fn handoff_after_move(consecutive_sixes: u8, dice: DiceValue) -> (Handoff, u8) {
    if !dice.is_six() {
        return (Handoff::Next, 0);
    }
    let sixes = consecutive_sixes + 1;
    if sixes >= SIXES_LIMIT {
        (Handoff::Forfeit, 0)
    } else {
        (Handoff::ExtraTurn, sixes)
    }
}
