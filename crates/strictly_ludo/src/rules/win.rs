//! Win detection.

use crate::state::TurnState;
use crate::types::Player;
use tracing::instrument;

/// Returns `player` if all four of their pieces have finished.
#[instrument(skip(state))]
pub fn check_winner(state: &TurnState, player: Player) -> Option<Player> {
    state.all_finished(player).then_some(player)
}
