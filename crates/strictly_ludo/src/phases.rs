//! Turn phases, derived from the turn state.
//!
//! The state stores flags; the phase is the name for a legal combination of
//! them. The hand-off between turns happens inside a single transition and
//! is never observable as a phase of its own.

use crate::state::TurnState;
use crate::types::Player;
use serde::{Deserialize, Serialize};

/// Where the current player's turn stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Dice enabled, nothing pending.
    AwaitingRoll(Player),
    /// Rolled a six with nothing movable on the board: must release.
    AwaitingPileSelection(Player),
    /// Must pick an on-board piece to advance.
    AwaitingCellSelection(Player),
    /// Rolled a six: may release or advance.
    AwaitingPileOrCellSelection(Player),
    /// The game has a winner.
    Finished(Player),
}

impl TurnPhase {
    /// Derives the phase from the state's flags.
    pub fn of(state: &TurnState) -> Self {
        if let Some(winner) = state.winner() {
            return TurnPhase::Finished(winner);
        }
        let player = state.chance_player();
        match (
            state.pile_selection_player().is_some(),
            state.cell_selection_player().is_some(),
        ) {
            (true, true) => TurnPhase::AwaitingPileOrCellSelection(player),
            (true, false) => TurnPhase::AwaitingPileSelection(player),
            (false, true) => TurnPhase::AwaitingCellSelection(player),
            (false, false) => TurnPhase::AwaitingRoll(player),
        }
    }

    /// The player this phase waits on (the winner once finished).
    pub fn player(&self) -> Player {
        match *self {
            TurnPhase::AwaitingRoll(p)
            | TurnPhase::AwaitingPileSelection(p)
            | TurnPhase::AwaitingCellSelection(p)
            | TurnPhase::AwaitingPileOrCellSelection(p)
            | TurnPhase::Finished(p) => p,
        }
    }

    /// True while a piece selection is pending.
    pub fn is_selecting(&self) -> bool {
        matches!(
            self,
            TurnPhase::AwaitingPileSelection(_)
                | TurnPhase::AwaitingCellSelection(_)
                | TurnPhase::AwaitingPileOrCellSelection(_)
        )
    }

    /// True once the game has ended.
    pub fn is_finished(&self) -> bool {
        matches!(self, TurnPhase::Finished(_))
    }
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnPhase::AwaitingRoll(p) => write!(f, "{p} to roll"),
            TurnPhase::AwaitingPileSelection(p) => write!(f, "{p} to release a piece"),
            TurnPhase::AwaitingCellSelection(p) => write!(f, "{p} to move a piece"),
            TurnPhase::AwaitingPileOrCellSelection(p) => {
                write!(f, "{p} to release or move a piece")
            }
            TurnPhase::Finished(p) => write!(f, "{p} wins"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_game_awaits_roll() {
        let state = TurnState::new();
        assert_eq!(state.phase(), TurnPhase::AwaitingRoll(Player::Red));
        assert!(!state.phase().is_selecting());
    }

    #[test]
    fn test_selection_flags_map_to_phases() {
        let mut state = TurnState::new();
        state.pile_selection_player = Some(Player::Red);
        assert_eq!(state.phase(), TurnPhase::AwaitingPileSelection(Player::Red));
        state.cell_selection_player = Some(Player::Red);
        assert_eq!(
            state.phase(),
            TurnPhase::AwaitingPileOrCellSelection(Player::Red)
        );
        state.pile_selection_player = None;
        assert_eq!(state.phase(), TurnPhase::AwaitingCellSelection(Player::Red));
        assert!(state.phase().is_selecting());
    }

    #[test]
    fn test_winner_finishes() {
        let mut state = TurnState::new();
        state.winner = Some(Player::Yellow);
        assert_eq!(state.phase(), TurnPhase::Finished(Player::Yellow));
        assert_eq!(state.phase().player(), Player::Yellow);
    }
}
