//! Pending choice: a rolled die is always waiting on a selection that can
//! actually be made.

use super::Invariant;
use crate::state::TurnState;

/// Invariant: in a running game, a rolled or blocked die implies a pending
/// selection, and every pending selection has at least one piece to pick.
pub struct PendingChoiceInvariant;

impl Invariant<TurnState> for PendingChoiceInvariant {
    fn holds(state: &TurnState) -> bool {
        if state.winner().is_some() {
            return true;
        }
        let pile = state.pile_selection_player().is_some();
        let cell = state.cell_selection_player().is_some();
        if (state.is_dice_rolled() || state.touch_dice_block()) && !pile && !cell {
            return false;
        }
        (!pile || !state.pile_choices().is_empty()) && (!cell || !state.cell_choices().is_empty())
    }

    fn description() -> &'static str {
        "A rolled die waits on a selection with at least one choice"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceId, Player};

    fn id(label: &str) -> PieceId {
        PieceId::parse(label).unwrap()
    }

    #[test]
    fn test_idle_holds() {
        assert!(PendingChoiceInvariant::holds(&TurnState::new()));
    }

    #[test]
    fn test_rolled_without_selection_violates() {
        let mut state = TurnState::new();
        state.is_dice_rolled = true;
        assert!(!PendingChoiceInvariant::holds(&state));

        let mut state = TurnState::new();
        state.touch_dice_block = true;
        assert!(!PendingChoiceInvariant::holds(&state));
    }

    #[test]
    fn test_empty_pile_selection_violates() {
        let placements: Vec<_> = PieceId::all_for(Player::Red).map(|id| (id, 10)).collect();
        let mut state = TurnState::arranged(Player::Red, &placements).unwrap();
        state.dice_no = 6;
        state.is_dice_rolled = true;
        state.touch_dice_block = true;
        state.pile_selection_player = Some(Player::Red);
        assert!(!PendingChoiceInvariant::holds(&state));

        state.pile_selection_player = None;
        state.cell_selection_player = Some(Player::Red);
        assert!(PendingChoiceInvariant::holds(&state));
    }

    #[test]
    fn test_overshooting_cell_selection_violates() {
        let mut state = TurnState::arranged(Player::Red, &[(id("A1"), 55)]).unwrap();
        state.dice_no = 3;
        state.is_dice_rolled = true;
        state.touch_dice_block = true;
        state.cell_selection_player = Some(Player::Red);
        assert!(!PendingChoiceInvariant::holds(&state));
    }

    #[test]
    fn test_won_game_holds_with_blocked_dice() {
        let mut state = TurnState::new();
        state.winner = Some(Player::Green);
        state.touch_dice_block = true;
        assert!(PendingChoiceInvariant::holds(&state));
    }
}
