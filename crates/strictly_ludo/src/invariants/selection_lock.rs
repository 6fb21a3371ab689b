//! Selection lock: a pending selection blocks the dice and belongs to the
//! player whose turn it is.

use super::Invariant;
use crate::state::TurnState;

/// Invariant: any pending selection implies the current player rolled and
/// the dice are blocked; no selection is pending once the game is won.
pub struct SelectionLockInvariant;

impl Invariant<TurnState> for SelectionLockInvariant {
    fn holds(state: &TurnState) -> bool {
        let pending = [state.pile_selection_player(), state.cell_selection_player()];
        if state.winner().is_some() {
            return pending.iter().all(Option::is_none);
        }
        pending.iter().flatten().all(|&player| {
            player == state.chance_player() && state.is_dice_rolled() && state.touch_dice_block()
        })
    }

    fn description() -> &'static str {
        "Pending selections lock the dice for the current player"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Player;

    #[test]
    fn test_idle_holds() {
        assert!(SelectionLockInvariant::holds(&TurnState::new()));
    }

    #[test]
    fn test_locked_selection_holds() {
        let mut state = TurnState::new();
        state.is_dice_rolled = true;
        state.touch_dice_block = true;
        state.pile_selection_player = Some(Player::Red);
        assert!(SelectionLockInvariant::holds(&state));
    }

    #[test]
    fn test_unlocked_selection_violates() {
        let mut state = TurnState::new();
        state.is_dice_rolled = true;
        state.cell_selection_player = Some(Player::Red);
        assert!(!SelectionLockInvariant::holds(&state));
    }

    #[test]
    fn test_foreign_selection_violates() {
        let mut state = TurnState::new();
        state.is_dice_rolled = true;
        state.touch_dice_block = true;
        state.cell_selection_player = Some(Player::Blue);
        assert!(!SelectionLockInvariant::holds(&state));
    }
}
