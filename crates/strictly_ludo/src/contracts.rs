//! Contract-based validation for turn transitions.
//!
//! Contracts pair preconditions, checked against the state before an action
//! is applied, with postconditions checked against the state it produced:
//! {P} action {Q}.

use crate::action::{ContractViolation, MoveError};
use crate::invariants::{InvariantSet, LudoInvariants, describe};
use crate::state::TurnState;
use crate::types::{PieceId, Player};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for one kind of transition.
pub trait Contract<S, A> {
    /// Checks the rules before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks that the transition left the state consistent.
    fn post(before: &S, after: &S) -> Result<(), ContractViolation>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: nobody has won yet.
pub struct GameNotOver;

impl GameNotOver {
    /// Rejects every action once there is a winner.
    pub fn check(state: &TurnState) -> Result<(), MoveError> {
        match state.winner() {
            Some(_) => Err(MoveError::GameOver),
            None => Ok(()),
        }
    }
}

/// Precondition: the acting player holds the turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Rejects a player acting out of turn.
    pub fn check(state: &TurnState, player: Player) -> Result<(), MoveError> {
        if player == state.chance_player() {
            Ok(())
        } else {
            Err(MoveError::InvalidPlayer(player))
        }
    }
}

/// Precondition: the dice accept a roll.
pub struct DiceFree;

impl DiceFree {
    /// Rejects a roll while one is pending or dice are blocked.
    pub fn check(state: &TurnState) -> Result<(), MoveError> {
        if state.touch_dice_block() || state.is_dice_rolled() {
            Err(MoveError::DiceBlocked)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the piece may be released from home.
pub struct PileSelectable;

impl PileSelectable {
    /// Requires pile selection for `player`, the player's own piece, at home.
    pub fn check(state: &TurnState, player: Player, piece: PieceId) -> Result<(), MoveError> {
        let selectable = state.pile_selection_player() == Some(player)
            && piece.player() == player
            && state.piece(piece).is_home();
        if selectable {
            Ok(())
        } else {
            Err(MoveError::NoLegalSelection(piece))
        }
    }
}

/// Precondition: the piece may advance by the rolled value.
pub struct CellSelectable;

impl CellSelectable {
    /// Requires cell selection for `player`, the player's own piece, out of
    /// home and not overshooting the finish.
    pub fn check(state: &TurnState, player: Player, piece: PieceId) -> Result<(), MoveError> {
        let selectable = state.cell_selection_player() == Some(player)
            && piece.player() == player
            && state.piece(piece).can_advance(state.dice_no());
        if selectable {
            Ok(())
        } else {
            Err(MoveError::NoLegalSelection(piece))
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Transition Contracts
// ─────────────────────────────────────────────────────────────

/// A roll request by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollRequest(pub Player);

/// A piece selection by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// The acting player.
    pub player: Player,
    /// The chosen piece.
    pub piece: PieceId,
}

/// Postcondition shared by every transition: all invariants hold.
fn invariants_hold(after: &TurnState) -> Result<(), ContractViolation> {
    LudoInvariants::check_all(after).map_err(|violations| {
        let descriptions = describe(&violations);
        warn!(%descriptions, "Postcondition failed");
        ContractViolation::InvariantViolation(format!("Postcondition failed: {descriptions}"))
    })
}

/// Postcondition: no piece moved backwards except by being sent home.
fn travel_monotonic(before: &TurnState, after: &TurnState) -> Result<(), ContractViolation> {
    let regressed = before
        .all_pieces()
        .zip(after.all_pieces())
        .find(|(b, a)| a.travel_count() < b.travel_count() && a.travel_count() != 0);
    match regressed {
        Some((_, piece)) => Err(ContractViolation::InvariantViolation(format!(
            "Piece {} moved backwards",
            piece.id()
        ))),
        None => Ok(()),
    }
}

/// Contract for rolling the die.
///
/// Preconditions: game running, player's turn, dice free.
pub struct RollContract;

impl Contract<TurnState, RollRequest> for RollContract {
    #[instrument(skip(state))]
    fn pre(state: &TurnState, action: &RollRequest) -> Result<(), MoveError> {
        GameNotOver::check(state)?;
        PlayersTurn::check(state, action.0)?;
        DiceFree::check(state)
    }

    fn post(before: &TurnState, after: &TurnState) -> Result<(), ContractViolation> {
        if before.travel_table() != after.travel_table() {
            return Err(ContractViolation::InvariantViolation(
                "A roll moved a piece".to_string(),
            ));
        }
        invariants_hold(after)
    }
}

/// Contract for releasing a piece from home.
pub struct PileContract;

impl Contract<TurnState, Selection> for PileContract {
    #[instrument(skip(state))]
    fn pre(state: &TurnState, action: &Selection) -> Result<(), MoveError> {
        GameNotOver::check(state)?;
        PlayersTurn::check(state, action.player)?;
        PileSelectable::check(state, action.player, action.piece)
    }

    fn post(before: &TurnState, after: &TurnState) -> Result<(), ContractViolation> {
        travel_monotonic(before, after)?;
        invariants_hold(after)
    }
}

/// Contract for advancing a piece on the board.
pub struct CellContract;

impl Contract<TurnState, Selection> for CellContract {
    #[instrument(skip(state))]
    fn pre(state: &TurnState, action: &Selection) -> Result<(), MoveError> {
        GameNotOver::check(state)?;
        PlayersTurn::check(state, action.player)?;
        CellSelectable::check(state, action.player, action.piece)
    }

    fn post(before: &TurnState, after: &TurnState) -> Result<(), ContractViolation> {
        travel_monotonic(before, after)?;
        invariants_hold(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(label: &str) -> PieceId {
        PieceId::parse(label).unwrap()
    }

    fn rolled(mut state: TurnState, dice: u8) -> TurnState {
        state.dice_no = dice;
        state.is_dice_rolled = true;
        state.touch_dice_block = true;
        state
    }

    #[test]
    fn test_roll_precondition_ok_on_fresh_game() {
        let state = TurnState::new();
        assert!(RollContract::pre(&state, &RollRequest(Player::Red)).is_ok());
    }

    #[test]
    fn test_roll_out_of_turn() {
        let state = TurnState::new();
        assert_eq!(
            RollContract::pre(&state, &RollRequest(Player::Blue)),
            Err(MoveError::InvalidPlayer(Player::Blue))
        );
    }

    #[test]
    fn test_roll_while_blocked() {
        let state = rolled(TurnState::new(), 6);
        assert_eq!(
            RollContract::pre(&state, &RollRequest(Player::Red)),
            Err(MoveError::DiceBlocked)
        );
    }

    #[test]
    fn test_pile_requires_home_piece() {
        let mut state = rolled(TurnState::arranged(Player::Red, &[(id("A1"), 4)]).unwrap(), 6);
        state.pile_selection_player = Some(Player::Red);
        let ok = Selection { player: Player::Red, piece: id("A2") };
        let out = Selection { player: Player::Red, piece: id("A1") };
        let foreign = Selection { player: Player::Red, piece: id("B1") };
        assert!(PileContract::pre(&state, &ok).is_ok());
        assert_eq!(PileContract::pre(&state, &out), Err(MoveError::NoLegalSelection(id("A1"))));
        assert_eq!(
            PileContract::pre(&state, &foreign),
            Err(MoveError::NoLegalSelection(id("B1")))
        );
    }

    #[test]
    fn test_cell_rejects_overshoot() {
        let mut state = rolled(TurnState::arranged(Player::Red, &[(id("A1"), 55)]).unwrap(), 3);
        state.cell_selection_player = Some(Player::Red);
        let action = Selection { player: Player::Red, piece: id("A1") };
        assert_eq!(
            CellContract::pre(&state, &action),
            Err(MoveError::NoLegalSelection(id("A1")))
        );
        state.dice_no = 2;
        assert!(CellContract::pre(&state, &action).is_ok());
    }

    #[test]
    fn test_postcondition_detects_backwards_move() {
        let before = TurnState::arranged(Player::Red, &[(id("A1"), 20)]).unwrap();
        let mut after = before.clone();
        after.piece_mut(id("A1")).place(10);
        assert!(CellContract::post(&before, &after).is_err());
    }

    #[test]
    fn test_postcondition_detects_moving_roll() {
        let before = TurnState::new();
        let mut after = before.clone();
        after.piece_mut(id("C3")).place(1);
        assert!(RollContract::post(&before, &after).is_err());
    }
}
