//! First-class actions, transition results and errors.
//!
//! Actions are the events a presentation layer (or an automated seat)
//! dispatches into the engine. Every action either produces a transition or
//! is rejected with a typed error, leaving the state untouched.

use crate::dice::DiceValue;
use crate::geometry::Cell;
use crate::types::{PieceId, Player};
use serde::{Deserialize, Serialize};

/// An event dispatched into the turn engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// The player rolls the die.
    Roll(Player),
    /// The player releases a piece from home.
    SelectPile(Player, PieceId),
    /// The player advances a piece on the board.
    SelectCell(Player, PieceId),
    /// Start a new game.
    Reset,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Roll(player) => write!(f, "{player} rolls"),
            Action::SelectPile(player, piece) => write!(f, "{player} releases {piece}"),
            Action::SelectCell(player, piece) => write!(f, "{player} moves {piece}"),
            Action::Reset => write!(f, "reset"),
        }
    }
}

/// Which selections a roll unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegalModes {
    /// Only a release from home is possible.
    PileOnly,
    /// Only a board move is possible.
    CellOnly,
    /// Either a release or a board move.
    PileOrCell,
    /// Nothing is playable; the turn passed to the next player.
    NoMove,
}

impl LegalModes {
    /// True if releasing a piece is allowed.
    pub fn allows_pile(self) -> bool {
        matches!(self, LegalModes::PileOnly | LegalModes::PileOrCell)
    }

    /// True if moving a piece on the board is allowed.
    pub fn allows_cell(self) -> bool {
        matches!(self, LegalModes::CellOnly | LegalModes::PileOrCell)
    }
}

/// Result of a dice roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// The value rolled.
    pub dice: DiceValue,
    /// What the player may do next.
    pub modes: LegalModes,
}

/// Result of a release or a board move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    /// The piece that moved.
    pub piece: PieceId,
    /// Travel position before the move.
    pub from: u8,
    /// Travel position after the move.
    pub to: u8,
    /// Board cell the piece landed on.
    pub landed: Cell,
    /// Opposing pieces sent home by this move.
    pub captured: Vec<PieceId>,
    /// Set when this move won the game.
    pub winner: Option<Player>,
    /// Player to act next (unchanged on an extra turn).
    pub next_player: Player,
    /// True if the mover keeps the turn.
    pub extra_turn: bool,
}

/// Result of applying an [`Action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A roll was made.
    Rolled(RollOutcome),
    /// A piece moved.
    Moved(MoveReport),
    /// The game was reset.
    Reset,
}

/// An action rejected by the game rules. The state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The acting player does not hold the turn.
    #[display("It's not {}'s turn", _0)]
    InvalidPlayer(Player),

    /// The piece cannot be selected right now.
    #[display("Piece {} cannot be selected", _0)]
    NoLegalSelection(PieceId),

    /// The die cannot be rolled while a roll is pending or dice are blocked.
    #[display("Dice are blocked")]
    DiceBlocked,

    /// The game already has a winner.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}

/// A collaborator broke its contract with the engine.
///
/// These are not game conditions: they mean a caller, a dice provider or a
/// stored snapshot handed the engine something impossible.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ContractViolation {
    /// A piece label or slot outside the sixteen pieces.
    #[display("Unknown piece: {}", _0)]
    UnknownPiece(String),

    /// A dice provider returned a value outside 1-6.
    #[display("Dice value {} is outside 1-6", _0)]
    DiceOutOfRange(u8),

    /// Board geometry has no cell for a travel distance.
    #[display("Piece {} has no board cell at travel {}", piece, travel)]
    OffBoard {
        /// The piece being placed.
        piece: PieceId,
        /// The travel distance that could not be mapped.
        travel: u8,
    },

    /// A postcondition failed after a transition.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),

    /// A stored snapshot could not be restored.
    #[display("Invalid snapshot: {}", _0)]
    InvalidSnapshot(String),
}

impl std::error::Error for ContractViolation {}

/// Any failure from the turn engine.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum EngineError {
    /// Ordinary rule rejection.
    #[display("{}", _0)]
    Rejected(MoveError),

    /// Fatal contract violation by a collaborator.
    #[display("{}", _0)]
    Contract(ContractViolation),
}

impl EngineError {
    /// Returns the rule rejection, if this is one.
    pub fn rejection(&self) -> Option<&MoveError> {
        match self {
            EngineError::Rejected(e) => Some(e),
            EngineError::Contract(_) => None,
        }
    }

    /// True for contract violations.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::Contract(_))
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Rejected(e) => Some(e),
            EngineError::Contract(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_allow() {
        assert!(LegalModes::PileOnly.allows_pile());
        assert!(!LegalModes::PileOnly.allows_cell());
        assert!(LegalModes::PileOrCell.allows_pile());
        assert!(LegalModes::PileOrCell.allows_cell());
        assert!(!LegalModes::NoMove.allows_pile());
        assert!(!LegalModes::NoMove.allows_cell());
    }

    #[test]
    fn test_engine_error_from_rejection() {
        let err: EngineError = MoveError::DiceBlocked.into();
        assert_eq!(err.rejection(), Some(&MoveError::DiceBlocked));
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "Dice are blocked");
    }

    #[test]
    fn test_contract_violation_is_fatal() {
        let err: EngineError = ContractViolation::DiceOutOfRange(7).into();
        assert!(err.is_fatal());
        assert!(err.rejection().is_none());
    }
}
