//! What a dice roll lets the current player do.

use crate::action::LegalModes;
use crate::dice::DiceValue;
use crate::types::Piece;
use tracing::instrument;

/// Facts about a player's pieces that decide a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollAssessment {
    /// A released piece has not finished yet.
    pub any_on_board: bool,
    /// A piece is still at home.
    pub any_in_home: bool,
    /// A released piece can advance by the roll without overshooting.
    pub can_move: bool,
}

impl RollAssessment {
    /// Inspects a player's pieces for a given roll.
    pub fn of(pieces: &[Piece], dice: DiceValue) -> Self {
        Self {
            any_on_board: pieces.iter().any(Piece::is_on_board),
            any_in_home: pieces.iter().any(Piece::is_home),
            can_move: pieces.iter().any(|p| p.can_advance(dice.get())),
        }
    }
}

/// Applies the roll decision table.
///
/// | pieces | roll | outcome |
/// |---|---|---|
/// | none on board | six | release only |
/// | none on board | other | pass |
/// | on board, none can move | any | pass |
/// | on board, some can move | six | release or move |
/// | on board, some can move | other | move only |
///
/// Release requires a piece at home.
#[instrument]
pub fn decide_modes(assessment: RollAssessment, dice: DiceValue) -> LegalModes {
    let release = dice.is_six() && assessment.any_in_home;
    if !assessment.any_on_board {
        return if release {
            LegalModes::PileOnly
        } else {
            LegalModes::NoMove
        };
    }
    match (assessment.can_move, release) {
        (false, _) => LegalModes::NoMove,
        (true, true) => LegalModes::PileOrCell,
        (true, false) => LegalModes::CellOnly,
    }
}
