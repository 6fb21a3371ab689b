//! Seats: whoever makes the choices for one colour.

mod human;
mod simple_ai;

pub use human::{HumanPlayer, SharedInput, spawn_stdin_reader};
pub use simple_ai::SimpleAi;

use anyhow::Result;
use strictly_ludo::{Action, PieceId, Player, TurnState};

/// A piece choice after a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Choice {
    /// Release a piece from home.
    #[display("release {}", _0)]
    Release(PieceId),
    /// Advance a released piece.
    #[display("advance {}", _0)]
    Advance(PieceId),
}

impl Choice {
    /// The chosen piece.
    pub fn piece(self) -> PieceId {
        match self {
            Choice::Release(piece) | Choice::Advance(piece) => piece,
        }
    }

    /// The engine action for `player`.
    pub fn into_action(self, player: Player) -> Action {
        match self {
            Choice::Release(piece) => Action::SelectPile(player, piece),
            Choice::Advance(piece) => Action::SelectCell(player, piece),
        }
    }
}

/// Everything a seat may pick from after a roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// The acting colour.
    pub player: Player,
    /// The value rolled.
    pub dice: u8,
    /// Pieces that may leave home.
    pub releases: Vec<PieceId>,
    /// Pieces that may advance.
    pub advances: Vec<PieceId>,
}

impl Options {
    /// Every legal choice, releases first.
    pub fn choices(&self) -> Vec<Choice> {
        self.releases
            .iter()
            .copied()
            .map(Choice::Release)
            .chain(self.advances.iter().copied().map(Choice::Advance))
            .collect()
    }

    /// Matches a piece to a legal choice, preferring to advance it.
    pub fn choice_for(&self, piece: PieceId) -> Option<Choice> {
        if self.advances.contains(&piece) {
            Some(Choice::Advance(piece))
        } else if self.releases.contains(&piece) {
            Some(Choice::Release(piece))
        } else {
            None
        }
    }
}

/// Trait for anything that can play a colour.
#[async_trait::async_trait]
pub trait Seat: Send {
    /// Waits until the seat wants to roll.
    async fn ready_to_roll(&mut self, _state: &TurnState) -> Result<()> {
        Ok(())
    }

    /// Picks one of the legal choices.
    async fn choose(&mut self, state: &TurnState, options: &Options) -> Result<Choice>;

    /// Returns the seat's display name.
    fn name(&self) -> &str;

    /// True for automated seats, which are paced by the AI delay.
    fn is_bot(&self) -> bool {
        true
    }
}
