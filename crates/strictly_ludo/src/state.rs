//! The authoritative turn state.

use crate::action::ContractViolation;
use crate::history::GameLog;
use crate::phases::TurnPhase;
use crate::types::{FINISH, PIECES_PER_PLAYER, Piece, PieceId, Player};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// One entry of the derived position index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct PositionEntry {
    /// The piece.
    pub piece: PieceId,
    /// Its travel position (never 0).
    pub pos: u8,
    /// Its owner.
    pub player: Player,
}

/// Complete state of one game.
///
/// Only the turn engine mutates this; everything else reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub(crate) pieces: [[Piece; PIECES_PER_PLAYER]; 4],
    pub(crate) chance_player: Player,
    pub(crate) dice_no: u8,
    pub(crate) is_dice_rolled: bool,
    pub(crate) consecutive_sixes: u8,
    pub(crate) pile_selection_player: Option<Player>,
    pub(crate) cell_selection_player: Option<Player>,
    pub(crate) touch_dice_block: bool,
    pub(crate) winner: Option<Player>,
    pub(crate) turn_count: u32,
    pub(crate) log: GameLog,
}

impl TurnState {
    /// Fresh game: every piece home, player 1 to roll.
    #[instrument]
    pub fn new() -> Self {
        Self {
            pieces: [Player::Red, Player::Green, Player::Yellow, Player::Blue].map(Piece::home_row),
            chance_player: Player::Red,
            dice_no: 1,
            is_dice_rolled: false,
            consecutive_sixes: 0,
            pile_selection_player: None,
            cell_selection_player: None,
            touch_dice_block: false,
            winner: None,
            turn_count: 0,
            log: GameLog::default(),
        }
    }

    /// A fresh turn with pieces already placed at the given travel distances.
    ///
    /// Useful for puzzles, tutorials and tests. The history log starts from
    /// this layout. A player whose four pieces are all at the finish is
    /// recorded as the winner.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::OffBoard`] for a distance above 57.
    #[instrument]
    pub fn arranged(
        chance_player: Player,
        placements: &[(PieceId, u8)],
    ) -> Result<Self, ContractViolation> {
        let mut state = Self::new();
        state.chance_player = chance_player;
        for &(piece, travel) in placements {
            if travel > FINISH {
                return Err(ContractViolation::OffBoard { piece, travel });
            }
            state.piece_mut(piece).place(travel);
        }
        state.log = GameLog::with_origin(state.travel_table());
        state.winner = Player::iter().find(|&p| state.all_finished(p));
        Ok(state)
    }

    /// All four pieces of a player.
    pub fn pieces_of(&self, player: Player) -> &[Piece; PIECES_PER_PLAYER] {
        &self.pieces[player.index()]
    }

    /// Every piece, player by player.
    pub fn all_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().flatten()
    }

    /// Looks up a piece.
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.player().index()][id.slot_index()]
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.player().index()][id.slot_index()]
    }

    /// Whose turn it is.
    pub fn chance_player(&self) -> Player {
        self.chance_player
    }

    /// Last rolled value (1 before the first roll).
    pub fn dice_no(&self) -> u8 {
        self.dice_no
    }

    /// True between a roll and the move (or pass) that resolves it.
    pub fn is_dice_rolled(&self) -> bool {
        self.is_dice_rolled
    }

    /// Sixes rolled in a row by the current player.
    pub fn consecutive_sixes(&self) -> u8 {
        self.consecutive_sixes
    }

    /// Player allowed to release a piece, if any.
    pub fn pile_selection_player(&self) -> Option<Player> {
        self.pile_selection_player
    }

    /// Player allowed to advance a piece, if any.
    pub fn cell_selection_player(&self) -> Option<Player> {
        self.cell_selection_player
    }

    /// True while dice input is disabled.
    pub fn touch_dice_block(&self) -> bool {
        self.touch_dice_block
    }

    /// The winner, once a player has finished all pieces.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Completed turns, extra turns on a six included.
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// The audit trail.
    pub fn log(&self) -> &GameLog {
        &self.log
    }

    /// True if it is `player`'s turn and the game is still running.
    pub fn is_turn_of(&self, player: Player) -> bool {
        self.winner.is_none() && self.chance_player == player
    }

    /// Pieces the pending pile selection may release.
    pub fn pile_choices(&self) -> Vec<PieceId> {
        match self.pile_selection_player {
            Some(player) => self
                .pieces_of(player)
                .iter()
                .filter(|p| p.is_home())
                .map(|p| p.id())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Pieces the pending cell selection may advance by the rolled value.
    pub fn cell_choices(&self) -> Vec<PieceId> {
        match self.cell_selection_player {
            Some(player) => self
                .pieces_of(player)
                .iter()
                .filter(|p| p.can_advance(self.dice_no))
                .map(|p| p.id())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Derived index of every piece out of home, by player then slot.
    ///
    /// Recomputed from the piece lists on each call.
    pub fn current_positions(&self) -> Vec<PositionEntry> {
        self.all_pieces()
            .filter(|piece| piece.pos() != 0)
            .map(|piece| PositionEntry::new(piece.id(), piece.pos(), piece.id().player()))
            .collect()
    }

    /// The phase the current turn is in.
    pub fn phase(&self) -> TurnPhase {
        TurnPhase::of(self)
    }

    /// True if every piece of `player` has finished.
    pub fn all_finished(&self, player: Player) -> bool {
        self.pieces_of(player).iter().all(Piece::is_finished)
    }

    /// Travel distance of every piece, per player and slot.
    pub fn travel_table(&self) -> [[u8; PIECES_PER_PLAYER]; 4] {
        self.pieces
            .map(|player_pieces| player_pieces.map(|piece| piece.travel_count()))
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_shape() {
        let state = TurnState::new();
        assert_eq!(state.chance_player(), Player::Red);
        assert_eq!(state.dice_no(), 1);
        assert!(!state.is_dice_rolled());
        assert!(state.current_positions().is_empty());
        assert!(state.all_pieces().all(Piece::is_home));
        assert_eq!(state.all_pieces().count(), 16);
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn test_pieces_carry_their_ids() {
        let state = TurnState::new();
        for player in Player::iter() {
            for (slot, piece) in state.pieces_of(player).iter().enumerate() {
                assert_eq!(piece.id().player(), player);
                assert_eq!(usize::from(piece.id().slot()), slot + 1);
            }
        }
    }

    #[test]
    fn test_current_positions_projects_released_pieces() {
        let a2 = PieceId::parse("A2").unwrap();
        let c1 = PieceId::parse("C1").unwrap();
        let state = TurnState::arranged(Player::Red, &[(a2, 10), (c1, 57)]).unwrap();
        assert_eq!(
            state.current_positions(),
            vec![
                PositionEntry::new(a2, 10, Player::Red),
                PositionEntry::new(c1, 57, Player::Yellow),
            ]
        );
    }

    #[test]
    fn test_arranged_rejects_overshoot() {
        let a1 = PieceId::parse("A1").unwrap();
        assert!(matches!(
            TurnState::arranged(Player::Red, &[(a1, 58)]),
            Err(ContractViolation::OffBoard { travel: 58, .. })
        ));
    }

    #[test]
    fn test_arranged_detects_winner() {
        let placements: Vec<_> = PieceId::all_for(Player::Blue).map(|id| (id, 57)).collect();
        let state = TurnState::arranged(Player::Red, &placements).unwrap();
        assert_eq!(state.winner(), Some(Player::Blue));
        assert!(!state.is_turn_of(Player::Red));
    }
}
