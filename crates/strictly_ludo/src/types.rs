//! Core domain types for Ludo.

use crate::action::ContractViolation;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Number of pieces each player owns.
pub const PIECES_PER_PLAYER: usize = 4;

/// Number of cells on the shared outer track.
pub const TRACK_LEN: u8 = 52;

/// Travel distance of the last shared-track cell on a player's route.
pub const LAST_TRACK_TRAVEL: u8 = 51;

/// Travel distance at which a piece has reached the finish.
pub const FINISH: u8 = 57;

/// A player in the game, numbered 1 to 4 in turn order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
pub enum Player {
    /// Player 1, plays first.
    Red,
    /// Player 2.
    Green,
    /// Player 3.
    Yellow,
    /// Player 4.
    Blue,
}

impl Player {
    /// Returns the player number (1-4).
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Returns the zero-based index used for piece storage.
    pub fn index(self) -> usize {
        match self {
            Player::Red => 0,
            Player::Green => 1,
            Player::Yellow => 2,
            Player::Blue => 3,
        }
    }

    /// Looks up a player by number (1-4).
    pub fn from_number(number: u8) -> Option<Self> {
        Self::iter().find(|p| p.number() == number)
    }

    /// Returns the player whose turn follows this one: `(n % 4) + 1`.
    pub fn next(self) -> Self {
        match self {
            Player::Red => Player::Green,
            Player::Green => Player::Yellow,
            Player::Yellow => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// Letter used in piece labels (`A` for player 1).
    pub fn letter(self) -> char {
        (b'A' + self.index() as u8) as char
    }

    /// Offset of this player's entry on the shared track.
    pub fn entry_offset(self) -> u8 {
        self.index() as u8 * 13
    }
}

/// Identity of a piece: owning player plus slot 1-4.
///
/// Serializes as its label (`"B3"`), so stored ids are validated on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PieceId {
    player: Player,
    slot: u8,
}

impl PieceId {
    /// Creates a piece id, rejecting slots outside 1-4.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::UnknownPiece`] for an out-of-range slot.
    #[instrument]
    pub fn new(player: Player, slot: u8) -> Result<Self, ContractViolation> {
        if (1..=PIECES_PER_PLAYER as u8).contains(&slot) {
            Ok(Self { player, slot })
        } else {
            Err(ContractViolation::UnknownPiece(format!(
                "{}{}",
                player.letter(),
                slot
            )))
        }
    }

    /// Parses a label such as `B3` (player 2, slot 3).
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::UnknownPiece`] if the label does not name
    /// one of the sixteen pieces.
    #[instrument]
    pub fn parse(label: &str) -> Result<Self, ContractViolation> {
        let unknown = || ContractViolation::UnknownPiece(label.to_string());
        let mut chars = label.trim().chars();
        let letter = chars.next().ok_or_else(unknown)?.to_ascii_uppercase();
        let slot = chars
            .as_str()
            .parse::<u8>()
            .map_err(|_| unknown())?;
        let player = Player::iter()
            .find(|p| p.letter() == letter)
            .ok_or_else(unknown)?;
        Self::new(player, slot).map_err(|_| unknown())
    }

    /// Returns the owning player.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the slot (1-4).
    pub fn slot(&self) -> u8 {
        self.slot
    }

    /// Index of this piece within its player's list.
    pub(crate) fn slot_index(&self) -> usize {
        usize::from(self.slot) - 1
    }

    /// All four piece ids belonging to a player.
    pub fn all_for(player: Player) -> impl Iterator<Item = PieceId> {
        (1..=PIECES_PER_PLAYER as u8).map(move |slot| PieceId { player, slot })
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.player.letter(), self.slot)
    }
}

impl TryFrom<String> for PieceId {
    type Error = ContractViolation;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        Self::parse(&label)
    }
}

impl From<PieceId> for String {
    fn from(id: PieceId) -> Self {
        id.to_string()
    }
}

/// A single piece and how far it has travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    /// Travel position along the owner's route (0 home, 57 finished).
    pos: u8,
    /// Cells advanced since release.
    travel_count: u8,
}

impl Piece {
    /// Creates a piece sitting in its home base.
    pub fn at_home(id: PieceId) -> Self {
        Self {
            id,
            pos: 0,
            travel_count: 0,
        }
    }

    /// The four pieces of a player, all at home.
    pub fn home_row(player: Player) -> [Piece; PIECES_PER_PLAYER] {
        [1, 2, 3, 4].map(|slot| Self::at_home(PieceId { player, slot }))
    }

    /// Returns the piece id.
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Returns the travel position.
    pub fn pos(&self) -> u8 {
        self.pos
    }

    /// Returns the number of cells advanced since release.
    pub fn travel_count(&self) -> u8 {
        self.travel_count
    }

    /// True while the piece waits in its home base.
    pub fn is_home(&self) -> bool {
        self.pos == 0
    }

    /// True once the piece has reached the finish.
    pub fn is_finished(&self) -> bool {
        self.pos == FINISH
    }

    /// True for a released piece that has not finished.
    pub fn is_on_board(&self) -> bool {
        self.pos != 0 && self.pos != FINISH
    }

    /// True if the piece is out of home and can advance `steps` without
    /// overshooting the finish.
    pub fn can_advance(&self, steps: u8) -> bool {
        self.pos != 0 && self.travel_count.saturating_add(steps) <= FINISH
    }

    pub(crate) fn place(&mut self, travel: u8) {
        self.pos = travel;
        self.travel_count = travel;
    }

    pub(crate) fn send_home(&mut self) {
        self.pos = 0;
        self.travel_count = 0;
    }

    #[cfg(test)]
    pub(crate) fn force(&mut self, pos: u8, travel_count: u8) {
        self.pos = pos;
        self.travel_count = travel_count;
    }
}
