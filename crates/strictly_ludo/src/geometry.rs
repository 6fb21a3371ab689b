//! Board geometry: where a piece's travel distance lands on the board.
//!
//! Geometry is pure static data. The engine only asks three questions of it:
//! which cell a player reaches after travelling `n` steps, whether a cell is
//! a safe spot, and whether a cell belongs to a player's private home stretch.

use crate::types::{FINISH, LAST_TRACK_TRAVEL, Player, TRACK_LEN};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// A cell on the board, in global coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// The player's home base (pieces not yet released).
    Yard(Player),
    /// A cell on the shared outer track (1-52).
    Track(u8),
    /// A cell on a player's private run to the finish (1-5).
    HomeStretch(Player, u8),
    /// The player's finish.
    Finished(Player),
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Yard(player) => write!(f, "{player} yard"),
            Cell::Track(n) => write!(f, "track {n}"),
            Cell::HomeStretch(player, n) => write!(f, "{player} stretch {n}"),
            Cell::Finished(player) => write!(f, "{player} finish"),
        }
    }
}

/// Static mapping from travel distance to board cells.
pub trait BoardGeometry {
    /// Cell reached by `player` after travelling `travel` steps, or `None`
    /// past the finish.
    fn cell_for(&self, player: Player, travel: u8) -> Option<Cell>;

    /// True if pieces on this cell cannot be captured.
    fn is_safe_spot(&self, cell: Cell) -> bool;

    /// True if the cell lies on `player`'s private home stretch.
    fn is_home_stretch(&self, player: Player, cell: Cell) -> bool;

    /// True if the cell is any player's release cell.
    fn is_start_cell(&self, cell: Cell) -> bool {
        Player::iter().any(|p| self.cell_for(p, 1) == Some(cell))
    }
}

/// Track cells marked with a star.
const STAR_CELLS: [u8; 4] = [9, 22, 35, 48];

/// The standard 52-cell cross board.
///
/// Safe spots are every player's entry cell and the four star cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardBoard {
    safe: [bool; TRACK_LEN as usize + 1],
}

impl StandardBoard {
    /// Builds the lookup tables.
    #[instrument]
    pub fn new() -> Self {
        let mut safe = [false; TRACK_LEN as usize + 1];
        for player in Player::iter() {
            safe[usize::from(track_cell(player, 1))] = true;
        }
        for star in STAR_CELLS {
            safe[usize::from(star)] = true;
        }
        Self { safe }
    }

    /// Track cells that are safe, in ascending order.
    pub fn safe_spots(&self) -> Vec<u8> {
        (1..=TRACK_LEN)
            .filter(|&n| self.safe[usize::from(n)])
            .collect()
    }
}

impl Default for StandardBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Global track cell for a travel distance in 1..=51.
fn track_cell(player: Player, travel: u8) -> u8 {
    (player.entry_offset() + travel - 1) % TRACK_LEN + 1
}

impl BoardGeometry for StandardBoard {
    fn cell_for(&self, player: Player, travel: u8) -> Option<Cell> {
        match travel {
            0 => Some(Cell::Yard(player)),
            1..=LAST_TRACK_TRAVEL => Some(Cell::Track(track_cell(player, travel))),
            FINISH => Some(Cell::Finished(player)),
            t if t < FINISH => Some(Cell::HomeStretch(player, t - LAST_TRACK_TRAVEL)),
            _ => None,
        }
    }

    fn is_safe_spot(&self, cell: Cell) -> bool {
        match cell {
            Cell::Track(n) => self.safe.get(usize::from(n)).copied().unwrap_or(false),
            _ => false,
        }
    }

    fn is_home_stretch(&self, player: Player, cell: Cell) -> bool {
        matches!(cell, Cell::HomeStretch(owner, _) if owner == player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_cells_follow_offsets() {
        let board = StandardBoard::new();
        assert_eq!(board.cell_for(Player::Red, 1), Some(Cell::Track(1)));
        assert_eq!(board.cell_for(Player::Green, 1), Some(Cell::Track(14)));
        assert_eq!(board.cell_for(Player::Yellow, 1), Some(Cell::Track(27)));
        assert_eq!(board.cell_for(Player::Blue, 1), Some(Cell::Track(40)));
    }

    #[test]
    fn test_track_wraps_around() {
        let board = StandardBoard::new();
        assert_eq!(board.cell_for(Player::Green, 39), Some(Cell::Track(52)));
        assert_eq!(board.cell_for(Player::Green, 40), Some(Cell::Track(1)));
        assert_eq!(board.cell_for(Player::Blue, 51), Some(Cell::Track(38)));
    }

    #[test]
    fn test_home_stretch_and_finish() {
        let board = StandardBoard::new();
        assert_eq!(
            board.cell_for(Player::Yellow, 52),
            Some(Cell::HomeStretch(Player::Yellow, 1))
        );
        assert_eq!(
            board.cell_for(Player::Yellow, 56),
            Some(Cell::HomeStretch(Player::Yellow, 5))
        );
        assert_eq!(board.cell_for(Player::Yellow, 57), Some(Cell::Finished(Player::Yellow)));
        assert_eq!(board.cell_for(Player::Yellow, 58), None);
        assert_eq!(board.cell_for(Player::Yellow, 0), Some(Cell::Yard(Player::Yellow)));
    }

    #[test]
    fn test_safe_spots() {
        let board = StandardBoard::new();
        assert_eq!(board.safe_spots(), vec![1, 9, 14, 22, 27, 35, 40, 48]);
        assert!(board.is_safe_spot(Cell::Track(22)));
        assert!(!board.is_safe_spot(Cell::Track(23)));
        assert!(!board.is_safe_spot(Cell::HomeStretch(Player::Red, 1)));
    }

    #[test]
    fn test_start_cells() {
        let board = StandardBoard::new();
        assert!(board.is_start_cell(Cell::Track(14)));
        assert!(!board.is_start_cell(Cell::Track(9)));
    }

    #[test]
    fn test_home_stretch_is_private() {
        let board = StandardBoard::new();
        let cell = Cell::HomeStretch(Player::Blue, 2);
        assert!(board.is_home_stretch(Player::Blue, cell));
        assert!(!board.is_home_stretch(Player::Red, cell));
        assert!(!board.is_home_stretch(Player::Blue, Cell::Track(2)));
    }
}
