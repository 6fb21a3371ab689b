//! Append-only audit trail of a game.
//!
//! The log never feeds rule decisions. Every record carries a sequence
//! number drawn from one counter, so moves and captures can be replayed in
//! the order they happened.

use crate::types::{PIECES_PER_PLAYER, PieceId, Player};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// A die roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct DiceRecord {
    /// Sequence number.
    pub seq: u32,
    /// Player who rolled.
    pub player: Player,
    /// Value rolled.
    pub roll: u8,
}

/// A piece movement (release or advance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct MoveRecord {
    /// Sequence number.
    pub seq: u32,
    /// The piece that moved.
    pub piece: PieceId,
    /// Travel position before.
    pub from: u8,
    /// Travel position after.
    pub to: u8,
}

/// A capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct CaptureRecord {
    /// Sequence number.
    pub seq: u32,
    /// Player whose move made the capture.
    pub capturing_player: Player,
    /// The piece sent home.
    pub captured: PieceId,
}

/// A turn passed without a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct PassRecord {
    /// Sequence number.
    pub seq: u32,
    /// Player who could not move.
    pub player: Player,
    /// Value that could not be played.
    pub roll: u8,
}

/// Everything that happened in a game, in order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct GameLog {
    /// Travel positions when logging started, per player and slot.
    origin: [[u8; PIECES_PER_PLAYER]; 4],
    /// Next sequence number.
    next_seq: u32,
    /// Every roll.
    dice_history: Vec<DiceRecord>,
    /// Every release and advance.
    move_history: Vec<MoveRecord>,
    /// Every capture.
    captures: Vec<CaptureRecord>,
    /// Every passed turn.
    passes: Vec<PassRecord>,
}

/// A move or capture, as seen during replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A piece moved to a travel position.
    Moved(MoveRecord),
    /// A piece was sent home.
    Captured(CaptureRecord),
}

impl GameLog {
    /// Creates an empty log whose replay starts from `origin`.
    pub fn with_origin(origin: [[u8; PIECES_PER_PLAYER]; 4]) -> Self {
        Self {
            origin,
            ..Self::default()
        }
    }

    fn take_seq(&mut self) -> u32 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    pub(crate) fn record_roll(&mut self, player: Player, roll: u8) {
        let seq = self.take_seq();
        self.dice_history.push(DiceRecord::new(seq, player, roll));
    }

    pub(crate) fn record_move(&mut self, piece: PieceId, from: u8, to: u8) {
        let seq = self.take_seq();
        self.move_history.push(MoveRecord::new(seq, piece, from, to));
    }

    pub(crate) fn record_capture(&mut self, capturing_player: Player, captured: PieceId) {
        let seq = self.take_seq();
        self.captures
            .push(CaptureRecord::new(seq, capturing_player, captured));
    }

    pub(crate) fn record_pass(&mut self, player: Player, roll: u8) {
        let seq = self.take_seq();
        self.passes.push(PassRecord::new(seq, player, roll));
    }

    /// Moves and captures merged in sequence order.
    pub fn placements(&self) -> Vec<Placement> {
        let mut merged: Vec<Placement> = self
            .move_history
            .iter()
            .copied()
            .map(Placement::Moved)
            .chain(self.captures.iter().copied().map(Placement::Captured))
            .collect();
        merged.sort_by_key(|p| match p {
            Placement::Moved(m) => m.seq,
            Placement::Captured(c) => c.seq,
        });
        merged
    }

    /// Travel positions obtained by replaying the log from its origin.
    pub fn replay_positions(&self) -> [[u8; PIECES_PER_PLAYER]; 4] {
        let mut positions = self.origin;
        for placement in self.placements() {
            let (piece, to) = match placement {
                Placement::Moved(m) => (m.piece, m.to),
                Placement::Captured(c) => (c.captured, 0),
            };
            positions[piece.player().index()][piece.slot_index()] = to;
        }
        positions
    }

    /// Summarizes the log per player.
    pub fn stats(&self, turn_count: u32) -> GameStats {
        let mut players: BTreeMap<Player, PlayerStats> =
            Player::iter().map(|p| (p, PlayerStats::default())).collect();

        for roll in &self.dice_history {
            let entry = players.entry(roll.player).or_default();
            entry.rolls += 1;
            if roll.roll == 6 {
                entry.sixes += 1;
            }
        }
        for mov in &self.move_history {
            players.entry(mov.piece.player()).or_default().moves += 1;
        }
        for capture in &self.captures {
            players.entry(capture.capturing_player).or_default().captures_made += 1;
            players.entry(capture.captured.player()).or_default().pieces_lost += 1;
        }
        for pass in &self.passes {
            players.entry(pass.player).or_default().passes += 1;
        }

        GameStats {
            turn_count,
            players,
        }
    }
}

/// Per-player counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Dice rolled.
    pub rolls: u32,
    /// Sixes rolled.
    pub sixes: u32,
    /// Releases and advances.
    pub moves: u32,
    /// Opposing pieces sent home.
    pub captures_made: u32,
    /// Own pieces sent home.
    pub pieces_lost: u32,
    /// Turns passed without a move.
    pub passes: u32,
}

impl std::ops::AddAssign for PlayerStats {
    fn add_assign(&mut self, rhs: Self) {
        self.rolls += rhs.rolls;
        self.sixes += rhs.sixes;
        self.moves += rhs.moves;
        self.captures_made += rhs.captures_made;
        self.pieces_lost += rhs.pieces_lost;
        self.passes += rhs.passes;
    }
}

/// Summary of a game log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    /// Completed turns so far, extra turns included.
    pub turn_count: u32,
    /// Counters per player.
    pub players: BTreeMap<Player, PlayerStats>,
}

impl GameStats {
    /// Counters for one player.
    pub fn player(&self, player: Player) -> PlayerStats {
        self.players.get(&player).copied().unwrap_or_default()
    }
}
