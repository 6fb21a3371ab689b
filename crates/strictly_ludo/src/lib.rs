//! Strictly Ludo - a contract-checked Ludo turn and movement engine.
//!
//! The engine owns the state of one four-player game: sixteen pieces, the
//! die, whose turn it is, capture and win rules. Presentation layers and
//! automated seats dispatch actions into it and read projections back.
//!
//! # Architecture
//!
//! - **Geometry**: static mapping from travel distance to board cells
//! - **State**: the turn state and its derived position index
//! - **Rules**: pure roll, capture, hand-off and win rules
//! - **Contracts/Invariants**: pre- and postconditions around transitions
//! - **Engine**: the single writer that applies one action at a time
//!
//! # Example
//!
//! ```
//! use strictly_ludo::{LegalModes, Player, ScriptedDice, TurnEngine};
//!
//! let mut engine = TurnEngine::new(ScriptedDice::new([6]));
//! let outcome = engine.roll_dice(Player::Red).unwrap();
//! assert_eq!(outcome.modes, LegalModes::PileOnly);
//!
//! let piece = engine.pile_choices()[0];
//! let report = engine.select_pile(Player::Red, piece).unwrap();
//! assert!(report.extra_turn);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod contracts;
mod dice;
mod engine;
mod geometry;
mod history;
pub mod invariants;
mod phases;
pub mod rules;
mod snapshot;
mod state;
mod types;

// Crate-level exports - Actions and errors
pub use action::{
    Action, ContractViolation, EngineError, LegalModes, MoveError, MoveReport, RollOutcome,
    Transition,
};

// Crate-level exports - Dice
pub use dice::{DiceProvider, DiceValue, ScriptedDice, SeededDice};

// Crate-level exports - Engine
pub use engine::TurnEngine;

// Crate-level exports - Board geometry
pub use geometry::{BoardGeometry, Cell, StandardBoard};

// Crate-level exports - History
pub use history::{
    CaptureRecord, DiceRecord, GameLog, GameStats, MoveRecord, PassRecord, Placement, PlayerStats,
};

// Crate-level exports - State
pub use phases::TurnPhase;
pub use snapshot::{SNAPSHOT_VERSION, Snapshot};
pub use state::{PositionEntry, TurnState};
pub use types::{FINISH, PIECES_PER_PLAYER, Piece, PieceId, Player, TRACK_LEN};
