//! Game rules for Ludo.
//!
//! Pure functions over the turn state and board geometry. The engine
//! composes them into transitions; contracts and invariants reuse them.

pub mod capture;
pub mod roll;
pub mod turn;
pub mod win;

pub use capture::{capture_victims, is_capture_cell};
pub use roll::{RollAssessment, decide_modes};
pub use turn::{Handoff, handoff_after_move};
pub use win::check_winner;
