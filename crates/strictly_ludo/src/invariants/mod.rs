//! First-class invariants for the turn state.
//!
//! Invariants are logical properties that must hold after every transition.
//! They are testable independently and serve as documentation of what the
//! engine guarantees.

use crate::state::TurnState;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants, so sets compose by listing them.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns `Ok(())` if every invariant holds, or every violation found.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);
impl_invariant_set!(I1, I2, I3, I4, I5);
impl_invariant_set!(I1, I2, I3, I4, I5, I6);
impl_invariant_set!(I1, I2, I3, I4, I5, I6, I7);
impl_invariant_set!(I1, I2, I3, I4, I5, I6, I7, I8);

pub mod history_consistent;
pub mod pending_choice;
pub mod piece_slots;
pub mod selection_lock;
pub mod sixes_bound;
pub mod travel_bounds;
pub mod winner_consistent;

pub use history_consistent::HistoryConsistentInvariant;
pub use pending_choice::PendingChoiceInvariant;
pub use piece_slots::{DiceFaceInvariant, PieceSlotsInvariant};
pub use selection_lock::SelectionLockInvariant;
pub use sixes_bound::SixesBoundInvariant;
pub use travel_bounds::TravelBoundsInvariant;
pub use winner_consistent::WinnerConsistentInvariant;

/// Every turn-state invariant as a composable set.
pub type LudoInvariants = (
    PieceSlotsInvariant,
    DiceFaceInvariant,
    TravelBoundsInvariant,
    SelectionLockInvariant,
    PendingChoiceInvariant,
    SixesBoundInvariant,
    WinnerConsistentInvariant,
    HistoryConsistentInvariant,
);

/// Joins violation descriptions into one message.
pub fn describe(violations: &[InvariantViolation]) -> String {
    violations
        .iter()
        .map(|v| v.description.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Checks the full set against a state.
pub fn check_turn_state(state: &TurnState) -> Result<(), Vec<InvariantViolation>> {
    LudoInvariants::check_all(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceId, Player};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        assert!(check_turn_state(&TurnState::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_for_arranged_game() {
        let a1 = PieceId::parse("A1").unwrap();
        let state = TurnState::arranged(Player::Red, &[(a1, 30)]).unwrap();
        assert!(check_turn_state(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut state = TurnState::new();
        state.consecutive_sixes = 3;
        state.cell_selection_player = Some(Player::Green);

        // Green has nothing to advance, so the pending choice fails too.
        let violations = check_turn_state(&state).unwrap_err();
        assert_eq!(violations.len(), 3);
        assert!(describe(&violations).contains(';'));
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (TravelBoundsInvariant, SixesBoundInvariant);
        assert!(TwoInvariants::check_all(&TurnState::new()).is_ok());
    }
}
