//! The turn engine: the single authority over turns, rolls and moves.
//!
//! Every transition is computed on a copy of the current state and
//! committed only after its contract holds, so a rejected action never
//! leaves a partial write behind. The engine processes one action to
//! completion before it accepts the next.

use crate::action::{
    Action, ContractViolation, EngineError, LegalModes, MoveError, MoveReport, RollOutcome,
    Transition,
};
use crate::contracts::{CellContract, Contract, PileContract, RollContract, RollRequest, Selection};
use crate::dice::{DiceProvider, DiceValue};
use crate::geometry::{BoardGeometry, Cell, StandardBoard};
use crate::invariants::{check_turn_state, describe};
use crate::phases::TurnPhase;
use crate::rules::{
    Handoff, RollAssessment, capture_victims, check_winner, decide_modes, handoff_after_move,
};
use crate::state::{PositionEntry, TurnState};
use crate::types::{PieceId, Player};
use tracing::{debug, info, instrument, warn};

/// Drives one game.
#[derive(Debug)]
pub struct TurnEngine<D, G = StandardBoard> {
    state: TurnState,
    dice: D,
    geometry: G,
}

impl<D: DiceProvider> TurnEngine<D, StandardBoard> {
    /// A fresh game on the standard board.
    #[instrument(skip(dice))]
    pub fn new(dice: D) -> Self {
        Self::with_geometry(dice, StandardBoard::new())
    }
}

impl<D: DiceProvider, G: BoardGeometry> TurnEngine<D, G> {
    /// A fresh game on a custom board.
    #[instrument(skip_all)]
    pub fn with_geometry(dice: D, geometry: G) -> Self {
        Self {
            state: TurnState::new(),
            dice,
            geometry,
        }
    }

    /// Resumes a game from a stored state.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::InvariantViolation`] if the state is not
    /// one the engine could have produced: misplaced piece slots, an
    /// impossible die, inconsistent dice flags or a selection with nothing
    /// to select all count.
    #[instrument(skip_all)]
    pub fn from_state(state: TurnState, dice: D, geometry: G) -> Result<Self, ContractViolation> {
        check_turn_state(&state).map_err(|violations| {
            ContractViolation::InvariantViolation(describe(&violations))
        })?;
        info!(phase = %state.phase(), "Resuming game");
        Ok(Self {
            state,
            dice,
            geometry,
        })
    }

    // ─────────────────────────────────────────────────────────────
    //  Operations
    // ─────────────────────────────────────────────────────────────

    /// Rolls the die for `player` and decides what the roll allows.
    ///
    /// A roll with nothing playable passes the turn immediately and reports
    /// [`LegalModes::NoMove`].
    ///
    /// # Errors
    ///
    /// [`MoveError::GameOver`], [`MoveError::InvalidPlayer`] or
    /// [`MoveError::DiceBlocked`] when the roll is not allowed;
    /// [`ContractViolation::DiceOutOfRange`] when the provider misbehaves.
    #[instrument(skip(self))]
    pub fn roll_dice(&mut self, player: Player) -> Result<RollOutcome, EngineError> {
        RollContract::pre(&self.state, &RollRequest(player)).map_err(rejected)?;

        let dice = DiceValue::new(self.dice.next()).inspect_err(|e| {
            warn!(error = %e, "Dice provider broke its contract");
        })?;

        let mut next = self.state.clone();
        next.dice_no = dice.get();
        next.is_dice_rolled = true;
        next.log.record_roll(player, dice.get());

        let assessment = RollAssessment::of(next.pieces_of(player), dice);
        let modes = decide_modes(assessment, dice);
        debug!(%dice, ?assessment, ?modes, "Roll decided");

        if modes == LegalModes::NoMove {
            next.log.record_pass(player, dice.get());
            pass_turn(&mut next, player.next());
        } else {
            next.touch_dice_block = true;
            next.pile_selection_player = modes.allows_pile().then_some(player);
            next.cell_selection_player = modes.allows_cell().then_some(player);
        }

        self.commit::<RollContract, RollRequest>(next)?;
        Ok(RollOutcome { dice, modes })
    }

    /// Releases `piece` from home onto its entry cell.
    ///
    /// # Errors
    ///
    /// [`MoveError::NoLegalSelection`] unless `player` is in pile selection
    /// and `piece` is one of their pieces at home.
    #[instrument(skip(self))]
    pub fn select_pile(&mut self, player: Player, piece: PieceId) -> Result<MoveReport, EngineError> {
        PileContract::pre(&self.state, &Selection { player, piece }).map_err(rejected)?;

        let (next, report) = self.resolve_move(player, piece, 1)?;
        self.commit::<PileContract, Selection>(next)?;
        Ok(report)
    }

    /// Advances `piece` by the rolled value.
    ///
    /// # Errors
    ///
    /// [`MoveError::NoLegalSelection`] unless `player` is in cell selection
    /// and `piece` is one of their released pieces that would not overshoot
    /// the finish.
    #[instrument(skip(self))]
    pub fn select_cell(&mut self, player: Player, piece: PieceId) -> Result<MoveReport, EngineError> {
        CellContract::pre(&self.state, &Selection { player, piece }).map_err(rejected)?;

        let to = self.state.piece(piece).travel_count() + self.state.dice_no();
        let (next, report) = self.resolve_move(player, piece, to)?;
        self.commit::<CellContract, Selection>(next)?;
        Ok(report)
    }

    /// Starts a new game.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) -> &TurnState {
        info!(turns = self.state.turn_count(), "Resetting game");
        self.state = TurnState::new();
        &self.state
    }

    /// Dispatches an action, reducer style.
    ///
    /// # Errors
    ///
    /// Whatever the dispatched operation returns.
    pub fn apply(&mut self, action: Action) -> Result<Transition, EngineError> {
        match action {
            Action::Roll(player) => self.roll_dice(player).map(Transition::Rolled),
            Action::SelectPile(player, piece) => {
                self.select_pile(player, piece).map(Transition::Moved)
            }
            Action::SelectCell(player, piece) => {
                self.select_cell(player, piece).map(Transition::Moved)
            }
            Action::Reset => {
                self.reset_game();
                Ok(Transition::Reset)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Read-only projections
    // ─────────────────────────────────────────────────────────────

    /// The current state.
    pub fn state(&self) -> &TurnState {
        &self.state
    }

    /// Every piece out of home.
    pub fn current_positions(&self) -> Vec<PositionEntry> {
        self.state.current_positions()
    }

    /// The winner, if any.
    pub fn winner(&self) -> Option<Player> {
        self.state.winner()
    }

    /// True if `player` holds the turn in a running game.
    pub fn is_turn_of(&self, player: Player) -> bool {
        self.state.is_turn_of(player)
    }

    /// Current phase.
    pub fn phase(&self) -> TurnPhase {
        self.state.phase()
    }

    /// Pieces that may be released right now.
    pub fn pile_choices(&self) -> Vec<PieceId> {
        self.state.pile_choices()
    }

    /// Pieces that may advance right now.
    pub fn cell_choices(&self) -> Vec<PieceId> {
        self.state.cell_choices()
    }

    /// Board cell a piece currently occupies.
    pub fn cell_of(&self, piece: PieceId) -> Option<Cell> {
        self.geometry
            .cell_for(piece.player(), self.state.piece(piece).pos())
    }

    /// The board geometry.
    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// The dice provider, for topping up scripted dice.
    pub fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    /// Places the piece, captures, checks for a win and hands the turn on.
    fn resolve_move(
        &self,
        player: Player,
        piece: PieceId,
        to: u8,
    ) -> Result<(TurnState, MoveReport), EngineError> {
        let dice = DiceValue::new(self.state.dice_no())?;
        let landed = self
            .geometry
            .cell_for(player, to)
            .ok_or(ContractViolation::OffBoard { piece, travel: to })?;

        let mut next = self.state.clone();
        let from = next.piece(piece).pos();
        next.piece_mut(piece).place(to);
        next.log.record_move(piece, from, to);
        next.pile_selection_player = None;
        next.cell_selection_player = None;
        debug!(%piece, from, to, %landed, "Piece moved");

        let captured = capture_victims(&next, &self.geometry, piece, landed);
        for &victim in &captured {
            next.piece_mut(victim).send_home();
            next.log.record_capture(player, victim);
            info!(%piece, %victim, %landed, "Captured");
        }

        let winner = check_winner(&next, player);
        let (next_player, extra_turn) = match winner {
            Some(winner) => {
                info!(%winner, turns = next.turn_count, "Game won");
                next.winner = Some(winner);
                next.consecutive_sixes = 0;
                next.is_dice_rolled = false;
                next.touch_dice_block = true;
                (winner, false)
            }
            None => {
                let (handoff, sixes) = handoff_after_move(next.consecutive_sixes, dice);
                debug!(?handoff, sixes, "Turn handoff");
                match handoff {
                    Handoff::ExtraTurn => {
                        next.consecutive_sixes = sixes;
                        next.is_dice_rolled = false;
                        next.touch_dice_block = false;
                        next.turn_count += 1;
                        (player, true)
                    }
                    Handoff::Forfeit | Handoff::Next => {
                        pass_turn(&mut next, player.next());
                        (player.next(), false)
                    }
                }
            }
        };

        let report = MoveReport {
            piece,
            from,
            to,
            landed,
            captured,
            winner,
            next_player,
            extra_turn,
        };
        Ok((next, report))
    }

    /// Checks the contract's postcondition (debug builds) and commits.
    fn commit<C, A>(&mut self, next: TurnState) -> Result<(), EngineError>
    where
        C: Contract<TurnState, A>,
    {
        #[cfg(debug_assertions)]
        C::post(&self.state, &next)?;
        self.state = next;
        Ok(())
    }
}

/// Hands the turn to `to` with a clean slate.
fn pass_turn(state: &mut TurnState, to: Player) {
    state.consecutive_sixes = 0;
    state.chance_player = to;
    state.is_dice_rolled = false;
    state.touch_dice_block = false;
    state.pile_selection_player = None;
    state.cell_selection_player = None;
    state.turn_count += 1;
}

fn rejected(err: MoveError) -> EngineError {
    warn!(error = %err, "Action rejected");
    EngineError::Rejected(err)
}
