//! Game orchestration between four seats.

use crate::players::{Options, Seat};
use anyhow::Result;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::Serialize;
use std::time::Duration;
use strictly_ludo::{
    DiceProvider, GameStats, LegalModes, MoveReport, Player, TurnEngine, TurnPhase, TurnState,
    Transition,
};
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Illegal choices in a row after which a seat is given up on.
pub const MAX_REJECTED_CHOICES: u32 = 8;

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A die was rolled.
    Rolled {
        /// Who rolled.
        player: Player,
        /// Value rolled.
        dice: u8,
        /// What the roll allows.
        modes: LegalModes,
    },
    /// The roll allowed nothing; the turn moved on.
    Passed {
        /// Who passed.
        player: Player,
    },
    /// A seat is thinking about its choice.
    Thinking {
        /// Seat name.
        seat: String,
    },
    /// A piece moved.
    Moved {
        /// Who moved.
        player: Player,
        /// The engine's account of the move.
        report: MoveReport,
    },
    /// The engine refused a choice.
    Rejected {
        /// Who chose.
        player: Player,
        /// Why.
        reason: String,
    },
    /// Someone won.
    GameOver {
        /// The winning colour.
        winner: Player,
        /// The winning seat.
        seat: String,
    },
    /// The game ran past the turn limit.
    Abandoned {
        /// Turns played.
        turns: u32,
    },
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::Rolled { player, dice, .. } => write!(f, "{player} rolled {dice}"),
            GameEvent::Passed { player } => write!(f, "{player} cannot move"),
            GameEvent::Thinking { seat } => write!(f, "{seat} is thinking"),
            GameEvent::Moved { player, report } => {
                write!(f, "{player} moved {} to {}", report.piece, report.landed)?;
                for victim in &report.captured {
                    write!(f, ", captured {victim}")?;
                }
                if report.extra_turn {
                    write!(f, ", rolls again")?;
                }
                Ok(())
            }
            GameEvent::Rejected { player, reason } => write!(f, "{player}: {reason}"),
            GameEvent::GameOver { winner, seat } => write!(f, "{seat} ({winner}) wins"),
            GameEvent::Abandoned { turns } => write!(f, "Game abandoned after {turns} turns"),
        }
    }
}

/// Outcome of one orchestrated game.
#[derive(Debug, Clone, Getters, Serialize)]
pub struct GameReport {
    /// When play started.
    started_at: DateTime<Utc>,
    /// When play stopped.
    finished_at: DateTime<Utc>,
    /// The winning colour, unless the game was abandoned.
    winner: Option<Player>,
    /// Seat names in turn order.
    seats: Vec<String>,
    /// Per-player statistics.
    stats: GameStats,
    /// State when play stopped.
    final_state: TurnState,
}

impl GameReport {
    /// Wall-clock duration of the game.
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Name of the winning seat.
    pub fn winner_name(&self) -> Option<&str> {
        self.winner
            .and_then(|winner| self.seats.get(winner.index()))
            .map(String::as_str)
    }
}

/// Orchestrates gameplay between four seats.
pub struct Orchestrator<D> {
    engine: TurnEngine<D>,
    seats: Vec<Box<dyn Seat>>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    ai_delay: Duration,
    max_turns: u32,
    rejected_in_row: u32,
}

impl<D: DiceProvider + Send> Orchestrator<D> {
    /// Creates a new orchestrator. Seats are given in turn order, red first.
    pub fn new(
        engine: TurnEngine<D>,
        seats: Vec<Box<dyn Seat>>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Result<Self> {
        let wanted = Player::iter().count();
        if seats.len() != wanted {
            anyhow::bail!("Expected {} seats, got {}", wanted, seats.len());
        }
        Ok(Self {
            engine,
            seats,
            event_tx,
            ai_delay: Duration::ZERO,
            max_turns: u32::MAX,
            rejected_in_row: 0,
        })
    }

    /// Pause before each bot action.
    pub fn with_ai_delay(mut self, ai_delay: Duration) -> Self {
        self.ai_delay = ai_delay;
        self
    }

    /// Completed turns after which the game is abandoned.
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// The engine being driven.
    pub fn engine(&self) -> &TurnEngine<D> {
        &self.engine
    }

    /// Runs the game loop until someone wins or the turn limit is hit.
    #[instrument(skip(self), fields(max_turns = self.max_turns))]
    pub async fn run(&mut self) -> Result<GameReport> {
        info!("Starting game orchestration");
        let started_at = Utc::now();

        loop {
            if let Some(winner) = self.engine.winner() {
                let seat = self.seats[winner.index()].name().to_string();
                info!(%winner, %seat, "Game over");
                self.emit(GameEvent::GameOver { winner, seat });
                break;
            }
            if self.engine.state().turn_count() >= self.max_turns {
                let turns = self.engine.state().turn_count();
                warn!(turns, "Turn limit reached");
                self.emit(GameEvent::Abandoned { turns });
                break;
            }

            match self.engine.phase() {
                TurnPhase::Finished(_) => continue,
                TurnPhase::AwaitingRoll(player) => self.take_roll(player).await?,
                phase => self.take_choice(phase.player()).await?,
            }
        }

        let state = self.engine.state().clone();
        Ok(GameReport {
            started_at,
            finished_at: Utc::now(),
            winner: state.winner(),
            seats: self.seats.iter().map(|s| s.name().to_string()).collect(),
            stats: state.log().stats(state.turn_count()),
            final_state: state,
        })
    }

    async fn take_roll(&mut self, player: Player) -> Result<()> {
        let seat = &mut self.seats[player.index()];
        seat.ready_to_roll(self.engine.state()).await?;
        if seat.is_bot() {
            pace(self.ai_delay).await;
        }

        let outcome = self.engine.roll_dice(player)?;
        self.emit(GameEvent::Rolled {
            player,
            dice: outcome.dice.get(),
            modes: outcome.modes,
        });
        if outcome.modes == LegalModes::NoMove {
            self.emit(GameEvent::Passed { player });
        }
        Ok(())
    }

    async fn take_choice(&mut self, player: Player) -> Result<()> {
        let options = Options {
            player,
            dice: self.engine.state().dice_no(),
            releases: self.engine.pile_choices(),
            advances: self.engine.cell_choices(),
        };

        let name = self.seats[player.index()].name().to_string();
        let is_bot = self.seats[player.index()].is_bot();
        self.emit(GameEvent::Thinking { seat: name.clone() });
        if is_bot {
            pace(self.ai_delay).await;
        }

        debug!(seat = %name, ?options, "Waiting for choice");
        let seat = &mut self.seats[player.index()];
        let choice = seat.choose(self.engine.state(), &options).await?;

        match self.engine.apply(choice.into_action(player)) {
            Ok(Transition::Moved(report)) => {
                self.rejected_in_row = 0;
                self.emit(GameEvent::Moved { player, report });
            }
            Ok(other) => debug!(?other, "Unexpected transition"),
            Err(e) if !e.is_fatal() => {
                self.rejected_in_row += 1;
                warn!(seat = %name, error = %e, in_row = self.rejected_in_row, "Choice rejected");
                self.emit(GameEvent::Rejected {
                    player,
                    reason: e.to_string(),
                });
                if self.rejected_in_row >= MAX_REJECTED_CHOICES {
                    anyhow::bail!(
                        "{} made {} illegal choices in a row",
                        name,
                        self.rejected_in_row
                    );
                }
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    fn emit(&self, event: GameEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("Event receiver dropped");
        }
    }
}

async fn pace(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Difficulty;
    use crate::players::{Choice, SimpleAi};
    use strictly_ludo::{PieceId, ScriptedDice};

    fn bots() -> Vec<Box<dyn Seat>> {
        Player::iter()
            .map(|p| Box::new(SimpleAi::new(format!("Bot {p}"), Difficulty::Medium, 1)) as Box<dyn Seat>)
            .collect()
    }

    #[test]
    fn test_requires_four_seats() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let engine = TurnEngine::new(ScriptedDice::default());
        let mut seats = bots();
        seats.pop();
        assert!(Orchestrator::new(engine, seats, tx).is_err());
    }

    #[tokio::test]
    async fn test_turn_limit_abandons_game() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let engine = TurnEngine::new(ScriptedDice::new([1, 2, 3]));
        let mut orchestrator = Orchestrator::new(engine, bots(), tx).unwrap().with_max_turns(3);
        let report = orchestrator.run().await.unwrap();

        assert_eq!(report.winner(), &None);
        assert_eq!(report.final_state().turn_count(), 3);
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert_eq!(events.last(), Some(&GameEvent::Abandoned { turns: 3 }));
        assert_eq!(
            events.iter().filter(|e| matches!(e, GameEvent::Passed { .. })).count(),
            3
        );
    }

    /// Always tries to move a piece that is not its own.
    struct Cheater;

    #[async_trait::async_trait]
    impl Seat for Cheater {
        async fn choose(&mut self, _state: &TurnState, _options: &Options) -> Result<Choice> {
            Ok(Choice::Advance(PieceId::parse("B1")?))
        }

        fn name(&self) -> &str {
            "Cheater"
        }
    }

    #[tokio::test]
    async fn test_repeated_illegal_choices_end_the_game() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let engine = TurnEngine::new(ScriptedDice::new([6]));
        let mut seats = bots();
        seats[0] = Box::new(Cheater);
        let mut orchestrator = Orchestrator::new(engine, seats, tx).unwrap();

        let err = orchestrator.run().await.unwrap_err();
        assert!(err.to_string().contains("illegal choices"));
        assert_eq!(orchestrator.engine().state().turn_count(), 0);

        let mut rejected = 0;
        while let Ok(event) = rx.try_recv() {
            if matches!(event, GameEvent::Rejected { player: Player::Red, .. }) {
                rejected += 1;
            }
        }
        assert_eq!(rejected, MAX_REJECTED_CHOICES);
    }

    #[test]
    fn test_event_display() {
        let event = GameEvent::Rolled {
            player: Player::Green,
            dice: 6,
            modes: LegalModes::PileOnly,
        };
        assert_eq!(event.to_string(), "Green rolled 6");
    }
}
