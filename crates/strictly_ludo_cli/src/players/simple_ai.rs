//! Heuristic bot.

use super::{Choice, Options, Seat};
use crate::config::Difficulty;
use anyhow::Result;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strictly_ludo::rules::{capture_victims, is_capture_cell};
use strictly_ludo::{BoardGeometry, Cell, FINISH, Player, StandardBoard, TRACK_LEN, TurnState};
use tracing::{debug, instrument};

const CAPTURE_SCORE: i32 = 1000;
const FINISH_SCORE: i32 = 500;
const RELEASE_SCORE: i32 = 300;
const SAFE_SCORE: i32 = 150;
const ESCAPE_SCORE: i32 = 300;
const THREAT_PENALTY: i32 = 200;

/// Bot that scores every legal choice and plays the best one.
pub struct SimpleAi {
    name: String,
    difficulty: Difficulty,
    rng: ChaCha8Rng,
    board: StandardBoard,
}

impl SimpleAi {
    /// Creates a bot whose random choices follow `seed`.
    pub fn new(name: impl Into<String>, difficulty: Difficulty, seed: u64) -> Self {
        Self {
            name: name.into(),
            difficulty,
            rng: ChaCha8Rng::seed_from_u64(seed),
            board: StandardBoard::new(),
        }
    }

    /// The bot's difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Picks a choice without waiting.
    #[instrument(skip(self, state, options), fields(ai = %self.name, difficulty = %self.difficulty))]
    pub fn pick(&mut self, state: &TurnState, options: &Options) -> Option<Choice> {
        let choices = options.choices();
        if choices.is_empty() {
            return None;
        }
        let picked = match self.difficulty {
            Difficulty::Easy => choices[self.rng.gen_range(0..choices.len())],
            Difficulty::Medium | Difficulty::Hard => {
                let mut best = choices[0];
                let mut best_score = self.score(state, options, best);
                for &choice in &choices[1..] {
                    let score = self.score(state, options, choice);
                    if score > best_score {
                        best = choice;
                        best_score = score;
                    }
                }
                best
            }
        };
        debug!(%picked, "AI chose");
        Some(picked)
    }

    fn score(&self, state: &TurnState, options: &Options, choice: Choice) -> i32 {
        let piece = state.piece(choice.piece());
        let to = match choice {
            Choice::Release(_) => 1,
            Choice::Advance(_) => piece.travel_count() + options.dice,
        };
        let Some(landed) = self.board.cell_for(options.player, to) else {
            return i32::MIN;
        };

        let captures = capture_victims(state, &self.board, choice.piece(), landed).len();
        let mut score = i32::from(to) + CAPTURE_SCORE * captures as i32;
        if to == FINISH {
            score += FINISH_SCORE;
        }
        if matches!(choice, Choice::Release(_)) {
            score += RELEASE_SCORE;
        }

        if self.difficulty == Difficulty::Hard {
            let exposed = matches!(
                self.board.cell_for(options.player, piece.pos()),
                Some(Cell::Track(_))
            );
            if exposed && self.board.is_home_stretch(options.player, landed) {
                score += ESCAPE_SCORE;
            }
            if !is_capture_cell(&self.board, landed) {
                score += SAFE_SCORE;
            } else if threatened(state, &self.board, options.player, landed) {
                score -= THREAT_PENALTY;
            }
        }
        score
    }
}

/// True if an opposing piece sits one to six track cells behind `cell`.
fn threatened(state: &TurnState, board: &StandardBoard, player: Player, cell: Cell) -> bool {
    let Cell::Track(target) = cell else {
        return false;
    };
    state
        .all_pieces()
        .filter(|p| p.id().player() != player && p.is_on_board())
        .filter_map(|p| match board.cell_for(p.id().player(), p.pos()) {
            Some(Cell::Track(at)) => Some(at),
            _ => None,
        })
        .any(|at| {
            let behind = (target + TRACK_LEN - at) % TRACK_LEN;
            (1..=6).contains(&behind)
        })
}

#[async_trait::async_trait]
impl Seat for SimpleAi {
    async fn choose(&mut self, state: &TurnState, options: &Options) -> Result<Choice> {
        self.pick(state, options)
            .ok_or_else(|| anyhow::anyhow!("{} has no legal choice", self.name))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
