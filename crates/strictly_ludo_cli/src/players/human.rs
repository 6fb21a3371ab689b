//! Human player that types piece labels on stdin.

use super::{Choice, Options, Seat};
use anyhow::Result;
use std::sync::Arc;
use strictly_ludo::{PieceId, TurnState};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, warn};

/// Input lines shared by every human seat at the table.
pub type SharedInput = Arc<Mutex<mpsc::UnboundedReceiver<String>>>;

/// Spawns a task that forwards stdin lines into a shared channel.
pub fn spawn_stdin_reader() -> SharedInput {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin");
                    break;
                }
            }
        }
        debug!("Stdin reader finished");
    });
    Arc::new(Mutex::new(rx))
}

/// Human player reading choices from a line channel.
pub struct HumanPlayer {
    name: String,
    input: SharedInput,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input: SharedInput) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }

    async fn next_line(&mut self) -> Result<String> {
        let mut input = self.input.lock().await;
        match input.recv().await {
            Some(line) => Ok(line),
            None => anyhow::bail!("Input channel closed"),
        }
    }
}

#[async_trait::async_trait]
impl Seat for HumanPlayer {
    async fn ready_to_roll(&mut self, state: &TurnState) -> Result<()> {
        println!("{} ({}): press enter to roll", self.name, state.chance_player());
        self.next_line().await.map(|_| ())
    }

    async fn choose(&mut self, _state: &TurnState, options: &Options) -> Result<Choice> {
        let labels: Vec<String> = options
            .choices()
            .iter()
            .map(|choice| choice.to_string())
            .collect();
        println!("{} rolled {}: {}", self.name, options.dice, labels.join(", "));

        loop {
            let line = self.next_line().await?;
            let Ok(piece) = PieceId::parse(line.trim()) else {
                println!("Type a piece label such as A1");
                continue;
            };
            match options.choice_for(piece) {
                Some(choice) => return Ok(choice),
                None => println!("{} cannot move with a {}", piece, options.dice),
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_bot(&self) -> bool {
        false
    }
}
