//! Bot-only batch play.

use crate::config::LudoConfig;
use crate::orchestrator::{GameReport, Orchestrator};
use crate::players::{Seat, SimpleAi};
use anyhow::Result;
use derive_getters::Getters;
use serde::Serialize;
use std::collections::BTreeMap;
use strictly_ludo::{Player, PlayerStats, SeededDice, TurnEngine};
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tracing::{info, instrument};

/// Aggregate results of many games.
#[derive(Debug, Clone, Default, Getters, Serialize)]
pub struct SimulationSummary {
    /// Games played.
    games: u32,
    /// Wins per colour.
    wins: BTreeMap<Player, u32>,
    /// Games that hit the turn limit.
    abandoned: u32,
    /// Completed turns across all games.
    total_turns: u64,
    /// Counters per colour across all games.
    players: BTreeMap<Player, PlayerStats>,
}

impl SimulationSummary {
    /// Folds one game into the totals.
    pub fn record(&mut self, report: &GameReport) {
        self.games += 1;
        match report.winner() {
            Some(winner) => *self.wins.entry(*winner).or_default() += 1,
            None => self.abandoned += 1,
        }
        self.total_turns += u64::from(report.stats().turn_count);
        for player in Player::iter() {
            *self.players.entry(player).or_default() += report.stats().player(player);
        }
    }

    /// Mean completed turns per game.
    pub fn average_turns(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_turns as f64 / f64::from(self.games)
        }
    }
}

impl std::fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} games, {} abandoned, {:.1} turns on average",
            self.games,
            self.abandoned,
            self.average_turns()
        )?;
        for player in Player::iter() {
            let wins = self.wins.get(&player).copied().unwrap_or_default();
            let stats = self.players.get(&player).copied().unwrap_or_default();
            writeln!(
                f,
                "{:<7} wins {:>4}  sixes {:>5}  captures {:>4}  lost {:>4}  passes {:>5}",
                player.to_string(),
                wins,
                stats.sixes,
                stats.captures_made,
                stats.pieces_lost,
                stats.passes
            )?;
        }
        Ok(())
    }
}

/// Seeded bot seats for one game.
pub fn bot_seats(config: &LudoConfig, seed: u64) -> Vec<Box<dyn Seat>> {
    Player::iter()
        .map(|player| {
            let name = config
                .seat(player)
                .map(|seat| seat.name().clone())
                .unwrap_or_else(|| format!("Bot {}", player));
            let bot_seed = seed.wrapping_mul(31).wrapping_add(player.index() as u64);
            Box::new(SimpleAi::new(name, config.difficulty_for(player), bot_seed)) as Box<dyn Seat>
        })
        .collect()
}

/// Plays `games` bot games back to back without delay.
#[instrument(skip(config))]
pub async fn simulate(config: &LudoConfig, games: u32, seed: u64) -> Result<SimulationSummary> {
    let mut summary = SimulationSummary::default();
    for game in 0..games {
        let game_seed = seed.wrapping_add(u64::from(game));
        let (tx, _rx) = mpsc::unbounded_channel();
        let engine = TurnEngine::new(SeededDice::from_seed(game_seed));
        let mut orchestrator = Orchestrator::new(engine, bot_seats(config, game_seed), tx)?
            .with_max_turns(*config.settings().max_turns());
        let report = orchestrator.run().await?;
        info!(game, winner = ?report.winner(), turns = report.stats().turn_count, "Game finished");
        summary.record(&report);
    }
    Ok(summary)
}
