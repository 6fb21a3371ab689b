//! Strictly Ludo - command-line driver.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use strictly_ludo::{Player, SeededDice, Snapshot, TurnEngine};
use strictly_ludo_cli::cli::{Cli, Command};
use strictly_ludo_cli::players::{HumanPlayer, Seat, SimpleAi, spawn_stdin_reader};
use strictly_ludo_cli::{
    Difficulty, GameEvent, LudoConfig, Orchestrator, SeatKind, inspect, simulate,
};
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Play {
            config,
            seed,
            snapshot_out,
        } => run_play(config, seed, snapshot_out).await,
        Command::Simulate {
            games,
            seed,
            difficulty,
            json,
        } => run_simulate(games, seed, difficulty, json).await,
        Command::Inspect { snapshot } => run_inspect(&snapshot),
    }
}

fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Play one game with the configured seats.
#[instrument(skip_all, fields(config_path = %config_path.display()))]
async fn run_play(
    config_path: PathBuf,
    seed: Option<u64>,
    snapshot_out: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(&config_path)?
        .with_env_overrides()?
        .with_seed(seed);

    let dice = match config.settings().seed() {
        Some(seed) => SeededDice::from_seed(*seed),
        None => SeededDice::from_entropy(),
    };
    let bot_seed = config.settings().seed().unwrap_or_else(rand::random);

    let input = config.has_humans().then(spawn_stdin_reader);
    let seats: Vec<Box<dyn Seat>> = Player::iter()
        .map(|player| -> Result<Box<dyn Seat>> {
            let seat = config
                .seat(player)
                .with_context(|| format!("No seat configured for {player}"))?;
            let boxed: Box<dyn Seat> = match (seat.kind(), &input) {
                (SeatKind::Human, Some(input)) => {
                    Box::new(HumanPlayer::new(seat.name().clone(), input.clone()))
                }
                _ => Box::new(SimpleAi::new(
                    seat.name().clone(),
                    config.difficulty_for(player),
                    bot_seed.wrapping_add(player.index() as u64),
                )),
            };
            Ok(boxed)
        })
        .collect::<Result<_>>()?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<GameEvent>();
    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            println!("{event}");
        }
    });

    let mut orchestrator = Orchestrator::new(TurnEngine::new(dice), seats, event_tx)?
        .with_ai_delay(config.ai_delay())
        .with_max_turns(*config.settings().max_turns());
    let report = orchestrator.run().await?;
    drop(orchestrator);
    printer.await?;

    info!(
        winner = ?report.winner(),
        turns = report.stats().turn_count,
        seconds = report.duration().num_seconds(),
        "Game finished"
    );
    match report.winner_name() {
        Some(name) => println!("Winner: {name}"),
        None => println!("No winner"),
    }

    if let Some(path) = snapshot_out {
        let json = Snapshot::capture(report.final_state()).to_json()?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
        info!(path = %path.display(), "Snapshot written");
    }
    Ok(())
}

/// Play many bot games and print aggregate statistics.
#[instrument]
async fn run_simulate(games: u32, seed: u64, difficulty: Difficulty, json: bool) -> Result<()> {
    let config = LudoConfig::bots().with_difficulty(difficulty);
    let summary = simulate(&config, games, seed).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{summary}");
    }
    Ok(())
}

/// Print a saved snapshot.
#[instrument]
fn run_inspect(path: &Path) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let snapshot = Snapshot::from_json(&json)?;
    println!("{}", inspect::render(snapshot.state()));
    Ok(())
}

#[instrument]
fn load_config(path: &Path) -> Result<LudoConfig> {
    if path.exists() {
        Ok(LudoConfig::from_file(path)?)
    } else {
        info!("Config file not found at {}, using four bots", path.display());
        Ok(LudoConfig::bots())
    }
}
