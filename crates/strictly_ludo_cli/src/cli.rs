//! Command-line interface for strictly_ludo.

use crate::config::Difficulty;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Ludo - contract-checked Ludo engine driver
#[derive(Parser, Debug)]
#[command(name = "ludo")]
#[command(about = "Play, simulate and inspect Ludo games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one game with the configured seats
    Play {
        /// Path to the table configuration
        #[arg(short, long, default_value = "ludo.toml")]
        config: PathBuf,

        /// Seed for dice and bots (overrides config and environment)
        #[arg(long)]
        seed: Option<u64>,

        /// Write the final state as a snapshot
        #[arg(long)]
        snapshot_out: Option<PathBuf>,
    },

    /// Play many bot games and print aggregate statistics
    Simulate {
        /// Number of games
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Base seed; game n uses seed + n
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Bot difficulty
        #[arg(short, long, value_enum, default_value = "medium")]
        difficulty: Difficulty,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a saved snapshot
    Inspect {
        /// Snapshot file
        snapshot: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simulate_defaults() {
        let cli = Cli::try_parse_from(["ludo", "simulate"]).unwrap();
        match cli.command {
            Command::Simulate {
                games,
                seed,
                difficulty,
                json,
            } => {
                assert_eq!(games, 100);
                assert_eq!(seed, 0);
                assert_eq!(difficulty, Difficulty::Medium);
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_play_flags() {
        let cli = Cli::try_parse_from([
            "ludo",
            "play",
            "--config",
            "table.toml",
            "--seed",
            "7",
            "--snapshot-out",
            "end.json",
        ])
        .unwrap();
        match cli.command {
            Command::Play {
                config,
                seed,
                snapshot_out,
            } => {
                assert_eq!(config, PathBuf::from("table.toml"));
                assert_eq!(seed, Some(7));
                assert_eq!(snapshot_out, Some(PathBuf::from("end.json")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_difficulty() {
        assert!(Cli::try_parse_from(["ludo", "simulate", "-d", "brutal"]).is_err());
    }
}
