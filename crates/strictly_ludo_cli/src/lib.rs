//! Strictly Ludo CLI - seats, orchestration and configuration around the
//! `strictly_ludo` engine.
//!
//! - **Config**: TOML table configuration with environment overrides
//! - **Players**: bots and stdin-driven humans behind one async seat trait
//! - **Orchestrator**: drives one engine and streams game events
//! - **Simulation**: bot-only batches with aggregate statistics

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod inspect;
pub mod orchestrator;
pub mod players;
pub mod simulation;

pub use config::{ConfigError, Difficulty, LudoConfig, SeatConfig, SeatKind, Settings};
pub use orchestrator::{GameEvent, GameReport, Orchestrator};
pub use players::{Choice, HumanPlayer, Options, Seat, SimpleAi};
pub use simulation::{SimulationSummary, simulate};
