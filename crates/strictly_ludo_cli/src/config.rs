//! Game configuration loaded from TOML.
//!
//! ```toml
//! [settings]
//! difficulty = "hard"
//! ai_delay_ms = 250
//! seed = 42
//!
//! [[seats]]
//! name = "Alice"
//! kind = "human"
//!
//! [[seats]]
//! name = "Bot Green"
//! difficulty = "easy"
//! ```
//!
//! Missing seats are filled with bots at the configured difficulty.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use strictly_ludo::Player;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

/// Environment variable that overrides the configured seed.
pub const SEED_ENV: &str = "STRICTLY_LUDO_SEED";

/// How hard the bots play.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random legal choice.
    Easy,
    /// Greedy: capture, finish, release, then advance the leader.
    #[default]
    Medium,
    /// Greedy with safe-spot and home-stretch preference and threat avoidance.
    Hard,
}

/// Who sits in a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SeatKind {
    /// Automated player.
    #[default]
    Bot,
    /// Choices typed on stdin.
    Human,
}

/// One seat at the table.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SeatConfig {
    /// Display name.
    name: String,

    /// Bot or human.
    #[serde(default)]
    kind: SeatKind,

    /// Per-seat override of the bot difficulty.
    #[serde(default)]
    difficulty: Option<Difficulty>,
}

impl SeatConfig {
    /// A bot seat using the table difficulty.
    pub fn bot(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SeatKind::Bot,
            difficulty: None,
        }
    }

    /// A human seat.
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SeatKind::Human,
            difficulty: None,
        }
    }
}

/// Table-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Settings {
    /// Default bot difficulty.
    #[serde(default)]
    difficulty: Difficulty,

    /// Pause before each bot action, in milliseconds.
    #[serde(default = "default_ai_delay_ms")]
    ai_delay_ms: u64,

    /// Seed for dice and bots; entropy when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Completed turns after which a game is abandoned.
    #[serde(default = "default_max_turns")]
    max_turns: u32,
}

fn default_ai_delay_ms() -> u64 {
    1000
}

fn default_max_turns() -> u32 {
    2000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            ai_delay_ms: default_ai_delay_ms(),
            seed: None,
            max_turns: default_max_turns(),
        }
    }
}

/// Full configuration for one table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct LudoConfig {
    /// Table-wide settings.
    #[serde(default)]
    settings: Settings,

    /// Seats in turn order, red first.
    #[serde(default)]
    seats: Vec<SeatConfig>,
}

impl LudoConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.fill_seats()?;
        info!(
            seats = config.seats.len(),
            difficulty = %config.settings.difficulty,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Four bots at the default difficulty.
    pub fn bots() -> Self {
        let mut config = Self::default();
        config.seats = default_seats(0);
        config
    }

    fn fill_seats(&mut self) -> Result<(), ConfigError> {
        let wanted = Player::iter().count();
        if self.seats.len() > wanted {
            return Err(ConfigError::new(format!(
                "Expected at most {} seats, found {}",
                wanted,
                self.seats.len()
            )));
        }
        let filled = self.seats.len();
        self.seats.extend(default_seats(filled));
        Ok(())
    }

    /// Seat configuration for a player.
    pub fn seat(&self, player: Player) -> Option<&SeatConfig> {
        self.seats.get(player.index())
    }

    /// Bot difficulty for a player's seat.
    pub fn difficulty_for(&self, player: Player) -> Difficulty {
        self.seat(player)
            .and_then(|seat| seat.difficulty)
            .unwrap_or(self.settings.difficulty)
    }

    /// Pause before bot actions.
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.settings.ai_delay_ms)
    }

    /// True if any seat is played from stdin.
    pub fn has_humans(&self) -> bool {
        self.seats.iter().any(|seat| seat.kind == SeatKind::Human)
    }

    /// Replaces the seed when an override is given.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if let Some(seed) = seed {
            debug!(seed, "Seed overridden");
            self.settings.seed = Some(seed);
        }
        self
    }

    /// Replaces the default difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.settings.difficulty = difficulty;
        self
    }

    /// Replaces the bot delay.
    pub fn with_ai_delay_ms(mut self, ai_delay_ms: u64) -> Self {
        self.settings.ai_delay_ms = ai_delay_ms;
        self
    }

    /// Applies a raw seed override, as read from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the value is not an unsigned integer.
    pub fn with_seed_override(self, raw: Option<&str>) -> Result<Self, ConfigError> {
        match raw {
            None => Ok(self),
            Some(raw) => {
                let seed = raw.trim().parse::<u64>().map_err(|e| {
                    warn!(value = raw, "Malformed seed override");
                    ConfigError::new(format!("{} must be an unsigned integer: {}", SEED_ENV, e))
                })?;
                Ok(self.with_seed(Some(seed)))
            }
        }
    }

    /// Applies `STRICTLY_LUDO_SEED` if it is set.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        let raw = std::env::var(SEED_ENV).ok();
        self.with_seed_override(raw.as_deref())
    }
}

fn default_seats(from: usize) -> Vec<SeatConfig> {
    Player::iter()
        .skip(from)
        .map(|player| SeatConfig::bot(format!("Bot {}", player)))
        .collect()
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_four_medium_bots() {
        let config = LudoConfig::from_toml("").unwrap();
        assert_eq!(config.seats().len(), 4);
        assert_eq!(config.seat(Player::Blue).unwrap().name(), "Bot Blue");
        assert_eq!(config.difficulty_for(Player::Green), Difficulty::Medium);
        assert_eq!(config.ai_delay(), Duration::from_millis(1000));
        assert_eq!(*config.settings().max_turns(), 2000);
        assert!(!config.has_humans());
    }

    #[test]
    fn test_partial_seats_are_filled() {
        let config = LudoConfig::from_toml(
            r#"
            [[seats]]
            name = "Alice"
            kind = "human"
            "#,
        )
        .unwrap();
        assert_eq!(config.seat(Player::Red).unwrap().kind(), &SeatKind::Human);
        assert_eq!(config.seat(Player::Green).unwrap().name(), "Bot Green");
        assert!(config.has_humans());
    }

    #[test]
    fn test_seat_difficulty_overrides_table() {
        let config = LudoConfig::from_toml(
            r#"
            [settings]
            difficulty = "hard"

            [[seats]]
            name = "Easy Red"
            difficulty = "easy"
            "#,
        )
        .unwrap();
        assert_eq!(config.difficulty_for(Player::Red), Difficulty::Easy);
        assert_eq!(config.difficulty_for(Player::Yellow), Difficulty::Hard);
    }

    #[test]
    fn test_too_many_seats_rejected() {
        let toml = "[[seats]]\nname = \"x\"\n".repeat(5);
        let err = LudoConfig::from_toml(&toml).unwrap_err();
        assert!(err.message.contains("at most 4"));
    }

    #[test]
    fn test_unknown_difficulty_rejected() {
        assert!(LudoConfig::from_toml("[settings]\ndifficulty = \"brutal\"\n").is_err());
    }

    #[test]
    fn test_seed_override() {
        let config = LudoConfig::bots().with_seed_override(Some(" 17 ")).unwrap();
        assert_eq!(config.settings().seed(), &Some(17));
        assert!(LudoConfig::bots().with_seed_override(Some("abc")).is_err());
        let untouched = LudoConfig::bots().with_seed(Some(3)).with_seed_override(None).unwrap();
        assert_eq!(untouched.settings().seed(), &Some(3));
    }

    #[test]
    fn test_error_records_location() {
        let err = ConfigError::new("boom".to_string());
        assert!(err.file.ends_with("config.rs"));
        assert!(err.to_string().starts_with("Config error: boom"));
    }
}
