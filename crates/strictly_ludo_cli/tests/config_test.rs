//! Configuration files on disk.

use std::io::Write;
use strictly_ludo::Player;
use strictly_ludo_cli::{Difficulty, LudoConfig, SeatKind};
use tempfile::NamedTempFile;

#[test]
fn test_load_full_config() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"
[settings]
difficulty = "hard"
ai_delay_ms = 0
seed = 42
max_turns = 500

[[seats]]
name = "Alice"
kind = "human"

[[seats]]
name = "Greeny"
difficulty = "easy"
"#
    )
    .expect("write config");

    let config = LudoConfig::from_file(file.path()).expect("load");
    assert_eq!(config.settings().seed(), &Some(42));
    assert_eq!(*config.settings().max_turns(), 500);
    assert_eq!(config.ai_delay().as_millis(), 0);
    assert_eq!(config.seat(Player::Red).expect("red").kind(), &SeatKind::Human);
    assert_eq!(config.seat(Player::Green).expect("green").name(), "Greeny");
    assert_eq!(config.difficulty_for(Player::Green), Difficulty::Easy);
    assert_eq!(config.difficulty_for(Player::Blue), Difficulty::Hard);
    assert_eq!(config.seat(Player::Blue).expect("blue").name(), "Bot Blue");
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = LudoConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "[settings\nseed = ").expect("write config");
    let err = LudoConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_cli_seed_wins_over_file() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "[settings]\nseed = 1\n").expect("write config");
    let config = LudoConfig::from_file(file.path())
        .expect("load")
        .with_seed_override(Some("2"))
        .expect("env override")
        .with_seed(Some(3));
    assert_eq!(config.settings().seed(), &Some(3));
}
