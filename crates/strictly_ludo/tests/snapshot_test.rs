//! Snapshot save and resume.

use strictly_ludo::{
    ContractViolation, PieceId, Player, ScriptedDice, SeededDice, Snapshot, StandardBoard,
    TurnEngine, TurnPhase, TurnState,
};

fn id(label: &str) -> PieceId {
    PieceId::parse(label).expect("valid label")
}

#[test]
fn test_resume_mid_selection() {
    let mut engine = TurnEngine::new(ScriptedDice::new([6]));
    engine.roll_dice(Player::Red).expect("roll");

    let json = Snapshot::capture(engine.state()).to_json().expect("serialize");
    let restored = Snapshot::from_json(&json).expect("load").into_state();
    assert_eq!(restored.phase(), TurnPhase::AwaitingPileSelection(Player::Red));

    let mut resumed =
        TurnEngine::from_state(restored, ScriptedDice::default(), StandardBoard::new())
            .expect("resume");
    let report = resumed.select_pile(Player::Red, id("A2")).expect("release");
    assert_eq!(report.to, 1);
    assert!(report.extra_turn);
}

#[test]
fn test_long_game_survives_round_trip() {
    let mut engine = TurnEngine::new(SeededDice::from_seed(99));
    for step in 0..250usize {
        let player = engine.state().chance_player();
        if engine.winner().is_some() {
            break;
        }
        match engine.phase() {
            TurnPhase::AwaitingRoll(_) => {
                engine.roll_dice(player).expect("roll");
            }
            _ => {
                let mut choices = engine.pile_choices();
                let release = !choices.is_empty() && step % 2 == 0;
                if release {
                    engine.select_pile(player, choices[0]).expect("release");
                } else {
                    choices = engine.cell_choices();
                    match choices.first() {
                        Some(&piece) => {
                            engine.select_cell(player, piece).expect("advance");
                        }
                        None => {
                            let piece = engine.pile_choices()[0];
                            engine.select_pile(player, piece).expect("release");
                        }
                    }
                }
            }
        }
    }

    let json = Snapshot::capture(engine.state()).to_json().expect("serialize");
    let restored = Snapshot::from_json(&json).expect("load");
    assert_eq!(restored.state(), engine.state());
    assert_eq!(
        restored.state().log().replay_positions(),
        engine.state().travel_table()
    );
}

#[test]
fn test_tampered_travel_rejected() {
    let state = TurnState::arranged(Player::Red, &[(id("A1"), 10)]).expect("arrange");
    let json = Snapshot::capture(&state).to_json().expect("serialize");
    let tampered = json.replacen("\"travel_count\": 10", "\"travel_count\": 90", 1);
    assert_ne!(json, tampered);
    assert!(matches!(
        Snapshot::from_json(&tampered),
        Err(ContractViolation::InvariantViolation(_))
    ));
}

#[test]
fn test_rolled_die_without_selection_rejected() {
    let json = Snapshot::capture(&TurnState::new()).to_json().expect("serialize");
    for (field, tampered) in [
        ("\"is_dice_rolled\": false", "\"is_dice_rolled\": true"),
        ("\"touch_dice_block\": false", "\"touch_dice_block\": true"),
    ] {
        let stuck = json.replacen(field, tampered, 1);
        assert_ne!(json, stuck);
        assert!(matches!(
            Snapshot::from_json(&stuck),
            Err(ContractViolation::InvariantViolation(_))
        ));
    }
}

#[test]
fn test_release_with_nothing_at_home_rejected() {
    let placements: Vec<_> = PieceId::all_for(Player::Red).map(|id| (id, 10)).collect();
    let state = TurnState::arranged(Player::Red, &placements).expect("arrange");
    let json = Snapshot::capture(&state).to_json().expect("serialize");
    let tampered = json
        .replacen("\"dice_no\": 1", "\"dice_no\": 6", 1)
        .replacen("\"is_dice_rolled\": false", "\"is_dice_rolled\": true", 1)
        .replacen("\"touch_dice_block\": false", "\"touch_dice_block\": true", 1)
        .replacen("\"pile_selection_player\": null", "\"pile_selection_player\": \"Red\"", 1);

    let err = Snapshot::from_json(&tampered).expect_err("nothing to release");
    match err {
        ContractViolation::InvariantViolation(message) => {
            assert!(message.contains("at least one choice"), "{message}");
        }
        other => panic!("unexpected error {other:?}"),
    }

    // The same flags with a cell selection are a real position.
    let movable = tampered.replacen(
        "\"cell_selection_player\": null",
        "\"cell_selection_player\": \"Red\"",
        1,
    );
    let movable = movable.replacen(
        "\"pile_selection_player\": \"Red\"",
        "\"pile_selection_player\": null",
        1,
    );
    let loaded = Snapshot::from_json(&movable).expect("load");
    assert_eq!(loaded.state().cell_choices().len(), 4);
}

#[test]
fn test_resume_rejects_misplaced_piece() {
    let state = TurnState::arranged(Player::Red, &[(id("A1"), 10)]).expect("arrange");
    let json = serde_json::to_string(&state)
        .expect("serialize")
        .replacen("\"A1\"", "\"A2\"", 1);
    let corrupted: TurnState = serde_json::from_str(&json).expect("still well-formed");

    let result = TurnEngine::from_state(corrupted, ScriptedDice::default(), StandardBoard::new());
    match result {
        Err(ContractViolation::InvariantViolation(message)) => {
            assert!(message.contains("own slot"), "{message}");
        }
        other => panic!("misplaced piece accepted: {other:?}"),
    }
}
