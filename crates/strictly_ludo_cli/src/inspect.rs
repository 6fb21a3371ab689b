//! Plain-text rendering of a game state.

use strictly_ludo::{BoardGeometry, Player, StandardBoard, TurnState};
use strum::IntoEnumIterator;

/// Describes phase, turn and every piece's position.
pub fn render(state: &TurnState) -> String {
    let board = StandardBoard::new();
    let mut lines = vec![
        format!("Phase: {}", state.phase()),
        format!("Turns: {}", state.turn_count()),
        format!("Last roll: {}", state.dice_no()),
    ];
    for player in Player::iter() {
        let cells: Vec<String> = state
            .pieces_of(player)
            .iter()
            .map(|piece| match board.cell_for(player, piece.pos()) {
                Some(cell) => format!("{}@{}", piece.id(), cell),
                None => format!("{}@?", piece.id()),
            })
            .collect();
        lines.push(format!("{:<7} {}", player.to_string(), cells.join("  ")));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_ludo::PieceId;

    #[test]
    fn test_render_lists_every_piece() {
        let state =
            TurnState::arranged(Player::Green, &[(PieceId::parse("B2").unwrap(), 3)]).unwrap();
        let text = render(&state);
        assert!(text.starts_with("Phase: Green to roll"));
        assert!(text.contains("B2@track 16"));
        assert!(text.contains("A1@Red yard"));
        assert_eq!(text.lines().count(), 7);
    }
}
