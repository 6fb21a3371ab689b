//! Capture rule.

use crate::geometry::{BoardGeometry, Cell};
use crate::state::TurnState;
use crate::types::PieceId;
use tracing::{debug, instrument};

/// True if landing on `cell` can capture: a shared-track cell that is
/// neither a safe spot nor a release cell.
pub fn is_capture_cell<G: BoardGeometry + ?Sized>(geometry: &G, cell: Cell) -> bool {
    matches!(cell, Cell::Track(_)) && !geometry.is_safe_spot(cell) && !geometry.is_start_cell(cell)
}

/// Opposing pieces that a piece of `mover`'s owner captures by landing on
/// `landed`. All of them are captured together.
#[instrument(skip(state, geometry))]
pub fn capture_victims<G: BoardGeometry + ?Sized>(
    state: &TurnState,
    geometry: &G,
    mover: PieceId,
    landed: Cell,
) -> Vec<PieceId> {
    if !is_capture_cell(geometry, landed) {
        debug!(%landed, "Landing cell cannot capture");
        return Vec::new();
    }
    state
        .all_pieces()
        .filter(|piece| piece.id().player() != mover.player() && piece.is_on_board())
        .filter(|piece| geometry.cell_for(piece.id().player(), piece.pos()) == Some(landed))
        .map(|piece| piece.id())
        .collect()
}
