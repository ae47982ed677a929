//! Guard defection
//!
//! A live Guard with three or more orthogonal Dragon neighbours turns into a
//! Dragon. Each conversion adds a Dragon, so it can only push the adjacent
//! Guards over the threshold; those are re-queued until nothing changes.

use smallvec::SmallVec;

use super::{ExpandedBoard, GameState, SlotContent};
use crate::types::{Occupant, Tile};

/// Orthogonal Dragon neighbours that make a Guard defect
pub const DEFECTION_THRESHOLD: usize = 3;

/// Convert every Guard that must defect, returning the converted tiles in order
pub(crate) fn resolve(state: &mut GameState, board: &mut ExpandedBoard) -> SmallVec<[Tile; 3]> {
    let mut defected = SmallVec::new();
    let mut worklist: SmallVec<[Tile; 8]> = state.guards().collect();

    while let Some(tile) = worklist.pop() {
        if board.get(tile) != Occupant::Guard {
            continue;
        }
        if board.count_orthogonal(tile, Occupant::Dragon) < DEFECTION_THRESHOLD {
            continue;
        }
        let Some(slot) = state.slot_at(tile) else {
            debug_assert!(false, "guard on {tile} has no slot");
            continue;
        };
        state.set_slot(slot, SlotContent::Dragon(tile));
        board.set(tile, Occupant::Dragon);
        defected.push(tile);

        worklist.extend(
            board
                .orthogonal(tile)
                .filter(|&(_, o)| o == Occupant::Guard)
                .map(|(t, _)| t),
        );
    }

    defected
}

/// Whether some live Guard still has to defect
pub fn pending(state: &GameState, board: &ExpandedBoard) -> bool {
    state
        .guards()
        .any(|g| board.count_orthogonal(g, Occupant::Dragon) >= DEFECTION_THRESHOLD)
}
