//! Terminal detection

use super::generator::{king_threatened, legal_moves};
use crate::position::Position;
use crate::types::{Occupant, Outcome, Player, Value};

/// Whether the King has been captured
///
/// On the Dragon side's turn a threatened King is captured unless an
/// orthogonal neighbour is empty. On the King side's turn it is captured when
/// no legal move lifts the threat.
pub fn king_captured(pos: &Position) -> bool {
    if !king_threatened(pos) {
        return false;
    }
    match pos.side_to_move() {
        Player::Dragon => !pos
            .board()
            .orthogonal(pos.king())
            .any(|(_, o)| o == Occupant::Empty),
        Player::King => legal_moves(pos).is_empty(),
    }
}

/// Game result if `pos` is terminal
///
/// Checked in order: King on the goal rank (or a recorded King win), King
/// captured (or a recorded Dragon win), no legal moves (draw).
pub fn terminal(pos: &Position) -> Option<Outcome> {
    let recorded = pos.state().recorded_winner();
    if recorded == Some(Player::King) || pos.king().is_goal_rank() {
        return Some(Outcome::KingWin);
    }
    if recorded == Some(Player::Dragon) || king_captured(pos) {
        return Some(Outcome::DragonWin);
    }
    if legal_moves(pos).is_empty() {
        return Some(Outcome::Draw);
    }
    None
}

/// `(is terminal, utility)`; the utility is `DRAW` for non-terminal positions
#[inline]
pub fn is_terminal(pos: &Position) -> (bool, Value) {
    match terminal(pos) {
        Some(outcome) => (true, outcome.value()),
        None => (false, Value::DRAW),
    }
}
