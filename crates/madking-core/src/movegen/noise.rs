//! Noise detection for quiescence
//!
//! A position is noisy when either side has a move that changes the material
//! or ends the game: the King side capturing a Dragon or stepping the King
//! onto the goal rank, the Dragon side trapping the King or forcing a Guard
//! to defect. Each side's threats are judged as if that side were to move.

use super::generator::legal_moves;
use super::terminal::terminal;
use crate::position::Position;
use crate::types::{Move, MoveList, Occupant, Outcome, Player};

/// Whether `mv` captures or brings the King to the goal rank
#[inline]
pub fn is_noisy_move(pos: &Position, mv: Move) -> bool {
    let board = pos.board();
    match board.get(mv.from) {
        Occupant::King => mv.to.is_goal_rank() || board.get(mv.to) == Occupant::Dragon,
        Occupant::Guard => board.get(mv.to) == Occupant::Dragon,
        _ => false,
    }
}

/// Whether the Dragon move `mv` captures the King or makes a Guard defect
pub fn is_dragon_threat(pos: &Position, mv: Move) -> bool {
    let (child, effect) = pos.apply(mv);
    !effect.defected.is_empty() || terminal(&child) == Some(Outcome::DragonWin)
}

pub fn is_noisy(pos: &Position) -> bool {
    let king_view = pos.with_side_to_move(Player::King);
    if legal_moves(&king_view)
        .into_iter()
        .any(|mv| is_noisy_move(&king_view, mv))
    {
        return true;
    }
    let dragon_view = pos.with_side_to_move(Player::Dragon);
    legal_moves(&dragon_view)
        .into_iter()
        .any(|mv| is_dragon_threat(&dragon_view, mv))
}

/// Moves searched by the quiescence extension
///
/// Captures and goal moves for the King side; every legal move for the
/// Dragon side, so a quiet reply to a King threat is still searched.
pub fn noisy_moves(pos: &Position) -> MoveList {
    let mut moves = legal_moves(pos);
    if pos.side_to_move() == Player::King {
        moves.retain(|mv| is_noisy_move(pos, *mv));
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tile;

    fn t(s: &str) -> Tile {
        s.parse().unwrap()
    }

    #[test]
    fn test_start_is_quiet() {
        assert!(!is_noisy(&Position::start()));
    }

    #[test]
    fn test_goal_move_is_noisy() {
        let pos = Position::from_layout(Player::Dragon, t("C2"), &[], &[t("E5")]).unwrap();
        assert!(is_noisy(&pos));
        let king_turn = pos.with_side_to_move(Player::King);
        let moves = noisy_moves(&king_turn);
        assert_eq!(moves.as_slice(), &["C2C1".parse::<Move>().unwrap()]);
        // The Dragon side answers with everything it has
        assert_eq!(noisy_moves(&pos).len(), legal_moves(&pos).len());
    }

    #[test]
    fn test_king_trap_is_noisy() {
        // A4B4 closes the last free neighbour of the King
        let pos: Position = "d Kb5 Da5 Dc5 Da4 De1".parse().unwrap();
        assert!(is_dragon_threat(&pos, "A4B4".parse().unwrap()));
        assert!(!is_dragon_threat(&pos, "E1E2".parse().unwrap()));
        assert!(is_noisy(&pos));
    }

    #[test]
    fn test_forced_defection_is_noisy() {
        // B2C2 gives the Guard on C3 its third Dragon neighbour
        let pos: Position = "d Ka5 Gc3 Db3 Dd3 Db2".parse().unwrap();
        assert!(is_dragon_threat(&pos, "B2C2".parse().unwrap()));
        assert!(is_noisy(&pos));
        // Same threat with the King side to move
        assert!(is_noisy(&pos.with_side_to_move(Player::King)));
    }

    #[test]
    fn test_capture_is_noisy() {
        let pos = Position::from_layout(Player::King, t("A5"), &[t("C4"), t("B3")], &[t("C3")])
            .unwrap();
        assert!(is_noisy(&pos));
        let moves = noisy_moves(&pos);
        assert!(moves.contains(&"B3C3".parse().unwrap()));
        assert!(moves.contains(&"C4C3".parse().unwrap()));
        assert!(moves.iter().all(|m| is_noisy_move(&pos, *m)));
    }
}
