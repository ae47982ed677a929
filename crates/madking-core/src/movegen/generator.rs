//! Legal-move generation

use crate::position::Position;
use crate::types::{Direction, Move, MoveList, Occupant, Player, Tile};

/// Orthogonal Dragon neighbours that put the King under threat
pub const KING_THREAT_DRAGONS: usize = 3;

/// Whether at least three on-board orthogonal neighbours of the King are Dragons
#[inline]
pub fn king_threatened(pos: &Position) -> bool {
    pos.board().count_orthogonal(pos.king(), Occupant::Dragon) >= KING_THREAT_DRAGONS
}

/// All legal moves for the side to move
///
/// With the King threatened on the King side's turn, only moves that leave
/// the King unthreatened (after captures and defections) are returned.
pub fn legal_moves(pos: &Position) -> MoveList {
    let mut moves = MoveList::new();
    match pos.side_to_move() {
        Player::King => {
            generate_king_side(pos, &mut moves);
            if king_threatened(pos) {
                moves.retain(|mv| !king_threatened(&pos.apply(*mv).0));
            }
        }
        Player::Dragon => generate_dragon_side(pos, &mut moves),
    }
    moves
}

#[inline]
pub fn is_legal(pos: &Position, mv: Move) -> bool {
    legal_moves(pos).contains(&mv)
}

fn generate_king_side(pos: &Position, moves: &mut MoveList) {
    let board = pos.board();
    let king = pos.king();
    let pieces = std::iter::once(king).chain(pos.state().guards());

    for from in pieces {
        for dir in Direction::ORTHOGONAL {
            let Some((to, occupant)) = board.neighbor(from, dir) else {
                continue;
            };
            match occupant {
                Occupant::Empty => moves.push(Move::new(from, to)),
                Occupant::Guard if from == king => {
                    if let Some((beyond, Occupant::Empty)) = board.neighbor(to, dir) {
                        moves.push(Move::new(from, beyond));
                    }
                }
                Occupant::Dragon if is_flanked(pos, to, from) => moves.push(Move::new(from, to)),
                _ => {}
            }
        }
    }
}

/// Whether the Dragon on `dragon` has an allied neighbour other than `mover`
#[inline]
fn is_flanked(pos: &Position, dragon: Tile, mover: Tile) -> bool {
    pos.board()
        .orthogonal(dragon)
        .any(|(t, o)| t != mover && o.is_allied())
}

fn generate_dragon_side(pos: &Position, moves: &mut MoveList) {
    let board = pos.board();
    for from in pos.state().dragons() {
        for dir in Direction::ALL {
            if let Some((to, Occupant::Empty)) = board.neighbor(from, dir) {
                moves.push(Move::new(from, to));
            }
        }
    }
}
