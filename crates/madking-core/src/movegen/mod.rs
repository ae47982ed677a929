//! Rules engine
//!
//! Move generation, King safety, terminal detection, noise detection for
//! quiescence, and successor expansion. Nothing here fails: every function
//! takes a `Position` (valid by construction) and answers from it.

mod generator;
mod noise;
mod terminal;

pub use generator::{KING_THREAT_DRAGONS, is_legal, king_threatened, legal_moves};
pub use noise::{is_dragon_threat, is_noisy, is_noisy_move, noisy_moves};
pub use terminal::{is_terminal, king_captured, terminal};

use crate::position::{MoveEffect, Position};
use crate::types::Move;

/// One child of a position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Successor {
    pub position: Position,
    pub mv: Move,
    pub effect: MoveEffect,
}

/// Every child of `pos`, in move-generation order
pub fn successors(pos: &Position) -> Vec<Successor> {
    legal_moves(pos)
        .into_iter()
        .map(|mv| {
            let (position, effect) = pos.apply(mv);
            Successor {
                position,
                mv,
                effect,
            }
        })
        .collect()
}
