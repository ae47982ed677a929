#![allow(dead_code)]

use madking_core::movegen::{legal_moves, terminal};
use madking_core::{Move, MoveEffect, Position, Tile};
use rand::RngCore;
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;

pub fn t(s: &str) -> Tile {
    s.parse().unwrap()
}

pub fn mv(s: &str) -> Move {
    s.parse().unwrap()
}

/// One ply of a random playout
pub struct Ply {
    pub before: Position,
    pub mv: Move,
    pub after: Position,
    pub effect: MoveEffect,
}

/// Play uniformly random legal moves from the start until the game ends or
/// `max_plies` is reached
pub fn random_playout(seed: u64, max_plies: usize) -> Vec<Ply> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut pos = Position::start();
    let mut plies = Vec::new();
    for _ in 0..max_plies {
        if terminal(&pos).is_some() {
            break;
        }
        let moves = legal_moves(&pos);
        let mv = moves[(rng.next_u64() % moves.len() as u64) as usize];
        let before = pos;
        let effect = pos.do_move(mv);
        plies.push(Ply {
            before,
            mv,
            after: pos,
            effect,
        });
    }
    plies
}

/// Position reached after `plies` random moves (or earlier if the game ended)
pub fn random_position(seed: u64, plies: usize) -> Position {
    random_playout(seed, plies)
        .last()
        .map(|p| p.after)
        .unwrap_or_else(Position::start)
}
