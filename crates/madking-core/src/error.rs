//! Error types
//!
//! Only the input boundaries (notation, position text, move requests) and the
//! table dump loader report errors. Move generation, search and table inserts
//! never fail on well-formed input; out-of-range tiles are assertions.

use crate::types::{Move, Tile};

/// Malformed tile or move notation (`"C2"`, `"C2C3"`)
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("expected {expected} characters, got {actual} in {input:?}")]
    Length {
        input: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid file {0:?} (expected A-E)")]
    File(char),

    #[error("invalid rank {0:?} (expected 1-5)")]
    Rank(char),
}

/// A move request that the rules engine refused
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("illegal move {mv}")]
    IllegalMove { mv: Move },

    #[error("game is already over")]
    GameOver,
}

/// Inconsistent or malformed game-state layout
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("position text is missing the side to move")]
    MissingTurn,

    #[error("invalid side to move {0:?} (expected 'k' or 'd')")]
    InvalidTurn(String),

    #[error("invalid piece token {0:?}")]
    InvalidToken(String),

    #[error("position has no King")]
    MissingKing,

    #[error("position has more than one King")]
    DuplicateKing,

    #[error("too many Guards: {0} (at most {max})", max = crate::position::NUM_GUARD_SLOTS)]
    TooManyGuards(usize),

    #[error(
        "too many pieces besides the King: {0} (at most {max})",
        max = crate::position::NUM_PIECE_SLOTS
    )]
    TooManyPieces(usize),

    #[error("two pieces on tile {0}")]
    Overlap(Tile),

    #[error("slot {slot} holds invalid value {value}")]
    InvalidSlot { slot: usize, value: u8 },

    #[error("expanded board disagrees with the state at tile {0}")]
    BoardMismatch(Tile),

    #[error("invalid state key {0:?} (expected 18 hex digits)")]
    InvalidKey(String),

    #[error(transparent)]
    Notation(#[from] NotationError),
}

/// Failure to rebuild a table from a dump
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("unknown replacement policy {0:?}")]
    UnknownPolicy(String),

    #[error("dump holds {entries} entries but capacity is {capacity}")]
    OverCapacity { entries: usize, capacity: usize },

    #[error("dump lists key {0} more than once")]
    DuplicateKey(String),
}
