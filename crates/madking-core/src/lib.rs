//! # madking-core
//!
//! Engine core for "King vs. Dragons" (The Mad King!), a 5x5 Tafl-family game.
//!
//! ## Modules
//!
//! - `types`: basic types (Tile, Direction, Player, Occupant, Move, Value)
//! - `position`: bit-packed `GameState`, the dense `ExpandedBoard`, and `Position`
//!   which keeps both consistent across `do_move`
//! - `movegen`: legal-move generation, King safety, terminal detection, successors
//! - `eval`: the `Evaluator` capability consumed by the search
//! - `tt`: capacity-bounded transposition table with pluggable replacement policies
//! - `search`: minimax, fail-hard alpha-beta, quiescence and iterative deepening
//! - `error`: error types for the input and dump boundaries

pub mod error;
pub mod eval;
pub mod movegen;
pub mod position;
pub mod search;
pub mod tt;
pub mod types;

pub use error::{NotationError, RulesError, StateError, TableError};
pub use eval::{Evaluator, MaterialEval};
pub use position::{ExpandedBoard, GameState, MoveEffect, Position, StateKey};
pub use search::{
    SearchAlgorithm, SearchConfig, SearchContext, SearchLimits, SearchResult, SearchStats,
};
pub use tt::{Bound, InsertOutcome, PolicyKind, TTEntry, TranspositionTable};
pub use types::{Direction, Move, MoveList, Occupant, Outcome, Player, Tile, Value};
