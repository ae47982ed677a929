//! Basic types
//!
//! - `Tile`, `Direction`: board coordinates on the 5x5 grid
//! - `Player`, `Occupant`, `Outcome`: sides, tile contents, game results
//! - `Move`, `MoveList`: from/to pairs and the inline move buffer
//! - `Value`: absolute utility scale (positive favours the King side)

mod mv;
mod piece;
mod tile;
mod value;

pub use mv::{Move, MoveList};
pub use piece::{Occupant, Outcome, Player};
pub use tile::{BOARD_SIZE, Direction, GOAL_RANK, HOME_RANK, NUM_TILES, Tile};
pub use value::Value;
