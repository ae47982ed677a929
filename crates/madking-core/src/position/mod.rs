//! Game state model
//!
//! `GameState` is the compact nine-byte encoding used as the table key;
//! `ExpandedBoard` is the dense per-tile view the rules engine queries.
//! `Position` bundles the two and keeps them consistent on every move.
//!
//! ```text
//! byte 0     : king_tile << 3 | TURN | WIN | WHO_WON
//! bytes 1..=3: Guard slots at the start
//! bytes 4..=8: Dragon slots at the start
//!
//! slot value : 0..25    Guard on that tile
//!              25       dead
//!              100..125 Dragon on tile (value - 100)
//! ```

mod board;
mod defection;
mod pos;
mod state;
mod text;

pub use board::ExpandedBoard;
pub use pos::{MoveEffect, Position};
pub use state::{GameState, SlotContent, StateKey};

/// Bytes in an encoded state
pub const STATE_SIZE: usize = 9;

/// Slots that hold Guards at the start (slots 1..=3)
pub const NUM_GUARD_SLOTS: usize = 3;

/// Slots for pieces other than the King (slots 1..=8)
pub const NUM_PIECE_SLOTS: usize = 8;

/// First slot holding a Dragon at the start
pub const FIRST_DRAGON_SLOT: usize = 4;

/// Sentinel for a captured piece
pub const DEAD: u8 = 25;

/// Offset added to a Dragon's tile index
pub const DRAGON_BASE: u8 = 100;

/// Set when the King side is to move
pub const TURN_MASK: u8 = 0b100;

/// Set when the state is a decided win
pub const WIN_MASK: u8 = 0b010;

/// Set when the King side won (meaningful only with `WIN_MASK`)
pub const WHO_WON_MASK: u8 = 0b001;

/// Bits of byte 0 below the King's tile
pub const STATUS_BITS: u8 = 3;
