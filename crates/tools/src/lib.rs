//! Drivers for the King vs. Dragons engine
//!
//! The core library has no I/O; this crate adds the pieces the binaries
//! share: engine configuration, the game loop with human and engine players,
//! the text board, a background search worker and JSON output.

pub mod config;
pub mod game;
pub mod io;
pub mod record;
pub mod render;
pub mod worker;

pub use config::{EngineArgs, EngineConfig};
pub use game::{
    Choice, EndReason, EngineSource, GameResult, HumanSource, MoveEvent, MoveSource, run_game,
};
pub use worker::{BackgroundSearch, Finished};
