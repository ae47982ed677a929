//! Transposition table
//!
//! Maps a `StateKey` to the result of an earlier search of that position.
//! The table holds at most `capacity` entries; what happens on a full table
//! or a repeated key is decided by a `ReplacementPolicy`.

mod dump;
mod entry;
mod policy;
mod stats;
mod table;

pub use dump::{DumpRecord, TableDump};
pub use entry::{Bound, TTEntry};
pub use policy::{
    Eviction, PolicyKind, ReplaceOldest, ReplacementPolicy, SameKey, SameKeyElseOldest,
    SameKeyElseReject, ShallowerElseOldest, ShallowerElseReject,
};
pub use stats::TableStats;
pub use table::{InsertOutcome, TableView, TranspositionTable};
