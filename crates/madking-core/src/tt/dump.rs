//! Serializable table snapshot

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Bound, PolicyKind, TTEntry, TableStats, TranspositionTable};
use crate::error::TableError;
use crate::position::StateKey;
use crate::types::{Move, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpRecord {
    pub key: StateKey,
    pub depth: u8,
    pub score: Value,
    pub best_move: Option<Move>,
    pub bound: Bound,
    pub age: u32,
}

impl DumpRecord {
    fn entry(&self) -> TTEntry {
        TTEntry::new(self.depth, self.score, self.best_move, self.bound, self.age)
    }
}

/// Snapshot of a table: configuration, counters, and entries oldest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDump {
    pub capacity: usize,
    pub current_size: usize,
    pub policy: String,
    pub stats: TableStats,
    pub entries: Vec<DumpRecord>,
}

impl TranspositionTable {
    pub fn dump(&self) -> TableDump {
        TableDump {
            capacity: self.capacity(),
            current_size: self.len(),
            policy: self.policy_name().to_string(),
            stats: *self.stats(),
            entries: self
                .iter()
                .map(|(key, e)| DumpRecord {
                    key,
                    depth: e.depth,
                    score: e.score,
                    best_move: e.best_move,
                    bound: e.bound,
                    age: e.age,
                })
                .collect(),
        }
    }

    /// Rebuild a table, restoring insertion order and counters
    pub fn from_dump(dump: TableDump) -> Result<Self, TableError> {
        let kind: PolicyKind = dump.policy.parse()?;
        if dump.entries.len() > dump.capacity {
            return Err(TableError::OverCapacity {
                entries: dump.entries.len(),
                capacity: dump.capacity,
            });
        }

        let mut seen = HashSet::with_capacity(dump.entries.len());
        let mut table = TranspositionTable::new(dump.capacity, kind);
        for record in &dump.entries {
            if !seen.insert(record.key) {
                return Err(TableError::DuplicateKey(record.key.to_string()));
            }
            table.push(record.key, record.entry());
        }
        table.restore_stats(dump.stats);
        Ok(table)
    }
}
