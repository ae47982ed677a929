//! Table counters

use serde::{Deserialize, Serialize};

/// Cumulative counters, kept across `clear()`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStats {
    /// Calls to `insert`
    pub attempted_mutations: u64,
    /// Inserts that filled a free slot
    pub directly_added: u64,
    /// Inserts that displaced an entry (same key or evicted victim)
    pub replaced: u64,
    /// Same-key replacements that re-queued the entry as newest
    pub swapped: u64,
    /// Inserts refused by the policy or a zero capacity
    pub rejected: u64,
    /// Calls to `get`
    pub direct_accesses: u64,
    /// Calls to `probe`
    pub safe_accesses: u64,
    /// Probes that found an entry
    pub hits: u64,
}

impl TableStats {
    pub fn hit_rate(&self) -> f64 {
        if self.safe_accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.safe_accesses as f64
        }
    }

    pub fn log_summary(&self) {
        log::info!("=== Transposition Table ===");
        log::info!(
            "  Mutations: {} (added {}, replaced {}, swapped {}, rejected {})",
            self.attempted_mutations,
            self.directly_added,
            self.replaced,
            self.swapped,
            self.rejected
        );
        log::info!(
            "  Probes: {} (hits {}, {:.1}%), direct accesses {}",
            self.safe_accesses,
            self.hits,
            self.hit_rate() * 100.0,
            self.direct_accesses
        );
    }
}
