//! Capacity-bounded transposition table
//!
//! Entries live in a hash map keyed by `StateKey`. Three ordered indexes
//! track insertion order (for FIFO eviction), depth (for depth-preferred
//! eviction) and age; all are keyed by a per-insert sequence number so ties
//! resolve to the oldest entry.
//!
//! An entry whose age is below the incoming entry's age is retired. Retired
//! entries never block an insert: a retired entry under the same key is
//! always replaced, and a full table evicts its most stale retired entry
//! before the policy is asked.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::policy::{Eviction, ReplacementPolicy, SameKey};
use super::{PolicyKind, TTEntry, TableStats};
use crate::position::StateKey;

/// Result of `TranspositionTable::insert`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Stored in a free slot
    Inserted,
    /// Stored by displacing `key` (the same key, or an evicted victim)
    Replaced { key: StateKey, entry: TTEntry },
    /// Not stored; the incoming entry is handed back
    Rejected(TTEntry),
}

impl InsertOutcome {
    #[inline]
    pub fn is_stored(&self) -> bool {
        !matches!(self, InsertOutcome::Rejected(_))
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    entry: TTEntry,
    seq: u64,
}

pub struct TranspositionTable {
    entries: HashMap<StateKey, Slot>,
    /// seq -> key, oldest first
    order: BTreeMap<u64, StateKey>,
    /// (depth, seq), shallowest then oldest first
    by_depth: BTreeSet<(u8, u64)>,
    /// (age, seq), most stale then oldest first
    by_age: BTreeSet<(u32, u64)>,
    next_seq: u64,
    capacity: usize,
    policy: Box<dyn ReplacementPolicy>,
    stats: TableStats,
}

impl TranspositionTable {
    /// Create a table holding at most `capacity` entries
    pub fn new(capacity: usize, policy: PolicyKind) -> Self {
        Self::with_policy(capacity, policy.build())
    }

    /// Create a table with a custom policy
    pub fn with_policy(capacity: usize, policy: Box<dyn ReplacementPolicy>) -> Self {
        TranspositionTable {
            entries: HashMap::with_capacity(capacity.min(1 << 16)),
            order: BTreeMap::new(),
            by_depth: BTreeSet::new(),
            by_age: BTreeSet::new(),
            next_seq: 0,
            capacity,
            policy,
            stats: TableStats::default(),
        }
    }

    /// A table that stores nothing
    pub fn disabled() -> Self {
        Self::new(0, PolicyKind::default())
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    #[inline]
    pub fn stats(&self) -> &TableStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = TableStats::default();
    }

    pub(super) fn restore_stats(&mut self, stats: TableStats) {
        self.stats = stats;
    }

    /// Drop every entry, keeping counters
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.by_depth.clear();
        self.by_age.clear();
    }

    /// Look up an entry, counting a safe access (and a hit when found)
    pub fn probe(&mut self, key: &StateKey) -> Option<&TTEntry> {
        self.stats.safe_accesses += 1;
        let slot = self.entries.get(key)?;
        self.stats.hits += 1;
        Some(&slot.entry)
    }

    /// Look up an entry, counting a direct access
    pub fn get(&mut self, key: &StateKey) -> Option<&TTEntry> {
        self.stats.direct_accesses += 1;
        self.entries.get(key).map(|s| &s.entry)
    }

    #[inline]
    pub fn contains(&self, key: &StateKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries in insertion order (oldest first)
    pub fn iter(&self) -> impl Iterator<Item = (StateKey, &TTEntry)> + '_ {
        self.order
            .values()
            .filter_map(|k| self.entries.get(k).map(|s| (*k, &s.entry)))
    }

    pub fn view(&self) -> TableView<'_> {
        TableView { table: self }
    }

    /// Store `entry` under `key`, consulting the policy on conflicts
    ///
    /// Never fails; a full table either evicts or rejects.
    pub fn insert(&mut self, key: StateKey, entry: TTEntry) -> InsertOutcome {
        self.stats.attempted_mutations += 1;

        if self.capacity == 0 {
            self.stats.rejected += 1;
            return InsertOutcome::Rejected(entry);
        }

        if let Some(slot) = self.entries.get(&key).copied() {
            if slot.entry.age < entry.age {
                self.remove(&key);
                self.push(key, entry);
                self.stats.replaced += 1;
                self.stats.swapped += 1;
                return InsertOutcome::Replaced {
                    key,
                    entry: slot.entry,
                };
            }
            return match self.policy.on_existing(&slot.entry, &entry) {
                SameKey::Overwrite => {
                    self.by_depth.remove(&(slot.entry.depth, slot.seq));
                    self.by_depth.insert((entry.depth, slot.seq));
                    self.by_age.remove(&(slot.entry.age, slot.seq));
                    self.by_age.insert((entry.age, slot.seq));
                    self.entries.insert(key, Slot { entry, seq: slot.seq });
                    self.stats.replaced += 1;
                    InsertOutcome::Replaced {
                        key,
                        entry: slot.entry,
                    }
                }
                SameKey::Requeue => {
                    self.remove(&key);
                    self.push(key, entry);
                    self.stats.replaced += 1;
                    self.stats.swapped += 1;
                    InsertOutcome::Replaced {
                        key,
                        entry: slot.entry,
                    }
                }
                SameKey::Reject => {
                    self.stats.rejected += 1;
                    InsertOutcome::Rejected(entry)
                }
            };
        }

        if self.len() < self.capacity {
            self.push(key, entry);
            self.stats.directly_added += 1;
            return InsertOutcome::Inserted;
        }

        let retired = self
            .view()
            .stalest()
            .filter(|(_, e)| e.age < entry.age)
            .map(|(victim, _)| victim);
        let decision = match retired {
            Some(victim) => Eviction::Evict(victim),
            None => self.policy.choose_victim(&self.view(), &key, &entry),
        };
        match decision {
            Eviction::Evict(victim) => match self.remove(&victim) {
                Some(old) => {
                    log::trace!("tt: evicted {victim} (depth {}) for {key}", old.depth);
                    self.push(key, entry);
                    self.stats.replaced += 1;
                    InsertOutcome::Replaced {
                        key: victim,
                        entry: old,
                    }
                }
                None => {
                    log::warn!(
                        "tt: policy {} chose absent victim {victim}; rejecting",
                        self.policy.name()
                    );
                    self.stats.rejected += 1;
                    InsertOutcome::Rejected(entry)
                }
            },
            Eviction::Reject => {
                log::trace!("tt: rejected {key} (depth {})", entry.depth);
                self.stats.rejected += 1;
                InsertOutcome::Rejected(entry)
            }
        }
    }

    /// Append as the newest entry; the key must be absent
    pub(super) fn push(&mut self, key: StateKey, entry: TTEntry) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(seq, key);
        self.by_depth.insert((entry.depth, seq));
        self.by_age.insert((entry.age, seq));
        self.entries.insert(key, Slot { entry, seq });
    }

    fn remove(&mut self, key: &StateKey) -> Option<TTEntry> {
        let slot = self.entries.remove(key)?;
        self.order.remove(&slot.seq);
        self.by_depth.remove(&(slot.entry.depth, slot.seq));
        self.by_age.remove(&(slot.entry.age, slot.seq));
        Some(slot.entry)
    }
}

impl std::fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("policy", &self.policy.name())
            .field("stats", &self.stats)
            .finish()
    }
}

/// Read-only access for replacement policies
#[derive(Clone, Copy)]
pub struct TableView<'a> {
    table: &'a TranspositionTable,
}

impl<'a> TableView<'a> {
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.capacity
    }

    /// First-inserted entry still present
    pub fn oldest(&self) -> Option<(StateKey, &'a TTEntry)> {
        let (_, key) = self.table.order.first_key_value()?;
        self.table.entries.get(key).map(|s| (*key, &s.entry))
    }

    /// Lowest-depth entry, oldest among equals
    pub fn shallowest(&self) -> Option<(StateKey, &'a TTEntry)> {
        let (_, seq) = self.table.by_depth.first()?;
        let key = self.table.order.get(seq)?;
        self.table.entries.get(key).map(|s| (*key, &s.entry))
    }

    /// Lowest-age entry, oldest among equals
    pub fn stalest(&self) -> Option<(StateKey, &'a TTEntry)> {
        let (_, seq) = self.table.by_age.first()?;
        let key = self.table.order.get(seq)?;
        self.table.entries.get(key).map(|s| (*key, &s.entry))
    }

    /// Uncounted lookup
    pub fn get(&self, key: &StateKey) -> Option<&'a TTEntry> {
        self.table.entries.get(key).map(|s| &s.entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateKey, &'a TTEntry)> + 'a {
        self.table.iter()
    }
}
