//! Replacement policies
//!
//! A policy answers two questions: what to do when the incoming key is
//! already stored, and which entry (if any) to evict when the table is full.
//! Policies only see the table through `TableView` and never mutate it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{TTEntry, TableView};
use crate::error::TableError;
use crate::position::StateKey;

/// Decision for an insert whose key is already stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameKey {
    /// Replace the entry and keep its queue position
    Overwrite,
    /// Replace the entry and move it to the back of the queue
    Requeue,
    /// Keep the stored entry
    Reject,
}

/// Decision for a new key arriving at a full table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eviction {
    Evict(StateKey),
    Reject,
}

pub trait ReplacementPolicy: Send + Sync {
    /// Name used in dumps and logs
    fn name(&self) -> &'static str;

    fn on_existing(&self, stored: &TTEntry, incoming: &TTEntry) -> SameKey;

    fn choose_victim(&self, table: &TableView<'_>, key: &StateKey, incoming: &TTEntry) -> Eviction;
}

impl fmt::Debug for dyn ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn evict_oldest(table: &TableView<'_>) -> Eviction {
    match table.oldest() {
        Some((key, _)) => Eviction::Evict(key),
        None => Eviction::Reject,
    }
}

/// Shallowest entry if it is strictly shallower than `incoming`
fn shallower_victim(table: &TableView<'_>, incoming: &TTEntry) -> Option<StateKey> {
    table
        .shallowest()
        .filter(|(_, e)| e.depth < incoming.depth)
        .map(|(key, _)| key)
}

fn replace_if_deeper(stored: &TTEntry, incoming: &TTEntry) -> SameKey {
    if incoming.depth >= stored.depth {
        SameKey::Requeue
    } else {
        SameKey::Reject
    }
}

/// FIFO by first insertion; a stored key is overwritten in place
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplaceOldest;

impl ReplacementPolicy for ReplaceOldest {
    fn name(&self) -> &'static str {
        PolicyKind::AlwaysReplace.name()
    }

    fn on_existing(&self, _stored: &TTEntry, _incoming: &TTEntry) -> SameKey {
        SameKey::Overwrite
    }

    fn choose_victim(
        &self,
        table: &TableView<'_>,
        _key: &StateKey,
        _incoming: &TTEntry,
    ) -> Eviction {
        evict_oldest(table)
    }
}

/// Same key replaced and re-queued, otherwise evict the oldest
#[derive(Debug, Clone, Copy, Default)]
pub struct SameKeyElseOldest;

impl ReplacementPolicy for SameKeyElseOldest {
    fn name(&self) -> &'static str {
        PolicyKind::SameKeyElseOldest.name()
    }

    fn on_existing(&self, _stored: &TTEntry, _incoming: &TTEntry) -> SameKey {
        SameKey::Requeue
    }

    fn choose_victim(
        &self,
        table: &TableView<'_>,
        _key: &StateKey,
        _incoming: &TTEntry,
    ) -> Eviction {
        evict_oldest(table)
    }
}

/// Same key replaced and re-queued, otherwise refuse new keys when full
#[derive(Debug, Clone, Copy, Default)]
pub struct SameKeyElseReject;

impl ReplacementPolicy for SameKeyElseReject {
    fn name(&self) -> &'static str {
        PolicyKind::SameKeyElseReject.name()
    }

    fn on_existing(&self, _stored: &TTEntry, _incoming: &TTEntry) -> SameKey {
        SameKey::Requeue
    }

    fn choose_victim(
        &self,
        _table: &TableView<'_>,
        _key: &StateKey,
        _incoming: &TTEntry,
    ) -> Eviction {
        Eviction::Reject
    }
}

/// Depth-preferred: evict a shallower entry, else the oldest
#[derive(Debug, Clone, Copy, Default)]
pub struct ShallowerElseOldest;

impl ReplacementPolicy for ShallowerElseOldest {
    fn name(&self) -> &'static str {
        PolicyKind::ShallowerElseOldest.name()
    }

    fn on_existing(&self, stored: &TTEntry, incoming: &TTEntry) -> SameKey {
        replace_if_deeper(stored, incoming)
    }

    fn choose_victim(
        &self,
        table: &TableView<'_>,
        _key: &StateKey,
        incoming: &TTEntry,
    ) -> Eviction {
        match shallower_victim(table, incoming) {
            Some(key) => Eviction::Evict(key),
            None => evict_oldest(table),
        }
    }
}

/// Depth-preferred: evict a shallower entry, else refuse the incoming one
#[derive(Debug, Clone, Copy, Default)]
pub struct ShallowerElseReject;

impl ReplacementPolicy for ShallowerElseReject {
    fn name(&self) -> &'static str {
        PolicyKind::ShallowerElseReject.name()
    }

    fn on_existing(&self, stored: &TTEntry, incoming: &TTEntry) -> SameKey {
        replace_if_deeper(stored, incoming)
    }

    fn choose_victim(
        &self,
        table: &TableView<'_>,
        _key: &StateKey,
        incoming: &TTEntry,
    ) -> Eviction {
        match shallower_victim(table, incoming) {
            Some(key) => Eviction::Evict(key),
            None => Eviction::Reject,
        }
    }
}

/// Built-in policy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    #[serde(alias = "oldest")]
    AlwaysReplace,
    SameKeyElseOldest,
    SameKeyElseReject,
    #[default]
    ShallowerElseOldest,
    ShallowerElseReject,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 5] = [
        PolicyKind::AlwaysReplace,
        PolicyKind::SameKeyElseOldest,
        PolicyKind::SameKeyElseReject,
        PolicyKind::ShallowerElseOldest,
        PolicyKind::ShallowerElseReject,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            PolicyKind::AlwaysReplace => "always-replace",
            PolicyKind::SameKeyElseOldest => "same-key-else-oldest",
            PolicyKind::SameKeyElseReject => "same-key-else-reject",
            PolicyKind::ShallowerElseOldest => "shallower-else-oldest",
            PolicyKind::ShallowerElseReject => "shallower-else-reject",
        }
    }

    pub fn build(self) -> Box<dyn ReplacementPolicy> {
        match self {
            PolicyKind::AlwaysReplace => Box::new(ReplaceOldest),
            PolicyKind::SameKeyElseOldest => Box::new(SameKeyElseOldest),
            PolicyKind::SameKeyElseReject => Box::new(SameKeyElseReject),
            PolicyKind::ShallowerElseOldest => Box::new(ShallowerElseOldest),
            PolicyKind::ShallowerElseReject => Box::new(ShallowerElseReject),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        if normalized == "oldest" {
            return Ok(PolicyKind::AlwaysReplace);
        }
        PolicyKind::ALL
            .into_iter()
            .find(|k| k.name() == normalized)
            .ok_or_else(|| TableError::UnknownPolicy(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tt::Bound;
    use crate::types::Value;

    #[test]
    fn test_policy_names_round_trip() {
        for kind in PolicyKind::ALL {
            assert_eq!(kind.name().parse::<PolicyKind>(), Ok(kind));
            assert_eq!(kind.build().name(), kind.name());
        }
        assert_eq!("oldest".parse::<PolicyKind>(), Ok(PolicyKind::AlwaysReplace));
        assert_eq!(
            "Shallower_Else_Reject".parse::<PolicyKind>(),
            Ok(PolicyKind::ShallowerElseReject)
        );
        assert!(matches!("lru".parse::<PolicyKind>(), Err(TableError::UnknownPolicy(_))));
    }

    #[test]
    fn test_same_key_decisions() {
        let shallow = TTEntry::new(1, Value::ZERO, None, Bound::Exact, 0);
        let deep = TTEntry { depth: 3, ..shallow };
        assert_eq!(ReplaceOldest.on_existing(&deep, &shallow), SameKey::Overwrite);
        assert_eq!(SameKeyElseOldest.on_existing(&deep, &shallow), SameKey::Requeue);
        assert_eq!(ShallowerElseOldest.on_existing(&deep, &shallow), SameKey::Reject);
        assert_eq!(ShallowerElseOldest.on_existing(&shallow, &deep), SameKey::Requeue);
        assert_eq!(ShallowerElseReject.on_existing(&deep, &deep), SameKey::Requeue);
    }
}
