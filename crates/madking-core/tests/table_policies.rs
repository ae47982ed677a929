mod common;

use std::collections::HashMap;

use common::random_playout;
use madking_core::search::alpha_beta;
use madking_core::tt::TableDump;
use madking_core::{
    Bound, InsertOutcome, MaterialEval, PolicyKind, Position, SearchConfig, SearchContext,
    StateKey, TTEntry, TranspositionTable, Value,
};
use proptest::prelude::*;

/// Distinct keys taken from a fixed playout
fn keys(n: usize) -> Vec<StateKey> {
    let mut keys = vec![Position::start().key()];
    for seed in 0.. {
        for ply in random_playout(seed, 40) {
            let key = ply.after.key();
            if !keys.contains(&key) {
                keys.push(key);
            }
            if keys.len() == n {
                return keys;
            }
        }
    }
    unreachable!()
}

fn entry(depth: u8, score: i32) -> TTEntry {
    TTEntry::new(depth, Value::new(score), None, Bound::Exact, 0)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn prop_table_contract(
        policy in 0usize..PolicyKind::ALL.len(),
        capacity in 1usize..8,
        ops in prop::collection::vec((0usize..12, 0u8..6), 1..60),
    ) {
        let kind = PolicyKind::ALL[policy];
        let pool = keys(12);
        let mut table = TranspositionTable::new(capacity, kind);
        let mut model: HashMap<StateKey, TTEntry> = HashMap::new();

        for (i, &(k, depth)) in ops.iter().enumerate() {
            let key = pool[k];
            let incoming = entry(depth, i as i32);
            let before = model.get(&key).copied();
            let outcome = table.insert(key, incoming);

            match outcome {
                InsertOutcome::Inserted => {
                    prop_assert!(before.is_none());
                    model.insert(key, incoming);
                }
                InsertOutcome::Replaced { key: victim, entry: old } => {
                    prop_assert_eq!(model.remove(&victim), Some(old));
                    if victim != key {
                        prop_assert!(before.is_none());
                        prop_assert_eq!(model.len(), capacity - 1);
                        if kind == PolicyKind::ShallowerElseReject {
                            prop_assert!(old.depth < depth);
                        }
                    }
                    model.insert(key, incoming);
                }
                InsertOutcome::Rejected(e) => {
                    prop_assert_eq!(e, incoming);
                    let never_rejects = [PolicyKind::AlwaysReplace, PolicyKind::SameKeyElseOldest];
                    prop_assert!(!never_rejects.contains(&kind));
                }
            }

            prop_assert!(table.len() <= capacity);
            prop_assert_eq!(table.len(), model.len());
            for (k, e) in &model {
                prop_assert_eq!(table.probe(k), Some(e));
            }
        }

        let stats = *table.stats();
        prop_assert_eq!(stats.attempted_mutations, ops.len() as u64);
        prop_assert_eq!(stats.directly_added + stats.replaced + stats.rejected, ops.len() as u64);
    }

    #[test]
    fn prop_dump_restores_table(
        policy in 0usize..PolicyKind::ALL.len(),
        ops in prop::collection::vec((0usize..10, 0u8..6), 0..40),
    ) {
        let pool = keys(10);
        let mut table = TranspositionTable::new(6, PolicyKind::ALL[policy]);
        for (i, &(k, depth)) in ops.iter().enumerate() {
            table.insert(pool[k], entry(depth, i as i32));
        }

        let json = serde_json::to_string(&table.dump()).unwrap();
        let dump: TableDump = serde_json::from_str(&json).unwrap();
        let restored = TranspositionTable::from_dump(dump).unwrap();
        prop_assert_eq!(restored.dump(), table.dump());
        prop_assert_eq!(restored.policy_name(), table.policy_name());
    }
}

#[test]
fn every_policy_keeps_search_values() {
    // A tiny table forces constant replacement; values must not change
    let pos = Position::start();
    let config = SearchConfig {
        quiescence: false,
        ..SearchConfig::default()
    };
    let mut plain = SearchContext::without_table(config);
    let expected = alpha_beta(&mut plain, &pos, &MaterialEval, 3).value;

    for kind in PolicyKind::ALL {
        let mut ctx = SearchContext::new(TranspositionTable::new(16, kind), config);
        let r = alpha_beta(&mut ctx, &pos, &MaterialEval, 3);
        assert_eq!(r.value, expected, "{kind}");
        assert!(ctx.table().len() <= 16);
    }
}

#[test]
fn material_change_retires_stored_entries() {
    let pos = Position::start();
    let mut ctx = SearchContext::default();
    let first = alpha_beta(&mut ctx, &pos, &MaterialEval, 2);
    let again = alpha_beta(&mut ctx, &pos, &MaterialEval, 2);
    assert!(again.stats.usable_hits > 0);

    // A capture played in the game bumps the age
    let mut game: Position = "k Ka5 Gb3 Gd3 Dc3 De1".parse().unwrap();
    let effect = game.apply_legal("B3C3".parse().unwrap()).unwrap();
    ctx.observe(&effect);
    assert_eq!(ctx.age(), 1);

    // Retired entries are neither used nor in the way: the search repeats the first one
    let after = alpha_beta(&mut ctx, &pos, &MaterialEval, 2);
    assert_eq!(after.value, first.value);
    assert_eq!(after.stats.nodes, first.stats.nodes);
    assert_eq!(after.stats.usable_hits, first.stats.usable_hits);

    let fresh = alpha_beta(&mut ctx, &pos, &MaterialEval, 2);
    assert!(fresh.stats.usable_hits > 0);
    assert_eq!(ctx.table().view().get(&pos.key()).map(|e| e.age), Some(1));
}

#[test]
fn quiet_moves_keep_the_age() {
    let mut ctx = SearchContext::default();
    let mut game = Position::start();
    let effect = game.apply_legal("A2A3".parse().unwrap()).unwrap();
    ctx.observe(&effect);
    assert_eq!(ctx.age(), 0);
}

#[test]
fn unknown_policy_in_dump_is_rejected() {
    let mut dump = TranspositionTable::new(4, PolicyKind::default()).dump();
    dump.policy = "random".to_string();
    assert!(TranspositionTable::from_dump(dump).is_err());
}
