//! Search context: the table, counters, age and configuration shared by one search

use serde::{Deserialize, Serialize};

use super::SearchStats;
use crate::eval::Evaluator;
use crate::position::{MoveEffect, Position};
use crate::tt::{Bound, PolicyKind, TTEntry, TranspositionTable};
use crate::types::{Move, Value};

/// Default number of table entries
pub const DEFAULT_TABLE_CAPACITY: usize = 1 << 20;

/// Default quiescence extension limit
pub const DEFAULT_QSEARCH_MAX_PLY: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Extend noisy leaves with quiescence search
    pub quiescence: bool,
    /// Quiescence plies before falling back to the evaluator
    pub qsearch_max_ply: u8,
    /// Consult and update the transposition table
    pub use_table: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            quiescence: true,
            qsearch_max_ply: DEFAULT_QSEARCH_MAX_PLY,
            use_table: true,
        }
    }
}

/// Everything a search mutates
///
/// One context per searching thread; it is `Send` so it can be handed to a
/// worker and back.
#[derive(Debug)]
pub struct SearchContext {
    table: TranspositionTable,
    pub(crate) stats: SearchStats,
    age: u32,
    config: SearchConfig,
}

impl SearchContext {
    pub fn new(table: TranspositionTable, config: SearchConfig) -> Self {
        SearchContext {
            table,
            stats: SearchStats::default(),
            age: 0,
            config,
        }
    }

    /// Context with a disabled table
    pub fn without_table(config: SearchConfig) -> Self {
        SearchContext::new(
            TranspositionTable::disabled(),
            SearchConfig {
                use_table: false,
                ..config
            },
        )
    }

    #[inline]
    pub fn table(&self) -> &TranspositionTable {
        &self.table
    }

    #[inline]
    pub fn table_mut(&mut self) -> &mut TranspositionTable {
        &mut self.table
    }

    pub fn into_table(self) -> TranspositionTable {
        self.table
    }

    /// Counters accumulated since creation or the last reset
    #[inline]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    #[inline]
    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn set_age(&mut self, age: u32) {
        self.age = age;
    }

    /// Account for a move played in the real game
    ///
    /// Captures and defections bump the age, which retires every stored entry.
    pub fn observe(&mut self, effect: &MoveEffect) {
        if effect.is_material_change() {
            self.age = self.age.wrapping_add(1);
            log::debug!("search: material changed, table age now {}", self.age);
        }
    }

    /// Current-age entry for `pos`, if the table is in use
    pub(crate) fn probe(&mut self, pos: &Position) -> Option<TTEntry> {
        if !self.config.use_table {
            return None;
        }
        let age = self.age;
        self.table
            .probe(&pos.key())
            .copied()
            .filter(|e| e.age >= age)
    }

    pub(crate) fn store(
        &mut self,
        pos: &Position,
        depth: u8,
        score: Value,
        best_move: Option<Move>,
        bound: Bound,
    ) {
        if !self.config.use_table {
            return;
        }
        self.stats.table_stores += 1;
        let entry = TTEntry::new(depth, score, best_move, bound, self.age);
        self.table.insert(pos.key(), entry);
    }

    #[inline]
    pub(crate) fn evaluate<E: Evaluator + ?Sized>(&mut self, eval: &E, pos: &Position) -> Value {
        self.stats.leaf_evaluations += 1;
        eval.evaluate(pos)
    }
}

impl Default for SearchContext {
    fn default() -> Self {
        SearchContext::new(
            TranspositionTable::new(DEFAULT_TABLE_CAPACITY, PolicyKind::default()),
            SearchConfig::default(),
        )
    }
}
