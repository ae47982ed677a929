//! Search engine
//!
//! Values are absolute (King side maximizes). Every entry point takes the
//! `SearchContext` explicitly; there is no global state.
//!
//! - `minimax`: full-width reference search
//! - `alpha_beta`: fail-hard alpha-beta with table cutoffs and PV ordering
//! - `quiescence`: noisy-leaf extension used by both
//! - `iterative_deepening`: depth 1..=N driver with optional deadline / stop flag

mod alpha_beta;
mod context;
mod iterative;
mod minimax;
mod qsearch;
mod stats;

#[cfg(test)]
mod tests;

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};

pub use alpha_beta::{alpha_beta, alpha_beta_node};
pub use context::{DEFAULT_QSEARCH_MAX_PLY, DEFAULT_TABLE_CAPACITY, SearchConfig, SearchContext};
pub use iterative::{DEFAULT_MAX_DEPTH, SearchLimits, iterative_deepening};
pub use minimax::minimax;
pub use qsearch::quiescence;
pub use stats::SearchStats;

use crate::eval::Evaluator;
use crate::position::Position;
use crate::tt::Bound;
use crate::types::{Move, Value};

/// Outcome of one search call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub value: Value,
    /// `None` only when the root is terminal
    pub best_move: Option<Move>,
    /// `Exact` unless the root window cut the value
    pub bound: Bound,
    /// Depth searched (deepest completed iteration for iterative deepening)
    pub depth: u8,
    pub stats: SearchStats,
}

impl SearchResult {
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.bound == Bound::Exact
    }
}

/// Fixed-depth search algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchAlgorithm {
    Minimax,
    #[default]
    AlphaBeta,
}

impl SearchAlgorithm {
    pub fn search<E: Evaluator + ?Sized>(
        self,
        ctx: &mut SearchContext,
        pos: &Position,
        eval: &E,
        depth: u8,
    ) -> SearchResult {
        match self {
            SearchAlgorithm::Minimax => minimax(ctx, pos, eval, depth),
            SearchAlgorithm::AlphaBeta => alpha_beta(ctx, pos, eval, depth),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            SearchAlgorithm::Minimax => "minimax",
            SearchAlgorithm::AlphaBeta => "alpha-beta",
        }
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "minimax" => Ok(SearchAlgorithm::Minimax),
            "alpha-beta" | "alphabeta" | "ab" => Ok(SearchAlgorithm::AlphaBeta),
            other => Err(format!("unknown search algorithm {other:?}")),
        }
    }
}

/// Run `f` with fresh counters, then fold them back into the context
///
/// Returns the counters of this call alone, with elapsed time filled in.
fn measured<T>(
    ctx: &mut SearchContext,
    f: impl FnOnce(&mut SearchContext) -> T,
) -> (T, SearchStats) {
    let started = Instant::now();
    let outer = std::mem::take(&mut ctx.stats);
    let out = f(ctx);
    let mut stats = std::mem::replace(&mut ctx.stats, outer);
    stats.elapsed = started.elapsed();
    ctx.stats += stats;
    (out, stats)
}
