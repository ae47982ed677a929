//! Iterative deepening driver

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::{SearchAlgorithm, SearchContext, SearchResult, SearchStats};
use crate::eval::Evaluator;
use crate::movegen::terminal;
use crate::position::Position;
use crate::tt::Bound;

/// Default iterative deepening depth
pub const DEFAULT_MAX_DEPTH: u8 = 4;

/// Search limits, checked between iterations
#[derive(Clone)]
pub struct SearchLimits {
    /// Deepest iteration (inclusive); at least one iteration always runs
    pub max_depth: u8,
    /// Do not start a new iteration after this much time
    pub deadline: Option<Duration>,
    /// Do not start a new iteration once set
    pub stop: Option<Arc<AtomicBool>>,
}

impl SearchLimits {
    pub fn depth(max_depth: u8) -> Self {
        SearchLimits {
            max_depth,
            ..Default::default()
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_stop(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }

    fn should_stop(&self, started: Instant) -> bool {
        if self.stop.as_ref().is_some_and(|s| s.load(Ordering::Relaxed)) {
            return true;
        }
        self.deadline.is_some_and(|d| started.elapsed() >= d)
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            max_depth: DEFAULT_MAX_DEPTH,
            deadline: None,
            stop: None,
        }
    }
}

impl std::fmt::Debug for SearchLimits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchLimits")
            .field("max_depth", &self.max_depth)
            .field("deadline", &self.deadline)
            .field("stop", &self.stop.as_ref().map(|s| s.load(Ordering::Relaxed)))
            .finish()
    }
}

/// Run `algorithm` at depth 1, 2, ... `limits.max_depth`
///
/// Keeps the best result for the side to move (highest value for the King
/// side, lowest for the Dragon side); on ties the shallower result stays.
/// The returned `depth` is the deepest completed iteration and `stats` covers
/// all of them.
pub fn iterative_deepening<E: Evaluator + ?Sized>(
    ctx: &mut SearchContext,
    pos: &Position,
    eval: &E,
    algorithm: SearchAlgorithm,
    limits: &SearchLimits,
) -> SearchResult {
    let started = Instant::now();

    if let Some(outcome) = terminal(pos) {
        let stats = SearchStats {
            nodes: 1,
            terminal_nodes: 1,
            elapsed: started.elapsed(),
            ..Default::default()
        };
        ctx.stats += stats;
        return SearchResult {
            value: outcome.value(),
            best_move: None,
            bound: Bound::Exact,
            depth: 0,
            stats,
        };
    }

    let maximizing = pos.side_to_move().is_maximizing();
    let mut best = algorithm.search(ctx, pos, eval, 1);
    let mut total = best.stats;
    let mut completed = 1;
    log_iteration(algorithm, &best);

    for depth in 2..=limits.max_depth {
        if limits.should_stop(started) {
            log::debug!("{algorithm}: stopping before depth {depth}");
            break;
        }
        let result = algorithm.search(ctx, pos, eval, depth);
        total += result.stats;
        completed = depth;
        log_iteration(algorithm, &result);

        let better = if maximizing {
            result.value > best.value
        } else {
            result.value < best.value
        };
        if better {
            best = result;
        }
    }

    total.elapsed = started.elapsed();
    SearchResult {
        depth: completed,
        stats: total,
        ..best
    }
}

fn log_iteration(algorithm: SearchAlgorithm, result: &SearchResult) {
    log::debug!(
        "{algorithm} depth {}: value {} move {} nodes {} ({:?})",
        result.depth,
        result.value,
        result.best_move.map_or_else(|| "-".to_string(), |m| m.to_string()),
        result.stats.nodes,
        result.stats.elapsed
    );
}
