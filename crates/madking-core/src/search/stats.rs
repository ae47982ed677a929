//! Search counters

use std::ops::AddAssign;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::tt::Bound;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes entered by minimax / alpha-beta
    pub nodes: u64,
    /// Nodes (search or quiescence) found terminal
    pub terminal_nodes: u64,
    /// Evaluator calls
    pub leaf_evaluations: u64,
    /// Nodes entered by quiescence
    pub quiescence_nodes: u64,
    /// Table entries that were deep enough and current
    pub usable_hits: u64,
    pub exact_hits: u64,
    pub lower_hits: u64,
    pub upper_hits: u64,
    /// Bound entries that closed the window on their own
    pub window_hits: u64,
    /// PV move alone failed high
    pub pv_move_cutoffs_lower: u64,
    /// PV move alone failed low
    pub pv_move_cutoffs_upper: u64,
    /// Minimizer cutoffs (value at or below alpha)
    pub alpha_cutoffs: u64,
    /// Maximizer cutoffs (value at or above beta)
    pub beta_cutoffs: u64,
    /// Entries handed to the table
    pub table_stores: u64,
    #[serde(default)]
    pub elapsed: Duration,
}

impl SearchStats {
    #[inline]
    pub(crate) fn record_hit(&mut self, bound: Bound) {
        self.usable_hits += 1;
        match bound {
            Bound::Exact => self.exact_hits += 1,
            Bound::Lower => self.lower_hits += 1,
            Bound::Upper => self.upper_hits += 1,
        }
    }

    /// Nodes per second over `elapsed`
    pub fn nps(&self) -> u64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            ((self.nodes + self.quiescence_nodes) as f64 / secs) as u64
        } else {
            0
        }
    }

    pub fn log_summary(&self) {
        log::info!(
            "search: nodes {} (terminal {}, quiescence {}), evals {}, {:?}, {} nps",
            self.nodes,
            self.terminal_nodes,
            self.quiescence_nodes,
            self.leaf_evaluations,
            self.elapsed,
            self.nps()
        );
        log::info!(
            "  table: stores {}, usable hits {} (exact {}, lower {}, upper {}, window {})",
            self.table_stores,
            self.usable_hits,
            self.exact_hits,
            self.lower_hits,
            self.upper_hits,
            self.window_hits
        );
        log::info!(
            "  cutoffs: alpha {}, beta {}, pv lower {}, pv upper {}",
            self.alpha_cutoffs,
            self.beta_cutoffs,
            self.pv_move_cutoffs_lower,
            self.pv_move_cutoffs_upper
        );
    }
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, rhs: SearchStats) {
        self.nodes += rhs.nodes;
        self.terminal_nodes += rhs.terminal_nodes;
        self.leaf_evaluations += rhs.leaf_evaluations;
        self.quiescence_nodes += rhs.quiescence_nodes;
        self.usable_hits += rhs.usable_hits;
        self.exact_hits += rhs.exact_hits;
        self.lower_hits += rhs.lower_hits;
        self.upper_hits += rhs.upper_hits;
        self.window_hits += rhs.window_hits;
        self.pv_move_cutoffs_lower += rhs.pv_move_cutoffs_lower;
        self.pv_move_cutoffs_upper += rhs.pv_move_cutoffs_upper;
        self.alpha_cutoffs += rhs.alpha_cutoffs;
        self.beta_cutoffs += rhs.beta_cutoffs;
        self.table_stores += rhs.table_stores;
        self.elapsed += rhs.elapsed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_assign() {
        let mut a = SearchStats {
            nodes: 3,
            beta_cutoffs: 1,
            ..Default::default()
        };
        let b = SearchStats {
            nodes: 2,
            table_stores: 4,
            elapsed: Duration::from_millis(5),
            ..Default::default()
        };
        a += b;
        assert_eq!(a.nodes, 5);
        assert_eq!(a.beta_cutoffs, 1);
        assert_eq!(a.table_stores, 4);
        assert_eq!(a.elapsed, Duration::from_millis(5));
    }

    #[test]
    fn test_record_hit() {
        let mut s = SearchStats::default();
        s.record_hit(Bound::Lower);
        s.record_hit(Bound::Exact);
        assert_eq!(s.usable_hits, 2);
        assert_eq!(s.lower_hits, 1);
        assert_eq!(s.exact_hits, 1);
        assert_eq!(s.upper_hits, 0);
    }
}
