//! Fail-hard alpha-beta with table cutoffs and PV move ordering

use super::qsearch::leaf_value;
use super::{SearchContext, SearchResult, measured};
use crate::eval::Evaluator;
use crate::movegen::{is_legal, successors, terminal};
use crate::position::Position;
use crate::tt::Bound;
use crate::types::{Move, Value};

/// Alpha-beta to `depth` plies with a full root window
pub fn alpha_beta<E: Evaluator + ?Sized>(
    ctx: &mut SearchContext,
    pos: &Position,
    eval: &E,
    depth: u8,
) -> SearchResult {
    let (alpha, beta) = (-Value::INFINITE, Value::INFINITE);
    let ((value, best_move), stats) =
        measured(ctx, |ctx| alpha_beta_node(ctx, pos, eval, depth, alpha, beta));
    SearchResult {
        value,
        best_move,
        bound: Bound::classify(value, alpha, beta),
        depth,
        stats,
    }
}

/// Running state of one node's move loop
struct Window {
    alpha: Value,
    beta: Value,
    maximizing: bool,
    best: Value,
    best_move: Option<Move>,
}

enum Step {
    Continue,
    /// Child refuted the window; the bound value to return
    Cutoff(Value),
}

impl Window {
    fn new(alpha: Value, beta: Value, maximizing: bool) -> Self {
        Window {
            alpha,
            beta,
            maximizing,
            best: Value::worst_for(maximizing),
            best_move: None,
        }
    }

    fn update(&mut self, v: Value, mv: Move) -> Step {
        if self.maximizing {
            if self.best_move.is_none() || v > self.best {
                self.best = v;
                self.best_move = Some(mv);
            }
            if v >= self.beta {
                return Step::Cutoff(self.beta);
            }
            self.alpha = self.alpha.max(v);
        } else {
            if self.best_move.is_none() || v < self.best {
                self.best = v;
                self.best_move = Some(mv);
            }
            if v <= self.alpha {
                return Step::Cutoff(self.alpha);
            }
            self.beta = self.beta.min(v);
        }
        Step::Continue
    }

    /// Fail-hard result after every child was searched
    fn value(&self) -> Value {
        if self.maximizing { self.alpha } else { self.beta }
    }

    fn cutoff_bound(&self) -> Bound {
        if self.maximizing { Bound::Lower } else { Bound::Upper }
    }
}

/// Alpha-beta value of `pos` within `(alpha, beta)` and the move behind it
///
/// Fail-hard: the value is clamped to the window it was called with.
pub fn alpha_beta_node<E: Evaluator + ?Sized>(
    ctx: &mut SearchContext,
    pos: &Position,
    eval: &E,
    depth: u8,
    mut alpha: Value,
    mut beta: Value,
) -> (Value, Option<Move>) {
    ctx.stats.nodes += 1;
    let (alpha0, beta0) = (alpha, beta);

    if let Some(outcome) = terminal(pos) {
        ctx.stats.terminal_nodes += 1;
        return (outcome.value().clamp_to(alpha0, beta0), None);
    }

    let mut pv_move = None;
    if let Some(entry) = ctx.probe(pos) {
        pv_move = entry.best_move;
        if entry.depth >= depth {
            ctx.stats.record_hit(entry.bound);
            match entry.bound {
                Bound::Exact => return (entry.score.clamp_to(alpha0, beta0), entry.best_move),
                Bound::Lower => alpha = alpha.max(entry.score),
                Bound::Upper => beta = beta.min(entry.score),
            }
            if alpha >= beta {
                ctx.stats.window_hits += 1;
                return (entry.score.clamp_to(alpha0, beta0), entry.best_move);
            }
        }
    }

    if depth == 0 {
        return (leaf_value(ctx, pos, eval, alpha, beta), None);
    }

    let mut window = Window::new(alpha, beta, pos.side_to_move().is_maximizing());

    let pv_move = pv_move.filter(|mv| is_legal(pos, *mv));
    if let Some(mv) = pv_move {
        let (child, _) = pos.apply(mv);
        let (v, _) = alpha_beta_node(ctx, &child, eval, depth - 1, window.alpha, window.beta);
        if let Step::Cutoff(bound_value) = window.update(v, mv) {
            if window.maximizing {
                ctx.stats.pv_move_cutoffs_lower += 1;
            } else {
                ctx.stats.pv_move_cutoffs_upper += 1;
            }
            ctx.store(pos, depth, bound_value, Some(mv), window.cutoff_bound());
            return (bound_value, Some(mv));
        }
    }

    for child in successors(pos) {
        if Some(child.mv) == pv_move {
            continue;
        }
        let (v, _) =
            alpha_beta_node(ctx, &child.position, eval, depth - 1, window.alpha, window.beta);
        if let Step::Cutoff(bound_value) = window.update(v, child.mv) {
            if window.maximizing {
                ctx.stats.beta_cutoffs += 1;
            } else {
                ctx.stats.alpha_cutoffs += 1;
            }
            ctx.store(pos, depth, bound_value, Some(child.mv), window.cutoff_bound());
            return (bound_value, Some(child.mv));
        }
    }

    let value = window.value();
    ctx.store(pos, depth, value, window.best_move, Bound::classify(value, alpha0, beta0));
    (value, window.best_move)
}
