//! Quiescence search
//!
//! Extends depth-0 leaves while either side has a capture, a goal move, a
//! King trap or a forced defection available. Fail-hard: the result is
//! always inside `[alpha, beta]`.

use super::SearchContext;
use crate::eval::Evaluator;
use crate::movegen::{is_noisy, noisy_moves, terminal};
use crate::position::Position;
use crate::types::{Player, Value};

/// Leaf value at depth 0: quiescence when enabled, otherwise the evaluator
pub(crate) fn leaf_value<E: Evaluator + ?Sized>(
    ctx: &mut SearchContext,
    pos: &Position,
    eval: &E,
    alpha: Value,
    beta: Value,
) -> Value {
    if ctx.config().quiescence {
        quiescence(ctx, pos, eval, alpha, beta, 0)
    } else {
        ctx.evaluate(eval, pos).clamp_to(alpha, beta)
    }
}

/// Quiescence value of `pos` within `(alpha, beta)`
///
/// `qply` counts extension plies already taken below the depth-0 leaf.
pub fn quiescence<E: Evaluator + ?Sized>(
    ctx: &mut SearchContext,
    pos: &Position,
    eval: &E,
    mut alpha: Value,
    mut beta: Value,
    qply: u8,
) -> Value {
    ctx.stats.quiescence_nodes += 1;

    if let Some(outcome) = terminal(pos) {
        ctx.stats.terminal_nodes += 1;
        return outcome.value().clamp_to(alpha, beta);
    }
    if qply >= ctx.config().qsearch_max_ply || !is_noisy(pos) {
        return ctx.evaluate(eval, pos).clamp_to(alpha, beta);
    }

    match pos.side_to_move() {
        Player::King => {
            let stand_pat = ctx.evaluate(eval, pos);
            if stand_pat >= beta {
                return beta;
            }
            alpha = alpha.max(stand_pat);
            for mv in noisy_moves(pos) {
                let (child, _) = pos.apply(mv);
                let v = quiescence(ctx, &child, eval, alpha, beta, qply + 1);
                if v >= beta {
                    return beta;
                }
                alpha = alpha.max(v);
            }
            alpha
        }
        Player::Dragon => {
            for mv in noisy_moves(pos) {
                let (child, _) = pos.apply(mv);
                let v = quiescence(ctx, &child, eval, alpha, beta, qply + 1);
                if v <= alpha {
                    return alpha;
                }
                beta = beta.min(v);
            }
            beta
        }
    }
}
