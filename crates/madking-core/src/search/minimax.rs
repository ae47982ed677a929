//! Plain minimax with exact-entry memoization

use super::qsearch::leaf_value;
use super::{SearchContext, SearchResult, measured};
use crate::eval::Evaluator;
use crate::movegen::{successors, terminal};
use crate::position::Position;
use crate::tt::Bound;
use crate::types::{Move, Value};

/// Full-width minimax to `depth` plies
///
/// The King side maximizes and the Dragon side minimizes; the first move
/// reaching the best value is reported.
pub fn minimax<E: Evaluator + ?Sized>(
    ctx: &mut SearchContext,
    pos: &Position,
    eval: &E,
    depth: u8,
) -> SearchResult {
    let ((value, best_move), stats) = measured(ctx, |ctx| minimax_node(ctx, pos, eval, depth));
    SearchResult {
        value,
        best_move,
        bound: Bound::Exact,
        depth,
        stats,
    }
}

fn minimax_node<E: Evaluator + ?Sized>(
    ctx: &mut SearchContext,
    pos: &Position,
    eval: &E,
    depth: u8,
) -> (Value, Option<Move>) {
    ctx.stats.nodes += 1;

    if let Some(outcome) = terminal(pos) {
        ctx.stats.terminal_nodes += 1;
        return (outcome.value(), None);
    }

    if let Some(entry) = ctx.probe(pos) {
        if entry.is_exact() && entry.depth >= depth {
            ctx.stats.record_hit(Bound::Exact);
            return (entry.score, entry.best_move);
        }
    }

    if depth == 0 {
        return (leaf_value(ctx, pos, eval, -Value::INFINITE, Value::INFINITE), None);
    }

    let maximizing = pos.side_to_move().is_maximizing();
    let mut best = Value::worst_for(maximizing);
    let mut best_move = None;
    for child in successors(pos) {
        let (v, _) = minimax_node(ctx, &child.position, eval, depth - 1);
        let improves = if maximizing { v > best } else { v < best };
        if improves {
            best = v;
            best_move = Some(child.mv);
        }
    }

    ctx.store(pos, depth, best, best_move, Bound::Exact);
    (best, best_move)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::MaterialEval;
    use crate::movegen::legal_moves;
    use crate::search::SearchConfig;
    use crate::types::{Player, Tile};

    fn t(s: &str) -> Tile {
        s.parse().unwrap()
    }

    #[test]
    fn test_terminal_root_has_no_move() {
        let pos = Position::from_layout(Player::Dragon, t("A1"), &[], &[t("E5")]).unwrap();
        let mut ctx = SearchContext::default();
        let r = minimax(&mut ctx, &pos, &MaterialEval, 3);
        assert_eq!(r.value, Value::KING_WIN);
        assert_eq!(r.best_move, None);
    }

    #[test]
    fn test_king_finds_goal_in_one() {
        let pos = Position::from_layout(Player::King, t("C2"), &[], &[t("E5")]).unwrap();
        let mut ctx = SearchContext::without_table(SearchConfig {
            quiescence: false,
            ..SearchConfig::default()
        });
        let r = minimax(&mut ctx, &pos, &MaterialEval, 1);
        assert_eq!(r.value, Value::KING_WIN);
        assert_eq!(r.best_move, Some("C2C1".parse().unwrap()));
        assert_eq!(r.bound, Bound::Exact);
    }

    #[test]
    fn test_depth_one_from_start_is_min_over_children() {
        let pos = Position::start();
        let mut ctx = SearchContext::without_table(SearchConfig {
            quiescence: false,
            ..SearchConfig::default()
        });
        let r = minimax(&mut ctx, &pos, &MaterialEval, 1);
        let expected = legal_moves(&pos)
            .into_iter()
            .map(|mv| MaterialEval.evaluate(&pos.apply(mv).0))
            .min();
        assert_eq!(Some(r.value), expected);
        assert!(legal_moves(&pos).contains(&r.best_move.unwrap()));
        assert_eq!(r.stats.nodes, 1 + legal_moves(&pos).len() as u64);
    }

    #[test]
    fn test_exact_entries_are_reused() {
        let pos = Position::start();
        let mut ctx = SearchContext::default();
        let first = minimax(&mut ctx, &pos, &MaterialEval, 2);
        let second = minimax(&mut ctx, &pos, &MaterialEval, 2);
        assert_eq!(first.value, second.value);
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(second.stats.nodes, 1);
        assert_eq!(second.stats.exact_hits, 1);
        assert_eq!(ctx.stats().nodes, first.stats.nodes + 1);
    }
}
