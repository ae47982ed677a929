//! Alpha-beta against minimax on hand-picked positions

use crate::eval::MaterialEval;
use crate::position::Position;
use crate::search::{SearchAlgorithm, SearchConfig, SearchContext};

const POSITIONS: &[&str] = &[
    "d Kc5 Gb4 Gc4 Gd4 Da2 Db2 Dc2 Dd2 De2",
    "k Kc5 Gb4 Gc4 Gd4 Da3 Db2 Dc3 Dd2 De2",
    "k Kc3 Ga5 Db3 Dd3 Dc2 De1",
    "d Kc2 Gb3 Da1 Db1 Dd1 De1 Dc4",
    "k Kb3 Gc3 Gb4 Dc2 Dd3 Da1 De5",
    "d Ka4 Gb4 Gb3 Dc4 Dc3 Da2 Db2",
];

fn value(algorithm: SearchAlgorithm, pos: &Position, depth: u8, quiescence: bool) -> crate::Value {
    let mut ctx = SearchContext::without_table(SearchConfig {
        quiescence,
        ..SearchConfig::default()
    });
    algorithm.search(&mut ctx, pos, &MaterialEval, depth).value
}

#[test]
fn alpha_beta_matches_minimax_without_quiescence() {
    for text in POSITIONS {
        let pos: Position = text.parse().unwrap();
        for depth in 1..=3 {
            assert_eq!(
                value(SearchAlgorithm::AlphaBeta, &pos, depth, false),
                value(SearchAlgorithm::Minimax, &pos, depth, false),
                "{text} at depth {depth}"
            );
        }
    }
}

#[test]
fn alpha_beta_matches_minimax_with_quiescence() {
    for text in POSITIONS {
        let pos: Position = text.parse().unwrap();
        for depth in 1..=2 {
            assert_eq!(
                value(SearchAlgorithm::AlphaBeta, &pos, depth, true),
                value(SearchAlgorithm::Minimax, &pos, depth, true),
                "{text} at depth {depth}"
            );
        }
    }
}

#[test]
fn alpha_beta_visits_no_more_nodes_than_minimax() {
    let pos = Position::start();
    let mut ab = SearchContext::without_table(SearchConfig::default());
    let mut mm = SearchContext::without_table(SearchConfig::default());
    let a = SearchAlgorithm::AlphaBeta.search(&mut ab, &pos, &MaterialEval, 3);
    let m = SearchAlgorithm::Minimax.search(&mut mm, &pos, &MaterialEval, 3);
    assert!(a.stats.nodes <= m.stats.nodes);
    assert_eq!(a.best_move, m.best_move);
}
