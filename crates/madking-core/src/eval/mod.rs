//! Evaluation capability
//!
//! The search only needs `Evaluator::evaluate`; concrete heuristics live with
//! the caller. Results must stay strictly inside `(DRAGON_WIN, KING_WIN)`.

mod material;

pub use material::MaterialEval;

use crate::position::Position;
use crate::types::Value;

/// Static evaluation of a non-terminal position, King-positive
pub trait Evaluator {
    fn evaluate(&self, pos: &Position) -> Value;

    /// Name used in logs and records
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Evaluator for F
where
    F: Fn(&Position) -> Value,
{
    #[inline]
    fn evaluate(&self, pos: &Position) -> Value {
        self(pos)
    }

    fn name(&self) -> &str {
        "closure"
    }
}
