//! Table entry

use serde::{Deserialize, Serialize};

use crate::types::{Move, Value};

/// How a stored score relates to the true value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bound {
    /// Exact value
    Exact,
    /// Fail-high: the true value is at least the score (raises alpha)
    Lower,
    /// Fail-low: the true value is at most the score (lowers beta)
    Upper,
}

impl Bound {
    /// Bound for `value` searched inside `(alpha, beta)`
    #[inline]
    pub fn classify(value: Value, alpha: Value, beta: Value) -> Bound {
        if value <= alpha {
            Bound::Upper
        } else if value >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TTEntry {
    /// Remaining depth the score was searched to
    pub depth: u8,
    pub score: Value,
    pub best_move: Option<Move>,
    pub bound: Bound,
    /// `SearchContext` age at store time
    pub age: u32,
}

impl TTEntry {
    #[inline]
    pub const fn new(
        depth: u8,
        score: Value,
        best_move: Option<Move>,
        bound: Bound,
        age: u32,
    ) -> Self {
        TTEntry {
            depth,
            score,
            best_move,
            bound,
            age,
        }
    }

    #[inline]
    pub fn is_exact(&self) -> bool {
        self.bound == Bound::Exact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let (a, b) = (Value::new(-10), Value::new(10));
        assert_eq!(Bound::classify(Value::new(-10), a, b), Bound::Upper);
        assert_eq!(Bound::classify(Value::new(10), a, b), Bound::Lower);
        assert_eq!(Bound::classify(Value::new(0), a, b), Bound::Exact);
    }
}
