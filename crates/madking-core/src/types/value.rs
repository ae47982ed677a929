//! Utility values
//!
//! Values are absolute: positive favours the King side no matter who is to move.
//! Terminal utilities sit at `±WIN`; heuristic evaluations must stay strictly
//! inside that range so a decided game always outranks a good-looking one.

use serde::{Deserialize, Serialize};

/// Utility / evaluation score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Value(i32);

impl Value {
    pub const ZERO: Value = Value(0);
    /// Utility of a drawn game
    pub const DRAW: Value = Value(0);
    /// Magnitude of a decided game
    pub const WIN: Value = Value(10_000);
    /// Utility of a King-side win
    pub const KING_WIN: Value = Value(10_000);
    /// Utility of a Dragon-side win
    pub const DRAGON_WIN: Value = Value(-10_000);
    /// Search window bound, strictly beyond any reachable value
    pub const INFINITE: Value = Value(32_001);

    #[inline]
    pub const fn new(v: i32) -> Value {
        Value(v)
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Whether the value encodes a decided game
    #[inline]
    pub const fn is_decisive(self) -> bool {
        self.0 >= Self::WIN.0 || self.0 <= -Self::WIN.0
    }

    /// Clamp into `[lo, hi]` without panicking on an inverted window
    #[inline]
    pub fn clamp_to(self, lo: Value, hi: Value) -> Value {
        self.min(hi).max(lo)
    }

    /// The worst possible value for `maximizing`
    #[inline]
    pub const fn worst_for(maximizing: bool) -> Value {
        if maximizing {
            Value(-Self::INFINITE.0)
        } else {
            Self::INFINITE
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::ZERO
    }
}

impl std::ops::Neg for Value {
    type Output = Value;

    #[inline]
    fn neg(self) -> Value {
        Value(-self.0)
    }
}

impl std::ops::Add for Value {
    type Output = Value;

    #[inline]
    fn add(self, rhs: Value) -> Value {
        Value(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Value {
    type Output = Value;

    #[inline]
    fn sub(self, rhs: Value) -> Value {
        Value(self.0 - rhs.0)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
