//! Move representation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::Tile;
use crate::error::NotationError;

/// Inline move buffer
///
/// The King side rarely has more than 20 moves and the Dragon side tops out
/// at 40 (five Dragons, eight directions), so 32 covers nearly every position
/// without spilling to the heap.
pub type MoveList = SmallVec<[Move; 32]>;

/// A move from one tile to another
///
/// Steps, leaps and captures all share this shape; the rules engine decides
/// which one a move is from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Move {
    pub from: Tile,
    pub to: Tile,
}

impl Move {
    #[inline]
    pub const fn new(from: Tile, to: Tile) -> Move {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = NotationError;

    /// Parses `"C2C3"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let count = s.chars().count();
        if count != 4 || !s.is_ascii() {
            return Err(NotationError::Length {
                input: s.to_string(),
                expected: 4,
                actual: count,
            });
        }
        let from = s[..2].parse()?;
        let to = s[2..].parse()?;
        Ok(Move { from, to })
    }
}

impl From<Move> for String {
    fn from(mv: Move) -> String {
        mv.to_string()
    }
}

impl TryFrom<String> for Move {
    type Error = NotationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_notation() {
        let mv: Move = "C2C3".parse().unwrap();
        assert_eq!(mv.from, Tile::new(2, 1));
        assert_eq!(mv.to, Tile::new(2, 2));
        assert_eq!(mv.to_string(), "C2C3");
        assert_eq!("b4b3".parse::<Move>().unwrap().to_string(), "B4B3");
    }

    #[test]
    fn test_move_notation_errors() {
        assert!(matches!("C2C".parse::<Move>(), Err(NotationError::Length { .. })));
        assert_eq!("C2Z3".parse::<Move>(), Err(NotationError::File('Z')));
        assert_eq!("C0C3".parse::<Move>(), Err(NotationError::Rank('0')));
        assert!("C2ÄC".parse::<Move>().is_err());
    }
}
