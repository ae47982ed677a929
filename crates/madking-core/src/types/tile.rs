//! Tile (board square)
//!
//! Tiles are numbered `file * BOARD_SIZE + rank`, where `file` 0..5 is A..E and
//! `rank` 0..5 is the rank offset of ranks 1..5.
//!
//! ```text
//! 5   4  9 14 19 24
//! 4   3  8 13 18 23
//! 3   2  7 12 17 22
//! 2   1  6 11 16 21
//! 1   0  5 10 15 20
//!
//!     A  B  C  D  E
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::NotationError;

/// Width and height of the board
pub const BOARD_SIZE: usize = 5;

/// Number of tiles
pub const NUM_TILES: usize = BOARD_SIZE * BOARD_SIZE;

/// Rank offset the King starts on (rank 5)
pub const HOME_RANK: u8 = 4;

/// Rank offset the King must reach to win (rank 1)
pub const GOAL_RANK: u8 = 0;

/// A tile index in `0..NUM_TILES`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Tile(u8);

impl Tile {
    /// Tile from file (0 = A) and rank offset (0 = rank 1)
    ///
    /// Panics when either coordinate is off the board.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Tile {
        assert!(
            (file as usize) < BOARD_SIZE && (rank as usize) < BOARD_SIZE,
            "tile coordinates out of range"
        );
        Tile(file * BOARD_SIZE as u8 + rank)
    }

    /// Tile from a raw index
    ///
    /// Panics when `index >= NUM_TILES`.
    #[inline]
    pub const fn from_index(index: u8) -> Tile {
        assert!((index as usize) < NUM_TILES, "tile index out of range");
        Tile(index)
    }

    /// Tile from a raw index, `None` when off the board
    #[inline]
    pub const fn try_from_index(index: u8) -> Option<Tile> {
        if (index as usize) < NUM_TILES {
            Some(Tile(index))
        } else {
            None
        }
    }

    /// Tile from coordinates, `None` when off the board
    #[inline]
    pub const fn try_new(file: i8, rank: i8) -> Option<Tile> {
        if file < 0 || rank < 0 || file as usize >= BOARD_SIZE || rank as usize >= BOARD_SIZE {
            None
        } else {
            Some(Tile(file as u8 * BOARD_SIZE as u8 + rank as u8))
        }
    }

    /// Raw index as `u8` (the encoding stored in `GameState`)
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Index for array access
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// File (0 = A)
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 / BOARD_SIZE as u8
    }

    /// Rank offset (0 = rank 1)
    #[inline]
    pub const fn rank_offset(self) -> u8 {
        self.0 % BOARD_SIZE as u8
    }

    /// Whether the tile lies on the rank the King is racing to
    #[inline]
    pub const fn is_goal_rank(self) -> bool {
        self.rank_offset() == GOAL_RANK
    }

    /// Adjacent tile in `dir`, `None` past the edge
    #[inline]
    pub const fn neighbor(self, dir: Direction) -> Option<Tile> {
        let (df, dr) = dir.delta();
        Tile::try_new(self.file() as i8 + df, self.rank_offset() as i8 + dr)
    }

    /// All tiles in index order
    pub fn all() -> impl Iterator<Item = Tile> {
        (0..NUM_TILES as u8).map(Tile)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.file()) as char, (b'1' + self.rank_offset()) as char)
    }
}

impl FromStr for Tile {
    type Err = NotationError;

    /// Parses `"C2"` (file letter is case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(NotationError::Length {
                input: s.to_string(),
                expected: 2,
                actual: chars.len(),
            });
        }
        let file = chars[0].to_ascii_uppercase();
        if !('A'..='E').contains(&file) {
            return Err(NotationError::File(chars[0]));
        }
        let rank = chars[1];
        if !('1'..='5').contains(&rank) {
            return Err(NotationError::Rank(rank));
        }
        Ok(Tile::new(file as u8 - b'A', rank as u8 - b'1'))
    }
}

/// The eight compass directions
///
/// North points toward rank 5, East toward file E.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// Orthogonal directions
    pub const ORTHOGONAL: [Direction; 4] =
        [Direction::North, Direction::South, Direction::East, Direction::West];

    /// Orthogonal and diagonal directions
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// (file delta, rank delta)
    #[inline]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (-1, -1),
        }
    }

    #[inline]
    pub const fn is_orthogonal(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::South | Direction::East | Direction::West
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_coordinates() {
        let c5 = Tile::new(2, 4);
        assert_eq!(c5.index(), 14);
        assert_eq!(c5.file(), 2);
        assert_eq!(c5.rank_offset(), 4);
        assert_eq!(c5.to_string(), "C5");
        assert!(!c5.is_goal_rank());
        assert!(Tile::new(3, 0).is_goal_rank());
    }

    #[test]
    fn test_tile_parse() {
        assert_eq!("a1".parse::<Tile>().unwrap(), Tile::from_index(0));
        assert_eq!("E5".parse::<Tile>().unwrap(), Tile::from_index(24));
        assert_eq!("F1".parse::<Tile>(), Err(NotationError::File('F')));
        assert_eq!("A6".parse::<Tile>(), Err(NotationError::Rank('6')));
        assert!(matches!("A".parse::<Tile>(), Err(NotationError::Length { .. })));
    }

    #[test]
    fn test_neighbors_at_edges() {
        let a1 = Tile::from_index(0);
        assert_eq!(a1.neighbor(Direction::South), None);
        assert_eq!(a1.neighbor(Direction::West), None);
        assert_eq!(a1.neighbor(Direction::North), Some(Tile::from_index(1)));
        assert_eq!(a1.neighbor(Direction::East), Some(Tile::from_index(5)));
        assert_eq!(a1.neighbor(Direction::NorthEast), Some(Tile::from_index(6)));

        let e5 = Tile::from_index(24);
        assert_eq!(e5.neighbor(Direction::North), None);
        assert_eq!(e5.neighbor(Direction::East), None);
        assert_eq!(e5.neighbor(Direction::SouthWest), Some(Tile::from_index(18)));
    }

    #[test]
    fn test_try_from_index() {
        assert_eq!(Tile::try_from_index(24), Some(Tile::from_index(24)));
        assert_eq!(Tile::try_from_index(25), None);
    }

    #[test]
    #[should_panic(expected = "tile index out of range")]
    fn test_from_index_out_of_range_panics() {
        let _ = Tile::from_index(25);
    }
}
