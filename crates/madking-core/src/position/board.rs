//! Dense per-tile view of a `GameState`

use std::ops::Index;

use super::{GameState, SlotContent};
use crate::types::{Direction, NUM_TILES, Occupant, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpandedBoard([Occupant; NUM_TILES]);

impl ExpandedBoard {
    pub const EMPTY: ExpandedBoard = ExpandedBoard([Occupant::Empty; NUM_TILES]);

    /// Rebuild from scratch
    pub fn from_state(state: &GameState) -> ExpandedBoard {
        let mut board = ExpandedBoard::EMPTY;
        board.0[state.king().index()] = Occupant::King;
        for (_, content) in state.slots() {
            match content {
                SlotContent::Guard(t) => board.0[t.index()] = Occupant::Guard,
                SlotContent::Dragon(t) => board.0[t.index()] = Occupant::Dragon,
                SlotContent::Dead => {}
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, tile: Tile) -> Occupant {
        self.0[tile.index()]
    }

    #[inline]
    pub(crate) fn set(&mut self, tile: Tile, occupant: Occupant) {
        self.0[tile.index()] = occupant;
    }

    /// Tile and occupant one step in `dir`, `None` past the edge
    #[inline]
    pub fn neighbor(&self, tile: Tile, dir: Direction) -> Option<(Tile, Occupant)> {
        tile.neighbor(dir).map(|t| (t, self.get(t)))
    }

    /// On-board orthogonal neighbours
    pub fn orthogonal(&self, tile: Tile) -> impl Iterator<Item = (Tile, Occupant)> + '_ {
        Direction::ORTHOGONAL.into_iter().filter_map(move |d| self.neighbor(tile, d))
    }

    /// Number of orthogonal neighbours holding `occupant`
    #[inline]
    pub fn count_orthogonal(&self, tile: Tile, occupant: Occupant) -> usize {
        self.orthogonal(tile).filter(|&(_, o)| o == occupant).count()
    }

    /// Occupants in tile-index order
    pub fn iter(&self) -> impl Iterator<Item = (Tile, Occupant)> + '_ {
        Tile::all().map(|t| (t, self.get(t)))
    }
}

impl Index<Tile> for ExpandedBoard {
    type Output = Occupant;

    #[inline]
    fn index(&self, tile: Tile) -> &Occupant {
        &self.0[tile.index()]
    }
}
