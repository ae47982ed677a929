//! Compact nine-byte state

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{
    DEAD, DRAGON_BASE, FIRST_DRAGON_SLOT, NUM_PIECE_SLOTS, STATE_SIZE, STATUS_BITS, TURN_MASK,
    WHO_WON_MASK, WIN_MASK,
};
use crate::error::StateError;
use crate::types::{NUM_TILES, Player, Tile};

/// Decoded contents of one piece slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotContent {
    Guard(Tile),
    Dragon(Tile),
    Dead,
}

impl SlotContent {
    /// Decode a raw slot byte, `None` for values outside every range
    #[inline]
    pub const fn decode(raw: u8) -> Option<SlotContent> {
        if raw < DEAD {
            Some(SlotContent::Guard(Tile::from_index(raw)))
        } else if raw == DEAD {
            Some(SlotContent::Dead)
        } else if raw >= DRAGON_BASE && ((raw - DRAGON_BASE) as usize) < NUM_TILES {
            Some(SlotContent::Dragon(Tile::from_index(raw - DRAGON_BASE)))
        } else {
            None
        }
    }

    #[inline]
    pub const fn encode(self) -> u8 {
        match self {
            SlotContent::Guard(t) => t.raw(),
            SlotContent::Dragon(t) => t.raw() + DRAGON_BASE,
            SlotContent::Dead => DEAD,
        }
    }

    #[inline]
    pub const fn tile(self) -> Option<Tile> {
        match self {
            SlotContent::Guard(t) | SlotContent::Dragon(t) => Some(t),
            SlotContent::Dead => None,
        }
    }
}

/// The compact game state
///
/// Constructed only through validating paths, so every slot decodes and the
/// King tile is on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState([u8; STATE_SIZE]);

impl GameState {
    /// The standard opening: King C5, Guards B4 C4 D4, Dragons on rank 2, Dragon to move
    pub const START: GameState =
        GameState([14 << STATUS_BITS, 8, 13, 18, 101, 106, 111, 116, 121]);

    /// Validate raw bytes
    pub fn from_bytes(bytes: [u8; STATE_SIZE]) -> Result<GameState, StateError> {
        let king = bytes[0] >> STATUS_BITS;
        if king as usize >= NUM_TILES {
            return Err(StateError::InvalidSlot {
                slot: 0,
                value: bytes[0],
            });
        }
        let mut occupied = [false; NUM_TILES];
        occupied[king as usize] = true;
        for (slot, &raw) in bytes.iter().enumerate().skip(1) {
            let content =
                SlotContent::decode(raw).ok_or(StateError::InvalidSlot { slot, value: raw })?;
            if let Some(tile) = content.tile() {
                if occupied[tile.index()] {
                    return Err(StateError::Overlap(tile));
                }
                occupied[tile.index()] = true;
            }
        }
        Ok(GameState(bytes))
    }

    /// Raw bytes
    #[inline]
    pub const fn bytes(&self) -> &[u8; STATE_SIZE] {
        &self.0
    }

    #[inline]
    pub const fn king(&self) -> Tile {
        Tile::from_index(self.0[0] >> STATUS_BITS)
    }

    #[inline]
    pub(crate) fn set_king(&mut self, tile: Tile) {
        let status = self.0[0] & (TURN_MASK | WIN_MASK | WHO_WON_MASK);
        self.0[0] = (tile.raw() << STATUS_BITS) | status;
    }

    #[inline]
    pub const fn side_to_move(&self) -> Player {
        if self.0[0] & TURN_MASK != 0 {
            Player::King
        } else {
            Player::Dragon
        }
    }

    #[inline]
    pub(crate) fn set_side_to_move(&mut self, player: Player) {
        match player {
            Player::King => self.0[0] |= TURN_MASK,
            Player::Dragon => self.0[0] &= !TURN_MASK,
        }
    }

    /// Winner recorded in the status bits
    #[inline]
    pub const fn recorded_winner(&self) -> Option<Player> {
        if self.0[0] & WIN_MASK == 0 {
            None
        } else if self.0[0] & WHO_WON_MASK != 0 {
            Some(Player::King)
        } else {
            Some(Player::Dragon)
        }
    }

    #[inline]
    pub(crate) fn set_winner(&mut self, player: Player) {
        self.0[0] |= WIN_MASK;
        match player {
            Player::King => self.0[0] |= WHO_WON_MASK,
            Player::Dragon => self.0[0] &= !WHO_WON_MASK,
        }
    }

    #[inline]
    pub(crate) fn clear_status(&mut self) {
        self.0[0] &= !(WIN_MASK | WHO_WON_MASK);
    }

    /// Contents of piece slot `slot` (1..=8)
    #[inline]
    pub fn slot(&self, slot: usize) -> SlotContent {
        debug_assert!((1..=NUM_PIECE_SLOTS).contains(&slot));
        SlotContent::decode(self.0[slot]).unwrap_or(SlotContent::Dead)
    }

    #[inline]
    pub(crate) fn set_slot(&mut self, slot: usize, content: SlotContent) {
        debug_assert!((1..=NUM_PIECE_SLOTS).contains(&slot));
        self.0[slot] = content.encode();
    }

    /// All piece slots with their index
    pub fn slots(&self) -> impl Iterator<Item = (usize, SlotContent)> + '_ {
        (1..=NUM_PIECE_SLOTS).map(move |i| (i, self.slot(i)))
    }

    /// Tiles of live Guards in slot order
    pub fn guards(&self) -> impl Iterator<Item = Tile> + '_ {
        self.slots().filter_map(|(_, c)| match c {
            SlotContent::Guard(t) => Some(t),
            _ => None,
        })
    }

    /// Tiles of live Dragons in slot order
    pub fn dragons(&self) -> impl Iterator<Item = Tile> + '_ {
        self.slots().filter_map(|(_, c)| match c {
            SlotContent::Dragon(t) => Some(t),
            _ => None,
        })
    }

    /// Slot holding a live piece on `tile`
    pub(crate) fn slot_at(&self, tile: Tile) -> Option<usize> {
        self.slots().find(|(_, c)| c.tile() == Some(tile)).map(|(i, _)| i)
    }

    /// Whether slot `slot` started the game as a Dragon slot
    #[inline]
    pub const fn is_dragon_slot(slot: usize) -> bool {
        slot >= FIRST_DRAGON_SLOT
    }

    /// Table key (status bits masked out)
    #[inline]
    pub fn key(&self) -> StateKey {
        let mut bytes = self.0;
        bytes[0] &= !(WIN_MASK | WHO_WON_MASK);
        StateKey(bytes)
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::START
    }
}

/// Canonical table key: the state bytes without the win bits
///
/// Serialized as 18 lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct StateKey([u8; STATE_SIZE]);

impl StateKey {
    #[inline]
    pub const fn bytes(&self) -> &[u8; STATE_SIZE] {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for StateKey {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != STATE_SIZE * 2 || !s.is_ascii() {
            return Err(StateError::InvalidKey(s.to_string()));
        }
        let mut bytes = [0u8; STATE_SIZE];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|_| StateError::InvalidKey(s.to_string()))?;
        }
        if bytes[0] & (WIN_MASK | WHO_WON_MASK) != 0 {
            return Err(StateError::InvalidKey(s.to_string()));
        }
        GameState::from_bytes(bytes)?;
        Ok(StateKey(bytes))
    }
}

impl From<StateKey> for String {
    fn from(key: StateKey) -> String {
        key.to_string()
    }
}

impl TryFrom<String> for StateKey {
    type Error = StateError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
