//! Position: compact state plus its expanded board

use smallvec::SmallVec;

use super::{
    DEAD, ExpandedBoard, FIRST_DRAGON_SLOT, GameState, NUM_GUARD_SLOTS, NUM_PIECE_SLOTS,
    STATE_SIZE, STATUS_BITS, SlotContent, StateKey, defection,
};
use crate::error::{RulesError, StateError};
use crate::movegen;
use crate::types::{Move, NUM_TILES, Occupant, Outcome, Player, Tile};

/// What a move did besides relocating the mover
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveEffect {
    /// Tile of the Dragon removed by a custodial capture
    pub captured: Option<Tile>,
    /// Guards that defected, in conversion order
    pub defected: SmallVec<[Tile; 3]>,
}

impl MoveEffect {
    /// Whether the piece counts changed
    #[inline]
    pub fn is_material_change(&self) -> bool {
        self.captured.is_some() || !self.defected.is_empty()
    }
}

/// A game position
///
/// The two halves are only mutated together, so `board` always equals
/// `ExpandedBoard::from_state(&state)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    state: GameState,
    board: ExpandedBoard,
}

impl Position {
    /// The standard opening position
    pub fn start() -> Position {
        Position::new(GameState::START)
    }

    pub fn new(state: GameState) -> Position {
        Position {
            board: ExpandedBoard::from_state(&state),
            state,
        }
    }

    /// Build a position from piece lists
    ///
    /// Guards fill slots 1..=3, Dragons fill slots 4..=8 and then any Guard
    /// slot left over. Defections are not resolved.
    pub fn from_layout(
        turn: Player,
        king: Tile,
        guards: &[Tile],
        dragons: &[Tile],
    ) -> Result<Position, StateError> {
        if guards.len() > NUM_GUARD_SLOTS {
            return Err(StateError::TooManyGuards(guards.len()));
        }
        if guards.len() + dragons.len() > NUM_PIECE_SLOTS {
            return Err(StateError::TooManyPieces(guards.len() + dragons.len()));
        }

        let mut bytes = [DEAD; STATE_SIZE];
        bytes[0] = king.raw() << STATUS_BITS;
        for (i, &g) in guards.iter().enumerate() {
            bytes[1 + i] = SlotContent::Guard(g).encode();
        }
        let dragon_slots =
            (FIRST_DRAGON_SLOT..=NUM_PIECE_SLOTS).chain(1 + guards.len()..FIRST_DRAGON_SLOT);
        for (slot, &d) in dragon_slots.zip(dragons) {
            bytes[slot] = SlotContent::Dragon(d).encode();
        }

        let mut state = GameState::from_bytes(bytes)?;
        state.set_side_to_move(turn);
        Ok(Position::new(state))
    }

    #[inline]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub const fn board(&self) -> &ExpandedBoard {
        &self.board
    }

    #[inline]
    pub const fn side_to_move(&self) -> Player {
        self.state.side_to_move()
    }

    #[inline]
    pub const fn king(&self) -> Tile {
        self.state.king()
    }

    #[inline]
    pub fn at(&self, tile: Tile) -> Occupant {
        self.board.get(tile)
    }

    #[inline]
    pub fn key(&self) -> StateKey {
        self.state.key()
    }

    pub fn guard_count(&self) -> usize {
        self.state.guards().count()
    }

    pub fn dragon_count(&self) -> usize {
        self.state.dragons().count()
    }

    /// Apply a move known to be legal
    ///
    /// Moves the piece, removes a flanked Dragon when a King-side piece lands
    /// on it, resolves defections, hands the turn over and clears any cached
    /// win.
    pub fn do_move(&mut self, mv: Move) -> MoveEffect {
        let mover = self.board.get(mv.from);
        debug_assert!(!mover.is_empty(), "no piece on {}", mv.from);

        let mut effect = MoveEffect::default();

        if mover.is_allied() && self.board.get(mv.to) == Occupant::Dragon {
            if let Some(slot) = self.state.slot_at(mv.to) {
                self.state.set_slot(slot, SlotContent::Dead);
                effect.captured = Some(mv.to);
            }
        }

        match mover {
            Occupant::King => self.state.set_king(mv.to),
            Occupant::Guard | Occupant::Dragon => {
                if let Some(slot) = self.state.slot_at(mv.from) {
                    let moved = if mover == Occupant::Guard {
                        SlotContent::Guard(mv.to)
                    } else {
                        SlotContent::Dragon(mv.to)
                    };
                    self.state.set_slot(slot, moved);
                }
            }
            Occupant::Empty => {}
        }
        self.board.set(mv.from, Occupant::Empty);
        self.board.set(mv.to, mover);

        effect.defected = defection::resolve(&mut self.state, &mut self.board);

        self.state.set_side_to_move(self.side_to_move().opponent());
        self.state.clear_status();

        debug_assert_eq!(self.validate(), Ok(()));
        effect
    }

    /// Pure form of `do_move`
    #[inline]
    pub fn apply(&self, mv: Move) -> (Position, MoveEffect) {
        let mut next = *self;
        let effect = next.do_move(mv);
        (next, effect)
    }

    /// Check legality, then apply in place
    ///
    /// Leaves the position untouched on error.
    pub fn apply_legal(&mut self, mv: Move) -> Result<MoveEffect, RulesError> {
        if movegen::terminal(self).is_some() {
            return Err(RulesError::GameOver);
        }
        if !movegen::is_legal(self, mv) {
            return Err(RulesError::IllegalMove { mv });
        }
        Ok(self.do_move(mv))
    }

    /// Record a decided win in the status bits
    ///
    /// Draws have no encoding and are left uncached.
    pub fn mark_terminal(&mut self, outcome: Outcome) {
        if let Some(winner) = outcome.winner() {
            self.state.set_winner(winner);
        }
    }

    /// Same layout with a different side to move
    pub(crate) fn with_side_to_move(&self, player: Player) -> Position {
        let mut pos = *self;
        pos.state.set_side_to_move(player);
        pos
    }

    /// Check every structural invariant
    pub fn validate(&self) -> Result<(), StateError> {
        GameState::from_bytes(*self.state.bytes())?;
        let expected = ExpandedBoard::from_state(&self.state);
        for i in 0..NUM_TILES as u8 {
            let tile = Tile::from_index(i);
            if expected.get(tile) != self.board.get(tile) {
                return Err(StateError::BoardMismatch(tile));
            }
        }
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::start()
    }
}

impl From<GameState> for Position {
    fn from(state: GameState) -> Self {
        Position::new(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Tile {
        s.parse().unwrap()
    }

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    #[test]
    fn test_start_position() {
        let pos = Position::start();
        assert_eq!(pos.side_to_move(), Player::Dragon);
        assert_eq!(pos.king(), t("C5"));
        assert_eq!(pos.guard_count(), 3);
        assert_eq!(pos.dragon_count(), 5);
        assert_eq!(pos.validate(), Ok(()));
    }

    #[test]
    fn test_do_move_dragon_step() {
        let mut pos = Position::start();
        let effect = pos.do_move(mv("C2C3"));
        assert!(!effect.is_material_change());
        assert_eq!(pos.at(t("C2")), Occupant::Empty);
        assert_eq!(pos.at(t("C3")), Occupant::Dragon);
        assert_eq!(pos.side_to_move(), Player::King);
        assert_eq!(pos.dragon_count(), 5);
    }

    #[test]
    fn test_do_move_guard_capture() {
        // Dragon on C3 flanked by the Guard on C4; the Guard on B3 captures it
        let mut pos =
            Position::from_layout(Player::King, t("A5"), &[t("B3"), t("C4")], &[t("C3"), t("E1")])
                .unwrap();
        let effect = pos.do_move(mv("B3C3"));
        assert_eq!(effect.captured, Some(t("C3")));
        assert!(effect.is_material_change());
        assert_eq!(pos.at(t("C3")), Occupant::Guard);
        assert_eq!(pos.dragon_count(), 1);
        assert_eq!(pos.validate(), Ok(()));
    }

    #[test]
    fn test_do_move_clears_status() {
        let mut pos = Position::start();
        pos.mark_terminal(Outcome::DragonWin);
        assert_eq!(pos.state().recorded_winner(), Some(Player::Dragon));
        pos.do_move(mv("A2A3"));
        assert_eq!(pos.state().recorded_winner(), None);
    }

    #[test]
    fn test_mark_terminal_draw_is_not_cached() {
        let mut pos = Position::start();
        pos.mark_terminal(Outcome::Draw);
        assert_eq!(pos.state(), Position::start().state());
    }

    #[test]
    fn test_apply_is_pure() {
        let pos = Position::start();
        let (next, _) = pos.apply(mv("A2B3"));
        assert_eq!(pos, Position::start());
        assert_eq!(next.at(t("B3")), Occupant::Dragon);
    }

    #[test]
    fn test_apply_legal_rejects_without_mutating() {
        let mut pos = Position::start();
        let err = pos.apply_legal(mv("C5C4")).unwrap_err();
        assert_eq!(err, RulesError::IllegalMove { mv: mv("C5C4") });
        assert_eq!(pos, Position::start());
        assert!(pos.apply_legal(mv("C2C3")).is_ok());
    }

    #[test]
    fn test_from_layout_overflow_dragons_use_guard_slots() {
        let dragons = [t("A1"), t("B1"), t("C1"), t("D1"), t("E1"), t("A2"), t("B2")];
        let pos = Position::from_layout(Player::Dragon, t("C5"), &[t("C4")], &dragons).unwrap();
        assert_eq!(pos.dragon_count(), 7);
        assert_eq!(pos.guard_count(), 1);
        assert_eq!(pos.state().slot(2), SlotContent::Dragon(t("A2")));
    }

    #[test]
    fn test_from_layout_errors() {
        let four = [t("A1"), t("B1"), t("C1"), t("D1")];
        assert_eq!(
            Position::from_layout(Player::King, t("C5"), &four, &[]),
            Err(StateError::TooManyGuards(4))
        );
        assert_eq!(
            Position::from_layout(Player::King, t("C5"), &[t("C5")], &[]),
            Err(StateError::Overlap(t("C5")))
        );
    }
}
