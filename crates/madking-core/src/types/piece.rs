//! Sides, tile contents and game outcomes

use serde::{Deserialize, Serialize};

use super::Value;

/// Side to move
///
/// The King side (King + Guards) maximizes `Value`, the Dragon side minimizes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    King,
    Dragon,
}

impl Player {
    /// The other side
    #[inline]
    pub const fn opponent(self) -> Player {
        match self {
            Player::King => Player::Dragon,
            Player::Dragon => Player::King,
        }
    }

    /// Whether this side maximizes utility
    #[inline]
    pub const fn is_maximizing(self) -> bool {
        matches!(self, Player::King)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Player::King => "king",
            Player::Dragon => "dragon",
        }
    }
}

impl std::ops::Not for Player {
    type Output = Player;

    #[inline]
    fn not(self) -> Player {
        self.opponent()
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Contents of one tile in the expanded board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Occupant {
    #[default]
    Empty,
    King,
    Guard,
    Dragon,
}

impl Occupant {
    /// King or Guard
    #[inline]
    pub const fn is_allied(self) -> bool {
        matches!(self, Occupant::King | Occupant::Guard)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Occupant::Empty)
    }

    /// Side owning the piece, `None` for an empty tile
    #[inline]
    pub const fn owner(self) -> Option<Player> {
        match self {
            Occupant::Empty => None,
            Occupant::King | Occupant::Guard => Some(Player::King),
            Occupant::Dragon => Some(Player::Dragon),
        }
    }

    /// One-character board symbol
    pub const fn symbol(self) -> char {
        match self {
            Occupant::Empty => '.',
            Occupant::King => 'K',
            Occupant::Guard => 'G',
            Occupant::Dragon => 'D',
        }
    }
}

/// Result of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    KingWin,
    DragonWin,
    /// The side to move had no legal move
    Draw,
}

impl Outcome {
    /// Exact utility of a terminal position with this outcome
    #[inline]
    pub const fn value(self) -> Value {
        match self {
            Outcome::KingWin => Value::KING_WIN,
            Outcome::DragonWin => Value::DRAGON_WIN,
            Outcome::Draw => Value::DRAW,
        }
    }

    /// The winning side, `None` for a draw
    #[inline]
    pub const fn winner(self) -> Option<Player> {
        match self {
            Outcome::KingWin => Some(Player::King),
            Outcome::DragonWin => Some(Player::Dragon),
            Outcome::Draw => None,
        }
    }

    #[inline]
    pub const fn for_winner(player: Player) -> Outcome {
        match player {
            Player::King => Outcome::KingWin,
            Player::Dragon => Outcome::DragonWin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::King.opponent(), Player::Dragon);
        assert_eq!(!Player::Dragon, Player::King);
        assert!(Player::King.is_maximizing());
        assert!(!Player::Dragon.is_maximizing());
    }

    #[test]
    fn test_occupant_owner() {
        assert_eq!(Occupant::Guard.owner(), Some(Player::King));
        assert_eq!(Occupant::Dragon.owner(), Some(Player::Dragon));
        assert_eq!(Occupant::Empty.owner(), None);
        assert!(Occupant::King.is_allied());
        assert!(!Occupant::Dragon.is_allied());
    }

    #[test]
    fn test_outcome_values() {
        assert_eq!(Outcome::KingWin.value(), Value::KING_WIN);
        assert_eq!(Outcome::DragonWin.value(), Value::DRAGON_WIN);
        assert_eq!(Outcome::Draw.value(), Value::DRAW);
        assert_eq!(Outcome::for_winner(Player::Dragon), Outcome::DragonWin);
        assert_eq!(Outcome::Draw.winner(), None);
    }
}
