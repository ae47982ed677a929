//! Position text form
//!
//! `"<turn> K<tile> G<tile>* D<tile>*"`, e.g. the opening is
//! `"d Kc5 Gb4 Gc4 Gd4 Da2 Db2 Dc2 Dd2 De2"`. Tokens after the turn may come
//! in any order; `Display` writes the King, then Guards and Dragons in slot order.

use std::fmt;
use std::str::FromStr;

use super::Position;
use crate::error::StateError;
use crate::types::{Player, Tile};

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let turn = match self.side_to_move() {
            Player::King => 'k',
            Player::Dragon => 'd',
        };
        write!(f, "{turn} K{}", lower(self.king()))?;
        for g in self.state().guards() {
            write!(f, " G{}", lower(g))?;
        }
        for d in self.state().dragons() {
            write!(f, " D{}", lower(d))?;
        }
        Ok(())
    }
}

fn lower(tile: Tile) -> String {
    tile.to_string().to_ascii_lowercase()
}

impl FromStr for Position {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let turn = match tokens.next() {
            None => return Err(StateError::MissingTurn),
            Some(t) if t.eq_ignore_ascii_case("k") => Player::King,
            Some(t) if t.eq_ignore_ascii_case("d") => Player::Dragon,
            Some(t) => return Err(StateError::InvalidTurn(t.to_string())),
        };

        let mut king = None;
        let mut guards = Vec::new();
        let mut dragons = Vec::new();
        for token in tokens {
            let mut chars = token.chars();
            let kind = chars.next().map(|c| c.to_ascii_uppercase());
            let tile: Tile = match chars.as_str().parse() {
                Ok(tile) => tile,
                Err(e) if matches!(kind, Some('K' | 'G' | 'D')) => return Err(e.into()),
                Err(_) => return Err(StateError::InvalidToken(token.to_string())),
            };
            match kind {
                Some('K') => {
                    if king.replace(tile).is_some() {
                        return Err(StateError::DuplicateKing);
                    }
                }
                Some('G') => guards.push(tile),
                Some('D') => dragons.push(tile),
                _ => return Err(StateError::InvalidToken(token.to_string())),
            }
        }

        let king = king.ok_or(StateError::MissingKing)?;
        Position::from_layout(turn, king, &guards, &dragons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotationError;

    const START: &str = "d Kc5 Gb4 Gc4 Gd4 Da2 Db2 Dc2 Dd2 De2";

    #[test]
    fn test_start_text() {
        assert_eq!(Position::start().to_string(), START);
        assert_eq!(START.parse::<Position>().unwrap(), Position::start());
    }

    #[test]
    fn test_parse_any_order_and_case() {
        let pos: Position = "K De2 Kc5 GD4 da2".parse().unwrap();
        assert_eq!(pos.side_to_move(), Player::King);
        assert_eq!(pos.guard_count(), 1);
        assert_eq!(pos.dragon_count(), 2);
        assert_eq!(pos.to_string(), "k Kc5 Gd4 De2 Da2");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Position>(), Err(StateError::MissingTurn));
        assert_eq!("x Kc5".parse::<Position>(), Err(StateError::InvalidTurn("x".into())));
        assert_eq!("d Gc4".parse::<Position>(), Err(StateError::MissingKing));
        assert_eq!("d Kc5 Ka1".parse::<Position>(), Err(StateError::DuplicateKing));
        assert_eq!("d Kc5 Xa1".parse::<Position>(), Err(StateError::InvalidToken("Xa1".into())));
        assert_eq!(
            "d Kc5 Gz1".parse::<Position>(),
            Err(StateError::Notation(NotationError::File('z')))
        );
        let overlap = StateError::Overlap("C5".parse().unwrap());
        assert_eq!("d Kc5 Dc5".parse::<Position>(), Err(overlap));
    }
}
