//! Text board

use std::fmt::Write;

use madking_core::types::BOARD_SIZE;
use madking_core::{Position, Tile};

/// Render the board with rank 5 on top and file letters underneath
///
/// ```text
/// 5 . . K . .
/// 4 . G G G .
/// 3 . . . . .
/// 2 D D D D D
/// 1 . . . . .
///   A B C D E
/// ```
pub fn board(pos: &Position) -> String {
    let mut out = String::new();
    for rank in (0..BOARD_SIZE as u8).rev() {
        let _ = write!(out, "{}", rank + 1);
        for file in 0..BOARD_SIZE as u8 {
            let occupant = pos.at(Tile::new(file, rank));
            let _ = write!(out, " {}", occupant.symbol());
        }
        out.push('\n');
    }
    out.push_str("  ");
    let files: Vec<String> = (0..BOARD_SIZE as u8)
        .map(|f| char::from(b'A' + f).to_string())
        .collect();
    out.push_str(&files.join(" "));
    out.push('\n');
    out
}

/// Board plus a line naming the side to move
pub fn with_status(pos: &Position) -> String {
    format!("{}{} to move\n", board(pos), pos.side_to_move().label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_board() {
        let expected = "\
5 . . K . .
4 . G G G .
3 . . . . .
2 D D D D D
1 . . . . .
  A B C D E
";
        assert_eq!(board(&Position::start()), expected);
    }

    #[test]
    fn test_status_line() {
        assert!(with_status(&Position::start()).ends_with("dragon to move\n"));
    }
}
