//! JSON-lines records written by the self-play driver

use madking_core::tt::TableStats;
use madking_core::{Move, Outcome, Player, SearchStats, Value};
use serde::Serialize;

use crate::game::{EndReason, GameResult, MoveEvent};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename = "ply")]
pub struct PlyRecord {
    pub game: u32,
    pub ply: u32,
    pub side: Player,
    /// Position text before the move
    pub before: String,
    #[serde(rename = "move")]
    pub mv: Move,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub defected: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableStats>,
}

impl PlyRecord {
    pub fn new(game: u32, event: &MoveEvent<'_>) -> Self {
        PlyRecord {
            game,
            ply: event.ply,
            side: event.side,
            before: event.before.to_string(),
            mv: event.mv,
            captured: event.effect.captured.map(|t| t.to_string()),
            defected: event.effect.defected.iter().map(|t| t.to_string()).collect(),
            value: event.search.map(|r| r.value),
            depth: event.search.map(|r| r.depth),
            search: event.search.map(|r| r.stats),
            table: event.table.copied(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename = "result")]
pub struct ResultRecord {
    pub game: u32,
    pub outcome: Option<Outcome>,
    pub reason: EndReason,
    pub plies: u32,
    pub opening: String,
    pub final_position: String,
}

impl ResultRecord {
    pub fn new(game: u32, opening: &str, result: &GameResult) -> Self {
        ResultRecord {
            game,
            outcome: result.outcome,
            reason: result.reason,
            plies: result.plies,
            opening: opening.to_string(),
            final_position: result.final_position.to_string(),
        }
    }
}

/// Win/draw tally across games
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub king_wins: u32,
    pub dragon_wins: u32,
    pub draws: u32,
    pub unfinished: u32,
}

impl Tally {
    pub fn record(&mut self, outcome: Option<Outcome>) {
        match outcome {
            Some(Outcome::KingWin) => self.king_wins += 1,
            Some(Outcome::DragonWin) => self.dragon_wins += 1,
            Some(Outcome::Draw) => self.draws += 1,
            None => self.unfinished += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.king_wins + self.dragon_wins + self.draws + self.unfinished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use madking_core::Position;

    #[test]
    fn test_ply_record_json() {
        let before = Position::start();
        let mv: Move = "A2A3".parse().unwrap();
        let (after, effect) = before.apply(mv);
        let event = MoveEvent {
            ply: 1,
            side: Player::Dragon,
            label: "engine",
            before,
            after,
            mv,
            effect: &effect,
            search: None,
            table: None,
        };
        let json = serde_json::to_value(PlyRecord::new(3, &event)).unwrap();
        assert_eq!(json["type"], "ply");
        assert_eq!(json["game"], 3);
        assert_eq!(json["side"], "dragon");
        assert_eq!(json["move"], "A2A3");
        assert!(json.get("value").is_none());
        assert!(json.get("defected").is_none());
    }

    #[test]
    fn test_tally() {
        let mut tally = Tally::default();
        tally.record(Some(Outcome::KingWin));
        tally.record(Some(Outcome::Draw));
        tally.record(None);
        assert_eq!(tally.games(), 3);
        assert_eq!(tally.king_wins, 1);
        assert_eq!(tally.unfinished, 1);
    }
}
