//! Game loop shared by the play and self-play binaries

use std::io::{self, BufRead, Cursor, Write};

use anyhow::{Context, Result, bail};
use madking_core::movegen::{is_legal, legal_moves, terminal};
use madking_core::tt::TableStats;
use madking_core::{
    MaterialEval, Move, MoveEffect, Outcome, Player, Position, RulesError, SearchContext,
    SearchLimits, SearchResult,
};
use rand::seq::IndexedRandom;
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::render;
use crate::worker::BackgroundSearch;

/// A chosen move, with the search behind it for engine players
pub struct Choice {
    pub mv: Move,
    pub search: Option<SearchResult>,
    /// Table counters right after the search
    pub table: Option<TableStats>,
}

/// Anything that can pick a move for one side
pub trait MoveSource {
    fn label(&self) -> &str;

    /// Pick a move for the side to move; `None` means the player quit
    fn choose(&mut self, pos: &Position) -> Result<Option<Choice>>;

    /// Called after every move played in the game, by either side
    fn observe(&mut self, _effect: &MoveEffect) {}
}

/// Engine player: iterative deepening on a background worker
pub struct EngineSource {
    label: String,
    config: EngineConfig,
    /// `None` only while a search is running
    ctx: Option<SearchContext>,
}

impl EngineSource {
    pub fn new(label: impl Into<String>, config: EngineConfig) -> Self {
        let ctx = config.build_context();
        EngineSource {
            label: label.into(),
            config,
            ctx: Some(ctx),
        }
    }

    pub fn context(&self) -> Option<&SearchContext> {
        self.ctx.as_ref()
    }

    /// Search `pos` and keep the context for the next move
    ///
    /// With a deadline the worker is stopped once it passes; the iteration in
    /// flight still completes.
    pub fn search(&mut self, pos: &Position) -> Result<SearchResult> {
        let ctx = self.ctx.take().context("engine context lost by an earlier failure")?;
        let mut job = BackgroundSearch::spawn(
            ctx,
            *pos,
            MaterialEval,
            self.config.algorithm,
            SearchLimits::depth(self.config.max_depth),
        );
        let finished = match self.config.deadline() {
            Some(deadline) => match job.wait_timeout(deadline)? {
                Some(finished) => finished,
                None => {
                    log::debug!("{}: deadline {deadline:?} passed, stopping", self.label);
                    job.stop();
                    job.wait()?
                }
            },
            None => job.wait()?,
        };
        self.ctx = Some(finished.ctx);
        Ok(finished.result)
    }
}

impl MoveSource for EngineSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn choose(&mut self, pos: &Position) -> Result<Option<Choice>> {
        let result = self.search(pos)?;
        let mv = result
            .best_move
            .with_context(|| format!("{}: search returned no move for {pos}", self.label))?;
        log::debug!(
            "{}: {mv} value {} depth {} nodes {}",
            self.label,
            result.value,
            result.depth,
            result.stats.nodes
        );
        Ok(Some(Choice {
            mv,
            search: Some(result),
            table: self.ctx.as_ref().map(|ctx| *ctx.table().stats()),
        }))
    }

    fn observe(&mut self, effect: &MoveEffect) {
        if let Some(ctx) = self.ctx.as_mut() {
            ctx.observe(effect);
        }
    }
}

/// Line-based move input
///
/// `Stdin` locks per line, so two human players can share the terminal.
pub trait LineInput {
    /// Append one line to `buf`; `Ok(0)` at end of input
    fn next_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl LineInput for io::Stdin {
    fn next_line(&mut self, buf: &mut String) -> io::Result<usize> {
        self.read_line(buf)
    }
}

impl<T: AsRef<[u8]>> LineInput for Cursor<T> {
    fn next_line(&mut self, buf: &mut String) -> io::Result<usize> {
        self.read_line(buf)
    }
}

/// Human player reading moves like `C2C3`
pub struct HumanSource<R, W> {
    label: String,
    input: R,
    output: W,
}

impl<R: LineInput, W: Write> HumanSource<R, W> {
    pub fn new(label: impl Into<String>, input: R, output: W) -> Self {
        HumanSource {
            label: label.into(),
            input,
            output,
        }
    }
}

impl<R: LineInput, W: Write> MoveSource for HumanSource<R, W> {
    fn label(&self) -> &str {
        &self.label
    }

    fn choose(&mut self, pos: &Position) -> Result<Option<Choice>> {
        loop {
            write!(self.output, "{} ({}) move: ", self.label, pos.side_to_move().label())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.next_line(&mut line)? == 0 {
                return Ok(None);
            }
            let text = line.trim();
            match text.to_ascii_lowercase().as_str() {
                "quit" | "resign" => return Ok(None),
                "moves" => {
                    let moves: Vec<String> =
                        legal_moves(pos).iter().map(|m| m.to_string()).collect();
                    writeln!(self.output, "{}", moves.join(" "))?;
                    continue;
                }
                _ => {}
            }

            let mv: Move = match text.parse() {
                Ok(mv) => mv,
                Err(e) => {
                    writeln!(self.output, "{e}")?;
                    continue;
                }
            };
            if !is_legal(pos, mv) {
                writeln!(self.output, "{}", RulesError::IllegalMove { mv })?;
                continue;
            }
            return Ok(Some(Choice {
                mv,
                search: None,
                table: None,
            }));
        }
    }
}

/// Called once per ply
pub struct MoveEvent<'a> {
    pub ply: u32,
    pub side: Player,
    pub label: &'a str,
    pub before: Position,
    pub after: Position,
    pub mv: Move,
    pub effect: &'a MoveEffect,
    pub search: Option<&'a SearchResult>,
    pub table: Option<&'a TableStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The rules ended the game
    Terminal,
    MaxPlies,
    /// A player quit or resigned
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    /// `None` when the game was cut short
    pub outcome: Option<Outcome>,
    pub reason: EndReason,
    pub plies: u32,
    pub final_position: Position,
}

/// Play one game between `king` and `dragon` from `start`
pub fn run_game(
    king: &mut dyn MoveSource,
    dragon: &mut dyn MoveSource,
    start: Position,
    max_plies: u32,
    on_move: &mut dyn FnMut(&MoveEvent<'_>),
) -> Result<GameResult> {
    let mut pos = start;
    let mut plies = 0u32;

    let (outcome, reason) = loop {
        if let Some(outcome) = terminal(&pos) {
            break (Some(outcome), EndReason::Terminal);
        }
        if plies >= max_plies {
            break (None, EndReason::MaxPlies);
        }

        let side = pos.side_to_move();
        let mover: &mut dyn MoveSource = match side {
            Player::King => &mut *king,
            Player::Dragon => &mut *dragon,
        };
        let Some(choice) = mover.choose(&pos)? else {
            log::info!("{} ({}) quit", mover.label(), side.label());
            let outcome = Outcome::for_winner(side.opponent());
            break (Some(outcome), EndReason::Quit);
        };

        let before = pos;
        let effect = match pos.apply_legal(choice.mv) {
            Ok(effect) => effect,
            Err(e) => bail!("{} played {}: {e}", mover.label(), choice.mv),
        };
        plies += 1;

        on_move(&MoveEvent {
            ply: plies,
            side,
            label: mover.label(),
            before,
            after: pos,
            mv: choice.mv,
            effect: &effect,
            search: choice.search.as_ref(),
            table: choice.table.as_ref(),
        });
        king.observe(&effect);
        dragon.observe(&effect);
    };

    log::info!(
        "game over after {plies} plies: {} ({reason:?})",
        outcome.map_or("unfinished", outcome_label)
    );
    Ok(GameResult {
        outcome,
        reason,
        plies,
        final_position: pos,
    })
}

pub fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::KingWin => "king wins",
        Outcome::DragonWin => "dragons win",
        Outcome::Draw => "draw",
    }
}

/// Start position followed by `plies` seeded random moves
///
/// Stops early if the game ends.
pub fn random_opening(seed: u64, plies: u32) -> Position {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut pos = Position::start();
    for _ in 0..plies {
        if terminal(&pos).is_some() {
            break;
        }
        let moves = legal_moves(&pos);
        let Some(&mv) = moves.choose(&mut rng) else {
            break;
        };
        pos.do_move(mv);
    }
    pos
}

/// Print the board after each move
pub fn print_event<W: Write>(out: &mut W, event: &MoveEvent<'_>) -> Result<()> {
    let value = event
        .search
        .map(|r| format!(" (value {}, depth {})", r.value, r.depth))
        .unwrap_or_default();
    writeln!(out, "{}. {} {}{value}", event.ply, event.label, event.mv)?;
    if let Some(tile) = event.effect.captured {
        writeln!(out, "   captured {tile}")?;
    }
    for tile in &event.effect.defected {
        writeln!(out, "   guard on {tile} defects")?;
    }
    write!(out, "{}", render::with_status(&event.after))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of moves
    struct Scripted {
        moves: Vec<Move>,
    }

    impl MoveSource for Scripted {
        fn label(&self) -> &str {
            "scripted"
        }

        fn choose(&mut self, _pos: &Position) -> Result<Option<Choice>> {
            Ok(self.moves.pop().map(|mv| Choice {
                mv,
                search: None,
                table: None,
            }))
        }
    }

    fn scripted(moves: &[&str]) -> Scripted {
        Scripted {
            moves: moves.iter().rev().map(|m| m.parse().unwrap()).collect(),
        }
    }

    #[test]
    fn test_scripted_game_reaches_goal() {
        let start: Position = "k Kc3 Gb4 Da4 De5".parse().unwrap();
        let mut king = scripted(&["C3C2", "C2C1"]);
        let mut dragon = scripted(&["E5E4"]);
        let mut seen = Vec::new();
        let result = run_game(&mut king, &mut dragon, start, 10, &mut |e| {
            seen.push(e.mv.to_string())
        })
        .unwrap();
        assert_eq!(result.outcome, Some(Outcome::KingWin));
        assert_eq!(result.reason, EndReason::Terminal);
        assert_eq!(result.plies, 3);
        assert_eq!(seen, ["C3C2", "E5E4", "C2C1"]);
    }

    #[test]
    fn test_quit_concedes() {
        let mut king = scripted(&[]);
        let mut dragon = scripted(&["A2A3"]);
        let result =
            run_game(&mut king, &mut dragon, Position::start(), 10, &mut |_| {}).unwrap();
        assert_eq!(result.outcome, Some(Outcome::DragonWin));
        assert_eq!(result.reason, EndReason::Quit);
        assert_eq!(result.plies, 1);
    }

    #[test]
    fn test_illegal_scripted_move_is_an_error() {
        let mut king = scripted(&[]);
        let mut dragon = scripted(&["A2A4"]);
        assert!(run_game(&mut king, &mut dragon, Position::start(), 10, &mut |_| {}).is_err());
    }

    #[test]
    fn test_max_plies() {
        let mut king = scripted(&["C4C3"]);
        let mut dragon = scripted(&["A2A3", "A3A4"]);
        let result =
            run_game(&mut king, &mut dragon, Position::start(), 2, &mut |_| {}).unwrap();
        assert_eq!(result.outcome, None);
        assert_eq!(result.reason, EndReason::MaxPlies);
        assert_eq!(result.plies, 2);
    }

    #[test]
    fn test_human_reprompts_until_legal() {
        let input = Cursor::new("zz\nC4C3\nA2A3\n");
        let mut out = Vec::new();
        let mut human = HumanSource::new("you", input, &mut out);
        let choice = human.choose(&Position::start()).unwrap().unwrap();
        assert_eq!(choice.mv, "A2A3".parse().unwrap());
        drop(human);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("move: ").count(), 3);
        assert!(text.contains("illegal"));
    }

    #[test]
    fn test_human_eof_quits() {
        let mut human = HumanSource::new("you", Cursor::new(""), Vec::new());
        assert!(human.choose(&Position::start()).unwrap().is_none());
    }

    #[test]
    fn test_engine_plays_a_legal_move() {
        let config = EngineConfig {
            max_depth: 2,
            table_capacity: 4096,
            ..EngineConfig::default()
        };
        let mut engine = EngineSource::new("engine", config);
        let pos = Position::start();
        let choice = engine.choose(&pos).unwrap().unwrap();
        assert!(is_legal(&pos, choice.mv));
        assert_eq!(choice.search.unwrap().depth, 2);
        assert!(choice.table.unwrap().attempted_mutations > 0);
        assert!(engine.context().is_some());
    }

    #[test]
    fn test_engine_deadline_stops_the_worker() {
        let config = EngineConfig {
            max_depth: 12,
            deadline_ms: Some(1),
            ..EngineConfig::default()
        };
        let mut engine = EngineSource::new("engine", config);
        let pos = Position::start();
        let result = engine.search(&pos).unwrap();
        assert!(result.depth < 12);
        assert!(is_legal(&pos, result.best_move.unwrap()));
        assert!(engine.context().is_some());
    }

    #[test]
    fn test_random_opening_is_seeded() {
        assert_eq!(random_opening(7, 6), random_opening(7, 6));
        assert_eq!(random_opening(7, 0), Position::start());
    }
}
