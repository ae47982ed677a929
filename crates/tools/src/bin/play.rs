use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use madking_core::Position;
use madking_tools::game::{self, outcome_label};
use madking_tools::{EngineArgs, EngineSource, HumanSource, MoveSource, render, run_game};

/// Play King vs. Dragons on the terminal.
///
/// Moves are entered as `<from><to>`, e.g. `C2C3`. Type `moves` to list the
/// legal moves and `quit` to resign.
///
/// - Play the King against the engine:
///   `cargo run -p madking-tools --bin madking-play -- --human king --depth 5`
///
/// - Watch the engine play itself from a given position:
///   `cargo run -p madking-tools --bin madking-play -- --human neither --position "k Kc3 Gb4 Da2 Dd3"`
#[derive(Parser, Debug)]
#[command(author, version, about = "Play King vs. Dragons against the engine")]
struct Cli {
    /// Which side(s) a human controls
    #[arg(long, value_enum, default_value_t = Human::King)]
    human: Human,

    /// Starting position text (default: the standard opening)
    #[arg(long)]
    position: Option<String>,

    /// Maximum plies before the game is abandoned
    #[arg(long, default_value_t = 200)]
    max_plies: u32,

    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Human {
    King,
    Dragon,
    Both,
    Neither,
}

fn player(human: bool, label: &str, cli: &Cli) -> Result<Box<dyn MoveSource>> {
    if human {
        Ok(Box::new(HumanSource::new(label, io::stdin(), io::stdout())))
    } else {
        Ok(Box::new(EngineSource::new(label, cli.engine.resolve()?)))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let start = match &cli.position {
        Some(text) => text
            .parse::<Position>()
            .with_context(|| format!("invalid --position {text:?}"))?,
        None => Position::start(),
    };

    let human_king = matches!(cli.human, Human::King | Human::Both);
    let human_dragon = matches!(cli.human, Human::Dragon | Human::Both);
    let mut king = player(human_king, if human_king { "you" } else { "engine" }, &cli)?;
    let mut dragon = player(human_dragon, if human_dragon { "you" } else { "engine" }, &cli)?;

    let mut out = io::stdout();
    write!(out, "{}", render::with_status(&start))?;
    let mut print_failed = None;
    let result = run_game(king.as_mut(), dragon.as_mut(), start, cli.max_plies, &mut |event| {
        if let Err(e) = game::print_event(&mut io::stdout(), event) {
            print_failed.get_or_insert(e);
        }
    })?;
    if let Some(e) = print_failed {
        return Err(e.context("failed to print the board"));
    }

    match result.outcome {
        Some(outcome) => writeln!(out, "{} after {} plies", outcome_label(outcome), result.plies)?,
        None => writeln!(out, "game abandoned after {} plies", result.plies)?,
    }
    Ok(())
}
