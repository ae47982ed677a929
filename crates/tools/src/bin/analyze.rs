use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use madking_core::movegen::{legal_moves, terminal};
use madking_core::{MaterialEval, Position, SearchResult};
use madking_tools::io::write_json;
use madking_tools::{EngineArgs, render};
use serde::Serialize;

/// Search one position and report the result.
///
/// - Analyse the opening at depth 6 and keep the table:
///   `cargo run -p madking-tools --bin madking-analyze -- --depth 6 --dump runs/tt.json`
///
/// - Minimax on a given position, machine-readable:
///   `cargo run -p madking-tools --bin madking-analyze -- --algorithm minimax --position "k Kc3 Gb4 Da2 Dd3" --json`
#[derive(Parser, Debug)]
#[command(author, version, about = "Analyse a King vs. Dragons position")]
struct Cli {
    /// Position text (default: the standard opening)
    #[arg(long)]
    position: Option<String>,

    /// Write the transposition table to this JSON file afterwards
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Print the result as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,

    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Serialize)]
struct Report<'a> {
    position: String,
    algorithm: &'a str,
    legal_moves: usize,
    result: &'a SearchResult,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let pos = match &cli.position {
        Some(text) => text
            .parse::<Position>()
            .with_context(|| format!("invalid --position {text:?}"))?,
        None => Position::start(),
    };
    let config = cli.engine.resolve()?;
    let mut ctx = config.build_context();

    if let Some(outcome) = terminal(&pos) {
        log::info!("position is already decided: {outcome:?}");
    }
    let result = madking_core::search::iterative_deepening(
        &mut ctx,
        &pos,
        &MaterialEval,
        config.algorithm,
        &config.limits(),
    );

    if cli.json {
        let report = Report {
            position: pos.to_string(),
            algorithm: config.algorithm.name(),
            legal_moves: legal_moves(&pos).len(),
            result: &result,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::with_status(&pos));
        println!(
            "{} depth {}: value {} best {}",
            config.algorithm,
            result.depth,
            result.value,
            result.best_move.map_or_else(|| "-".to_string(), |m| m.to_string())
        );
        result.stats.log_summary();
        ctx.table().stats().log_summary();
    }

    if let Some(path) = &cli.dump {
        write_json(path, &ctx.table().dump())?;
        log::info!("wrote {} table entries to {}", ctx.table().len(), path.display());
    }
    Ok(())
}
