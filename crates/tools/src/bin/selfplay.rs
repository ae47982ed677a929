use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use madking_tools::game::{outcome_label, random_opening};
use madking_tools::io::open_writer;
use madking_tools::record::{PlyRecord, ResultRecord, Tally};
use madking_tools::{EngineArgs, EngineSource, MoveSource, run_game};

/// Engine vs. engine self-play.
///
/// - Ten games from random four-ply openings, logging every ply:
///   `cargo run -p madking-tools --bin madking-selfplay -- --games 10 --random-plies 4 --seed 1 --out runs/selfplay.jsonl`
///
/// - Compare replacement policies with a tiny table:
///   `cargo run -p madking-tools --bin madking-selfplay -- --games 4 --table-capacity 256 --policy shallower-else-reject`
#[derive(Parser, Debug)]
#[command(author, version, about = "King vs. Dragons self-play harness")]
struct Cli {
    /// Number of games to run
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Maximum plies per game before it is abandoned
    #[arg(long, default_value_t = 200)]
    max_plies: u32,

    /// Random plies played from the start position before the engines take over
    #[arg(long, default_value_t = 0)]
    random_plies: u32,

    /// Seed for the random openings (game i uses seed + i)
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// JSON-lines output, one record per ply and per game (`-` for stdout)
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    engine: EngineArgs,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    if cli.games == 0 {
        bail!("--games must be >= 1");
    }
    let config = cli.engine.resolve()?;
    log::info!(
        "selfplay: {} games, {} depth {}, policy {}, capacity {}",
        cli.games,
        config.algorithm,
        config.max_depth,
        config.policy,
        config.table_capacity
    );

    let mut writer = cli.out.as_deref().map(open_writer).transpose()?;
    let mut tally = Tally::default();

    for game in 1..=cli.games {
        let start = random_opening(cli.seed.wrapping_add(u64::from(game - 1)), cli.random_plies);
        let opening = start.to_string();
        let mut king = EngineSource::new("king-engine", config.clone());
        let mut dragon = EngineSource::new("dragon-engine", config.clone());

        let mut records = Vec::new();
        let result = run_game(&mut king, &mut dragon, start, cli.max_plies, &mut |event| {
            records.push(PlyRecord::new(game, event));
        })?;

        if let Some(w) = writer.as_mut() {
            for record in &records {
                w.json_line(record)?;
            }
            w.json_line(&ResultRecord::new(game, &opening, &result))?;
        }

        tally.record(result.outcome);
        println!(
            "game {game}: {} in {} plies ({} / {})",
            result.outcome.map_or("unfinished", outcome_label),
            result.plies,
            king.label(),
            dragon.label()
        );
    }

    if let Some(w) = writer {
        w.close().context("failed to close selfplay log")?;
    }

    println!(
        "king {} / dragons {} / draws {} / unfinished {} ({} games)",
        tally.king_wins,
        tally.dragon_wins,
        tally.draws,
        tally.unfinished,
        tally.games()
    );
    Ok(())
}
