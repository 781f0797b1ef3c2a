use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quixo_agent::ai::{
    Agent, HumanAgent, HybridAgent, MctsAgent, MinimaxAgent, QTable, QTableAgent, RandomAgent,
};
use quixo_agent::arena::play_match;
use quixo_agent::config::AppConfig;

/// Play the hybrid Quixo agent against an opponent and report its results.
#[derive(Parser)]
#[command(name = "quixo", about = "Evaluate the hybrid Quixo agent")]
struct Cli {
    /// Opponent: random, minimax, mcts, human or qtable
    #[arg(long, default_value = "random")]
    opponent: String,

    /// Path to TOML configuration file
    #[arg(long, default_value = "quixo.toml")]
    config: PathBuf,

    /// Q-table JSON file, required for the qtable opponent
    #[arg(long)]
    qtable: Option<PathBuf>,

    /// Override number of games
    #[arg(long)]
    games: Option<usize>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override minimax depth (also used by the minimax opponent)
    #[arg(long)]
    depth: Option<usize>,

    /// Override MCTS simulations per move
    #[arg(long)]
    simulations: Option<usize>,

    /// Override the empty-cell threshold for switching to minimax
    #[arg(long)]
    threshold: Option<usize>,

    /// Keep the hybrid agent in the first seat for every game
    #[arg(long)]
    fixed_seat: bool,

    /// Print a default configuration file and exit
    #[arg(long)]
    print_config: bool,
}

const DEFAULT_LOG_DIRECTIVES: &str = "quixo_agent=info";

/// `RUST_LOG` directives when set and valid, otherwise the crate at `info`.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES)),
        _ => EnvFilter::new(DEFAULT_LOG_DIRECTIVES),
    }
}

fn main() -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .init();

    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    match cli.opponent.as_str() {
        "random" | "minimax" | "mcts" | "human" | "qtable" => {}
        other => bail!(
            "unknown opponent '{}' (expected 'random', 'minimax', 'mcts', 'human', or 'qtable')",
            other
        ),
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(games) = cli.games {
        config.arena.games = games;
    }
    if let Some(seed) = cli.seed {
        config.arena.seed = Some(seed);
    }
    if let Some(depth) = cli.depth {
        config.hybrid.minimax_depth = depth;
    }
    if let Some(simulations) = cli.simulations {
        config.mcts.simulations = simulations;
    }
    if let Some(threshold) = cli.threshold {
        config.hybrid.empty_threshold = threshold;
    }
    if cli.fixed_seat {
        config.arena.alternate_seats = false;
    }
    config.validate().context("invalid configuration")?;

    let seed = config.arena.seed;
    let mut hybrid = match seed {
        Some(s) => HybridAgent::with_seed(config.hybrid.clone(), config.mcts.clone(), s),
        None => HybridAgent::new(config.hybrid.clone(), config.mcts.clone()),
    };

    let mut opponent: Box<dyn Agent> = match cli.opponent.as_str() {
        "random" => match seed {
            Some(s) => Box::new(RandomAgent::with_seed(s.wrapping_add(1))),
            None => Box::new(RandomAgent::new()),
        },
        "minimax" => Box::new(MinimaxAgent::new(config.hybrid.minimax_depth)),
        "mcts" => match seed {
            Some(s) => Box::new(MctsAgent::with_seed(config.mcts.clone(), s.wrapping_add(1))),
            None => Box::new(MctsAgent::new(config.mcts.clone())),
        },
        "human" => Box::new(HumanAgent::new(io::stdin().lock(), io::stdout())),
        "qtable" => {
            let Some(path) = cli.qtable.as_ref() else {
                bail!("the qtable opponent needs --qtable <path>");
            };
            let table = QTable::load(path)
                .with_context(|| format!("loading Q-table from {}", path.display()))?;
            info!(entries = table.len(), "loaded Q-table");
            Box::new(QTableAgent::new(table))
        }
        _ => unreachable!(),
    };

    info!(
        opponent = opponent.name(),
        games = config.arena.games,
        threshold = config.hybrid.empty_threshold,
        depth = config.hybrid.minimax_depth,
        simulations = config.mcts.simulations,
        "starting match"
    );

    let summary = play_match(&mut hybrid, opponent.as_mut(), &config.arena)
        .context("match aborted")?;

    println!(
        "{} vs {}: {} wins, {} losses, {} draws over {} games",
        hybrid.name(),
        opponent.name(),
        summary.wins,
        summary.losses,
        summary.draws,
        summary.games()
    );
    println!(
        "win rate {:.1}%, draw rate {:.1}%, average length {:.1} plies",
        summary.win_rate() * 100.0,
        summary.draw_rate() * 100.0,
        summary.average_game_length()
    );

    Ok(())
}
