use anyhow::Result;
use clap::{Parser, ValueEnum};
use isolation_ai::core::Board;
use isolation_ai::game::{save_record, Game};
use isolation_ai::player::ai::{HeuristicKind, SearchMethod, SearchPlayer};
use isolation_ai::player::{GreedyPlayer, PlayerController, RandomPlayer};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlayerKind {
    Random,
    Greedy,
    Minimax,
    Alphabeta,
}

/// Run one match of knight's-move Isolation between two agents.
#[derive(Parser)]
#[command(name = "isolation-ai", version)]
struct Args {
    /// Board width (columns)
    #[arg(long, default_value_t = 7)]
    width: usize,

    /// Board height (rows)
    #[arg(long, default_value_t = 7)]
    height: usize,

    /// Wall-clock budget per move, in milliseconds
    #[arg(long, default_value_t = 200)]
    time_limit_ms: u64,

    #[arg(long, value_enum, default_value_t = PlayerKind::Alphabeta)]
    p1: PlayerKind,

    #[arg(long, value_enum, default_value_t = PlayerKind::Random)]
    p2: PlayerKind,

    /// Evaluator for player 1 (search and greedy agents)
    #[arg(long, value_enum, default_value_t = HeuristicKind::DifferentialReach)]
    p1_heuristic: HeuristicKind,

    /// Evaluator for player 2 (search and greedy agents)
    #[arg(long, value_enum, default_value_t = HeuristicKind::Improved)]
    p2_heuristic: HeuristicKind,

    /// Save a JSON record of the match into this directory
    #[arg(long)]
    record_dir: Option<PathBuf>,

    /// Print the final board
    #[arg(long)]
    show_board: bool,
}

fn build_player(kind: PlayerKind, heuristic: HeuristicKind) -> Box<dyn PlayerController> {
    match kind {
        PlayerKind::Random => Box::new(RandomPlayer::new("random")),
        PlayerKind::Greedy => {
            let h = heuristic.build();
            let name = format!("greedy({})", h.name());
            Box::new(GreedyPlayer::new(&name, h))
        }
        PlayerKind::Minimax => {
            let h = heuristic.build();
            let name = format!("minimax({})", h.name());
            Box::new(SearchPlayer::new(&name, h, SearchMethod::Minimax))
        }
        PlayerKind::Alphabeta => {
            let h = heuristic.build();
            let name = format!("alphabeta({})", h.name());
            Box::new(SearchPlayer::new(&name, h, SearchMethod::AlphaBeta))
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut p1 = build_player(args.p1, args.p1_heuristic);
    let mut p2 = build_player(args.p2, args.p2_heuristic);

    let mut game = Game::new(Board::new(args.width, args.height));
    let outcome = game.play(
        p1.as_mut(),
        p2.as_mut(),
        Duration::from_millis(args.time_limit_ms),
    );

    if args.show_board {
        println!("{}", game.board);
    }
    println!(
        "{} vs {}: {:?} wins after {} plies ({:?})",
        p1.name(),
        p2.name(),
        outcome.winner,
        outcome.history.len(),
        outcome.reason
    );

    if let Some(dir) = args.record_dir {
        let record = game.record(p1.as_ref(), p2.as_ref(), &outcome);
        let path = save_record(&record, &dir)?;
        println!("record saved to {}", path.display());
    }
    Ok(())
}
