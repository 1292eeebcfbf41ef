use clap::Parser;
use hackmatch_solver::engine::Board;
use hackmatch_solver::solver::{solve, CacheMode, Outcome, SolverConfig};
use hackmatch_solver::utils::board_from_str_array;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Longest move sequence tried on boards with few items
    #[clap(long, default_value_t = 6)]
    max_small: usize,

    /// Longest move sequence tried on fuller boards
    #[clap(long, default_value_t = 9)]
    max_large: usize,

    /// Item count from which a board counts as full
    #[clap(long, default_value_t = 12)]
    small_threshold: usize,

    /// Moves the balancing fallback may make
    #[clap(long, default_value_t = 4)]
    balance_limit: usize,

    /// Never re-expand a board within one depth attempt
    #[clap(long)]
    first_visit_cache: bool,

    /// Log search progress
    #[clap(short, long)]
    verbose: bool,

    /// Path to the board file (one row per line, row 0 first, held item after row 0)
    board_file: PathBuf,
}

impl Args {
    fn config(&self) -> SolverConfig {
        let mode = if self.first_visit_cache {
            CacheMode::FirstVisit
        } else {
            CacheMode::DepthAware
        };
        SolverConfig::default()
            .with_max_moves(self.max_small, self.max_large)
            .with_small_board_items(self.small_threshold)
            .with_balance_move_limit(self.balance_limit)
            .with_cache_mode(mode)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn read_board_file(path: &PathBuf) -> Result<Board, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

    let lines: Vec<&str> = content
        .lines()
        .map(|s| s.trim_end())
        .filter(|s| !s.is_empty())
        .collect();

    board_from_str_array(&lines).map_err(|e| format!("Invalid board format: {}", e))
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let board = match read_board_file(&args.board_file) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("{}: {}", args.board_file.display(), e);
            return ExitCode::FAILURE;
        }
    };
    println!("Loaded board from {}\n", args.board_file.display());
    println!("Initial board state:\n{}\n", board);

    let solution = solve(&board, &args.config());
    match solution.outcome {
        Outcome::Match => println!("Match in {} moves:", solution.moves.len()),
        Outcome::Balance => println!("No match reachable, balancing with {} moves:", solution.moves.len()),
        Outcome::Idle => println!("No match reachable and board already balanced."),
    }

    let mut current = board;
    for (i, mv) in solution.moves.iter().enumerate() {
        current.apply_move(*mv);
        println!("  Move {}: {}", i + 1, mv);
    }
    if !solution.moves.is_empty() {
        println!("\nFinal board state:\n{}", current);
    }
    ExitCode::SUCCESS
}
