use clap::Parser;
use hackmatch_solver::engine::{Board, Move};
use hackmatch_solver::solver::{solve, SolverConfig};
use hackmatch_solver::utils::format_moves;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Seed for the starting board
    #[clap(short, long, default_value_t = 514514)]
    seed: u64,

    /// Log solver details when asking for hints
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    let default = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = SolverConfig::default();
    let mut board = Board::new_random_with_seed(args.seed);
    let mut history: Vec<Board> = Vec::new();
    println!("Welcome to Hack Match!");

    loop {
        println!("---------------------");
        println!("Items: {}, Moves: {}", board.item_count(), history.len());
        println!("0123456 held");
        println!("{}", board);

        print!("Enter a move (d<col>, p<col>, s<col>), 'h' for a hint, 'u' to undo, 'q' to quit: ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        match input.trim() {
            "q" => {
                println!("Thanks for playing!");
                break;
            }
            "u" => match history.pop() {
                Some(previous) => {
                    board = previous;
                    println!("Move undone.");
                }
                None => println!("Cannot undo further (no moves made)."),
            },
            "h" => {
                let solution = solve(&board, &config);
                if solution.moves.is_empty() {
                    println!("Hint: nothing to do on this board.");
                } else {
                    println!("Hint ({:?}): {}", solution.outcome, format_moves(&solution.moves));
                }
            }
            token => match token.parse::<Move>() {
                Ok(mv) if board.is_legal(mv) => {
                    history.push(board);
                    board.apply_move(mv);
                    if board.move_matches(mv) {
                        println!("Match! {} completes a group.", mv);
                    }
                }
                Ok(mv) => println!("Illegal move: {} is not possible on this board.", mv),
                Err(e) => println!("Invalid input: {}", e),
            },
        }
    }
}
