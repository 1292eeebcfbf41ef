use clap::Parser;
use hackmatch_solver::engine::Board;
use hackmatch_solver::solver::{solve, CacheMode, Outcome, SolverConfig};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of random boards to solve
    #[clap(short, long, default_value_t = 20)]
    boards: u64,

    /// Seed of the first board; the rest follow consecutively
    #[clap(long, default_value_t = 0)]
    start_seed: u64,

    /// Also run with the first-visit cache and compare
    #[clap(long)]
    compare_cache_modes: bool,
}

#[derive(Default)]
struct Stats {
    outcomes: BTreeMap<&'static str, usize>,
    match_lengths: BTreeMap<usize, usize>,
    total_time: Duration,
    slowest: Duration,
}

impl Stats {
    fn record(&mut self, outcome: Outcome, moves: usize, elapsed: Duration) {
        let name = match outcome {
            Outcome::Match => "match",
            Outcome::Balance => "balance",
            Outcome::Idle => "idle",
        };
        *self.outcomes.entry(name).or_default() += 1;
        if outcome == Outcome::Match {
            *self.match_lengths.entry(moves).or_default() += 1;
        }
        self.total_time += elapsed;
        self.slowest = self.slowest.max(elapsed);
    }

    fn print(&self, label: &str, boards: u64) {
        println!("\n--- {} ---", label);
        for (name, count) in &self.outcomes {
            println!("  {:<8}: {}", name, count);
        }
        for (len, count) in &self.match_lengths {
            println!("  matches in {} moves: {}", len, count);
        }
        let avg_ms = self.total_time.as_secs_f64() * 1000.0 / boards.max(1) as f64;
        println!("  average time: {:.2} ms, slowest: {} ms", avg_ms, self.slowest.as_millis());
    }
}

fn main() {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut configs = vec![("depth-aware cache", SolverConfig::default())];
    if args.compare_cache_modes {
        configs.push((
            "first-visit cache",
            SolverConfig::default().with_cache_mode(CacheMode::FirstVisit),
        ));
    }

    println!("Starting solver evaluation for {} boards...", args.boards);

    for (label, config) in &configs {
        let mut stats = Stats::default();
        for seed in args.start_seed..args.start_seed + args.boards {
            let board = Board::new_random_with_seed(seed);
            let start = Instant::now();
            let solution = solve(&board, config);
            let elapsed = start.elapsed();
            println!(
                "  Seed {:<6} items {:<3} {:?} in {} moves ({} ms)",
                seed,
                board.item_count(),
                solution.outcome,
                solution.moves.len(),
                elapsed.as_millis()
            );
            stats.record(solution.outcome, solution.moves.len(), elapsed);
        }
        stats.print(label, args.boards);
    }
}
