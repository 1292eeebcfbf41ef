use crate::engine::{Board, Move, COLUMNS};
use crate::heuristics::{balance_board, columns_by_height_asc, columns_by_height_desc};
use crate::utils::format_moves;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::Instant;

/// How the per-attempt visited-state cache decides whether to expand a board again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CacheMode {
    /// A board already in the cache is never expanded again during the attempt.
    FirstVisit,
    /// A board is expanded again only when reached with fewer moves than before.
    /// Keeps iterative deepening exact: the shortest sequence is always found.
    #[default]
    DepthAware,
}

/// Tunable limits for `solve`.
///
/// The defaults are the values the solver was tuned with against the live game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Boards with fewer items than this use `small_board_max_moves`.
    pub small_board_items: usize,
    /// Longest sequence tried on a small board.
    pub small_board_max_moves: usize,
    /// Longest sequence tried on any other board.
    pub large_board_max_moves: usize,
    /// Moves the balancing fallback may make.
    pub balance_move_limit: usize,
    /// Initial capacity reserved for each attempt's cache.
    pub cache_capacity: usize,
    pub cache_mode: CacheMode,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            small_board_items: 12,
            small_board_max_moves: 6,
            large_board_max_moves: 9,
            balance_move_limit: 4,
            cache_capacity: 100_000,
            cache_mode: CacheMode::default(),
        }
    }
}

impl SolverConfig {
    pub fn with_max_moves(mut self, small_board: usize, large_board: usize) -> Self {
        self.small_board_max_moves = small_board;
        self.large_board_max_moves = large_board;
        self
    }

    pub fn with_small_board_items(mut self, items: usize) -> Self {
        self.small_board_items = items;
        self
    }

    pub fn with_balance_move_limit(mut self, limit: usize) -> Self {
        self.balance_move_limit = limit;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Longest move sequence the search will try on `board`.
    pub fn max_moves_for(&self, board: &Board) -> usize {
        if board.item_count() < self.small_board_items {
            self.small_board_max_moves
        } else {
            self.large_board_max_moves
        }
    }
}

/// Boards already expanded during one depth-limited attempt.
#[derive(Debug)]
pub struct StateCache {
    mode: CacheMode,
    // board -> number of moves made when it was expanded
    seen: HashMap<Board, usize>,
}

impl StateCache {
    pub fn new(mode: CacheMode, capacity: usize) -> Self {
        StateCache {
            mode,
            seen: HashMap::with_capacity(capacity),
        }
    }

    /// Records that `board` was reached after `depth` moves.
    ///
    /// Returns `true` if the board should be expanded from here.
    pub fn visit(&mut self, board: &Board, depth: usize) -> bool {
        let mode = self.mode;
        match self.seen.entry(*board) {
            Entry::Vacant(entry) => {
                entry.insert(depth);
                true
            }
            Entry::Occupied(mut entry) => match mode {
                CacheMode::FirstVisit => false,
                CacheMode::DepthAware if depth < *entry.get() => {
                    entry.insert(depth);
                    true
                }
                CacheMode::DepthAware => false,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// What kind of move list `solve` produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The last move completes a match.
    Match,
    /// No match was reachable; the moves even out the columns.
    Balance,
    /// Nothing worth doing this cycle; the move list is empty.
    Idle,
}

/// Moves to perform for one board, and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub moves: Vec<Move>,
    pub outcome: Outcome,
}

/// Finds the moves to perform on `board`.
///
/// Runs `find_match` first. If no match is reachable within the configured move
/// limit, falls back to `balance_board`. An empty move list is a normal result.
///
/// # Examples
/// ```
/// use hackmatch_solver::solver::{solve, Outcome, SolverConfig};
/// use hackmatch_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["grrr... g", "g......", "g......"]).unwrap();
/// let solution = solve(&board, &SolverConfig::default());
/// assert_eq!(solution.outcome, Outcome::Match);
/// assert_eq!(solution.moves.len(), 1);
/// ```
pub fn solve(board: &Board, config: &SolverConfig) -> Solution {
    let start = Instant::now();
    let solution = match find_match(board, config) {
        Some(moves) => Solution {
            moves,
            outcome: Outcome::Match,
        },
        None => {
            let moves = balance_board(board, config.balance_move_limit);
            let outcome = if moves.is_empty() {
                Outcome::Idle
            } else {
                Outcome::Balance
            };
            Solution { moves, outcome }
        }
    };
    tracing::debug!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        outcome = ?solution.outcome,
        moves = %format_moves(&solution.moves),
        "solve finished"
    );
    solution
}

/// Searches for the shortest move sequence whose last move produces a match.
///
/// Iterative deepening: for each budget from 1 up to `config.max_moves_for(board)`
/// a depth-limited search runs with a fresh `StateCache`, and the first success is
/// returned. Every shorter budget has been exhausted by then, so the sequence is
/// as short as possible (with `CacheMode::DepthAware`).
pub fn find_match(board: &Board, config: &SolverConfig) -> Option<Vec<Move>> {
    let max_moves = config.max_moves_for(board);
    let mut moves = Vec::with_capacity(max_moves);
    for budget in 1..=max_moves {
        let mut cache = StateCache::new(config.cache_mode, config.cache_capacity);
        let found = solve_at_depth(board, budget, &mut moves, &mut cache);
        tracing::debug!(budget, states = cache.len(), found, "depth attempt finished");
        if found {
            return Some(moves);
        }
        debug_assert!(moves.is_empty());
    }
    None
}

/// Depth-limited search from `board` allowing at most `budget` moves in total.
///
/// `moves` holds the path from the root. On success it contains the full matching
/// sequence; on failure it is left exactly as it was passed in.
///
/// With something held, places are tried on the emptiest columns first; with
/// nothing held, draws come from the fullest columns first. Swaps on every column
/// of height two or more are tried in both cases.
pub fn solve_at_depth(
    board: &Board,
    budget: usize,
    moves: &mut Vec<Move>,
    cache: &mut StateCache,
) -> bool {
    if moves.len() >= budget {
        return false;
    }
    if !cache.visit(board, moves.len()) {
        return false;
    }

    if board.held().is_empty() {
        for col in columns_by_height_desc(board) {
            if board.height(col) > 0 && try_move(board, Move::draw(col), budget, moves, cache) {
                return true;
            }
        }
    } else {
        for col in columns_by_height_asc(board) {
            if !board.is_full(col) && try_move(board, Move::place(col), budget, moves, cache) {
                return true;
            }
        }
    }

    for col in 0..COLUMNS {
        if board.height(col) >= 2 && try_move(board, Move::swap(col), budget, moves, cache) {
            return true;
        }
    }
    false
}

fn try_move(
    board: &Board,
    mv: Move,
    budget: usize,
    moves: &mut Vec<Move>,
    cache: &mut StateCache,
) -> bool {
    let next = board.with_move(mv);
    moves.push(mv);
    if next.move_matches(mv) || solve_at_depth(&next, budget, moves, cache) {
        return true;
    }
    moves.pop();
    false
}
