//! Board-shape heuristics.
//!
//! The search orders its candidate columns with the helpers here, and when no
//! match is reachable `balance_board` spreads items out so no column overflows
//! while the solver waits for a better board.
use crate::engine::{Board, Move, COLUMNS};
use std::cmp::Reverse;
use std::time::Instant;

/// Column indices sorted by height, emptiest first.
///
/// The sort is stable, so columns of equal height keep their left-to-right order.
pub fn columns_by_height_asc(board: &Board) -> [usize; COLUMNS] {
    let mut cols: [usize; COLUMNS] = std::array::from_fn(|c| c);
    cols.sort_by_key(|&c| board.height(c));
    cols
}

/// Column indices sorted by height, fullest first. Ties keep left-to-right order.
pub fn columns_by_height_desc(board: &Board) -> [usize; COLUMNS] {
    let mut cols: [usize; COLUMNS] = std::array::from_fn(|c| c);
    cols.sort_by_key(|&c| Reverse(board.height(c)));
    cols
}

/// Difference between the tallest and the shortest column.
///
/// # Examples
/// ```
/// use hackmatch_solver::heuristics::height_spread;
/// use hackmatch_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["rr..... .", "r......"]).unwrap();
/// assert_eq!(height_spread(&board), 2);
/// ```
pub fn height_spread(board: &Board) -> usize {
    let heights = board.heights();
    let max = heights.iter().copied().max().unwrap_or(0);
    let min = heights.iter().copied().min().unwrap_or(0);
    max - min
}

/// Produces up to `move_limit` moves that even out the column heights.
///
/// Each step looks at the emptiest and the fullest column. If their heights differ
/// by at most one the board counts as balanced and no further move is made.
/// Otherwise the held item is placed on the emptiest column, or, with nothing held,
/// the top of the fullest column is drawn. Matches are not considered at all.
///
/// # Arguments
/// * `board`: The board to balance. It is not modified.
/// * `move_limit`: Maximum number of moves to return.
///
/// # Returns
/// The moves in order; empty if the board is already balanced.
pub fn balance_board(board: &Board, move_limit: usize) -> Vec<Move> {
    let start = Instant::now();
    let mut current = *board;
    let mut moves = Vec::new();

    for _ in 0..move_limit {
        let cols = columns_by_height_asc(&current);
        let emptiest = cols[0];
        let fullest = cols[COLUMNS - 1];
        if current.height(emptiest) + 1 >= current.height(fullest) {
            break;
        }
        let mv = if current.held().is_empty() {
            Move::draw(fullest)
        } else {
            Move::place(emptiest)
        };
        tracing::trace!(%mv, "balancing move");
        current.apply_move(mv);
        moves.push(mv);
    }

    tracing::debug!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        moves = moves.len(),
        "balance_board finished"
    );
    moves
}
