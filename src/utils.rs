use crate::engine::{Board, Item, Move, COLUMNS, ROWS};
use crate::error::{Result, SolverError};

/// Parses an array of string slices into a `Board`.
///
/// The format is the one produced by `Board`'s `Display` implementation. Each string
/// slice is a row, starting from row 0 (the base of every column), with one character
/// per column. Row 0 may be followed by whitespace and a single character naming the
/// held item. Missing rows and short rows are treated as empty cells.
///
/// Valid item characters are:
/// - `'y'`, `'g'`, `'r'`, `'p'`, `'b'`: yellow, green, red, pink and blue
/// - the uppercase letters for the bomb variants
/// - `'.'`: empty
///
/// # Arguments
/// * `s`: A slice of string slices (`&[&str]`) representing the rows of the board.
///
/// # Returns
/// * `Ok(Board)` if parsing is successful.
/// * `Err(SolverError)` if:
///     - The number of rows exceeds `ROWS`, or a row is longer than `COLUMNS`.
///     - An unrecognized character is encountered.
///     - An item floats above an empty cell in its column.
///     - A held item is given on a row other than row 0, or is not a single character.
///
/// # Examples
/// ```
/// use hackmatch_solver::utils::board_from_str_array;
/// use hackmatch_solver::engine::Item;
///
/// let board = board_from_str_array(&[
///     "rg..... P", // Row 0, holding a pink bomb
///     "b......",   // Row 1
/// ]).unwrap();
/// assert_eq!(board.column(0), &[Item::Red, Item::Blue]);
/// assert_eq!(board.column(1), &[Item::Green]);
/// assert_eq!(board.held(), Item::PinkBomb);
///
/// assert!(board_from_str_array(&["rxg"]).is_err());
/// assert!(board_from_str_array(&[".......", "r......"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board> {
    if s.len() > ROWS {
        return Err(SolverError::InvalidBoard(format!(
            "Invalid number of rows. Expected at most {}, found {}",
            ROWS,
            s.len()
        )));
    }

    let mut columns: Vec<Vec<Item>> = vec![Vec::new(); COLUMNS];
    let mut held = Item::Empty;

    for (r, line) in s.iter().enumerate() {
        let mut parts = line.split_whitespace();
        let cells = parts.next().unwrap_or("");

        if let Some(held_str) = parts.next() {
            if r != 0 {
                return Err(SolverError::InvalidBoard(format!(
                    "Held item given on row {}, only row 0 may carry it",
                    r
                )));
            }
            let mut chars = held_str.chars();
            held = match (chars.next(), chars.next()) {
                (Some(c), None) => Item::from_char(c)?,
                _ => {
                    return Err(SolverError::InvalidBoard(format!(
                        "Held item must be a single character, found '{}'",
                        held_str
                    )))
                }
            };
        }
        if parts.next().is_some() {
            return Err(SolverError::InvalidBoard(format!(
                "Unexpected trailing text on row {}",
                r
            )));
        }

        if cells.chars().count() > COLUMNS {
            return Err(SolverError::InvalidBoard(format!(
                "Row {} is too long. Expected at most {} characters, found {}",
                r,
                COLUMNS,
                cells.chars().count()
            )));
        }

        for (c, ch) in cells.chars().enumerate() {
            let item = Item::from_char(ch)?;
            if item.is_empty() {
                continue;
            }
            // Columns grow from row 0 without gaps.
            if columns[c].len() != r {
                return Err(SolverError::InvalidBoard(format!(
                    "Item '{}' at row {} col {} has an empty cell below it",
                    ch, r, c
                )));
            }
            columns[c].push(item);
        }
    }

    Board::from_columns(&columns, held)
}

/// Formats a move list as space-separated move tokens, e.g. `"d3 p0 s2"`.
pub fn format_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses a whitespace-separated list of move tokens.
///
/// Fails on the first token that is not a valid move; nothing is silently skipped.
pub fn parse_moves(s: &str) -> Result<Vec<Move>> {
    s.split_whitespace().map(str::parse::<Move>).collect()
}
