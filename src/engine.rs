//! Core game model for the stack-matching puzzle.
//!
//! This module defines the game's fundamental components:
//! - `Item`: The tile colors and their bomb variants, using the game's item codes.
//! - `Board`: Seven fixed-capacity column stacks plus the single held slot, with
//!   value equality and a position-sensitive hash so boards can key search caches.
//! - `Move`: The three carrier commands (draw, place, swap) and how they are applied.
//! - Match detection: a bounded flood fill around a cell that just changed.
use crate::error::{Result, SolverError};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Number of columns on the playing field.
pub const COLUMNS: usize = 7;

/// Maximum number of items a single column can hold.
pub const ROWS: usize = 9;

/// Connected plain items needed to clear a group.
pub const MATCH_SIZE: u8 = 4;

/// Connected bombs of one color needed to set them off.
pub const BOMB_MATCH_SIZE: u8 = 2;

const BOMB_MASK: u8 = 0b1000;

/// A single cell value.
///
/// The discriminants are the item codes used by the game capture: colors are
/// `1..=5` and bit `0b1000` marks the bomb variant of a color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Item {
    /// No item.
    #[default]
    Empty = 0,
    Yellow = 1,
    Green = 2,
    Red = 3,
    Pink = 4,
    Blue = 5,
    YellowBomb = BOMB_MASK | 1,
    GreenBomb = BOMB_MASK | 2,
    RedBomb = BOMB_MASK | 3,
    PinkBomb = BOMB_MASK | 4,
    BlueBomb = BOMB_MASK | 5,
}

impl Item {
    /// The five plain colors, in code order.
    pub const COLORS: [Item; 5] = [Item::Yellow, Item::Green, Item::Red, Item::Pink, Item::Blue];

    /// Decodes an item code.
    ///
    /// # Errors
    /// Returns `SolverError::UnknownItem` for any code outside the encoding.
    /// Unknown codes mean the capture is corrupt, so they are never mapped to `Empty`.
    ///
    /// # Examples
    /// ```
    /// use hackmatch_solver::engine::Item;
    /// assert_eq!(Item::from_code(11).unwrap(), Item::RedBomb);
    /// assert!(Item::from_code(6).is_err());
    /// ```
    pub fn from_code(code: u8) -> Result<Self> {
        let item = match code {
            0 => Item::Empty,
            1 => Item::Yellow,
            2 => Item::Green,
            3 => Item::Red,
            4 => Item::Pink,
            5 => Item::Blue,
            9 => Item::YellowBomb,
            10 => Item::GreenBomb,
            11 => Item::RedBomb,
            12 => Item::PinkBomb,
            13 => Item::BlueBomb,
            _ => return Err(SolverError::UnknownItem(code)),
        };
        Ok(item)
    }

    /// Returns the item code.
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_empty(self) -> bool {
        self == Item::Empty
    }

    /// Whether this is the bomb variant of a color.
    pub fn is_bomb(self) -> bool {
        self.code() & BOMB_MASK != 0
    }

    /// Returns the bomb variant of this item's color. Bombs and `Empty` are returned unchanged.
    pub fn to_bomb(self) -> Item {
        match self {
            Item::Yellow => Item::YellowBomb,
            Item::Green => Item::GreenBomb,
            Item::Red => Item::RedBomb,
            Item::Pink => Item::PinkBomb,
            Item::Blue => Item::BlueBomb,
            other => other,
        }
    }

    /// Number of connected same items required for this item to match.
    pub fn match_size(self) -> u8 {
        if self.is_bomb() {
            BOMB_MATCH_SIZE
        } else {
            MATCH_SIZE
        }
    }

    /// Converts the item to its character representation.
    ///
    /// Colors are lowercase initials, bombs the uppercase initial and `Empty` is `'.'`.
    ///
    /// # Examples
    /// ```
    /// use hackmatch_solver::engine::Item;
    /// assert_eq!(Item::Pink.to_char(), 'p');
    /// assert_eq!(Item::PinkBomb.to_char(), 'P');
    /// assert_eq!(Item::Empty.to_char(), '.');
    /// ```
    pub fn to_char(self) -> char {
        match self {
            Item::Empty => '.',
            Item::Yellow => 'y',
            Item::Green => 'g',
            Item::Red => 'r',
            Item::Pink => 'p',
            Item::Blue => 'b',
            Item::YellowBomb => 'Y',
            Item::GreenBomb => 'G',
            Item::RedBomb => 'R',
            Item::PinkBomb => 'P',
            Item::BlueBomb => 'B',
        }
    }

    /// Parses the character form produced by [`Item::to_char`].
    pub fn from_char(c: char) -> Result<Self> {
        let item = match c {
            '.' => Item::Empty,
            'y' => Item::Yellow,
            'g' => Item::Green,
            'r' => Item::Red,
            'p' => Item::Pink,
            'b' => Item::Blue,
            'Y' => Item::YellowBomb,
            'G' => Item::GreenBomb,
            'R' => Item::RedBomb,
            'P' => Item::PinkBomb,
            'B' => Item::BlueBomb,
            _ => return Err(SolverError::UnknownItemChar(c)),
        };
        Ok(item)
    }
}

/// The three carrier commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Take the top item of a column into the held slot.
    Draw,
    /// Put the held item on top of a column.
    Place,
    /// Exchange the two topmost items of a column.
    Swap,
}

impl MoveKind {
    fn tag(self) -> char {
        match self {
            MoveKind::Draw => 'd',
            MoveKind::Place => 'p',
            MoveKind::Swap => 's',
        }
    }
}

/// A command aimed at one column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub kind: MoveKind,
    pub column: usize,
}

impl Move {
    pub fn draw(column: usize) -> Self {
        Move { kind: MoveKind::Draw, column }
    }

    pub fn place(column: usize) -> Self {
        Move { kind: MoveKind::Place, column }
    }

    pub fn swap(column: usize) -> Self {
        Move { kind: MoveKind::Swap, column }
    }
}

impl fmt::Display for Move {
    /// Formats the move as its tag letter followed by the column, e.g. `p3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.tag(), self.column)
    }
}

impl FromStr for Move {
    type Err = SolverError;

    /// Parses the `Display` form: `d`, `p` or `s` followed by a column index.
    fn from_str(s: &str) -> Result<Self> {
        let bad = || SolverError::UnknownMove(s.to_string());
        let mut chars = s.chars();
        let kind = match chars.next() {
            Some('d') => MoveKind::Draw,
            Some('p') => MoveKind::Place,
            Some('s') => MoveKind::Swap,
            _ => return Err(bad()),
        };
        let column: usize = chars.as_str().parse().map_err(|_| bad())?;
        if column >= COLUMNS {
            return Err(bad());
        }
        Ok(Move { kind, column })
    }
}

// Combine step from boost::hash_combine, widened to 64 bits.
#[inline]
fn combine_hash(seed: u64, value: u64) -> u64 {
    seed ^ value
        .wrapping_add(0x9e37_79b9)
        .wrapping_add(seed << 6)
        .wrapping_add(seed >> 2)
}

/// The playing field: `COLUMNS` stacks of at most `ROWS` items, plus one held item.
///
/// Row 0 is the base of a column and items are only added or removed at the top
/// (`row == height - 1`). Cells at or above a column's height are always `Item::Empty`.
/// The board is `Copy`, so search branches work on independent copies.
#[derive(Clone, Copy, Debug)]
pub struct Board {
    items: [[Item; ROWS]; COLUMNS],
    heights: [u8; COLUMNS],
    held: Item,
}

impl Board {
    /// Creates a board with every column empty and nothing held.
    ///
    /// # Examples
    /// ```
    /// use hackmatch_solver::engine::{Board, Item};
    /// let board = Board::new_empty();
    /// assert_eq!(board.item_count(), 0);
    /// assert_eq!(board.held(), Item::Empty);
    /// ```
    pub fn new_empty() -> Self {
        Board {
            items: [[Item::Empty; ROWS]; COLUMNS],
            heights: [0; COLUMNS],
            held: Item::Empty,
        }
    }

    /// Creates a board from explicit column contents.
    ///
    /// # Arguments
    /// * `columns`: Up to `COLUMNS` stacks, each listed from the base upward.
    ///   Missing trailing columns are empty.
    /// * `held`: The held item, or `Item::Empty`.
    ///
    /// # Returns
    /// * `Err(SolverError::InvalidBoard)` if there are too many columns, a column is
    ///   taller than `ROWS`, or a column contains `Item::Empty`.
    pub fn from_columns<C: AsRef<[Item]>>(columns: &[C], held: Item) -> Result<Self> {
        if columns.len() > COLUMNS {
            return Err(SolverError::InvalidBoard(format!(
                "expected at most {} columns, found {}",
                COLUMNS,
                columns.len()
            )));
        }
        let mut board = Board::new_empty();
        for (col, stack) in columns.iter().enumerate() {
            let stack = stack.as_ref();
            if stack.len() > ROWS {
                return Err(SolverError::InvalidBoard(format!(
                    "column {} holds {} items, limit is {}",
                    col,
                    stack.len(),
                    ROWS
                )));
            }
            if let Some(row) = stack.iter().position(|item| item.is_empty()) {
                return Err(SolverError::InvalidBoard(format!(
                    "column {} has an empty cell at row {}",
                    col, row
                )));
            }
            board.items[col][..stack.len()].copy_from_slice(stack);
            board.heights[col] = stack.len() as u8;
        }
        board.held = held;
        Ok(board)
    }

    /// Creates a reproducible random board.
    ///
    /// Column heights are drawn from `0..ROWS - 2` so the board is never packed,
    /// roughly one item in twelve is a bomb, and the held slot is filled half the time.
    ///
    /// # Arguments
    /// * `seed`: Seed for the `SmallRng`. The same seed always produces the same board.
    pub fn new_random_with_seed(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new_empty();
        for col in 0..COLUMNS {
            let height = rng.gen_range(0..ROWS - 2);
            for row in 0..height {
                board.items[col][row] = random_item(&mut rng);
            }
            board.heights[col] = height as u8;
        }
        if rng.gen_bool(0.5) {
            board.held = random_item(&mut rng);
        }
        board
    }

    /// Number of items stacked in `column`.
    ///
    /// # Panics
    /// Panics if `column >= COLUMNS`.
    pub fn height(&self, column: usize) -> usize {
        self.heights[column] as usize
    }

    /// All column heights, indexed by column.
    pub fn heights(&self) -> [usize; COLUMNS] {
        self.heights.map(usize::from)
    }

    /// The occupied part of `column`, from the base upward.
    pub fn column(&self, column: usize) -> &[Item] {
        &self.items[column][..self.height(column)]
    }

    /// The item at (`column`, `row`), or `Item::Empty` above the column's height.
    pub fn item(&self, column: usize, row: usize) -> Item {
        self.column(column).get(row).copied().unwrap_or(Item::Empty)
    }

    pub fn held(&self) -> Item {
        self.held
    }

    pub fn is_full(&self, column: usize) -> bool {
        self.height(column) == ROWS
    }

    /// Total number of items, counting the held item.
    pub fn item_count(&self) -> usize {
        let stacked: usize = self.heights.iter().map(|&h| h as usize).sum();
        stacked + usize::from(!self.held.is_empty())
    }

    /// Position-sensitive 64-bit hash of the board.
    ///
    /// Folds each column's height and then its items, base upward, followed by the
    /// held item. The height acts as a column separator, so moving an item to a
    /// neighbouring column changes the hash.
    pub fn state_hash(&self) -> u64 {
        let mut hash = 0u64;
        for col in 0..COLUMNS {
            hash = combine_hash(hash, u64::from(self.heights[col]));
            for item in self.column(col) {
                hash = combine_hash(hash, u64::from(item.code()));
            }
        }
        combine_hash(hash, u64::from(self.held.code()))
    }

    /// Whether `mv` satisfies its preconditions on this board.
    ///
    /// - Draw: the column is non-empty and nothing is held.
    /// - Place: something is held and the column is not full.
    /// - Swap: the column has at least two items.
    pub fn is_legal(&self, mv: Move) -> bool {
        if mv.column >= COLUMNS {
            return false;
        }
        let height = self.height(mv.column);
        match mv.kind {
            MoveKind::Draw => height > 0 && self.held.is_empty(),
            MoveKind::Place => !self.held.is_empty() && height < ROWS,
            MoveKind::Swap => height >= 2,
        }
    }

    /// Applies `mv` to this board in place.
    ///
    /// # Panics
    /// Panics if the move is illegal. The search only generates legal moves, so a
    /// violation here is a bug in the caller, not a runtime condition.
    pub fn apply_move(&mut self, mv: Move) {
        let col = mv.column;
        assert!(col < COLUMNS, "{}: column out of range", mv);
        let height = self.height(col);
        match mv.kind {
            MoveKind::Draw => {
                assert!(height > 0, "{}: column {} is empty", mv, col);
                assert!(self.held.is_empty(), "{}: already holding {:?}", mv, self.held);
                self.held = std::mem::take(&mut self.items[col][height - 1]);
                self.heights[col] -= 1;
            }
            MoveKind::Place => {
                assert!(!self.held.is_empty(), "{}: nothing held", mv);
                assert!(height < ROWS, "{}: column {} is full", mv, col);
                self.items[col][height] = std::mem::take(&mut self.held);
                self.heights[col] += 1;
            }
            MoveKind::Swap => {
                assert!(height >= 2, "{}: column {} has fewer than two items", mv, col);
                self.items[col].swap(height - 1, height - 2);
            }
        }
    }

    /// Returns a copy of this board with `mv` applied.
    pub fn with_move(&self, mv: Move) -> Board {
        let mut next = *self;
        next.apply_move(mv);
        next
    }

    /// Determines whether the item at (`column`, `row`) belongs to a connected group
    /// of identical items large enough to clear.
    ///
    /// Cells connect up/down within a column and left/right across neighbouring
    /// columns at the same row. The threshold is `BOMB_MATCH_SIZE` for bombs and
    /// `MATCH_SIZE` otherwise. The flood fill stops as soon as the threshold is
    /// reached, so large groups are never fully enumerated.
    ///
    /// # Returns
    /// `false` when the cell is out of bounds or above the column's height.
    ///
    /// # Examples
    /// ```
    /// use hackmatch_solver::engine::{Board, Item};
    /// let board = Board::from_columns(&[vec![Item::Red; 4]], Item::Empty).unwrap();
    /// assert!(board.has_match(0, 3));
    /// ```
    pub fn has_match(&self, column: usize, row: usize) -> bool {
        if column >= COLUMNS || row >= self.height(column) {
            return false;
        }
        let item = self.items[column][row];
        let mut visited = [[false; ROWS]; COLUMNS];
        let mut remaining = item.match_size();
        self.flood_match(column, row, item, &mut visited, &mut remaining)
    }

    fn flood_match(
        &self,
        column: usize,
        row: usize,
        item: Item,
        visited: &mut [[bool; ROWS]; COLUMNS],
        remaining: &mut u8,
    ) -> bool {
        if column >= COLUMNS || row >= self.height(column) {
            return false;
        }
        if visited[column][row] || self.items[column][row] != item {
            return false;
        }
        visited[column][row] = true;
        *remaining -= 1;
        if *remaining == 0 {
            return true;
        }
        self.flood_match(column + 1, row, item, visited, remaining)
            || (column > 0 && self.flood_match(column - 1, row, item, visited, remaining))
            || self.flood_match(column, row + 1, item, visited, remaining)
            || (row > 0 && self.flood_match(column, row - 1, item, visited, remaining))
    }

    /// Whether `mv`, already applied to this board, produced a match.
    ///
    /// A place is tested at the new top of its column and a swap at both exchanged
    /// cells. A draw takes an item off the grid and never matches.
    pub fn move_matches(&self, mv: Move) -> bool {
        let height = self.height(mv.column);
        match mv.kind {
            MoveKind::Draw => false,
            MoveKind::Place => height > 0 && self.has_match(mv.column, height - 1),
            MoveKind::Swap => {
                height >= 2
                    && (self.has_match(mv.column, height - 1)
                        || self.has_match(mv.column, height - 2))
            }
        }
    }
}

fn random_item(rng: &mut impl Rng) -> Item {
    let color = Item::COLORS[rng.gen_range(0..Item::COLORS.len())];
    if rng.gen_ratio(1, 12) {
        color.to_bomb()
    } else {
        color
    }
}

impl PartialEq for Board {
    /// Boards are equal when the held items match and every column holds the
    /// same items in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.held == other.held
            && self.heights == other.heights
            && (0..COLUMNS).all(|col| self.column(col) == other.column(col))
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.state_hash());
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new_empty()
    }
}

impl fmt::Display for Board {
    /// One text line per row, row 0 first, one character per column.
    /// The held item follows row 0 after a space.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            for col in 0..COLUMNS {
                write!(f, "{}", self.item(col, row).to_char())?;
            }
            if row == 0 {
                write!(f, " {}", self.held.to_char())?;
            }
            if row < ROWS - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;
    use std::collections::HashSet;

    fn all_moves() -> Vec<Move> {
        (0..COLUMNS)
            .flat_map(|c| [Move::draw(c), Move::place(c), Move::swap(c)])
            .collect()
    }

    #[test]
    fn test_new_empty_board() {
        let board = Board::new_empty();
        for col in 0..COLUMNS {
            assert_eq!(board.height(col), 0);
            for row in 0..ROWS {
                assert_eq!(board.item(col, row), Item::Empty);
            }
        }
        assert_eq!(board.held(), Item::Empty);
        assert_eq!(board.item_count(), 0);
    }

    #[test]
    fn test_item_codes() {
        for code in 0..=u8::MAX {
            match Item::from_code(code) {
                Ok(item) => assert_eq!(item.code(), code),
                Err(e) => assert_eq!(e, SolverError::UnknownItem(code)),
            }
        }
        assert_eq!(Item::from_code(6), Err(SolverError::UnknownItem(6)));
        assert_eq!(Item::from_code(8), Err(SolverError::UnknownItem(8)));
        assert!(Item::BlueBomb.is_bomb());
        assert!(!Item::Blue.is_bomb());
        assert!(!Item::Empty.is_bomb());
        assert_eq!(Item::Green.to_bomb(), Item::GreenBomb);
        assert_eq!(Item::GreenBomb.to_bomb(), Item::GreenBomb);
    }

    #[test]
    fn test_item_chars() {
        assert_eq!(Item::from_char('y').unwrap(), Item::Yellow);
        assert_eq!(Item::from_char('B').unwrap(), Item::BlueBomb);
        assert_eq!(Item::from_char('.').unwrap(), Item::Empty);
        assert_eq!(Item::from_char('x'), Err(SolverError::UnknownItemChar('x')));
    }

    #[test]
    fn test_from_columns_rejects_bad_shapes() {
        let too_tall = vec![Item::Red; ROWS + 1];
        assert!(Board::from_columns(&[too_tall], Item::Empty).is_err());

        let gap = vec![Item::Red, Item::Empty, Item::Red];
        assert!(Board::from_columns(&[gap], Item::Empty).is_err());

        let too_many: Vec<Vec<Item>> = vec![Vec::new(); COLUMNS + 1];
        assert!(Board::from_columns(&too_many, Item::Empty).is_err());
    }

    #[test]
    fn test_item_count_includes_held() {
        let board = Board::from_columns(
            &[vec![Item::Red, Item::Green], vec![Item::Blue]],
            Item::Pink,
        )
        .unwrap();
        assert_eq!(board.item_count(), 4);
    }

    #[test]
    fn test_equality_and_hash_are_stable() {
        for seed in 0..20 {
            let board = Board::new_random_with_seed(seed);
            assert_eq!(board, board);
            assert_eq!(board.state_hash(), board.state_hash());
            assert_eq!(board, Board::new_random_with_seed(seed));
        }
    }

    #[test]
    fn test_position_matters_for_equality_and_hash() {
        let left = Board::from_columns(&[vec![Item::Red], vec![Item::Green]], Item::Empty).unwrap();
        let right =
            Board::from_columns(&[vec![Item::Green], vec![Item::Red]], Item::Empty).unwrap();
        assert_ne!(left, right);
        assert_ne!(left.state_hash(), right.state_hash());

        let stacked =
            Board::from_columns(&[vec![Item::Red, Item::Green]], Item::Empty).unwrap();
        assert_ne!(left, stacked);
        assert_ne!(left.state_hash(), stacked.state_hash());

        let holding =
            Board::from_columns(&[vec![Item::Red], vec![Item::Green]], Item::Red).unwrap();
        assert_ne!(left, holding);
    }

    #[test]
    fn test_drawn_cell_does_not_affect_equality() {
        let board = Board::from_columns(&[vec![Item::Red, Item::Green]], Item::Empty).unwrap();
        let drawn_and_back = board.with_move(Move::draw(0)).with_move(Move::place(0));
        assert_eq!(board, drawn_and_back);

        let set: HashSet<Board> = [board, drawn_and_back].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_apply_draw_place_swap() {
        let board = board_from_str_array(&["rg..... .", "b......"]).unwrap();

        let drawn = board.with_move(Move::draw(0));
        assert_eq!(drawn.held(), Item::Blue);
        assert_eq!(drawn.column(0), &[Item::Red]);

        let placed = drawn.with_move(Move::place(1));
        assert_eq!(placed.held(), Item::Empty);
        assert_eq!(placed.column(1), &[Item::Green, Item::Blue]);

        let swapped = placed.with_move(Move::swap(1));
        assert_eq!(swapped.column(1), &[Item::Blue, Item::Green]);
        assert_eq!(swapped.held(), Item::Empty);
    }

    #[test]
    fn test_legal_moves_preserve_invariants() {
        for seed in 0..50 {
            let board = Board::new_random_with_seed(seed);
            for mv in all_moves() {
                if !board.is_legal(mv) {
                    continue;
                }
                let next = board.with_move(mv);
                assert_eq!(next.item_count(), board.item_count(), "{} on seed {}", mv, seed);
                for col in 0..COLUMNS {
                    assert!(next.height(col) <= ROWS);
                    assert!(next.column(col).iter().all(|item| !item.is_empty()));
                    for row in next.height(col)..ROWS {
                        assert_eq!(next.items[col][row], Item::Empty);
                    }
                }
                let stacked: usize = next.heights().iter().sum();
                assert!(stacked + 1 >= next.item_count());
                // source board untouched
                assert_eq!(board, Board::new_random_with_seed(seed));
            }
        }
    }

    #[test]
    fn test_is_legal_preconditions() {
        let board = board_from_str_array(&["r...... .", "r......"]).unwrap();
        assert!(board.is_legal(Move::draw(0)));
        assert!(!board.is_legal(Move::draw(1)));
        assert!(!board.is_legal(Move::place(0)));
        assert!(board.is_legal(Move::swap(0)));
        assert!(!board.is_legal(Move::swap(1)));
        assert!(!board.is_legal(Move::swap(COLUMNS)));

        let full = Board::from_columns(&[vec![Item::Red; ROWS]], Item::Green).unwrap();
        assert!(!full.is_legal(Move::place(0)));
        assert!(full.is_legal(Move::place(1)));
        assert!(!full.is_legal(Move::draw(0)));
    }

    #[test]
    #[should_panic(expected = "is empty")]
    fn test_draw_from_empty_column_panics() {
        Board::new_empty().apply_move(Move::draw(3));
    }

    #[test]
    #[should_panic(expected = "nothing held")]
    fn test_place_without_held_panics() {
        Board::new_empty().apply_move(Move::place(0));
    }

    #[test]
    fn test_match_thresholds_plain() {
        let four = Board::from_columns(&[vec![Item::Red; 4]], Item::Empty).unwrap();
        assert!(four.has_match(0, 3));
        assert!(four.has_match(0, 0));

        let three = Board::from_columns(&[vec![Item::Red; 3]], Item::Empty).unwrap();
        assert!(!three.has_match(0, 2));
    }

    #[test]
    fn test_match_thresholds_bomb() {
        let two = Board::from_columns(&[vec![Item::RedBomb; 2]], Item::Empty).unwrap();
        assert!(two.has_match(0, 1));

        let one = Board::from_columns(&[vec![Item::RedBomb]], Item::Empty).unwrap();
        assert!(!one.has_match(0, 0));
    }

    #[test]
    fn test_match_across_columns() {
        // L shape: two in column 0, one each in columns 1 and 2 on row 0
        let board = board_from_str_array(&["yyy.... .", "y......"]).unwrap();
        assert!(board.has_match(2, 0));

        let broken = board_from_str_array(&["yyg.... .", "y......"]).unwrap();
        assert!(!broken.has_match(0, 1));
    }

    #[test]
    fn test_bomb_and_plain_do_not_connect() {
        let board = board_from_str_array(&["r...... .", "r......", "r......", "R......"]).unwrap();
        assert!(!board.has_match(0, 3));
        assert!(!board.has_match(0, 0));
    }

    #[test]
    fn test_match_ignores_cells_above_height() {
        let board = board_from_str_array(&["rr..... .", ".r.....", ".r....."]).unwrap();
        assert!(board.has_match(0, 0));
        assert!(!board.has_match(0, 1));
        assert!(!board.has_match(COLUMNS, 0));
    }

    #[test]
    fn test_move_matches() {
        let board = board_from_str_array(&["rrr.... r"]).unwrap();
        let placed = board.with_move(Move::place(3));
        assert!(placed.move_matches(Move::place(3)));

        let board = board_from_str_array(&["rrgr... .", "..r...."]).unwrap();
        let swapped = board.with_move(Move::swap(2));
        assert!(swapped.move_matches(Move::swap(2)));

        let drawn = board.with_move(Move::draw(0));
        assert!(!drawn.move_matches(Move::draw(0)));
    }

    #[test]
    fn test_move_display_and_parse() {
        assert_eq!(Move::draw(3).to_string(), "d3");
        assert_eq!(Move::place(0).to_string(), "p0");
        assert_eq!("s6".parse::<Move>().unwrap(), Move::swap(6));
        assert!("x1".parse::<Move>().is_err());
        assert!("s7".parse::<Move>().is_err());
        assert!("p".parse::<Move>().is_err());
    }

    #[test]
    fn test_display_board_formatting() {
        let board = board_from_str_array(&["r.....b G", "Y......"]).unwrap();
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), ROWS);
        assert_eq!(lines[0], "r.....b G");
        assert_eq!(lines[1], "Y......");
        assert_eq!(lines[ROWS - 1], ".......");
    }

    #[test]
    fn test_new_random_with_seed_determinism() {
        let a = Board::new_random_with_seed(123);
        let b = Board::new_random_with_seed(123);
        assert_eq!(a, b);
        let differs = (124..134).any(|seed| Board::new_random_with_seed(seed) != a);
        assert!(differs, "different seeds should give different boards");
        for col in 0..COLUMNS {
            assert!(a.height(col) < ROWS - 2);
        }
    }
}
