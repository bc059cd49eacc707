//! Core board engine for the N-tile sliding puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Direction`: the four ways the blank can slide.
//! - `BoardError`: construction and operation failures.
//! - `Board`: one immutable placement of tiles on an n×n grid, with cached
//!   blank coordinates and cached Hamming/Manhattan distances to the goal.
//!
//! A `Board` is never mutated after construction. Every transformation
//! (`slide`, `twin`, scrambling) builds a fresh value, so the cached
//! distances cannot drift from the grid they describe.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// A direction the blank tile can slide in.
///
/// Sliding the blank `Up` means the tile above the blank moves down into the
/// blank's cell, and so on for the other variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the fixed order used by `Board::neighbors`.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The (row, column) delta applied to the blank's coordinates.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// The direction that undoes this one.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Errors reported by `Board` construction and operations.
///
/// The search itself cannot fail once a board is validated; these cover the
/// two caller-contract violations the engine detects up front.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BoardError {
    /// The tile grid is malformed: non-square, wrong cell count, or its
    /// values are not exactly the integers `0..n²` each appearing once.
    #[error("invalid board: {0}")]
    InvalidInput(String),

    /// The requested operation is undefined for this board, e.g. `twin()`
    /// on a board with no pair of non-blank tiles to swap.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

/// One placement of tiles on an n×n grid.
///
/// Tiles are the integers `1..n²-1`; `0` denotes the blank. The goal board
/// holds `1..n²-1` in row-major order with the blank in the last cell.
///
/// The blank coordinates and both goal distances are computed once at
/// construction and carried along unchanged; equality and hashing consider
/// only the dimension and the grid contents, never the caches.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Board;
/// let board = Board::from_grid(&[vec![1, 2], vec![3, 0]]).unwrap();
/// assert!(board.is_goal());
/// assert_eq!(board.dimension(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    tiles: Vec<u32>,
    blank_row: usize,
    blank_col: usize,
    hamming: u32,
    manhattan: u32,
}

/// Goal cell of tile `value` on a board of side `size`.
///
/// Only meaningful for non-blank values.
fn goal_cell(size: usize, value: u32) -> (usize, usize) {
    let v = value as usize - 1;
    (v / size, v % size)
}

/// Manhattan contribution of `value` sitting at `(row, col)`; the blank
/// contributes nothing.
fn tile_manhattan(size: usize, value: u32, row: usize, col: usize) -> u32 {
    if value == 0 {
        return 0;
    }
    let (goal_row, goal_col) = goal_cell(size, value);
    (row.abs_diff(goal_row) + col.abs_diff(goal_col)) as u32
}

/// Hamming contribution of `value` sitting at `(row, col)`: 1 if it is a
/// misplaced non-blank tile, 0 otherwise.
fn tile_misplaced(size: usize, value: u32, row: usize, col: usize) -> u32 {
    if value == 0 || goal_cell(size, value) == (row, col) {
        0
    } else {
        1
    }
}

impl Board {
    /// Creates a board from an n×n grid of tile values.
    ///
    /// The grid must be square and its values must be exactly the integers
    /// `0..n²`, each appearing once. The blank position and both goal
    /// distances are computed from scratch here; this is the only full
    /// recomputation on the move path (see `slide`).
    ///
    /// # Arguments
    /// * `grid`: rows of tile values, row 0 first.
    ///
    /// # Returns
    /// * `Ok(Board)` on a well-formed grid.
    /// * `Err(BoardError::InvalidInput)` if the grid is empty, non-square,
    ///   or not a permutation of `0..n²`.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    /// let board = Board::from_grid(&[
    ///     vec![8, 1, 3],
    ///     vec![4, 0, 2],
    ///     vec![7, 6, 5],
    /// ]).unwrap();
    /// assert_eq!(board.hamming(), 5);
    /// assert_eq!(board.manhattan(), 10);
    /// ```
    pub fn from_grid(grid: &[Vec<u32>]) -> Result<Self, BoardError> {
        let size = grid.len();
        if size == 0 {
            return Err(BoardError::InvalidInput(
                "board must have at least one row".to_string(),
            ));
        }
        for (row, cells) in grid.iter().enumerate() {
            if cells.len() != size {
                return Err(BoardError::InvalidInput(format!(
                    "row {} has {} cells (expected {})",
                    row,
                    cells.len(),
                    size
                )));
            }
        }

        let cell_count = size * size;
        let mut seen = vec![false; cell_count];
        let mut tiles = Vec::with_capacity(cell_count);
        for (row, cells) in grid.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if value as usize >= cell_count {
                    return Err(BoardError::InvalidInput(format!(
                        "tile value {} at row {} col {} is out of range 0..{}",
                        value, row, col, cell_count
                    )));
                }
                if seen[value as usize] {
                    return Err(BoardError::InvalidInput(format!(
                        "tile value {} appears more than once",
                        value
                    )));
                }
                seen[value as usize] = true;
                tiles.push(value);
            }
        }

        let blank = tiles
            .iter()
            .position(|&v| v == 0)
            .expect("a full permutation of 0..n*n always contains the blank");
        let mut hamming = 0;
        let mut manhattan = 0;
        for (index, &value) in tiles.iter().enumerate() {
            hamming += tile_misplaced(size, value, index / size, index % size);
            manhattan += tile_manhattan(size, value, index / size, index % size);
        }

        Ok(Board {
            size,
            tiles,
            blank_row: blank / size,
            blank_col: blank % size,
            hamming,
            manhattan,
        })
    }

    /// The canonical goal board of side `n`: tiles `1..n²-1` in row-major
    /// order with the blank in the last cell.
    ///
    /// # Returns
    /// * `Ok(Board)` for `n >= 1`.
    /// * `Err(BoardError::InvalidInput)` for `n == 0`.
    pub fn goal(n: usize) -> Result<Self, BoardError> {
        if n == 0 {
            return Err(BoardError::InvalidInput(
                "dimension must be positive".to_string(),
            ));
        }
        let mut tiles: Vec<u32> = (1..(n * n) as u32).collect();
        tiles.push(0);
        Ok(Board {
            size: n,
            tiles,
            blank_row: n - 1,
            blank_col: n - 1,
            hamming: 0,
            manhattan: 0,
        })
    }

    /// Creates a scrambled but always-solvable board of side `n`.
    ///
    /// Starting from the goal, the blank takes `scrambles` random legal
    /// steps, never immediately undoing the previous step. Every step is a
    /// legal move, so the result stays reachable from the goal and
    /// therefore solvable. The same seed always produces the same board.
    ///
    /// # Arguments
    /// * `n`: board side length.
    /// * `scrambles`: number of random blank moves to apply.
    /// * `seed`: seed for the scramble walk.
    pub fn random_with_seed(n: usize, scrambles: usize, seed: u64) -> Result<Self, BoardError> {
        let mut board = Board::goal(n)?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut last_step: Option<Direction> = None;

        for _ in 0..scrambles {
            let candidates: Vec<(Direction, Board)> = Direction::ALL
                .iter()
                .filter(|&&d| last_step.map_or(true, |prev| d != prev.opposite()))
                .filter_map(|&d| board.slide(d).map(|next| (d, next)))
                .collect();
            if candidates.is_empty() {
                break; // 1x1 board, nothing to scramble
            }
            let (step, next) = candidates[rng.gen_range(0..candidates.len())].clone();
            board = next;
            last_step = Some(step);
        }
        Ok(board)
    }

    /// Grid side length n.
    pub fn dimension(&self) -> usize {
        self.size
    }

    /// The tile value at `(row, col)`; `0` is the blank.
    ///
    /// # Panics
    /// Panics if `row` or `col` are outside `0..dimension()`.
    pub fn tile(&self, row: usize, col: usize) -> u32 {
        self.tiles[row * self.size + col]
    }

    /// The cell currently holding the blank. Derived from the grid and
    /// cached at construction; not part of the board's identity.
    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank_row, self.blank_col)
    }

    /// Number of non-blank tiles not in their goal cell. Zero exactly at
    /// the goal.
    pub fn hamming(&self) -> u32 {
        self.hamming
    }

    /// Sum over non-blank tiles of their row and column distance to the
    /// goal cell. Zero exactly at the goal; an admissible and consistent
    /// lower bound on the number of moves to reach it.
    pub fn manhattan(&self) -> u32 {
        self.manhattan
    }

    /// Is this board the goal board?
    pub fn is_goal(&self) -> bool {
        self.hamming == 0
    }

    /// Slides the blank one step in `direction`, producing a new board.
    ///
    /// Returns `None` if the move would leave the grid. The new board's
    /// distances are adjusted incrementally: only the single tile that
    /// moved changes its contribution.
    pub fn slide(&self, direction: Direction) -> Option<Board> {
        let (dr, dc) = direction.offset();
        let to_row = self.blank_row as isize + dr;
        let to_col = self.blank_col as isize + dc;
        if to_row < 0 || to_row >= self.size as isize || to_col < 0 || to_col >= self.size as isize
        {
            return None;
        }
        let (to_row, to_col) = (to_row as usize, to_col as usize);

        // The tile at the blank's target cell slides into the blank's cell.
        let value = self.tile(to_row, to_col);
        let mut tiles = self.tiles.clone();
        tiles.swap(
            self.blank_row * self.size + self.blank_col,
            to_row * self.size + to_col,
        );

        let hamming = self.hamming - tile_misplaced(self.size, value, to_row, to_col)
            + tile_misplaced(self.size, value, self.blank_row, self.blank_col);
        let manhattan = self.manhattan - tile_manhattan(self.size, value, to_row, to_col)
            + tile_manhattan(self.size, value, self.blank_row, self.blank_col);

        Some(Board {
            size: self.size,
            tiles,
            blank_row: to_row,
            blank_col: to_col,
            hamming,
            manhattan,
        })
    }

    /// All boards one legal move away, in the fixed `Direction::ALL` order.
    ///
    /// For n ≥ 2 there are 2 (corner blank), 3 (edge blank) or 4 (interior
    /// blank) of them; a 1×1 board has none. Each neighbor differs from
    /// this board by exactly one tile swap, and this board is in turn one
    /// of its neighbors.
    pub fn neighbors(&self) -> Vec<Board> {
        Direction::ALL
            .iter()
            .filter_map(|&direction| self.slide(direction))
            .collect()
    }

    /// A board identical to this one except that one fixed pair of
    /// non-blank tiles is swapped.
    ///
    /// The pair is the two leftmost cells of row 0, or of row 1 when the
    /// blank occupies row 0, so the choice is a total deterministic
    /// function of this board and never touches the blank. Swapping one
    /// pair of non-blank tiles flips the permutation parity, so exactly
    /// one of a board and its twin is solvable.
    ///
    /// # Returns
    /// * `Ok(Board)` for dimension ≥ 2.
    /// * `Err(BoardError::InvalidOperation)` for smaller boards, which
    ///   have no second non-blank tile to swap.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    /// let board = Board::from_grid(&[vec![1, 2], vec![0, 3]]).unwrap();
    /// let twin = board.twin().unwrap();
    /// assert_eq!(twin.tile(0, 0), 2);
    /// assert_eq!(twin.tile(0, 1), 1);
    /// ```
    pub fn twin(&self) -> Result<Board, BoardError> {
        if self.size < 2 {
            return Err(BoardError::InvalidOperation(format!(
                "a {0}x{0} board has no pair of non-blank tiles to swap",
                self.size
            )));
        }
        let row = if self.blank_row == 0 { 1 } else { 0 };
        let left = self.tile(row, 0);
        let right = self.tile(row, 1);

        let mut tiles = self.tiles.clone();
        tiles.swap(row * self.size, row * self.size + 1);

        let hamming = self.hamming
            - tile_misplaced(self.size, left, row, 0)
            - tile_misplaced(self.size, right, row, 1)
            + tile_misplaced(self.size, left, row, 1)
            + tile_misplaced(self.size, right, row, 0);
        let manhattan = self.manhattan
            - tile_manhattan(self.size, left, row, 0)
            - tile_manhattan(self.size, right, row, 1)
            + tile_manhattan(self.size, left, row, 1)
            + tile_manhattan(self.size, right, row, 0);

        Ok(Board {
            size: self.size,
            tiles,
            blank_row: self.blank_row,
            blank_col: self.blank_col,
            hamming,
            manhattan,
        })
    }
}

impl PartialEq for Board {
    /// Structural equality: same dimension, same tile at every cell. The
    /// cached blank coordinates and distances are derived state and take
    /// no part in the comparison.
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.tiles == other.tiles
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        self.tiles.hash(state);
    }
}

impl fmt::Display for Board {
    /// Renders the wire format: a line containing n, then n rows of
    /// width-2 right-justified tile values separated by spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.size)?;
        for row in 0..self.size {
            for col in 0..self.size {
                write!(f, "{:2} ", self.tile(row, col))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
