use crate::engine::{Board, BoardError};

/// Parses the puzzle text format into a `Board`.
///
/// The format is the one `Board`'s `Display` implementation writes: a
/// leading integer n followed by n² whitespace-separated tile values in
/// row-major order. Any whitespace (spaces, newlines) separates tokens, so
/// rendered boards parse back unchanged.
///
/// # Arguments
/// * `input`: the puzzle text, e.g. the contents of a board file.
///
/// # Returns
/// * `Ok(Board)` if the text is well-formed and the values are exactly the
///   integers `0..n²` each appearing once.
/// * `Err(BoardError::InvalidInput)` on an empty input, a non-integer
///   token, a missing or surplus tile, or an invalid permutation.
///
/// # Examples
/// ```
/// use npuzzle_solver::utils::board_from_str;
///
/// let board = board_from_str("3\n 1 2 3\n 4 5 6\n 7 8 0\n").unwrap();
/// assert!(board.is_goal());
///
/// let round_trip = board_from_str(&board.to_string()).unwrap();
/// assert_eq!(round_trip, board);
///
/// assert!(board_from_str("2\n1 2 3 x").is_err());
/// ```
pub fn board_from_str(input: &str) -> Result<Board, BoardError> {
    let mut tokens = input.split_whitespace();

    let dimension_token = tokens
        .next()
        .ok_or_else(|| BoardError::InvalidInput("input is empty".to_string()))?;
    let n: usize = dimension_token.parse().map_err(|_| {
        BoardError::InvalidInput(format!(
            "dimension '{}' is not a non-negative integer",
            dimension_token
        ))
    })?;
    if n == 0 {
        return Err(BoardError::InvalidInput(
            "dimension must be positive".to_string(),
        ));
    }

    let mut grid = vec![Vec::with_capacity(n); n];
    for row in 0..n {
        for col in 0..n {
            let token = tokens.next().ok_or_else(|| {
                BoardError::InvalidInput(format!(
                    "expected {} tile values, found {}",
                    n * n,
                    row * n + col
                ))
            })?;
            let value: u32 = token.parse().map_err(|_| {
                BoardError::InvalidInput(format!(
                    "tile at row {} col {} is not an integer: '{}'",
                    row, col, token
                ))
            })?;
            grid[row].push(value);
        }
    }

    if let Some(extra) = tokens.next() {
        return Err(BoardError::InvalidInput(format!(
            "unexpected trailing token '{}'",
            extra
        )));
    }

    Board::from_grid(&grid)
}
