//! Distance oracles and solvability parity for puzzle boards.
//!
//! `Board` keeps its Hamming and Manhattan distances as caches that are
//! adjusted incrementally on every move. The functions here recompute the
//! same quantities from scratch with independent arithmetic, which makes
//! them the oracle side of the incremental-vs-scratch regression tests.
//! The inversion-parity predicate classifies solvability directly from the
//! permutation; the solver never consults it (it decides solvability with
//! the twin search), but tests and the board generator do.
use crate::engine::Board;

/// Number of misplaced non-blank tiles, recomputed from scratch.
///
/// # Arguments
/// * `board`: the board to measure.
///
/// # Returns
/// The count of non-blank tiles whose cell differs from their goal cell.
pub fn hamming_of(board: &Board) -> u32 {
    let n = board.dimension();
    let mut misplaced = 0;
    for row in 0..n {
        for col in 0..n {
            let value = board.tile(row, col);
            if value != 0 && value as usize != row * n + col + 1 {
                misplaced += 1;
            }
        }
    }
    misplaced
}

/// Sum of per-tile displacements from the goal, recomputed from scratch.
///
/// # Arguments
/// * `board`: the board to measure.
///
/// # Returns
/// The total Manhattan distance over all non-blank tiles.
pub fn manhattan_of(board: &Board) -> u32 {
    let n = board.dimension();
    let mut total = 0;
    for row in 0..n {
        for col in 0..n {
            let value = board.tile(row, col);
            if value == 0 {
                continue;
            }
            let goal_row = (value as usize - 1) / n;
            let goal_col = (value as usize - 1) % n;
            total += (row.abs_diff(goal_row) + col.abs_diff(goal_col)) as u32;
        }
    }
    total
}

/// Counts inversions in the row-major tile sequence, ignoring the blank.
///
/// An inversion is a pair of non-blank tiles where the larger value comes
/// first in reading order.
pub fn count_inversions(board: &Board) -> u32 {
    let n = board.dimension();
    let flat: Vec<u32> = (0..n)
        .flat_map(|row| (0..n).map(move |col| board.tile(row, col)))
        .filter(|&value| value != 0)
        .collect();

    let mut inversions = 0;
    for (i, &value) in flat.iter().enumerate() {
        inversions += flat[i + 1..].iter().filter(|&&later| later < value).count() as u32;
    }
    inversions
}

/// The classical inversion-parity solvability criterion.
///
/// Odd-sided boards are solvable iff the inversion count is even;
/// even-sided boards are solvable iff the inversion count plus the blank's
/// row index is odd. Swapping any single pair of non-blank tiles flips the
/// verdict, which is what makes `Board::twin` a solvability detector.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Board;
/// use npuzzle_solver::heuristics::solvable_by_inversions;
/// let board = Board::from_grid(&[
///     vec![1, 2, 3],
///     vec![4, 5, 6],
///     vec![8, 7, 0],
/// ]).unwrap();
/// assert!(!solvable_by_inversions(&board));
/// ```
pub fn solvable_by_inversions(board: &Board) -> bool {
    let inversions = count_inversions(board);
    if board.dimension() % 2 == 1 {
        inversions % 2 == 0
    } else {
        let (blank_row, _) = board.blank_position();
        (inversions as usize + blank_row) % 2 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_3x3(rows: [[u32; 3]; 3]) -> Board {
        let grid: Vec<Vec<u32>> = rows.iter().map(|r| r.to_vec()).collect();
        Board::from_grid(&grid).unwrap()
    }

    #[test]
    fn test_scratch_distances_on_known_board() {
        let board = board_3x3([[8, 1, 3], [4, 0, 2], [7, 6, 5]]);
        assert_eq!(hamming_of(&board), 5);
        assert_eq!(manhattan_of(&board), 10);
    }

    #[test]
    fn test_scratch_distances_zero_only_at_goal() {
        let goal = Board::goal(3).unwrap();
        assert_eq!(hamming_of(&goal), 0);
        assert_eq!(manhattan_of(&goal), 0);

        let off_by_one = board_3x3([[1, 2, 3], [4, 5, 6], [7, 0, 8]]);
        assert!(hamming_of(&off_by_one) > 0);
        assert!(manhattan_of(&off_by_one) > 0);
    }

    #[test]
    fn test_count_inversions_goal_is_zero() {
        assert_eq!(count_inversions(&Board::goal(3).unwrap()), 0);
        assert_eq!(count_inversions(&Board::goal(4).unwrap()), 0);
    }

    #[test]
    fn test_count_inversions_single_swap() {
        // Swapping the last two tiles of the goal creates exactly one
        // inversion.
        let board = board_3x3([[1, 2, 3], [4, 5, 6], [8, 7, 0]]);
        assert_eq!(count_inversions(&board), 1);
    }

    #[test]
    fn test_parity_classifies_known_boards() {
        // Goal with the last pair swapped is the canonical unsolvable 3x3.
        let unsolvable = board_3x3([[1, 2, 3], [4, 5, 6], [8, 7, 0]]);
        assert!(!solvable_by_inversions(&unsolvable));

        let solvable = board_3x3([[0, 1, 3], [4, 2, 5], [7, 8, 6]]);
        assert!(solvable_by_inversions(&solvable));
    }

    #[test]
    fn test_parity_even_dimension_uses_blank_row() {
        // One slide away from the 4x4 goal: solvable.
        let goal = Board::goal(4).unwrap();
        let one_move = &goal.neighbors()[0];
        assert!(solvable_by_inversions(one_move));

        // Its twin must not be.
        assert!(!solvable_by_inversions(&one_move.twin().unwrap()));
    }

    #[test]
    fn test_twin_always_flips_parity() {
        let samples = [
            board_3x3([[8, 1, 3], [4, 0, 2], [7, 6, 5]]),
            board_3x3([[0, 1, 3], [4, 2, 5], [7, 8, 6]]),
            Board::goal(3).unwrap(),
            Board::random_with_seed(4, 30, 11).unwrap(),
            Board::random_with_seed(2, 9, 5).unwrap(),
        ];
        for board in &samples {
            let twin = board.twin().unwrap();
            assert_ne!(
                solvable_by_inversions(board),
                solvable_by_inversions(&twin),
                "exactly one of a board and its twin is solvable"
            );
        }
    }

    #[test]
    fn test_scrambled_boards_stay_solvable() {
        for seed in 0..8 {
            let board = Board::random_with_seed(3, 40, seed).unwrap();
            assert!(
                solvable_by_inversions(&board),
                "scrambling by legal moves must preserve solvability (seed {})",
                seed
            );
        }
    }
}
