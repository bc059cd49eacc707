use crate::engine::Board;
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

/// One enqueued state of a single A* search: the board, the number of moves
/// taken to reach it, the cached priority, and a link to the node it was
/// expanded from. The links double as the solution path and as the
/// immediate-predecessor filter during expansion.
#[derive(Clone, Debug)]
struct SearchNode {
    board: Board,
    moves: u32,
    cost: u32,
    predecessor: Option<Rc<SearchNode>>,
}

impl SearchNode {
    fn root(board: Board) -> Self {
        let cost = board.manhattan();
        SearchNode {
            board,
            moves: 0,
            cost,
            predecessor: None,
        }
    }

    fn child(parent: &Rc<SearchNode>, board: Board) -> Self {
        let moves = parent.moves + 1;
        let cost = moves + board.manhattan();
        SearchNode {
            board,
            moves,
            cost,
            predecessor: Some(Rc::clone(parent)),
        }
    }

    /// Heap key: moves so far plus the Manhattan bound, ties broken by the
    /// Hamming count. Lower is better.
    fn key(&self) -> (u32, u32) {
        (self.cost, self.board.hamming())
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for SearchNode {}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reversed comparison so `BinaryHeap` acts as a min-heap on the key.
impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

/// One independent best-first search state: a priority queue of nodes over
/// one board's reachable states. The solver drives two of these in
/// lock-step, one seeded with the input board and one with its twin.
// TODO: Evaluate keeping a closed set of visited boards for 4x4 and larger
// inputs; predecessor filtering alone re-expands ancestors reached along
// different routes.
struct Frontier {
    queue: BinaryHeap<SearchNode>,
    expansions: u64,
}

impl Frontier {
    fn seeded(root: Board) -> Self {
        let mut queue = BinaryHeap::new();
        queue.push(SearchNode::root(root));
        Frontier {
            queue,
            expansions: 0,
        }
    }

    /// The minimum node, if it is a goal board.
    fn goal_node(&self) -> Option<&SearchNode> {
        self.queue.peek().filter(|node| node.board.is_goal())
    }

    /// Pops the minimum node and enqueues its neighbors one move deeper,
    /// skipping the neighbor equal to the popped node's immediate
    /// predecessor: in an undirected unit-cost move graph that revisit can
    /// never improve on the path it came from.
    fn expand_min(&mut self) {
        let node = self
            .queue
            .pop()
            .expect("frontier queue never empties while the search is running");
        self.expansions += 1;
        trace!(
            "expanding node: moves={} cost={} queue={}",
            node.moves,
            node.cost,
            self.queue.len()
        );

        let parent = Rc::new(node);
        for neighbor in parent.board.neighbors() {
            let is_backtrack = parent
                .predecessor
                .as_ref()
                .map_or(false, |prev| prev.board == neighbor);
            if !is_backtrack {
                self.queue.push(SearchNode::child(&parent, neighbor));
            }
        }
    }
}

/// Optimal solver for one puzzle instance.
///
/// The entire search runs inside `new`; the query methods only read the
/// stored verdict. Solvability is decided by racing two A* searches, one
/// on the input board and one on its twin: exactly one of the two can
/// reach the goal, so whichever search finishes first settles the answer
/// with no parity precomputation.
pub struct Solver {
    solvable: bool,
    moves: i32,
    solution: Option<Vec<Board>>,
}

impl Solver {
    /// Solves `initial`, running both searches to completion.
    ///
    /// A board that is already the goal is answered directly; this also
    /// covers the 1×1 board, whose twin does not exist.
    pub fn new(initial: Board) -> Self {
        if initial.is_goal() {
            return Solver {
                solvable: true,
                moves: 0,
                solution: Some(vec![initial]),
            };
        }

        let twin = initial
            .twin()
            .expect("a non-goal board has dimension >= 2, so its twin exists");
        let mut origin = Frontier::seeded(initial);
        let mut twin_side = Frontier::seeded(twin);

        loop {
            if let Some(goal) = origin.goal_node() {
                debug!(
                    "origin search reached the goal in {} moves ({} origin / {} twin expansions)",
                    goal.moves, origin.expansions, twin_side.expansions
                );
                let moves = goal.moves as i32;
                let path = reconstruct_path(goal);
                return Solver {
                    solvable: true,
                    moves,
                    solution: Some(path),
                };
            }
            if twin_side.goal_node().is_some() {
                debug!(
                    "twin search reached the goal; input is unsolvable ({} origin / {} twin expansions)",
                    origin.expansions, twin_side.expansions
                );
                return Solver {
                    solvable: false,
                    moves: -1,
                    solution: None,
                };
            }
            origin.expand_min();
            twin_side.expand_min();
        }
    }

    /// Is the initial board solvable?
    pub fn is_solvable(&self) -> bool {
        self.solvable
    }

    /// Minimum number of moves to the goal, or -1 if unsolvable.
    pub fn moves(&self) -> i32 {
        self.moves
    }

    /// The boards from the initial board to the goal inclusive, or `None`
    /// if unsolvable. The slice has length `moves() + 1`.
    pub fn solution(&self) -> Option<&[Board]> {
        self.solution.as_deref()
    }
}

/// Walks the predecessor links back from the goal node and reverses the
/// result into start-to-goal order.
fn reconstruct_path(goal: &SearchNode) -> Vec<Board> {
    let mut path = Vec::with_capacity(goal.moves as usize + 1);
    path.push(goal.board.clone());
    let mut current = goal.predecessor.clone();
    while let Some(node) = current {
        path.push(node.board.clone());
        current = node.predecessor.clone();
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::solvable_by_inversions;

    fn board_3x3(rows: [[u32; 3]; 3]) -> Board {
        let grid: Vec<Vec<u32>> = rows.iter().map(|r| r.to_vec()).collect();
        Board::from_grid(&grid).unwrap()
    }

    /// Every consecutive pair in a solution must be one legal move apart.
    fn assert_path_is_legal(path: &[Board]) {
        for window in path.windows(2) {
            assert!(
                window[0].neighbors().contains(&window[1]),
                "consecutive solution boards must differ by one legal move"
            );
        }
    }

    #[test]
    fn test_goal_board_solves_in_zero_moves() {
        let goal = board_3x3([[1, 2, 3], [4, 5, 6], [7, 8, 0]]);
        let solver = Solver::new(goal.clone());
        assert!(solver.is_solvable());
        assert_eq!(solver.moves(), 0);
        assert_eq!(solver.solution(), Some(&[goal][..]));
    }

    #[test]
    fn test_swapped_pair_is_unsolvable() {
        let board = board_3x3([[1, 2, 3], [4, 5, 6], [8, 7, 0]]);
        let solver = Solver::new(board);
        assert!(!solver.is_solvable());
        assert_eq!(solver.moves(), -1);
        assert!(solver.solution().is_none());
    }

    #[test]
    fn test_four_move_instance() {
        let initial = board_3x3([[0, 1, 3], [4, 2, 5], [7, 8, 6]]);
        let solver = Solver::new(initial.clone());
        assert!(solver.is_solvable());
        assert_eq!(solver.moves(), 4);

        let path = solver.solution().expect("solvable puzzle must have a path");
        assert_eq!(path.len(), 5, "path length is moves + 1");
        assert_eq!(path[0], initial, "path starts at the input board");
        assert!(path[4].is_goal(), "path ends at the goal board");
        assert_path_is_legal(path);
    }

    #[test]
    fn test_three_move_instance() {
        let initial = board_3x3([[1, 2, 3], [0, 4, 6], [7, 5, 8]]);
        let solver = Solver::new(initial);
        assert!(solver.is_solvable());
        assert_eq!(solver.moves(), 3);
    }

    #[test]
    fn test_two_by_two_single_move() {
        let initial = Board::from_grid(&[vec![1, 2], vec![0, 3]]).unwrap();
        let solver = Solver::new(initial);
        assert!(solver.is_solvable());
        assert_eq!(solver.moves(), 1);
    }

    #[test]
    fn test_two_by_two_unsolvable() {
        let initial = Board::from_grid(&[vec![2, 1], vec![3, 0]]).unwrap();
        let solver = Solver::new(initial);
        assert!(!solver.is_solvable());
        assert_eq!(solver.moves(), -1);
    }

    #[test]
    fn test_one_by_one_board() {
        let initial = Board::from_grid(&[vec![0]]).unwrap();
        let solver = Solver::new(initial.clone());
        assert!(solver.is_solvable());
        assert_eq!(solver.moves(), 0);
        assert_eq!(solver.solution(), Some(&[initial][..]));
    }

    #[test]
    fn test_verdict_matches_parity_on_scrambled_boards() {
        for seed in 0..6 {
            let board = Board::random_with_seed(3, 14, seed).unwrap();
            let twin = board.twin().unwrap();

            let solver = Solver::new(board.clone());
            assert_eq!(
                solver.is_solvable(),
                solvable_by_inversions(&board),
                "twin-search verdict must match the parity criterion (seed {})",
                seed
            );
            if let Some(path) = solver.solution() {
                assert_eq!(path.len() as i32, solver.moves() + 1);
                assert_path_is_legal(path);
            }

            let twin_solver = Solver::new(twin);
            assert_ne!(
                solver.is_solvable(),
                twin_solver.is_solvable(),
                "exactly one of a board and its twin is solvable (seed {})",
                seed
            );
        }
    }

    #[test]
    fn test_moves_is_optimal_not_just_any_path() {
        // Two slides away from the goal; a suboptimal search could report
        // a longer valid path, so pin the exact count.
        let initial = board_3x3([[1, 2, 3], [4, 5, 6], [0, 7, 8]]);
        let solver = Solver::new(initial);
        assert!(solver.is_solvable());
        assert_eq!(solver.moves(), 2);
    }
}
