//! # N-Puzzle Solver Library
//!
//! This library provides the core board model for the N-tile sliding
//! puzzle (the 8-puzzle generalized to an n×n grid) and an optimal A*
//! solver that decides solvability by racing the input board against its
//! parity twin.
//!
//! It is used by two binaries:
//! - `solve`: Reads a puzzle file and prints a shortest move sequence, or
//!   reports that no solution exists.
//! - `generate`: Emits a random, always-solvable scrambled board in the
//!   same text format.
//!
//! ## Modules
//! - `engine`: Contains the board representation (`Board`), blank-slide
//!   directions (`Direction`), move and twin generation, and the cached
//!   goal distances.
//! - `solver`: Provides the `Solver` running the dual A* search.
//! - `heuristics`: From-scratch distance recomputation and the
//!   inversion-parity solvability criterion, used as test oracles and by
//!   the generator.
//! - `utils`: Parsing the puzzle text format.

pub mod engine;
pub mod heuristics;
pub mod solver;
pub mod utils;

// Items from sub-modules, if public, are accessed via their full path,
// e.g. `npuzzle_solver::engine::Board`. This keeps the top-level library
// namespace cleaner.
