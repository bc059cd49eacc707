use clap::Parser;
use npuzzle_solver::engine::Board;
use npuzzle_solver::solver::Solver;
use npuzzle_solver::utils::board_from_str;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the puzzle file: a dimension n followed by n*n tile values
    board_file: PathBuf,
}

fn read_board_file(path: &PathBuf) -> Result<Board, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    board_from_str(&content).map_err(|e| format!("Invalid board format: {}", e))
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let initial = read_board_file(&args.board_file)
        .unwrap_or_else(|e| panic!("Failed to load board from {}: {}", args.board_file.display(), e));

    let solver = Solver::new(initial);

    if !solver.is_solvable() {
        println!("No solution possible");
    } else {
        println!("Minimum number of moves = {}", solver.moves());
        let solution = solver
            .solution()
            .expect("a solvable puzzle always has a solution path");
        for board in solution {
            println!("{}", board);
        }
    }
}
