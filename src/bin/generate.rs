use clap::Parser;
use npuzzle_solver::engine::Board;
use npuzzle_solver::heuristics::solvable_by_inversions;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Board side length
    #[clap(short, long, default_value_t = 3)]
    dimension: usize,

    /// Number of random blank moves applied to the goal board
    #[clap(long, default_value_t = 40)]
    scrambles: usize,

    /// Seed for the scramble walk; the same seed reproduces the same board
    #[clap(short, long, default_value_t = 0)]
    seed: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let board = Board::random_with_seed(args.dimension, args.scrambles, args.seed)
        .unwrap_or_else(|e| panic!("Failed to generate board: {}", e));

    // Scrambling only applies legal moves, so the result must stay on the
    // solvable side of the parity split.
    assert!(
        solvable_by_inversions(&board),
        "generated board failed the solvability parity check"
    );

    print!("{}", board);
}
