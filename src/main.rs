//! Battleship Solitaire Solver
//!
//! Solves the built-in battleship puzzle, printing every distinct
//! solution as it is found and saving the results to disk.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bimaru::{persistence, puzzle, solver, Grid, PuzzleDef};

/// Solves a battleship (bimaru) logic puzzle.
#[derive(Parser)]
#[command(name = "bimaru")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve the puzzle and save solutions to disk.
    Solve {
        /// Stop after this many solutions.
        #[arg(long)]
        limit: Option<usize>,
        /// Fan the first ship's placements out across threads.
        #[arg(long)]
        parallel: bool,
    },
    /// Print saved solutions.
    Display,
    /// Show the number of saved solutions.
    Count,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Solve { limit, parallel }) => run_solve(limit, parallel),
        Some(Command::Display) => run_display(),
        Some(Command::Count) => run_count(),
        None => run_solve(None, false),
    }
}

/// Solves the built-in puzzle, printing solutions as they are found, and
/// saves them to disk.
fn run_solve(limit: Option<usize>, parallel: bool) {
    let puzzle = puzzle::classic();

    println!(
        "{}x{} with {} ships, needing a total of {} spaces.",
        puzzle.rows(),
        puzzle.cols(),
        puzzle.ships.len(),
        puzzle.ship_cell_total()
    );
    println!("Ships {:?}", puzzle.ships);
    println!("{}", puzzle.render_with_counts(&puzzle.hints));

    let result = if parallel {
        solver::solve_parallel(&puzzle, limit).map(|solutions| {
            for (i, grid) in solutions.iter().enumerate() {
                print_solution(&puzzle, i + 1, grid);
            }
            solutions
        })
    } else {
        let mut solutions = Vec::new();
        solver::solve_with(&puzzle, limit, |index, grid| {
            print_solution(&puzzle, index, grid);
            solutions.push(grid.clone());
        })
        .map(|_| solutions)
    };

    let solutions = match result {
        Ok(solutions) => solutions,
        Err(e) => {
            eprintln!("Invalid puzzle: {e}");
            std::process::exit(1);
        }
    };

    println!("No (more) solutions.");

    if let Err(e) = persistence::save(&solutions) {
        eprintln!("Failed to save solutions: {e}");
    } else {
        println!("Found {} solutions", solutions.len());
        println!("Wrote solutions.txt and solutions.bin");
    }
}

fn print_solution(puzzle: &PuzzleDef, index: usize, grid: &Grid) {
    println!("SOLUTION: {index}");
    println!("{}", puzzle.render_with_counts(grid));
}

/// Loads and prints saved solutions.
fn run_display() {
    match persistence::load_all() {
        Some(solutions) => {
            println!("Loaded {} solutions", solutions.len());
            for (i, grid) in solutions.iter().enumerate() {
                println!("Solution {}:", i + 1);
                println!("{}", grid.render());
            }
        }
        None => {
            eprintln!("No solutions.bin found. Run 'bimaru solve' first.");
        }
    }
}

/// Prints the count of saved solutions.
fn run_count() {
    match persistence::count() {
        Some(count) => println!("{} solutions", count),
        None => eprintln!("No solutions.bin found. Run 'bimaru solve' first."),
    }
}
