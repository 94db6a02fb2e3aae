//! Battleship Solitaire Solver Library
//!
//! Solves battleship (bimaru) logic puzzles: given a fleet of ship
//! lengths, per-row and per-column ship-cell counts (some possibly
//! unknown), and optional pre-revealed water or ship cells, the solver
//! enumerates every arrangement that satisfies all constraints and
//! reports each distinct solution exactly once.
//!
//! ```
//! use bimaru::{LineCount, PuzzleDef};
//!
//! let puzzle = PuzzleDef::new(
//!     vec![2],
//!     vec![LineCount::Known(2), LineCount::Known(0)],
//!     vec![LineCount::Known(1), LineCount::Known(1)],
//! )
//! .unwrap();
//!
//! let solutions = bimaru::solve(&puzzle, None).unwrap();
//! assert_eq!(solutions.len(), 1);
//! assert_eq!(solutions[0].render(), "SS\n..\n");
//! ```

pub mod grid;
pub mod persistence;
pub mod puzzle;
pub mod solver;
pub mod state;

pub use grid::{Cell, Grid};
pub use puzzle::{classic, parse_hint_rows, Axis, ConfigError, LineCount, PuzzleDef};
pub use solver::{solve, solve_parallel, solve_with, SolutionRegistry};
pub use state::SearchState;
