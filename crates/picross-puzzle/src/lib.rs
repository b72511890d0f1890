//! Validated nonogram puzzles and the `solve` entry point.
//!
//! This crate sits between callers (a UI, the command-line tool, a
//! deserialized request) and the propagation engine of [`picross_solver`].
//! It validates the puzzle shape and clues before any solving starts, runs
//! propagation on a private copy of the grid, and packages the outcome.
//!
//! Two APIs are provided:
//!
//! - [`Puzzle`] and [`SolveReport`]: typed, `Result`-based.
//! - [`solve`] and [`SolveResult`]: a flat `{ grid, message, error }` record
//!   for callers that exchange plain data.
//!
//! # Examples
//!
//! ```
//! use picross_core::{CellState, Grid};
//! use picross_puzzle::{Puzzle, SolveStatus, SolverConfig};
//!
//! let puzzle = Puzzle::from_text(&["2 2"], &["1", "1", "0", "1", "1"], &SolverConfig::default())?;
//! let report = puzzle.solve(&Grid::new(1, 5))?;
//! assert_eq!(report.status, SolveStatus::Solved { deduced: 5 });
//! assert_eq!(report.grid.to_string(), "##x##\n");
//! # Ok::<(), picross_puzzle::PuzzleError>(())
//! ```

pub use self::{config::*, document::*, error::*, puzzle::*, solve::*};

mod config;
mod document;
mod error;
mod puzzle;
mod solve;
