//! Line-logic deduction for nonogram puzzles.
//!
//! The crate has two layers:
//!
//! - [`LineSolver`] deduces every cell of a single row or column that is
//!   forced by its clue and its already determined cells, or reports that no
//!   placement of the clue fits.
//! - [`Propagator`] applies the line solver to every row and column of a
//!   [`Grid`](picross_core::Grid) until nothing changes any more.
//!
//! # Examples
//!
//! ```
//! use picross_core::{Clue, Grid};
//! use picross_solver::{PropagationStatus, Propagator};
//!
//! let rows = ["3", "1", "1 1"].map(|s| s.parse::<Clue>().unwrap());
//! let cols = ["1 1", "2", "1 1"].map(|s| s.parse::<Clue>().unwrap());
//! let mut grid = Grid::new(3, 3);
//!
//! let outcome = Propagator::new().propagate(&mut grid, &rows, &cols)?;
//! assert_eq!(outcome.status, PropagationStatus::Solved);
//! assert_eq!(grid.to_string(), "###\nx#x\n#x#\n");
//! # Ok::<(), picross_solver::SolverError>(())
//! ```

pub use self::{error::*, line_solver::*, propagation::*};

mod error;
mod line_solver;
mod propagation;

#[cfg(test)]
mod testing;
