//! Core data structures for nonogram deduction.
//!
//! This crate provides the types shared by the line solver, the propagation
//! engine and the puzzle façade:
//!
//! - [`CellState`]: the three-valued state of a single cell
//! - [`Clue`]: a validated run-length sequence for one row or column
//! - [`Grid`]: a rectangular, row-major array of cells
//! - [`LineId`], [`Line`], [`LineMut`]: identification of a row or column and
//!   strided views that project it out of a [`Grid`]
//!
//! # Examples
//!
//! ```
//! use picross_core::{CellState, Clue, Grid, LineId};
//!
//! let clue: Clue = "2 1".parse()?;
//! assert_eq!(clue.min_len(), 4);
//!
//! let mut grid = Grid::new(3, 4);
//! grid.line_mut(LineId::Column(2)).refine(1, CellState::Filled)?;
//! assert_eq!(grid.get(1, 2), CellState::Filled);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    cell_state::CellState,
    clue::{Clue, ClueError},
    grid::{Grid, GridParseError},
    line::{CellConflict, Line, LineId, LineIter, LineMut},
};

mod cell_state;
mod clue;
mod grid;
mod line;
