use picross_core::{CellState, Grid};
use serde::{Deserialize, Serialize};

use crate::{Puzzle, PuzzleError, SolverConfig};

/// The flat result record returned by [`solve`].
///
/// On success `grid` is the refined grid and `error` is `false`. On any error
/// `grid` is the caller's input, unchanged, and `message` says what went
/// wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    /// The resulting grid, row by row.
    pub grid: Vec<Vec<CellState>>,
    /// A human-readable summary.
    pub message: String,
    /// Whether the input was rejected or found contradictory.
    pub error: bool,
}

impl SolveResult {
    fn failure(initial_grid: &[Vec<CellState>], err: &PuzzleError) -> Self {
        if err.is_input_error() {
            log::warn!("solve rejected: {err}");
        } else {
            log::info!("solve failed: {err}");
        }
        Self {
            grid: initial_grid.to_vec(),
            message: err.to_string(),
            error: true,
        }
    }
}

/// Validates a puzzle, deduces every forced cell and reports the outcome.
///
/// - `row_clues` / `col_clues` hold one run sequence per line; `[]` and `[0]`
///   both mean "no runs".
/// - `initial_grid` is padded with empty cells or truncated to
///   `rows × cols`.
///
/// # Examples
///
/// ```
/// use picross_core::CellState::{Crossed, Empty};
/// use picross_puzzle::{SolverConfig, solve};
///
/// let result = solve(
///     1,
///     4,
///     &[vec![0]],
///     &[vec![], vec![], vec![], vec![]],
///     &[],
///     &SolverConfig::default(),
/// );
/// assert!(!result.error);
/// assert_eq!(result.grid, [[Crossed; 4]]);
///
/// let result = solve(
///     1,
///     3,
///     &[vec![3]],
///     &[vec![1], vec![1], vec![1]],
///     &[vec![Empty, Crossed, Empty]],
///     &SolverConfig::default(),
/// );
/// assert!(result.error);
/// assert_eq!(result.grid, [[Empty, Crossed, Empty]]);
/// assert!(result.message.starts_with("row 1"));
/// ```
#[must_use]
pub fn solve(
    rows: usize,
    cols: usize,
    row_clues: &[Vec<i64>],
    col_clues: &[Vec<i64>],
    initial_grid: &[Vec<CellState>],
    config: &SolverConfig,
) -> SolveResult {
    let puzzle = match Puzzle::from_signed(rows, cols, row_clues, col_clues, config) {
        Ok(puzzle) => puzzle,
        Err(err) => return SolveResult::failure(initial_grid, &err),
    };
    let initial = Grid::from_rows(rows, cols, initial_grid);
    match puzzle.solve(&initial) {
        Ok(report) => {
            log::info!("{}x{} puzzle: {}", rows, cols, report.status);
            SolveResult {
                grid: report.grid.to_rows(),
                message: report.status.to_string(),
                error: false,
            }
        }
        Err(err) => SolveResult::failure(initial_grid, &err),
    }
}
