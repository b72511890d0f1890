use picross_core::CellState;
use serde::{Deserialize, Serialize};

use crate::{SolveResult, SolverConfig, solve};

/// A self-contained solve request, as exchanged with front ends.
///
/// `grid` and `config` may be omitted; they default to an all-empty grid and
/// [`SolverConfig::default`].
///
/// # Examples
///
/// ```
/// use picross_puzzle::PuzzleDocument;
///
/// let doc: PuzzleDocument = serde_json::from_str(
///     r#"{ "rows": 1, "cols": 3, "row_clues": [[3]], "col_clues": [[1], [1], [1]] }"#,
/// )?;
/// let result = doc.solve();
/// assert!(!result.error);
/// assert_eq!(result.message, "puzzle fully solved (3 cell(s) deduced)");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleDocument {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Run lengths of each row, top to bottom.
    pub row_clues: Vec<Vec<i64>>,
    /// Run lengths of each column, left to right.
    pub col_clues: Vec<Vec<i64>>,
    /// Initial cell marks.
    #[serde(default)]
    pub grid: Vec<Vec<CellState>>,
    /// Solver settings.
    #[serde(default)]
    pub config: SolverConfig,
}

impl PuzzleDocument {
    /// Runs [`solve`] on the document's contents.
    #[must_use]
    pub fn solve(&self) -> SolveResult {
        solve(
            self.rows,
            self.cols,
            &self.row_clues,
            &self.col_clues,
            &self.grid,
            &self.config,
        )
    }
}
