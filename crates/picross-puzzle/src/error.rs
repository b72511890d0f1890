use picross_core::{Clue, ClueError, LineId};
use picross_solver::{LineError, SolverError};

/// Errors reported by [`Puzzle`](crate::Puzzle).
///
/// All variants except [`Contradiction`](Self::Contradiction) and
/// [`RoundLimit`](Self::RoundLimit) are input validation errors raised before
/// solving starts.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum PuzzleError {
    /// The number of rows or columns is zero or above the configured maximum.
    #[display("{axis} must be between 1 and {max}, got {value}")]
    InvalidDimensions {
        /// `"rows"` or `"cols"`.
        axis: &'static str,
        /// The rejected value.
        value: usize,
        /// The configured maximum.
        max: usize,
    },
    /// The number of clues does not match the number of rows or columns.
    #[display("expected {expected} {kind} clues, got {found}")]
    ClueCountMismatch {
        /// `"row"` or `"column"`.
        kind: &'static str,
        /// Number of rows or columns.
        expected: usize,
        /// Number of clues supplied.
        found: usize,
    },
    /// A clue contains a negative, zero-in-sequence or non-numeric value.
    #[display("{line}: malformed clue: {source}")]
    MalformedClue {
        /// The line the clue belongs to.
        line: LineId,
        /// What is wrong with it.
        source: ClueError,
    },
    /// A clue needs more cells than its line has.
    #[display("{line}: clue {clue} needs {min_len} cells but the line has only {line_len}")]
    ClueTooLarge {
        /// The line the clue belongs to.
        line: LineId,
        /// The clue.
        clue: Clue,
        /// Minimum number of cells the clue occupies.
        min_len: usize,
        /// Length of the line.
        line_len: usize,
    },
    /// The initial grid does not have the puzzle's shape.
    #[display("initial grid is {found_rows}×{found_cols}, expected {rows}×{cols}")]
    GridShapeMismatch {
        /// Puzzle rows.
        rows: usize,
        /// Puzzle columns.
        cols: usize,
        /// Grid rows.
        found_rows: usize,
        /// Grid columns.
        found_cols: usize,
    },
    /// The marked cells admit no placement of some line's clue.
    #[display("{line}: contradiction, clue {clue} admits no placement consistent with the marked cells")]
    Contradiction {
        /// The first line found infeasible.
        line: LineId,
        /// The clue of that line.
        clue: Clue,
    },
    /// Propagation hit the configured round cap.
    #[display("propagation stopped after {rounds} rounds without reaching a fixpoint")]
    RoundLimit {
        /// Rounds executed.
        rounds: usize,
    },
}

impl PuzzleError {
    /// Returns `true` for errors detected before solving starts.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::Contradiction { .. } | Self::RoundLimit { .. })
    }
}

impl From<SolverError> for PuzzleError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::Contradiction {
                line,
                clue,
                source: LineError::ClueTooLarge { min_len, line_len },
            } => Self::ClueTooLarge {
                line,
                clue,
                min_len,
                line_len,
            },
            SolverError::Contradiction {
                line,
                clue,
                source: LineError::NoPlacement,
            } => Self::Contradiction { line, clue },
            SolverError::ClueCountMismatch {
                kind,
                expected,
                found,
            } => Self::ClueCountMismatch {
                kind,
                expected,
                found,
            },
            SolverError::RoundLimit { rounds } => Self::RoundLimit { rounds },
        }
    }
}
