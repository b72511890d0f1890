use picross_core::{Clue, LineId};

/// Why a single line admits no placement of its clue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum LineError {
    /// The clue needs more cells than the line has.
    #[display("clue needs {min_len} cells but the line has only {line_len}")]
    ClueTooLarge {
        /// Minimum number of cells the clue occupies.
        min_len: usize,
        /// Length of the line.
        line_len: usize,
    },
    /// Every placement of the clue conflicts with a determined cell.
    #[display("no placement of the clue fits the marked cells")]
    NoPlacement,
}

/// Errors that can occur during propagation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SolverError {
    /// A line cannot be completed consistently with its clue.
    #[display("{line} (clue {clue}): {source}")]
    Contradiction {
        /// The first line found infeasible.
        line: LineId,
        /// The clue of that line.
        clue: Clue,
        /// Why the line is infeasible.
        source: LineError,
    },
    /// The number of clues does not match the grid shape.
    #[display("expected {expected} {kind} clues, got {found}")]
    ClueCountMismatch {
        /// `"row"` or `"column"`.
        kind: &'static str,
        /// Number of rows or columns in the grid.
        expected: usize,
        /// Number of clues supplied.
        found: usize,
    },
    /// The configured round cap was reached before a fixpoint.
    #[display("no fixpoint after {rounds} rounds")]
    RoundLimit {
        /// Rounds executed.
        rounds: usize,
    },
}
