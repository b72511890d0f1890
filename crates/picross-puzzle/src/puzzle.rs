use std::fmt::{self, Display};

use picross_core::{Clue, ClueError, Grid, LineId};
use picross_solver::{PropagationStats, PropagationStatus, Propagator};

use crate::{PuzzleError, SolverConfig};

/// The outcome of a successful solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SolveStatus {
    /// Propagation reached a fixpoint without determining any new cell. This
    /// is also the status of a grid that was already complete.
    NoProgress,
    /// Some cells were deduced; others remain undetermined.
    Progressed {
        /// Newly determined cells.
        deduced: usize,
    },
    /// This solve determined the last undetermined cells.
    Solved {
        /// Newly determined cells.
        deduced: usize,
    },
}

impl SolveStatus {
    /// Returns the number of newly determined cells.
    #[must_use]
    pub fn deduced(self) -> usize {
        match self {
            Self::NoProgress => 0,
            Self::Progressed { deduced } | Self::Solved { deduced } => deduced,
        }
    }
}

impl Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoProgress => write!(f, "no new deductions"),
            Self::Progressed { deduced } => write!(f, "deduced {deduced} cell(s)"),
            Self::Solved { deduced } => {
                write!(f, "puzzle fully solved ({deduced} cell(s) deduced)")
            }
        }
    }
}

/// The result of [`Puzzle::solve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    /// The initial grid refined with every deduced cell.
    pub grid: Grid,
    /// How the solve ended.
    pub status: SolveStatus,
    /// Propagation counters.
    pub stats: PropagationStats,
}

/// A nonogram whose shape and clues have been validated.
///
/// Construction checks, in order: both dimensions are in
/// `1..=max_dimension`, there is one clue per row and per column, and each
/// clue fits in its line.
///
/// # Examples
///
/// ```
/// use picross_puzzle::{Puzzle, PuzzleError, SolverConfig};
/// use picross_core::LineId;
///
/// let err = Puzzle::from_text(&["3"], &["1", "1"], &SolverConfig::default()).unwrap_err();
/// assert!(matches!(err, PuzzleError::ClueTooLarge { line: LineId::Row(0), .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    row_clues: Vec<Clue>,
    col_clues: Vec<Clue>,
    config: SolverConfig,
}

impl Puzzle {
    /// Builds a puzzle from parsed clues. The grid shape is taken from the
    /// clue counts.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::InvalidDimensions`] or
    /// [`PuzzleError::ClueTooLarge`].
    pub fn new(
        row_clues: Vec<Clue>,
        col_clues: Vec<Clue>,
        config: &SolverConfig,
    ) -> Result<Self, PuzzleError> {
        check_dimension("rows", row_clues.len(), config.max_dimension)?;
        check_dimension("cols", col_clues.len(), config.max_dimension)?;
        let rows = row_clues.len();
        let cols = col_clues.len();
        check_fits(&row_clues, cols, LineId::Row)?;
        check_fits(&col_clues, rows, LineId::Column)?;
        Ok(Self {
            row_clues,
            col_clues,
            config: *config,
        })
    }

    /// Builds a puzzle from declared dimensions and raw signed clues.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::InvalidDimensions`],
    /// [`PuzzleError::ClueCountMismatch`], [`PuzzleError::MalformedClue`] or
    /// [`PuzzleError::ClueTooLarge`].
    pub fn from_signed(
        rows: usize,
        cols: usize,
        row_clues: &[Vec<i64>],
        col_clues: &[Vec<i64>],
        config: &SolverConfig,
    ) -> Result<Self, PuzzleError> {
        check_dimension("rows", rows, config.max_dimension)?;
        check_dimension("cols", cols, config.max_dimension)?;
        check_count("row", rows, row_clues.len())?;
        check_count("column", cols, col_clues.len())?;
        let row_clues = parse_clues(row_clues, LineId::Row, |values| Clue::from_signed(values))?;
        let col_clues = parse_clues(col_clues, LineId::Column, |values| Clue::from_signed(values))?;
        Self::new(row_clues, col_clues, config)
    }

    /// Builds a puzzle from clues in text form (`"3 1"`, `"0"`, `""`).
    ///
    /// # Errors
    ///
    /// Same as [`from_signed`](Self::from_signed), with non-numeric tokens
    /// reported as [`PuzzleError::MalformedClue`].
    pub fn from_text<S>(
        row_clues: &[S],
        col_clues: &[S],
        config: &SolverConfig,
    ) -> Result<Self, PuzzleError>
    where
        S: AsRef<str>,
    {
        check_dimension("rows", row_clues.len(), config.max_dimension)?;
        check_dimension("cols", col_clues.len(), config.max_dimension)?;
        let row_clues = parse_clues(row_clues, LineId::Row, |s| s.as_ref().parse())?;
        let col_clues = parse_clues(col_clues, LineId::Column, |s| s.as_ref().parse())?;
        Self::new(row_clues, col_clues, config)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.row_clues.len()
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.col_clues.len()
    }

    /// Deduces every cell forced by line logic, starting from `initial`.
    ///
    /// `initial` is never modified; on error nothing of the partial
    /// propagation is returned.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::GridShapeMismatch`] if `initial` has the wrong
    /// shape, [`PuzzleError::Contradiction`] if the marks conflict with the
    /// clues, and [`PuzzleError::RoundLimit`] if a round cap is configured
    /// and reached.
    pub fn solve(&self, initial: &Grid) -> Result<SolveReport, PuzzleError> {
        if (initial.rows(), initial.cols()) != (self.rows(), self.cols()) {
            return Err(PuzzleError::GridShapeMismatch {
                rows: self.rows(),
                cols: self.cols(),
                found_rows: initial.rows(),
                found_cols: initial.cols(),
            });
        }

        let mut grid = initial.clone();
        let propagator = Propagator::with_config(self.config.propagation());
        let outcome = propagator
            .propagate(&mut grid, &self.row_clues, &self.col_clues)
            .map_err(PuzzleError::from)?;

        let deduced = outcome.stats.deduced;
        let status = match outcome.status {
            PropagationStatus::NoProgress => SolveStatus::NoProgress,
            PropagationStatus::Progressed => SolveStatus::Progressed { deduced },
            PropagationStatus::Solved => SolveStatus::Solved { deduced },
        };
        Ok(SolveReport {
            grid,
            status,
            stats: outcome.stats,
        })
    }
}

fn check_dimension(axis: &'static str, value: usize, max: usize) -> Result<(), PuzzleError> {
    if value == 0 || value > max {
        return Err(PuzzleError::InvalidDimensions { axis, value, max });
    }
    Ok(())
}

fn check_count(kind: &'static str, expected: usize, found: usize) -> Result<(), PuzzleError> {
    if expected != found {
        return Err(PuzzleError::ClueCountMismatch {
            kind,
            expected,
            found,
        });
    }
    Ok(())
}

fn parse_clues<T, F>(
    raw: &[T],
    make_id: fn(usize) -> LineId,
    parse: F,
) -> Result<Vec<Clue>, PuzzleError>
where
    F: Fn(&T) -> Result<Clue, ClueError>,
{
    raw.iter()
        .enumerate()
        .map(|(i, value)| {
            parse(value).map_err(|source| PuzzleError::MalformedClue {
                line: make_id(i),
                source,
            })
        })
        .collect()
}

fn check_fits(
    clues: &[Clue],
    line_len: usize,
    make_id: fn(usize) -> LineId,
) -> Result<(), PuzzleError> {
    for (i, clue) in clues.iter().enumerate() {
        let min_len = clue.min_len();
        if min_len > line_len {
            return Err(PuzzleError::ClueTooLarge {
                line: make_id(i),
                clue: clue.clone(),
                min_len,
                line_len,
            });
        }
    }
    Ok(())
}
