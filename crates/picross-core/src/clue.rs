//! Run-length clues.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// An error produced while building or checking a [`Clue`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ClueError {
    /// A run length was negative.
    #[display("run length must not be negative, got {value}")]
    NegativeRun {
        /// The offending value.
        value: i64,
    },
    /// A zero-length run appeared next to other runs.
    #[display("zero-length run is only allowed as the sole entry of a clue")]
    ZeroRun,
    /// A text token was not a non-negative integer.
    #[display("invalid run length {token:?}")]
    InvalidToken {
        /// The offending token.
        token: String,
    },
}

/// The ordered run lengths of one row or column.
///
/// A `Clue` always holds strictly positive runs. The "no runs" clue is the
/// empty sequence; a lone `0` is accepted on input and normalized to it.
///
/// # Examples
///
/// ```
/// use picross_core::Clue;
///
/// let clue = Clue::new([3, 1])?;
/// assert_eq!(clue.runs(), &[3, 1]);
/// assert_eq!(clue.min_len(), 5);
///
/// let blank: Clue = "0".parse()?;
/// assert!(blank.is_empty());
/// assert_eq!(blank.min_len(), 0);
/// # Ok::<(), picross_core::ClueError>(())
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<usize>")]
pub struct Clue {
    runs: Vec<usize>,
}

impl Clue {
    /// The clue of a line without any filled cell.
    pub const BLANK: Self = Self { runs: Vec::new() };

    /// Builds a clue from run lengths.
    ///
    /// # Errors
    ///
    /// Returns [`ClueError::ZeroRun`] if a zero appears together with other runs.
    pub fn new<I>(runs: I) -> Result<Self, ClueError>
    where
        I: IntoIterator<Item = usize>,
    {
        let runs = runs.into_iter().collect::<Vec<_>>();
        if runs.as_slice() == [0] {
            return Ok(Self::BLANK);
        }
        if runs.contains(&0) {
            return Err(ClueError::ZeroRun);
        }
        Ok(Self { runs })
    }

    /// Builds a clue from signed run lengths, as supplied by external callers.
    ///
    /// # Errors
    ///
    /// Returns [`ClueError::NegativeRun`] for any negative value and
    /// [`ClueError::ZeroRun`] if a zero appears together with other runs.
    pub fn from_signed(values: &[i64]) -> Result<Self, ClueError> {
        let runs = values
            .iter()
            .map(|&value| usize::try_from(value).map_err(|_| ClueError::NegativeRun { value }))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(runs)
    }

    /// Returns the run lengths in order.
    #[must_use]
    pub fn runs(&self) -> &[usize] {
        &self.runs
    }

    /// Returns the number of runs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Returns `true` if the clue has no runs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Returns the minimum line length the clue needs.
    ///
    /// This is the sum of the runs plus one mandatory gap between each pair
    /// of consecutive runs, saturating at `usize::MAX`.
    #[must_use]
    pub fn min_len(&self) -> usize {
        self.runs
            .iter()
            .try_fold(self.runs.len().saturating_sub(1), |acc, &run| {
                acc.checked_add(run)
            })
            .unwrap_or(usize::MAX)
    }
}

impl Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.runs.is_empty() {
            return write!(f, "0");
        }
        for (i, run) in self.runs.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{run}")?;
        }
        Ok(())
    }
}

/// Parses whitespace- or comma-separated run lengths.
///
/// An empty string and `"0"` both parse to the blank clue.
impl FromStr for Clue {
    type Err = ClueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let runs = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(|token| {
                if let Ok(value) = token.parse::<i64>()
                    && value < 0
                {
                    return Err(ClueError::NegativeRun { value });
                }
                token.parse::<usize>().map_err(|_| ClueError::InvalidToken {
                    token: token.to_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(runs)
    }
}

impl TryFrom<Vec<i64>> for Clue {
    type Error = ClueError;

    fn try_from(values: Vec<i64>) -> Result<Self, Self::Error> {
        Self::from_signed(&values)
    }
}

impl From<Clue> for Vec<usize> {
    fn from(clue: Clue) -> Self {
        clue.runs
    }
}
