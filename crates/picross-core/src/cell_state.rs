//! Cell state representation.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// The state of a single grid cell.
///
/// Deduction only ever refines a cell from [`CellState::Empty`] to one of the
/// two determined states; it never reverts or flips a determined cell.
///
/// The numeric encoding (`0`, `1`, `2`) is stable and is what the serialized
/// form uses. Decoding is lossy: fractional numbers are rounded and any other
/// value becomes `Empty`.
///
/// # Examples
///
/// ```
/// use picross_core::CellState;
///
/// assert_eq!(CellState::from_code(1), CellState::Filled);
/// assert_eq!(CellState::from_code(7), CellState::Empty);
/// assert_eq!(CellState::Crossed.code(), 2);
/// assert!(CellState::Filled.is_determined());
/// ```
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(into = "i64", from = "CellCode")]
#[repr(u8)]
pub enum CellState {
    /// Undetermined.
    #[default]
    Empty = 0,
    /// Confirmed part of a run.
    Filled = 1,
    /// Confirmed not part of any run.
    Crossed = 2,
}

impl CellState {
    /// All states in encoding order.
    pub const ALL: [Self; 3] = [Self::Empty, Self::Filled, Self::Crossed];

    /// Decodes a cell state, mapping out-of-range values to [`CellState::Empty`].
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Filled,
            2 => Self::Crossed,
            _ => Self::Empty,
        }
    }

    /// Returns the numeric encoding of this state.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns `true` unless the cell is [`CellState::Empty`].
    #[must_use]
    pub const fn is_determined(self) -> bool {
        !matches!(self, Self::Empty)
    }

    /// Returns the character used by the text grid format.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Filled => '#',
            Self::Crossed => 'x',
        }
    }

    /// Parses a character of the text grid format.
    ///
    /// `.`, `_` and `?` are empty, `#` and `o` are filled, `x` and `X` are
    /// crossed.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '.' | '_' | '?' => Some(Self::Empty),
            '#' | 'o' => Some(Self::Filled),
            'x' | 'X' => Some(Self::Crossed),
            _ => None,
        }
    }
}

impl Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl From<i64> for CellState {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

/// A serialized cell code as it may appear in external documents.
#[derive(Deserialize)]
#[serde(untagged)]
enum CellCode {
    Integer(i64),
    Float(f64),
}

impl From<CellCode> for CellState {
    #[expect(clippy::cast_possible_truncation)]
    fn from(code: CellCode) -> Self {
        match code {
            CellCode::Integer(code) => Self::from_code(code),
            // Saturating cast; NaN becomes 0.
            CellCode::Float(code) => Self::from_code(code.round() as i64),
        }
    }
}

impl From<CellState> for i64 {
    fn from(state: CellState) -> Self {
        i64::from(state.code())
    }
}
