//! Row and column views.

use std::{
    fmt::{self, Display},
    iter::FusedIterator,
};

use crate::CellState;

/// Identifies a single line of a grid.
///
/// Indices are 0-based. The [`Display`] form is 1-based because it ends up in
/// user-facing messages.
///
/// # Examples
///
/// ```
/// use picross_core::LineId;
///
/// assert_eq!(LineId::Row(0).to_string(), "row 1");
/// assert_eq!(LineId::Column(4).to_string(), "column 5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::IsVariant)]
pub enum LineId {
    /// A row, by 0-based index from the top.
    Row(usize),
    /// A column, by 0-based index from the left.
    Column(usize),
}

impl LineId {
    /// Returns the 0-based index of the row or column.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Row(i) | Self::Column(i) => i,
        }
    }
}

impl Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row(i) => write!(f, "row {}", i + 1),
            Self::Column(i) => write!(f, "column {}", i + 1),
        }
    }
}

/// An attempt to overwrite a determined cell.
///
/// Deduction never produces this for a correct line solver; seeing it means
/// a solver bug rather than an unsatisfiable puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cell {position} is already {current:?}, cannot set it to {requested:?}")]
pub struct CellConflict {
    /// Position within the line.
    pub position: usize,
    /// The state the cell holds.
    pub current: CellState,
    /// The state that was requested.
    pub requested: CellState,
}

/// A read-only strided view of one row or column.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    cells: &'a [CellState],
    start: usize,
    stride: usize,
    len: usize,
}

impl<'a> Line<'a> {
    pub(crate) fn new(cells: &'a [CellState], start: usize, stride: usize, len: usize) -> Self {
        debug_assert!(len == 0 || start + (len - 1) * stride < cells.len());
        Self {
            cells,
            start,
            stride,
            len,
        }
    }

    /// Returns the number of cells in the line.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the line has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the state at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    #[must_use]
    pub fn get(&self, position: usize) -> CellState {
        assert!(position < self.len, "position {position} out of bounds");
        self.cells[self.start + position * self.stride]
    }

    /// Returns an iterator over the cells in order.
    #[must_use]
    pub fn iter(&self) -> LineIter<'a> {
        LineIter {
            line: *self,
            front: 0,
            back: self.len,
        }
    }

    /// Copies the cells into a contiguous vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<CellState> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for Line<'a> {
    type Item = CellState;
    type IntoIter = LineIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the cells of a [`Line`].
#[derive(Debug, Clone)]
pub struct LineIter<'a> {
    line: Line<'a>,
    front: usize,
    back: usize,
}

impl Iterator for LineIter<'_> {
    type Item = CellState;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let state = self.line.get(self.front);
        self.front += 1;
        Some(state)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for LineIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.line.get(self.back))
    }
}

impl FusedIterator for LineIter<'_> {}
impl ExactSizeIterator for LineIter<'_> {}

/// A mutable strided view of one row or column.
///
/// The view borrows the grid exclusively, so at most one line can be written
/// at a time. Cells can only be refined from [`CellState::Empty`].
#[derive(Debug)]
pub struct LineMut<'a> {
    cells: &'a mut [CellState],
    start: usize,
    stride: usize,
    len: usize,
}

impl<'a> LineMut<'a> {
    pub(crate) fn new(cells: &'a mut [CellState], start: usize, stride: usize, len: usize) -> Self {
        debug_assert!(len == 0 || start + (len - 1) * stride < cells.len());
        Self {
            cells,
            start,
            stride,
            len,
        }
    }

    /// Returns a read-only view of the same line.
    #[must_use]
    pub fn as_line(&self) -> Line<'_> {
        Line::new(&*self.cells, self.start, self.stride, self.len)
    }

    /// Returns the number of cells in the line.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the line has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the state at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    #[must_use]
    pub fn get(&self, position: usize) -> CellState {
        self.as_line().get(position)
    }

    /// Refines the cell at `position` to `state`.
    ///
    /// Returns `Ok(true)` if the cell changed and `Ok(false)` if it already
    /// held `state`.
    ///
    /// # Errors
    ///
    /// Returns [`CellConflict`] if the cell is determined and `state` differs
    /// from it, which includes resetting a determined cell to `Empty`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use picross_core::{CellState, Grid, LineId};
    ///
    /// let mut grid = Grid::new(1, 3);
    /// let mut row = grid.line_mut(LineId::Row(0));
    /// assert_eq!(row.refine(0, CellState::Filled), Ok(true));
    /// assert_eq!(row.refine(0, CellState::Filled), Ok(false));
    /// assert!(row.refine(0, CellState::Crossed).is_err());
    /// ```
    pub fn refine(&mut self, position: usize, state: CellState) -> Result<bool, CellConflict> {
        assert!(position < self.len, "position {position} out of bounds");
        let cell = &mut self.cells[self.start + position * self.stride];
        if *cell == state {
            return Ok(false);
        }
        if cell.is_determined() || !state.is_determined() {
            return Err(CellConflict {
                position,
                current: *cell,
                requested: state,
            });
        }
        *cell = state;
        Ok(true)
    }

    /// Refines every cell from a full line of states.
    ///
    /// `Empty` entries in `states` leave the cell untouched. Returns the
    /// positions that changed.
    ///
    /// # Errors
    ///
    /// Returns the first [`CellConflict`]. Cells before the conflicting one
    /// may already have been written.
    ///
    /// # Panics
    ///
    /// Panics if `states` does not have the same length as the line.
    pub fn refine_all(&mut self, states: &[CellState]) -> Result<Vec<usize>, CellConflict> {
        assert_eq!(states.len(), self.len, "line length mismatch");
        let mut changed = Vec::new();
        for (position, &state) in states.iter().enumerate() {
            if state.is_determined() && self.refine(position, state)? {
                changed.push(position);
            }
        }
        Ok(changed)
    }
}
