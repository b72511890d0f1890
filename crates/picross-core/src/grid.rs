//! Rectangular cell grid.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{CellState, Line, LineId, LineMut};

/// A rectangular grid of [`CellState`]s stored in row-major order.
///
/// Rows and columns are projected out as [`Line`] / [`LineMut`] views with
/// [`line`](Self::line) and [`line_mut`](Self::line_mut).
///
/// # Text format
///
/// [`Display`] and [`FromStr`] use one line of text per row with `.` for
/// empty, `#` for filled and `x` for crossed cells (see
/// [`CellState::from_char`] for accepted aliases). Whitespace inside a row is
/// ignored and blank lines are skipped, so grids can be written indented in
/// tests.
///
/// # Examples
///
/// ```
/// use picross_core::{CellState, Grid, LineId};
///
/// let grid: Grid = "##.\nx.#".parse()?;
/// assert_eq!((grid.rows(), grid.cols()), (2, 3));
/// assert_eq!(grid.get(1, 0), CellState::Crossed);
/// assert_eq!(grid.line(LineId::Column(2)).to_vec(), [CellState::Empty, CellState::Filled]);
/// assert_eq!(grid.determined_count(), 4);
/// # Ok::<(), picross_core::GridParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

/// An error produced while parsing a [`Grid`] from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridParseError {
    /// A character is not a cell symbol.
    #[display("invalid cell character {ch:?} in row {row}")]
    InvalidChar {
        /// The offending character.
        ch: char,
        /// 0-based row index.
        row: usize,
    },
    /// A row has a different width than the first one.
    #[display("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// 0-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
}

impl Grid {
    /// Creates a grid with every cell [`CellState::Empty`].
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellState::Empty; rows * cols],
        }
    }

    /// Builds a `rows × cols` grid from nested row vectors.
    ///
    /// Missing rows and cells are padded with [`CellState::Empty`]; extra rows
    /// and cells are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use picross_core::{CellState, Grid};
    ///
    /// let grid = Grid::from_rows(2, 2, &[vec![CellState::Filled]]);
    /// assert_eq!(grid.to_string(), "#.\n..\n");
    /// ```
    #[must_use]
    pub fn from_rows<R>(rows: usize, cols: usize, source: &[R]) -> Self
    where
        R: AsRef<[CellState]>,
    {
        let mut grid = Self::new(rows, cols);
        for (row, src) in source.iter().take(rows).enumerate() {
            for (col, &state) in src.as_ref().iter().take(cols).enumerate() {
                grid.cells[row * cols + col] = state;
            }
        }
        grid
    }

    /// Returns the cells as nested row vectors.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<CellState>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.cells.chunks(self.cols).map(<[_]>::to_vec).collect()
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the state of the cell at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> CellState {
        assert!(row < self.rows && col < self.cols, "({row}, {col}) out of bounds");
        self.cells[row * self.cols + col]
    }

    fn line_layout(&self, id: LineId) -> (usize, usize, usize) {
        match id {
            LineId::Row(row) => {
                assert!(row < self.rows, "row {row} out of bounds");
                (row * self.cols, 1, self.cols)
            }
            LineId::Column(col) => {
                assert!(col < self.cols, "column {col} out of bounds");
                (col, self.cols, self.rows)
            }
        }
    }

    /// Returns a read-only view of a row or column.
    ///
    /// # Panics
    ///
    /// Panics if the line index is out of bounds.
    #[must_use]
    pub fn line(&self, id: LineId) -> Line<'_> {
        let (start, stride, len) = self.line_layout(id);
        Line::new(&self.cells, start, stride, len)
    }

    /// Returns a mutable view of a row or column.
    ///
    /// # Panics
    ///
    /// Panics if the line index is out of bounds.
    #[must_use]
    pub fn line_mut(&mut self, id: LineId) -> LineMut<'_> {
        let (start, stride, len) = self.line_layout(id);
        LineMut::new(&mut self.cells, start, stride, len)
    }

    /// Returns the number of cells that are not [`CellState::Empty`].
    #[must_use]
    pub fn determined_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_determined()).count()
    }

    /// Returns `true` if every cell is determined.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|c| c.is_determined())
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for state in self.line(LineId::Row(row)) {
                write!(f, "{state}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::new();
        let mut rows = 0;
        let mut cols = None;
        for line in s.lines() {
            let row = rows;
            let parsed = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|ch| CellState::from_char(ch).ok_or(GridParseError::InvalidChar { ch, row }))
                .collect::<Result<Vec<_>, _>>()?;
            if parsed.is_empty() {
                continue;
            }
            let expected = *cols.get_or_insert(parsed.len());
            if parsed.len() != expected {
                return Err(GridParseError::RaggedRow {
                    row,
                    expected,
                    found: parsed.len(),
                });
            }
            cells.extend(parsed);
            rows += 1;
        }
        Ok(Self {
            rows,
            cols: cols.unwrap_or(0),
            cells,
        })
    }
}
