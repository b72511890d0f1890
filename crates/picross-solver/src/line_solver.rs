use picross_core::{CellState, Clue};

use crate::LineError;

/// The range of legal start positions for one run of a clue.
///
/// Both bounds account for every determined cell of the line, so every start
/// in between is not necessarily legal, but no start outside is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSpan {
    /// Length of the run.
    pub len: usize,
    /// Leftmost legal start position.
    pub earliest_start: usize,
    /// Rightmost legal start position.
    pub latest_start: usize,
}

impl RunSpan {
    /// Returns the exclusive end of the leftmost placement.
    #[must_use]
    pub fn earliest_end(&self) -> usize {
        self.earliest_start + self.len
    }

    /// Returns the positions covered by every placement of the run, if any.
    #[must_use]
    pub fn core(&self) -> Option<std::ops::Range<usize>> {
        (self.latest_start < self.earliest_end()).then(|| self.latest_start..self.earliest_end())
    }
}

/// The result of solving a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSolution {
    /// The refined cells: the input with every forced cell determined.
    pub cells: Vec<CellState>,
    /// Legal start range of each run, in clue order.
    pub spans: Vec<RunSpan>,
}

impl LineSolution {
    /// Returns `true` if every cell is determined.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|c| c.is_determined())
    }
}

/// Deduces the forced cells of a single line.
///
/// A cell is forced `Filled` when every placement of the clue that agrees
/// with the line's determined cells covers it, and forced `Crossed` when no
/// such placement does. The solver finds exactly these cells without
/// enumerating placements: it builds a forward table of which prefixes can
/// hold the first runs and a backward table of which suffixes can hold the
/// remaining runs, then tests each (run, start) pair against both tables.
/// Time and memory are `O(k·n)` for `k` runs and `n` cells.
///
/// # Examples
///
/// ```
/// use picross_core::{CellState, Clue};
/// use picross_solver::LineSolver;
///
/// let solver = LineSolver::new();
/// let clue: Clue = "3".parse().unwrap();
///
/// // A run of 3 in 5 cells always covers the middle cell.
/// let solution = solver.solve(&clue, &[CellState::Empty; 5])?;
/// assert_eq!(solution.cells[2], CellState::Filled);
/// assert_eq!(solution.cells[0], CellState::Empty);
/// # Ok::<(), picross_solver::LineError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct LineSolver;

impl LineSolver {
    /// Creates a new `LineSolver`.
    #[must_use]
    pub const fn new() -> Self {
        LineSolver
    }

    /// Solves one line.
    ///
    /// Determined cells in `cells` are hard constraints and are returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`LineError::ClueTooLarge`] if the clue cannot fit in the line
    /// at all, and [`LineError::NoPlacement`] if every placement conflicts
    /// with a determined cell.
    pub fn solve(&self, clue: &Clue, cells: &[CellState]) -> Result<LineSolution, LineError> {
        let n = cells.len();
        let min_len = clue.min_len();
        if min_len > n {
            return Err(LineError::ClueTooLarge {
                min_len,
                line_len: n,
            });
        }

        let tables = Tables::build(clue.runs(), cells);
        if !tables.fwd(clue.len(), n) {
            return Err(LineError::NoPlacement);
        }

        let runs = clue.runs();
        let k = runs.len();

        // `fill_delta` is a difference array over positions covered by some
        // legal run placement.
        let mut fill_delta = vec![0_isize; n + 1];
        let mut spans = Vec::with_capacity(k);
        for (i, &len) in runs.iter().enumerate() {
            let mut span: Option<RunSpan> = None;
            for start in 0..=(n - len) {
                if !tables.can_place(i, start) {
                    continue;
                }
                fill_delta[start] += 1;
                fill_delta[start + len] -= 1;
                let span = span.get_or_insert(RunSpan {
                    len,
                    earliest_start: start,
                    latest_start: start,
                });
                span.latest_start = start;
            }
            // A feasible line has a legal placement for every run.
            let Some(span) = span else {
                return Err(LineError::NoPlacement);
            };
            spans.push(span);
        }

        let mut result = cells.to_vec();
        let mut covered = 0;
        for (p, cell) in result.iter_mut().enumerate() {
            covered += fill_delta[p];
            if cell.is_determined() {
                continue;
            }
            let can_fill = covered > 0;
            let can_cross = (0..=k).any(|i| tables.fwd(i, p) && tables.bwd(i, p + 1));
            match (can_fill, can_cross) {
                (true, false) => *cell = CellState::Filled,
                (false, true) => *cell = CellState::Crossed,
                (true, true) => {}
                (false, false) => return Err(LineError::NoPlacement),
            }
        }

        Ok(LineSolution {
            cells: result,
            spans,
        })
    }
}

/// Reachability tables for one line.
///
/// - `fwd(i, p)`: runs `0..i` fit in cells `0..p`, leaving every other cell of
///   that prefix crossable.
/// - `bwd(i, p)`: runs `i..k` fit in cells `p..n` likewise.
struct Tables<'a> {
    runs: &'a [usize],
    cells: &'a [CellState],
    /// `crossed_before[p]` is the number of crossed cells in `0..p`.
    crossed_before: Vec<usize>,
    fwd: Vec<bool>,
    bwd: Vec<bool>,
}

impl<'a> Tables<'a> {
    fn build(runs: &'a [usize], cells: &'a [CellState]) -> Self {
        let n = cells.len();
        let k = runs.len();

        let mut crossed_before = Vec::with_capacity(n + 1);
        crossed_before.push(0);
        for cell in cells {
            let last = crossed_before[crossed_before.len() - 1];
            crossed_before.push(last + usize::from(*cell == CellState::Crossed));
        }

        let mut tables = Self {
            runs,
            cells,
            crossed_before,
            fwd: vec![false; (k + 1) * (n + 1)],
            bwd: vec![false; (k + 1) * (n + 1)],
        };

        tables.set_fwd(0, 0);
        for p in 1..=n {
            for i in 0..=k {
                let gap = tables.fwd(i, p - 1) && tables.can_cross(p - 1);
                let run = i > 0 && {
                    let len = runs[i - 1];
                    p >= len
                        && tables.can_cover(p - len, p)
                        && if p == len {
                            i == 1
                        } else {
                            tables.can_cross(p - len - 1) && tables.fwd(i - 1, p - len - 1)
                        }
                };
                if gap || run {
                    tables.set_fwd(i, p);
                }
            }
        }

        tables.set_bwd(k, n);
        for p in (0..n).rev() {
            for i in 0..=k {
                let gap = tables.bwd(i, p + 1) && tables.can_cross(p);
                let run = i < k && {
                    let len = runs[i];
                    p + len <= n
                        && tables.can_cover(p, p + len)
                        && if p + len == n {
                            i + 1 == k
                        } else {
                            tables.can_cross(p + len) && tables.bwd(i + 1, p + len + 1)
                        }
                };
                if gap || run {
                    tables.set_bwd(i, p);
                }
            }
        }

        tables
    }

    fn index(&self, i: usize, p: usize) -> usize {
        i * (self.cells.len() + 1) + p
    }

    fn fwd(&self, i: usize, p: usize) -> bool {
        self.fwd[self.index(i, p)]
    }

    fn set_fwd(&mut self, i: usize, p: usize) {
        let index = self.index(i, p);
        self.fwd[index] = true;
    }

    fn bwd(&self, i: usize, p: usize) -> bool {
        self.bwd[self.index(i, p)]
    }

    fn set_bwd(&mut self, i: usize, p: usize) {
        let index = self.index(i, p);
        self.bwd[index] = true;
    }

    fn can_cross(&self, p: usize) -> bool {
        self.cells[p] != CellState::Filled
    }

    fn can_cover(&self, start: usize, end: usize) -> bool {
        self.crossed_before[end] == self.crossed_before[start]
    }

    /// Returns `true` if run `i` can start at `start` in some full placement.
    fn can_place(&self, i: usize, start: usize) -> bool {
        let n = self.cells.len();
        let k = self.runs.len();
        let end = start + self.runs[i];
        if end > n || !self.can_cover(start, end) {
            return false;
        }
        let left = if start == 0 {
            i == 0
        } else {
            self.can_cross(start - 1) && self.fwd(i, start - 1)
        };
        let right = if end == n {
            i + 1 == k
        } else {
            self.can_cross(end) && self.bwd(i + 1, end + 1)
        };
        left && right
    }
}
