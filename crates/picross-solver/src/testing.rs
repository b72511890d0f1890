//! Test utilities for the line solver and the propagator.
//!
//! - [`LineTester`] and [`GridTester`] are fluent harnesses whose assertion
//!   methods panic with `#[track_caller]` locations.
//! - [`brute_force`] is a reference line solver that enumerates every
//!   placement; it is exponential and only meant for short lines.
//! - [`line_case`] and [`grid_case`] are `proptest` strategies that derive
//!   clues from a hidden solution.

use picross_core::{CellState, Clue, Grid, LineId};
use proptest::prelude::*;

use crate::{
    LineError, LineSolution, LineSolver, PropagationConfig, PropagationOutcome,
    PropagationStatus, Propagator, SolverError,
};

/// Parses a line written in the grid text format.
#[track_caller]
pub fn parse_cells(s: &str) -> Vec<CellState> {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| CellState::from_char(c).unwrap())
        .collect()
}

/// Formats a line in the grid text format.
pub fn format_cells(cells: &[CellState]) -> String {
    cells.iter().map(|c| c.as_char()).collect()
}

/// Returns the clue describing a fully known line.
pub fn clue_of(filled: &[bool]) -> Clue {
    let runs = filled
        .split(|&f| !f)
        .map(<[bool]>::len)
        .filter(|&len| len > 0)
        .collect::<Vec<_>>();
    Clue::new(runs).unwrap()
}

/// Returns `true` if `grid` agrees with `clue` on line `id`.
///
/// Empty cells count as crossed, so this checks a finished line.
pub fn line_matches(grid: &Grid, id: LineId, clue: &Clue) -> bool {
    let filled = grid
        .line(id)
        .iter()
        .map(|state| state == CellState::Filled)
        .collect::<Vec<_>>();
    clue_of(&filled) == *clue
}

/// Solves a line by enumerating all placements of the clue.
///
/// Returns `None` when no placement agrees with the determined cells.
pub fn brute_force(clue: &Clue, cells: &[CellState]) -> Option<Vec<CellState>> {
    fn place(
        runs: &[usize],
        start: usize,
        current: &mut Vec<bool>,
        out: &mut Vec<Vec<bool>>,
    ) {
        let Some((&len, rest)) = runs.split_first() else {
            out.push(current.clone());
            return;
        };
        let n = current.len();
        let rest_len = rest.iter().sum::<usize>() + rest.len();
        if start + len + rest_len > n {
            return;
        }
        for s in start..=(n - len - rest_len) {
            current[s..s + len].fill(true);
            place(rest, s + len + 1, current, out);
            current[s..s + len].fill(false);
        }
    }

    let n = cells.len();
    if clue.min_len() > n {
        return None;
    }
    let mut placements = Vec::new();
    place(clue.runs(), 0, &mut vec![false; n], &mut placements);
    placements.retain(|p| {
        p.iter().zip(cells).all(|(&filled, &cell)| match cell {
            CellState::Empty => true,
            CellState::Filled => filled,
            CellState::Crossed => !filled,
        })
    });
    let first = placements.first()?;
    let result = (0..n)
        .map(|i| {
            if cells[i].is_determined() {
                cells[i]
            } else if placements.iter().all(|p| p[i] == first[i]) {
                if first[i] {
                    CellState::Filled
                } else {
                    CellState::Crossed
                }
            } else {
                CellState::Empty
            }
        })
        .collect();
    Some(result)
}

fn reveal(filled: bool, roll: u8, allow_wrong: bool) -> CellState {
    match roll {
        0..=2 => CellState::Empty,
        5 if allow_wrong => {
            if filled {
                CellState::Crossed
            } else {
                CellState::Filled
            }
        }
        _ => {
            if filled {
                CellState::Filled
            } else {
                CellState::Crossed
            }
        }
    }
}

/// A random line of up to `max_len` cells with a clue taken from a hidden
/// solution and a few marks, some of which may contradict it.
pub fn line_case(max_len: usize) -> impl Strategy<Value = (Clue, Vec<CellState>)> {
    prop::collection::vec((any::<bool>(), 0_u8..6), 0..=max_len).prop_map(|cells| {
        let solution = cells.iter().map(|&(f, _)| f).collect::<Vec<_>>();
        let marks = cells
            .iter()
            .map(|&(filled, roll)| reveal(filled, roll, true))
            .collect();
        (clue_of(&solution), marks)
    })
}

/// A hidden solution grid with its clues and a partial, correct reveal.
#[derive(Debug, Clone)]
pub struct GridCase {
    /// The hidden solution.
    pub solution: Vec<Vec<bool>>,
    /// Row clues derived from the solution.
    pub row_clues: Vec<Clue>,
    /// Column clues derived from the solution.
    pub col_clues: Vec<Clue>,
    /// Initial marks, all agreeing with the solution.
    pub initial: Grid,
}

/// Random puzzles up to `max_dim × max_dim`.
pub fn grid_case(max_dim: usize) -> impl Strategy<Value = GridCase> {
    (1..=max_dim, 1..=max_dim)
        .prop_flat_map(|(rows, cols)| {
            prop::collection::vec(
                prop::collection::vec((any::<bool>(), 0_u8..6), cols),
                rows,
            )
        })
        .prop_map(|cells| {
            let rows = cells.len();
            let cols = cells[0].len();
            let solution = cells
                .iter()
                .map(|row| row.iter().map(|&(f, _)| f).collect::<Vec<_>>())
                .collect::<Vec<_>>();
            let row_clues = solution.iter().map(|row| clue_of(row)).collect();
            let col_clues = (0..cols)
                .map(|c| clue_of(&solution.iter().map(|row| row[c]).collect::<Vec<_>>()))
                .collect();
            let marks = cells
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|&(filled, roll)| reveal(filled, roll, false))
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>();
            GridCase {
                solution,
                row_clues,
                col_clues,
                initial: Grid::from_rows(rows, cols, &marks),
            }
        })
}

/// A test harness for the line solver.
#[derive(Debug)]
pub struct LineTester {
    clue: Clue,
    initial: Vec<CellState>,
    result: Option<Result<LineSolution, LineError>>,
}

impl LineTester {
    /// Creates a tester from a clue and a line in text format.
    #[track_caller]
    pub fn new(clue: &str, cells: &str) -> Self {
        Self {
            clue: clue.parse().unwrap(),
            initial: parse_cells(cells),
            result: None,
        }
    }

    /// Runs the line solver and checks it against [`brute_force`].
    #[track_caller]
    pub fn solve(mut self) -> Self {
        let result = LineSolver::new().solve(&self.clue, &self.initial);
        let expected = brute_force(&self.clue, &self.initial);
        assert_eq!(
            result.as_ref().ok().map(|s| &s.cells),
            expected.as_ref(),
            "line solver disagrees with brute force for clue {} on {}",
            self.clue,
            format_cells(&self.initial),
        );
        self.result = Some(result);
        self
    }

    #[track_caller]
    fn solution(&self) -> &LineSolution {
        match self.result.as_ref().expect("call solve() first") {
            Ok(solution) => solution,
            Err(e) => panic!("expected a solution for clue {}, got {e}", self.clue),
        }
    }

    /// Asserts the solved line in text format.
    #[track_caller]
    pub fn assert_cells(self, expected: &str) -> Self {
        let actual = format_cells(&self.solution().cells);
        assert_eq!(
            actual,
            format_cells(&parse_cells(expected)),
            "clue {} on {}",
            self.clue,
            format_cells(&self.initial)
        );
        self
    }

    /// Asserts the solver failed with `expected`.
    #[track_caller]
    pub fn assert_error(self, expected: LineError) -> Self {
        match self.result.as_ref().expect("call solve() first") {
            Ok(solution) => panic!(
                "expected {expected}, got {}",
                format_cells(&solution.cells)
            ),
            Err(e) => assert_eq!(*e, expected),
        }
        self
    }

    /// Returns the run spans of the solution.
    #[track_caller]
    pub fn spans(&self) -> Vec<crate::RunSpan> {
        self.solution().spans.clone()
    }
}

/// A test harness for the propagator.
#[derive(Debug)]
pub struct GridTester {
    row_clues: Vec<Clue>,
    col_clues: Vec<Clue>,
    initial: Grid,
    current: Grid,
    result: Option<Result<PropagationOutcome, SolverError>>,
}

impl GridTester {
    /// Creates a tester from clue strings and an initial grid in text format.
    #[track_caller]
    pub fn new(row_clues: &[&str], col_clues: &[&str], grid: &str) -> Self {
        let initial = grid.parse::<Grid>().unwrap();
        Self::from_parts(
            row_clues.iter().map(|s| s.parse().unwrap()).collect(),
            col_clues.iter().map(|s| s.parse().unwrap()).collect(),
            initial,
        )
    }

    /// Creates a tester with an all-empty initial grid.
    #[track_caller]
    pub fn blank(row_clues: &[&str], col_clues: &[&str]) -> Self {
        let grid = Grid::new(row_clues.len(), col_clues.len());
        Self::from_parts(
            row_clues.iter().map(|s| s.parse().unwrap()).collect(),
            col_clues.iter().map(|s| s.parse().unwrap()).collect(),
            grid,
        )
    }

    /// Creates a tester from already built parts.
    pub fn from_parts(row_clues: Vec<Clue>, col_clues: Vec<Clue>, initial: Grid) -> Self {
        let current = initial.clone();
        Self {
            row_clues,
            col_clues,
            initial,
            current,
            result: None,
        }
    }

    /// Propagates with the default configuration.
    #[track_caller]
    pub fn propagate(self) -> Self {
        self.propagate_with(PropagationConfig::default())
    }

    /// Propagates with `config`, continuing from the current grid.
    #[track_caller]
    pub fn propagate_with(mut self, config: PropagationConfig) -> Self {
        let result = Propagator::with_config(config).propagate(
            &mut self.current,
            &self.row_clues,
            &self.col_clues,
        );
        self.result = Some(result);
        self
    }

    #[track_caller]
    fn outcome(&self) -> &PropagationOutcome {
        match self.result.as_ref().expect("call propagate() first") {
            Ok(outcome) => outcome,
            Err(e) => panic!("expected propagation to succeed, got {e}"),
        }
    }

    /// Asserts the current grid in text format.
    #[track_caller]
    pub fn assert_grid(self, expected: &str) -> Self {
        let expected = expected.parse::<Grid>().unwrap();
        assert_eq!(
            self.current.to_string(),
            expected.to_string(),
            "initial grid:\n{}",
            self.initial
        );
        self
    }

    /// Asserts the propagation status.
    #[track_caller]
    pub fn assert_status(self, expected: PropagationStatus) -> Self {
        assert_eq!(self.outcome().status, expected);
        self
    }

    /// Asserts the number of cells deduced by the last propagation.
    #[track_caller]
    pub fn assert_deduced(self, expected: usize) -> Self {
        assert_eq!(self.outcome().stats.deduced, expected);
        self
    }

    /// Asserts that the last propagation needed at least `rounds` rounds.
    #[track_caller]
    pub fn assert_rounds_at_least(self, rounds: usize) -> Self {
        let actual = self.outcome().stats.rounds;
        assert!(actual >= rounds, "expected at least {rounds} rounds, got {actual}");
        self
    }

    /// Asserts the last propagation found `line` infeasible.
    #[track_caller]
    pub fn assert_contradiction(self, line: LineId) -> Self {
        match self.result.as_ref().expect("call propagate() first") {
            Ok(outcome) => panic!("expected contradiction in {line}, got {:?}", outcome.status),
            Err(SolverError::Contradiction { line: actual, .. }) => {
                assert_eq!(*actual, line, "wrong infeasible line");
            }
            Err(e) => panic!("expected contradiction in {line}, got {e}"),
        }
        self
    }

    /// Returns the current grid.
    pub fn grid(&self) -> &Grid {
        &self.current
    }
}
