use picross_core::{Clue, Grid, LineId};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{LineError, LineSolution, LineSolver, RunSpan, SolverError};

/// How the lines of one pass are scheduled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassMode {
    /// Solve lines one after another, writing each into the grid in place.
    #[default]
    Sequential,
    /// Solve all lines of a pass concurrently against a snapshot of the grid
    /// and merge the results when the pass ends.
    Parallel,
}

/// Tuning knobs for [`Propagator`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationConfig {
    /// Line scheduling within a pass.
    pub mode: PassMode,
    /// Upper bound on rounds; `None` runs until a fixpoint.
    pub max_rounds: Option<usize>,
}

/// How propagation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PropagationStatus {
    /// A fixpoint was reached without determining any new cell, including
    /// when the grid was already complete on entry.
    NoProgress,
    /// Some cells were determined, but some remain empty.
    Progressed,
    /// This call determined the last empty cells; every line agrees with its
    /// clue.
    Solved,
}

/// Counters collected during propagation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PropagationStats {
    /// Rounds executed; a round is one row pass followed by one column pass.
    pub rounds: usize,
    /// Number of individual line solver invocations.
    pub line_solves: usize,
    /// Cells refined from `Empty` to a determined state.
    pub deduced: usize,
}

/// The result of a successful propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropagationOutcome {
    /// How propagation ended.
    pub status: PropagationStatus,
    /// Counters collected along the way.
    pub stats: PropagationStats,
}

/// Drives the [`LineSolver`] over a whole grid until a fixpoint.
///
/// A round solves every row in ascending order, then every column in
/// ascending order. The first round visits every line; later rounds visit only
/// lines that crossed a cell changed since they were last solved. Propagation
/// stops when no line is pending, so a reported fixpoint is a true one.
///
/// On a contradiction the grid may hold deductions made before the failing
/// line was found. Callers that need all-or-nothing behavior should work on a
/// copy.
///
/// # Examples
///
/// ```
/// use picross_core::{Clue, Grid};
/// use picross_solver::{PassMode, PropagationConfig, PropagationStatus, Propagator};
///
/// let rows = ["2", "1"].map(|s| s.parse::<Clue>().unwrap());
/// let cols = ["2", "1"].map(|s| s.parse::<Clue>().unwrap());
/// let mut grid = Grid::new(2, 2);
///
/// let propagator = Propagator::with_config(PropagationConfig {
///     mode: PassMode::Parallel,
///     ..PropagationConfig::default()
/// });
/// let outcome = propagator.propagate(&mut grid, &rows, &cols)?;
/// assert_eq!(outcome.status, PropagationStatus::Solved);
/// assert_eq!(outcome.stats.deduced, 4);
/// # Ok::<(), picross_solver::SolverError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct Propagator {
    solver: LineSolver,
    config: PropagationConfig,
}

impl Propagator {
    /// Creates a propagator with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a propagator with the given configuration.
    #[must_use]
    pub fn with_config(config: PropagationConfig) -> Self {
        Self {
            solver: LineSolver::new(),
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &PropagationConfig {
        &self.config
    }

    /// Propagates line deductions over `grid` until a fixpoint.
    ///
    /// # Errors
    ///
    /// - [`SolverError::ClueCountMismatch`] if the clue counts do not match
    ///   the grid shape. The grid is untouched.
    /// - [`SolverError::Contradiction`] naming the first infeasible line.
    /// - [`SolverError::RoundLimit`] if `max_rounds` is exceeded.
    ///
    /// # Panics
    ///
    /// Panics if the line solver produces a deduction that conflicts with a
    /// determined cell, which would be a bug in the solver.
    pub fn propagate(
        &self,
        grid: &mut Grid,
        row_clues: &[Clue],
        col_clues: &[Clue],
    ) -> Result<PropagationOutcome, SolverError> {
        check_clue_count("row", grid.rows(), row_clues)?;
        check_clue_count("column", grid.cols(), col_clues)?;

        let clues = Clues {
            rows: row_clues,
            cols: col_clues,
        };
        let mut stats = PropagationStats::default();
        let mut pending_rows = vec![true; grid.rows()];
        let mut pending_cols = vec![true; grid.cols()];

        while pending_rows.contains(&true) || pending_cols.contains(&true) {
            if let Some(max_rounds) = self.config.max_rounds
                && stats.rounds >= max_rounds
            {
                return Err(SolverError::RoundLimit {
                    rounds: stats.rounds,
                });
            }
            stats.rounds += 1;
            let before = stats.deduced;

            let rows = take_pending(&mut pending_rows, LineId::Row);
            self.run_pass(grid, &clues, &rows, &mut pending_cols, &mut stats)?;
            let cols = take_pending(&mut pending_cols, LineId::Column);
            self.run_pass(grid, &clues, &cols, &mut pending_rows, &mut stats)?;

            log::debug!(
                "round {}: {} line(s) solved, {} cell(s) deduced",
                stats.rounds,
                rows.len() + cols.len(),
                stats.deduced - before
            );
        }

        let status = if stats.deduced == 0 {
            PropagationStatus::NoProgress
        } else if grid.is_complete() {
            PropagationStatus::Solved
        } else {
            PropagationStatus::Progressed
        };
        log::info!(
            "propagation finished: {status:?} after {} round(s), {} cell(s) deduced, {}/{} determined",
            stats.rounds,
            stats.deduced,
            grid.determined_count(),
            grid.rows() * grid.cols()
        );
        Ok(PropagationOutcome { status, stats })
    }

    /// Solves `lines` (all rows or all columns) and commits their deductions.
    ///
    /// Every changed cell marks the crossing line in `crossing` as pending.
    fn run_pass(
        &self,
        grid: &mut Grid,
        clues: &Clues<'_>,
        lines: &[LineId],
        crossing: &mut [bool],
        stats: &mut PropagationStats,
    ) -> Result<(), SolverError> {
        match self.config.mode {
            PassMode::Sequential => {
                for &id in lines {
                    let solution = self.solve_line(grid, clues, id)?;
                    commit(grid, id, &solution, crossing, stats);
                }
            }
            PassMode::Parallel => {
                let snapshot = &*grid;
                let solutions = lines
                    .par_iter()
                    .map(|&id| self.solve_line(snapshot, clues, id).map(|s| (id, s)))
                    .collect::<Vec<_>>();
                // Keep the error of the lowest-indexed line so reports match
                // sequential mode.
                let solutions = solutions.into_iter().collect::<Result<Vec<_>, _>>()?;
                for (id, solution) in solutions {
                    commit(grid, id, &solution, crossing, stats);
                }
            }
        }
        stats.line_solves += lines.len();
        Ok(())
    }

    fn solve_line(
        &self,
        grid: &Grid,
        clues: &Clues<'_>,
        id: LineId,
    ) -> Result<LineSolution, SolverError> {
        let clue = clues.get(id);
        let cells = grid.line(id).to_vec();
        self.solver
            .solve(clue, &cells)
            .map_err(|source: LineError| {
                log::debug!("{id} is infeasible: {source}");
                SolverError::Contradiction {
                    line: id,
                    clue: clue.clone(),
                    source,
                }
            })
    }
}

#[derive(Debug, Clone, Copy)]
struct Clues<'a> {
    rows: &'a [Clue],
    cols: &'a [Clue],
}

impl Clues<'_> {
    fn get(&self, id: LineId) -> &Clue {
        match id {
            LineId::Row(i) => &self.rows[i],
            LineId::Column(i) => &self.cols[i],
        }
    }
}

fn check_clue_count(kind: &'static str, expected: usize, clues: &[Clue]) -> Result<(), SolverError> {
    if clues.len() != expected {
        return Err(SolverError::ClueCountMismatch {
            kind,
            expected,
            found: clues.len(),
        });
    }
    Ok(())
}

fn take_pending(pending: &mut [bool], make_id: fn(usize) -> LineId) -> Vec<LineId> {
    pending
        .iter_mut()
        .enumerate()
        .filter(|(_, flag)| **flag)
        .map(|(i, flag)| {
            *flag = false;
            make_id(i)
        })
        .collect()
}

fn commit(
    grid: &mut Grid,
    id: LineId,
    solution: &LineSolution,
    crossing: &mut [bool],
    stats: &mut PropagationStats,
) {
    let changed = grid
        .line_mut(id)
        .refine_all(&solution.cells)
        .unwrap_or_else(|conflict| {
            panic!("line solver produced a conflicting deduction for {id}: {conflict}")
        });
    if changed.is_empty() {
        return;
    }
    log::trace!(
        "{id}: {} cell(s) deduced, run cores {:?}",
        changed.len(),
        solution.spans.iter().map(RunSpan::core).collect::<Vec<_>>()
    );
    stats.deduced += changed.len();
    for position in changed {
        crossing[position] = true;
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use picross_core::CellState;

    use super::*;
    use crate::testing::{self, GridTester, line_matches};

    #[test]
    fn test_exact_fit_row() {
        GridTester::blank(&["5"], &["1", "1", "1", "1", "1"])
            .propagate()
            .assert_grid("#####")
            .assert_status(PropagationStatus::Solved)
            .assert_deduced(5);
    }

    #[test]
    fn test_blank_clues() {
        GridTester::blank(&["0", ""], &["0", "0"])
            .propagate()
            .assert_grid(
                "
                xx
                xx
            ",
            )
            .assert_status(PropagationStatus::Solved);
    }

    #[test]
    fn test_complete_grid_reports_no_progress() {
        GridTester::new(&["5"], &["1", "1", "1", "1", "1"], "#####")
            .propagate()
            .assert_grid("#####")
            .assert_status(PropagationStatus::NoProgress)
            .assert_deduced(0);
    }

    #[test]
    fn test_no_progress() {
        GridTester::blank(&["1", "1"], &["1", "1"])
            .propagate()
            .assert_grid(
                "
                ..
                ..
            ",
            )
            .assert_status(PropagationStatus::NoProgress)
            .assert_deduced(0);
    }

    #[test]
    fn test_cross_line_propagation() {
        // Rows alone leave row 1 ambiguous; the full middle column forces it.
        GridTester::blank(&["1", "1", "3"], &["1", "3", "1"])
            .propagate()
            .assert_grid(
                "
                x#x
                x#x
                ###
            ",
            )
            .assert_status(PropagationStatus::Solved)
            .assert_rounds_at_least(1);
    }

    #[test]
    fn test_needs_more_than_one_round() {
        // Columns complete the grid in round 1; the touched rows are checked in round 2.
        GridTester::blank(&["1 1", "1", "2"], &["1", "2", "1 1"])
            .propagate()
            .assert_status(PropagationStatus::Solved)
            .assert_rounds_at_least(2);
    }

    #[test]
    fn test_partial_progress() {
        GridTester::blank(&["2", "1"], &["1", "1", "1"])
            .propagate()
            .assert_grid(
                "
                .#.
                .x.
            ",
            )
            .assert_status(PropagationStatus::Progressed)
            .assert_deduced(2);
    }

    #[test]
    fn test_contradiction_names_first_line() {
        GridTester::new(&["3"], &["1", "1", "1"], ".x.")
            .propagate()
            .assert_contradiction(LineId::Row(0));
        GridTester::new(&["1", "1"], &["2", "0"], "x.\n..")
            .propagate()
            .assert_contradiction(LineId::Column(0));
    }

    #[test]
    fn test_complete_but_wrong_grid_is_contradiction() {
        GridTester::new(&["1", "1"], &["1", "1"], "#x\n#x")
            .propagate()
            .assert_contradiction(LineId::Column(0));
    }

    #[test]
    fn test_clue_count_mismatch() {
        let mut grid = Grid::new(2, 2);
        let clues = [Clue::BLANK];
        let err = Propagator::new()
            .propagate(&mut grid, &clues, &[Clue::BLANK, Clue::BLANK])
            .unwrap_err();
        assert_eq!(
            err,
            SolverError::ClueCountMismatch {
                kind: "row",
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_round_limit() {
        let mut grid = Grid::new(3, 3);
        let rows = ["1 1", "1", "2"].map(|s| s.parse::<Clue>().unwrap());
        let cols = ["1", "2", "1 1"].map(|s| s.parse::<Clue>().unwrap());
        let propagator = Propagator::with_config(PropagationConfig {
            max_rounds: Some(1),
            ..PropagationConfig::default()
        });
        let err = propagator.propagate(&mut grid, &rows, &cols).unwrap_err();
        assert_eq!(err, SolverError::RoundLimit { rounds: 1 });
    }

    #[test]
    fn test_line_matches() {
        let grid: Grid = "##x#.".parse().unwrap();
        assert!(line_matches(&grid, LineId::Row(0), &"2 1".parse().unwrap()));
        assert!(!line_matches(&grid, LineId::Row(0), &"3".parse().unwrap()));
        assert!(line_matches(&grid, LineId::Column(2), &Clue::BLANK));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let parallel = PropagationConfig {
            mode: PassMode::Parallel,
            ..PropagationConfig::default()
        };
        let rows = ["1 1", "1", "2"];
        let cols = ["1", "2", "1 1"];
        let sequential = GridTester::blank(&rows, &cols).propagate();
        GridTester::blank(&rows, &cols)
            .propagate_with(parallel)
            .assert_grid(&sequential.grid().to_string());
    }

    #[test]
    fn test_parallel_reports_same_first_contradiction() {
        let parallel = PropagationConfig {
            mode: PassMode::Parallel,
            ..PropagationConfig::default()
        };
        // Rows 1 and 2 are both infeasible in the first row pass.
        let rows = ["1", "3", "3"];
        let cols = ["1", "1", "1"];
        let grid = "...\n.x.\n.x.";
        GridTester::new(&rows, &cols, grid)
            .propagate()
            .assert_contradiction(LineId::Row(1));
        GridTester::new(&rows, &cols, grid)
            .propagate_with(parallel)
            .assert_contradiction(LineId::Row(1));

        // Rows succeed; columns 1 and 2 then find only crossed cells.
        let rows = ["0", "0", "0"];
        let cols = ["0", "1", "1"];
        GridTester::blank(&rows, &cols)
            .propagate()
            .assert_contradiction(LineId::Column(1));
        GridTester::blank(&rows, &cols)
            .propagate_with(parallel)
            .assert_contradiction(LineId::Column(1));
    }

    proptest! {
        #[test]
        fn test_deductions_agree_with_hidden_solution(case in testing::grid_case(7)) {
            let mut grid = case.initial.clone();
            Propagator::new()
                .propagate(&mut grid, &case.row_clues, &case.col_clues)
                .unwrap();
            for (r, row) in case.solution.iter().enumerate() {
                for (c, &filled) in row.iter().enumerate() {
                    let state = grid.get(r, c);
                    if state.is_determined() {
                        prop_assert_eq!(state == CellState::Filled, filled);
                    }
                }
            }
        }

        #[test]
        fn test_fixpoint_is_stable(case in testing::grid_case(7)) {
            let mut grid = case.initial.clone();
            let propagator = Propagator::new();
            propagator.propagate(&mut grid, &case.row_clues, &case.col_clues).unwrap();
            let first = grid.clone();
            let outcome = propagator
                .propagate(&mut grid, &case.row_clues, &case.col_clues)
                .unwrap();
            prop_assert_eq!(&grid, &first);
            prop_assert_eq!(outcome.stats.deduced, 0);
            prop_assert_eq!(outcome.status, PropagationStatus::NoProgress);
        }

        #[test]
        fn test_solved_grids_match_clues(case in testing::grid_case(7)) {
            let mut grid = case.initial.clone();
            let outcome = Propagator::new()
                .propagate(&mut grid, &case.row_clues, &case.col_clues)
                .unwrap();
            prop_assert_eq!(outcome.status.is_solved(), grid.is_complete() && outcome.stats.deduced > 0);
            if grid.is_complete() {
                for (i, clue) in case.row_clues.iter().enumerate() {
                    prop_assert!(line_matches(&grid, LineId::Row(i), clue));
                }
                for (i, clue) in case.col_clues.iter().enumerate() {
                    prop_assert!(line_matches(&grid, LineId::Column(i), clue));
                }
            }
        }

        #[test]
        fn test_modes_agree(case in testing::grid_case(7)) {
            let mut sequential = case.initial.clone();
            let mut parallel = case.initial.clone();
            Propagator::new()
                .propagate(&mut sequential, &case.row_clues, &case.col_clues)
                .unwrap();
            Propagator::with_config(PropagationConfig {
                mode: PassMode::Parallel,
                max_rounds: None,
            })
            .propagate(&mut parallel, &case.row_clues, &case.col_clues)
            .unwrap();
            prop_assert_eq!(sequential, parallel);
        }
    }
}
