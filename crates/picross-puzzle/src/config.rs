use picross_solver::{PassMode, PropagationConfig};
use serde::{Deserialize, Serialize};

/// Settings that bound and tune a solve.
///
/// Every field has a default, so a partial document deserializes.
///
/// # Examples
///
/// ```
/// use picross_puzzle::SolverConfig;
///
/// let config = SolverConfig::default();
/// assert_eq!(config.max_dimension, 100);
/// assert_eq!(config.max_rounds, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Largest accepted number of rows or columns.
    pub max_dimension: usize,
    /// Line scheduling within a propagation pass.
    pub pass_mode: PassMode,
    /// Optional cap on propagation rounds.
    pub max_rounds: Option<usize>,
}

impl SolverConfig {
    /// Default for [`max_dimension`](Self::max_dimension).
    pub const DEFAULT_MAX_DIMENSION: usize = 100;

    /// Returns the propagation settings derived from this configuration.
    #[must_use]
    pub fn propagation(&self) -> PropagationConfig {
        PropagationConfig {
            mode: self.pass_mode,
            max_rounds: self.max_rounds,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_dimension: Self::DEFAULT_MAX_DIMENSION,
            pass_mode: PassMode::default(),
            max_rounds: None,
        }
    }
}
