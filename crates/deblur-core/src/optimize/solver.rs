use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::consts::{DEFAULT_ABSOLUTE_STOP, DEFAULT_MAX_ITERATIONS};
use crate::error::{DeblurError, Result};

use super::l2_norm;
use super::line_search::{backtracking, LineSearchParams};
use super::objective::Objective;

/// Stopping rules for the gradient-descent solver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Iteration budget including the initial point (default: 10).
    pub max_iterations: usize,
    /// Gradient-norm tolerance (default: 1e-5).
    pub absolute_stop: f64,
    pub line_search: LineSearchParams,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            absolute_stop: DEFAULT_ABSOLUTE_STOP,
            line_search: LineSearchParams::default(),
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(DeblurError::Configuration(
                "max_iterations must be at least 1".into(),
            ));
        }
        if !(self.absolute_stop.is_finite() && self.absolute_stop > 0.0) {
            return Err(DeblurError::Configuration(format!(
                "absolute_stop must be positive, got {}",
                self.absolute_stop
            )));
        }
        self.line_search.validate()
    }
}

/// How a solver run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverStatus {
    /// Gradient norm fell to or below the tolerance.
    Converged,
    /// The line search could not find a sufficient decrease.
    NonConverging,
    /// The iteration budget ran out before the tolerance was met.
    ExhaustedBudget,
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Converged => write!(f, "Converged"),
            Self::NonConverging => write!(f, "Non-converging"),
            Self::ExhaustedBudget => write!(f, "Iteration budget exhausted"),
        }
    }
}

/// Diagnostics recorded at one iterate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    pub iteration: usize,
    pub objective: f64,
    pub gradient_norm: f64,
    /// `||x - reference||`, when a reference was supplied.
    pub residual_norm: Option<f64>,
    /// Step length that produced this iterate (`None` for the starting point).
    pub step: Option<f64>,
}

/// Result of a solver run.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Final iterate, flattened row-major.
    pub x: Array1<f64>,
    /// One record per iterate, `iterations + 1` entries.
    pub history: Vec<IterationRecord>,
    /// Number of completed update steps.
    pub iterations: usize,
    pub status: SolverStatus,
}

impl Solution {
    pub fn tolerance_met(&self) -> bool {
        self.status == SolverStatus::Converged
    }

    pub fn final_record(&self) -> &IterationRecord {
        // history always holds the starting point
        &self.history[self.history.len() - 1]
    }
}

/// Steepest descent with a backtracking line search.
#[derive(Clone, Debug)]
pub struct GradientDescent {
    config: SolverConfig,
}

impl GradientDescent {
    pub fn new(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Minimize `objective` starting from `x0`.
    ///
    /// When `reference` is given, each record carries `||x - reference||`.
    pub fn minimize<O: Objective + ?Sized>(
        &self,
        objective: &O,
        x0: Array1<f64>,
        reference: Option<&Array1<f64>>,
    ) -> Result<Solution> {
        self.minimize_with_observer(objective, x0, reference, |_| {})
    }

    /// Like [`minimize`](Self::minimize), calling `on_iteration` with every
    /// record as soon as it is appended.
    pub fn minimize_with_observer<O: Objective + ?Sized>(
        &self,
        objective: &O,
        x0: Array1<f64>,
        reference: Option<&Array1<f64>>,
        mut on_iteration: impl FnMut(&IterationRecord),
    ) -> Result<Solution> {
        let n = objective.dimension();
        if x0.len() != n {
            return Err(DeblurError::length_mismatch(n, x0.len()));
        }
        if let Some(r) = reference {
            if r.len() != n {
                return Err(DeblurError::length_mismatch(n, r.len()));
            }
        }

        let tolerance = self.config.absolute_stop;
        let last_iteration = self.config.max_iterations - 1;

        let mut x = x0;
        let (mut value, mut grad) = objective.evaluate_with_gradient(&x)?;
        let mut grad_norm = check_finite(value, &grad, 0)?;

        let mut history = Vec::new();
        let record = make_record(0, value, grad_norm, &x, reference, None);
        on_iteration(&record);
        history.push(record);

        let mut k = 0;
        let status = loop {
            if grad_norm <= tolerance {
                break SolverStatus::Converged;
            }
            if k >= last_iteration {
                break SolverStatus::ExhaustedBudget;
            }

            let step = match backtracking(objective, &x, value, &grad, &self.config.line_search) {
                Ok(step) => step,
                Err(DeblurError::NonConvergence { attempts }) => {
                    warn!(iteration = k, attempts, "Line search failed, stopping early");
                    break SolverStatus::NonConverging;
                }
                Err(e) => return Err(e),
            };

            x.scaled_add(-step.alpha, &grad);
            k += 1;

            (value, grad) = objective.evaluate_with_gradient(&x)?;
            grad_norm = check_finite(value, &grad, k)?;

            debug!(
                iteration = k,
                objective = value,
                gradient_norm = grad_norm,
                step = step.alpha,
                "Gradient descent step"
            );

            let record = make_record(k, value, grad_norm, &x, reference, Some(step.alpha));
            on_iteration(&record);
            history.push(record);
        };

        match status {
            SolverStatus::Converged => info!(iterations = k, gradient_norm = grad_norm, "Converged"),
            _ => warn!(
                iterations = k,
                gradient_norm = grad_norm,
                tolerance,
                %status,
                "Tolerance not met"
            ),
        }

        Ok(Solution {
            x,
            history,
            iterations: k,
            status,
        })
    }
}

/// Returns the gradient norm, or an error if anything is non-finite.
fn check_finite(value: f64, grad: &Array1<f64>, iteration: usize) -> Result<f64> {
    if !value.is_finite() {
        return Err(DeblurError::NumericalDivergence(format!(
            "objective is {value} at iteration {iteration}"
        )));
    }
    let norm = l2_norm(grad);
    if !norm.is_finite() {
        return Err(DeblurError::NumericalDivergence(format!(
            "gradient norm is {norm} at iteration {iteration}"
        )));
    }
    Ok(norm)
}

fn make_record(
    iteration: usize,
    objective: f64,
    gradient_norm: f64,
    x: &Array1<f64>,
    reference: Option<&Array1<f64>>,
    step: Option<f64>,
) -> IterationRecord {
    IterationRecord {
        iteration,
        objective,
        gradient_norm,
        residual_norm: reference.map(|r| l2_norm(&(x - r))),
        step,
    }
}
