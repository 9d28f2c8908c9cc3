use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{
    LINE_SEARCH_C1, LINE_SEARCH_INITIAL_STEP, LINE_SEARCH_MAX_SHRINKS, LINE_SEARCH_SHRINK,
};
use crate::error::{DeblurError, Result};

use super::objective::Objective;

/// Parameters for the backtracking (Armijo) line search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineSearchParams {
    /// First trial step (default: 1.1).
    pub initial_step: f64,
    /// Factor applied to a rejected step (default: 0.5).
    pub shrink: f64,
    /// Sufficient-decrease constant (default: 0.25).
    pub c1: f64,
    /// Step reductions allowed before giving up (default: 10).
    pub max_shrinks: usize,
}

impl Default for LineSearchParams {
    fn default() -> Self {
        Self {
            initial_step: LINE_SEARCH_INITIAL_STEP,
            shrink: LINE_SEARCH_SHRINK,
            c1: LINE_SEARCH_C1,
            max_shrinks: LINE_SEARCH_MAX_SHRINKS,
        }
    }
}

impl LineSearchParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_step.is_finite() && self.initial_step > 0.0) {
            return Err(DeblurError::Configuration(format!(
                "line search initial step must be positive, got {}",
                self.initial_step
            )));
        }
        if !(self.shrink > 0.0 && self.shrink < 1.0) {
            return Err(DeblurError::Configuration(format!(
                "line search shrink factor must be in (0, 1), got {}",
                self.shrink
            )));
        }
        if !(self.c1 > 0.0 && self.c1 < 1.0) {
            return Err(DeblurError::Configuration(format!(
                "line search c1 must be in (0, 1), got {}",
                self.c1
            )));
        }
        if self.max_shrinks == 0 {
            return Err(DeblurError::Configuration(
                "line search must allow at least one step reduction".into(),
            ));
        }
        Ok(())
    }
}

/// Accepted step of a line search.
#[derive(Clone, Debug, PartialEq)]
pub struct LineSearchStep {
    /// Step length along `-grad`.
    pub alpha: f64,
    /// Number of reductions applied to the initial step.
    pub shrinks: usize,
    /// Objective value at the accepted point.
    pub value: f64,
}

/// Backtracking line search along the steepest-descent direction `p = -grad`.
///
/// Starting from `params.initial_step`, the step is multiplied by
/// `params.shrink` until
///
/// ```text
/// f(x + alpha * p) <= f(x) + c1 * alpha * <grad, p>
/// ```
///
/// holds. `value` must be `f(x)`. At most `max_shrinks` reductions are made,
/// so `max_shrinks + 1` trial steps are tested in total. If the last one still
/// fails, `DeblurError::NonConvergence` is returned. A trial point whose value
/// is not finite counts as a failed test.
pub fn backtracking<O: Objective + ?Sized>(
    objective: &O,
    x: &Array1<f64>,
    value: f64,
    grad: &Array1<f64>,
    params: &LineSearchParams,
) -> Result<LineSearchStep> {
    if !value.is_finite() {
        return Err(DeblurError::NumericalDivergence(format!(
            "objective is {value} at the line search origin"
        )));
    }

    // <grad, p> with p = -grad
    let slope = -grad.dot(grad);
    if !slope.is_finite() {
        return Err(DeblurError::NumericalDivergence(
            "gradient has non-finite entries".into(),
        ));
    }

    let mut alpha = params.initial_step;
    let mut shrinks = 0;

    loop {
        let mut trial = x.clone();
        trial.scaled_add(-alpha, grad);
        let trial_value = objective.evaluate(&trial)?;

        if trial_value.is_finite() && trial_value <= value + params.c1 * alpha * slope {
            debug!(alpha, shrinks, trial_value, "Line search accepted step");
            return Ok(LineSearchStep {
                alpha,
                shrinks,
                value: trial_value,
            });
        }

        if shrinks == params.max_shrinks {
            debug!(alpha, shrinks, trial_value, "Line search exhausted");
            return Err(DeblurError::NonConvergence { attempts: shrinks });
        }

        alpha *= params.shrink;
        shrinks += 1;
    }
}
