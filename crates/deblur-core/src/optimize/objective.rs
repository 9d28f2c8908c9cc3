use std::sync::Arc;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{DeblurError, Result};
use crate::frame::{flatten, unflatten};
use crate::psf::BlurOperator;

/// A differentiable scalar function of a flat image vector.
///
/// This is the whole contract an optimizer needs: the gradient-descent solver
/// in this crate consumes it, and so could any external first-order method.
pub trait Objective {
    /// Length of the vectors accepted by `evaluate` and `gradient`.
    fn dimension(&self) -> usize;

    fn evaluate(&self, x: &Array1<f64>) -> Result<f64>;

    fn gradient(&self, x: &Array1<f64>) -> Result<Array1<f64>>;

    /// Value and gradient together. Implementors can override this to share
    /// work between the two.
    fn evaluate_with_gradient(&self, x: &Array1<f64>) -> Result<(f64, Array1<f64>)> {
        Ok((self.evaluate(x)?, self.gradient(x)?))
    }
}

/// Penalty added to the data-fit term.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Regularization {
    /// Plain least squares, `0.5 * ||Ax - b||^2`.
    None,
    /// Adds `(lambda / 2) * ||x||^2`.
    Tikhonov { lambda: f64 },
}

impl Regularization {
    pub fn lambda(&self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Tikhonov { lambda } => *lambda,
        }
    }
}

impl Default for Regularization {
    fn default() -> Self {
        Self::Tikhonov {
            lambda: crate::consts::DEFAULT_LAMBDA,
        }
    }
}

impl std::fmt::Display for Regularization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Tikhonov { lambda } => write!(f, "Tikhonov (lambda={lambda})"),
        }
    }
}

/// Regularized deblurring objective
/// `f(x) = 0.5 * ||A x - b||_F^2 + (lambda / 2) * ||x||_F^2`
/// with gradient `A^T (A x - b) + lambda * x`.
#[derive(Clone, Debug)]
pub struct DeblurObjective {
    operator: Arc<BlurOperator>,
    observed: Array2<f64>,
    lambda: f64,
}

impl DeblurObjective {
    pub fn new(
        operator: Arc<BlurOperator>,
        observed: Array2<f64>,
        regularization: Regularization,
    ) -> Result<Self> {
        if observed.dim() != operator.shape() {
            return Err(DeblurError::shape_mismatch(operator.shape(), observed.dim()));
        }
        let lambda = regularization.lambda();
        if !(lambda.is_finite() && lambda >= 0.0) {
            return Err(DeblurError::Configuration(format!(
                "regularization weight must be finite and non-negative, got {lambda}"
            )));
        }

        Ok(Self {
            operator,
            observed,
            lambda,
        })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn observed(&self) -> &Array2<f64> {
        &self.observed
    }

    pub fn operator(&self) -> &BlurOperator {
        &self.operator
    }

    /// Returns the candidate as an image together with `A x - b`.
    fn residual(&self, x: &Array1<f64>) -> Result<(Array2<f64>, Array2<f64>)> {
        let image = unflatten(x, self.operator.shape())?;
        let residual = self.operator.forward(&image)? - &self.observed;
        Ok((image, residual))
    }

    fn value_from(&self, image: &Array2<f64>, residual: &Array2<f64>) -> f64 {
        let data_fit = 0.5 * residual.iter().map(|r| r * r).sum::<f64>();
        if self.lambda == 0.0 {
            return data_fit;
        }
        data_fit + 0.5 * self.lambda * image.iter().map(|v| v * v).sum::<f64>()
    }

    fn gradient_from(&self, image: &Array2<f64>, residual: &Array2<f64>) -> Result<Array1<f64>> {
        let mut grad = self.operator.adjoint(residual)?;
        if self.lambda != 0.0 {
            grad.scaled_add(self.lambda, image);
        }
        Ok(flatten(&grad))
    }
}

impl Objective for DeblurObjective {
    fn dimension(&self) -> usize {
        self.operator.pixel_count()
    }

    fn evaluate(&self, x: &Array1<f64>) -> Result<f64> {
        let (image, residual) = self.residual(x)?;
        Ok(self.value_from(&image, &residual))
    }

    fn gradient(&self, x: &Array1<f64>) -> Result<Array1<f64>> {
        let (image, residual) = self.residual(x)?;
        self.gradient_from(&image, &residual)
    }

    fn evaluate_with_gradient(&self, x: &Array1<f64>) -> Result<(f64, Array1<f64>)> {
        let (image, residual) = self.residual(x)?;
        let value = self.value_from(&image, &residual);
        Ok((value, self.gradient_from(&image, &residual)?))
    }
}
