pub mod config;

use std::sync::Arc;

use ndarray::{Array1, Array2};
use tracing::info;

use crate::degrade::simulate_observation;
use crate::error::{DeblurError, Result};
use crate::frame::{flatten, unflatten};
use crate::optimize::{DeblurObjective, GradientDescent, IterationRecord, Regularization, Solution};
use crate::psf::{gaussian_kernel, BlurOperator};

pub use config::{DeblurConfig, InitialGuess, NoiseConfig, PsfConfig};

/// Output of a reconstruction run.
#[derive(Clone, Debug)]
pub struct Reconstruction {
    /// Reconstructed image, same shape as the observation.
    pub image: Array2<f64>,
    pub solution: Solution,
}

/// Everything built once per configuration and image shape: the PSF, its
/// frequency-domain operator, and the solver.
#[derive(Clone, Debug)]
pub struct Deblurrer {
    config: DeblurConfig,
    kernel: Array2<f64>,
    operator: Arc<BlurOperator>,
    solver: GradientDescent,
}

impl Deblurrer {
    pub fn from_config(config: DeblurConfig, shape: (usize, usize)) -> Result<Self> {
        config.validate()?;

        let kernel = gaussian_kernel(config.psf.kernel_size, config.psf.sigma)?;
        let operator = Arc::new(BlurOperator::new(&kernel, shape)?);
        let solver = GradientDescent::new(config.solver.clone())?;

        Ok(Self {
            config,
            kernel,
            operator,
            solver,
        })
    }

    pub fn config(&self) -> &DeblurConfig {
        &self.config
    }

    pub fn kernel(&self) -> &Array2<f64> {
        &self.kernel
    }

    pub fn operator(&self) -> &Arc<BlurOperator> {
        &self.operator
    }

    /// Blur `truth` and add the configured noise.
    pub fn observe(&self, truth: &Array2<f64>) -> Result<Array2<f64>> {
        simulate_observation(
            truth,
            &self.operator,
            self.config.noise.std_dev,
            self.config.noise.seed,
        )
    }

    /// Objective for `observed` with an explicit regularization choice.
    pub fn objective(
        &self,
        observed: Array2<f64>,
        regularization: Regularization,
    ) -> Result<DeblurObjective> {
        DeblurObjective::new(Arc::clone(&self.operator), observed, regularization)
    }

    /// Starting point selected by the config.
    pub fn initial_guess(&self, observed: &Array2<f64>) -> Array1<f64> {
        let n = self.operator.pixel_count();
        match self.config.initial_guess {
            InitialGuess::Zeros => Array1::zeros(n),
            InitialGuess::Ones => Array1::ones(n),
            InitialGuess::Observed => flatten(observed),
        }
    }

    /// Reconstruct the image behind `observed`.
    ///
    /// `reference` only feeds the per-iteration residual diagnostic.
    pub fn reconstruct(
        &self,
        observed: &Array2<f64>,
        reference: Option<&Array2<f64>>,
    ) -> Result<Reconstruction> {
        self.reconstruct_with_observer(observed, reference, |_| {})
    }

    pub fn reconstruct_with_observer(
        &self,
        observed: &Array2<f64>,
        reference: Option<&Array2<f64>>,
        on_iteration: impl FnMut(&IterationRecord),
    ) -> Result<Reconstruction> {
        let shape = self.operator.shape();
        if let Some(r) = reference {
            if r.dim() != shape {
                return Err(DeblurError::shape_mismatch(shape, r.dim()));
            }
        }

        let objective = self.objective(observed.clone(), self.config.regularization())?;
        let x0 = self.initial_guess(observed);
        let reference = reference.map(flatten);

        let solution =
            self.solver
                .minimize_with_observer(&objective, x0, reference.as_ref(), on_iteration)?;
        let image = unflatten(&solution.x, shape)?;

        info!(
            status = %solution.status,
            iterations = solution.iterations,
            regularization = %self.config.regularization(),
            "Reconstruction finished"
        );

        Ok(Reconstruction { image, solution })
    }
}
