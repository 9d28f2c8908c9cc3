use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_KERNEL_SIZE, DEFAULT_LAMBDA, DEFAULT_NOISE_STD_DEV, DEFAULT_SIGMA};
use crate::error::{DeblurError, Result};
use crate::optimize::{Regularization, SolverConfig};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeblurConfig {
    /// Tikhonov weight; 0 selects plain least squares.
    #[serde(default = "default_lambda")]
    pub lambda: f64,
    #[serde(default)]
    pub initial_guess: InitialGuess,
    #[serde(default)]
    pub psf: PsfConfig,
    #[serde(default)]
    pub noise: NoiseConfig,
    #[serde(default)]
    pub solver: SolverConfig,
}

fn default_lambda() -> f64 {
    DEFAULT_LAMBDA
}

impl Default for DeblurConfig {
    fn default() -> Self {
        Self {
            lambda: DEFAULT_LAMBDA,
            initial_guess: InitialGuess::default(),
            psf: PsfConfig::default(),
            noise: NoiseConfig::default(),
            solver: SolverConfig::default(),
        }
    }
}

impl DeblurConfig {
    /// Parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn regularization(&self) -> Regularization {
        if self.lambda == 0.0 {
            Regularization::None
        } else {
            Regularization::Tikhonov {
                lambda: self.lambda,
            }
        }
    }

    /// Reject invalid settings before any computation runs.
    pub fn validate(&self) -> Result<()> {
        if !(self.lambda.is_finite() && self.lambda >= 0.0) {
            return Err(DeblurError::Configuration(format!(
                "lambda must be finite and non-negative, got {}",
                self.lambda
            )));
        }
        self.psf.validate()?;
        self.noise.validate()?;
        self.solver.validate()
    }
}

/// Gaussian PSF parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsfConfig {
    /// Kernel side length, odd (default: 9).
    pub kernel_size: usize,
    /// Gaussian spread (default: 1.3).
    pub sigma: f64,
}

impl Default for PsfConfig {
    fn default() -> Self {
        Self {
            kernel_size: DEFAULT_KERNEL_SIZE,
            sigma: DEFAULT_SIGMA,
        }
    }
}

impl PsfConfig {
    pub fn validate(&self) -> Result<()> {
        if self.kernel_size == 0 || self.kernel_size % 2 == 0 {
            return Err(DeblurError::Configuration(format!(
                "kernel_size must be a positive odd integer, got {}",
                self.kernel_size
            )));
        }
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(DeblurError::Configuration(format!(
                "sigma must be positive, got {}",
                self.sigma
            )));
        }
        Ok(())
    }
}

/// Additive noise used when simulating an observation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Standard deviation (default: 0.025).
    pub std_dev: f64,
    /// Fixed RNG seed for reproducible noise.
    pub seed: Option<u64>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            std_dev: DEFAULT_NOISE_STD_DEV,
            seed: None,
        }
    }
}

impl NoiseConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.std_dev.is_finite() && self.std_dev >= 0.0) {
            return Err(DeblurError::Configuration(format!(
                "noise std_dev must be non-negative, got {}",
                self.std_dev
            )));
        }
        Ok(())
    }
}

/// Starting point of the solver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitialGuess {
    Zeros,
    #[default]
    Ones,
    /// Start from the observed (blurred, noisy) image.
    Observed,
}

impl std::fmt::Display for InitialGuess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Zeros => write!(f, "Zeros"),
            Self::Ones => write!(f, "Ones"),
            Self::Observed => write!(f, "Observed"),
        }
    }
}
