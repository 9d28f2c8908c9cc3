pub mod blur;
pub mod config;
pub mod restore;
pub mod run;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use deblur_core::pipeline::{DeblurConfig, Deblurrer, InitialGuess, Reconstruction};
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::Array2;
use tracing::debug;

#[derive(Clone, Copy, ValueEnum)]
pub enum InitArg {
    Zeros,
    Ones,
    Observed,
}

impl From<InitArg> for InitialGuess {
    fn from(arg: InitArg) -> Self {
        match arg {
            InitArg::Zeros => InitialGuess::Zeros,
            InitArg::Ones => InitialGuess::Ones,
            InitArg::Observed => InitialGuess::Observed,
        }
    }
}

/// Settings shared by every command that builds a `Deblurrer`.
/// Flags override values from `--config`.
#[derive(Args)]
pub struct ConfigOverrides {
    /// TOML config file (see `deblur config`)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// PSF side length in pixels (odd)
    #[arg(long)]
    pub kernel_size: Option<usize>,

    /// Gaussian PSF spread
    #[arg(long)]
    pub sigma: Option<f64>,

    /// Standard deviation of the added noise
    #[arg(long)]
    pub noise: Option<f64>,

    /// RNG seed for reproducible noise
    #[arg(long)]
    pub seed: Option<u64>,

    /// Tikhonov weight (0 for plain least squares)
    #[arg(long)]
    pub lambda: Option<f64>,

    /// Solver iteration budget
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Gradient-norm stopping tolerance
    #[arg(long)]
    pub absolute_stop: Option<f64>,

    /// Solver starting point
    #[arg(long, value_enum)]
    pub init: Option<InitArg>,
}

impl ConfigOverrides {
    pub fn resolve(&self) -> Result<DeblurConfig> {
        let mut config = match &self.config {
            Some(path) => DeblurConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => DeblurConfig::default(),
        };

        if let Some(v) = self.kernel_size {
            config.psf.kernel_size = v;
        }
        if let Some(v) = self.sigma {
            config.psf.sigma = v;
        }
        if let Some(v) = self.noise {
            config.noise.std_dev = v;
        }
        if self.seed.is_some() {
            config.noise.seed = self.seed;
        }
        if let Some(v) = self.lambda {
            config.lambda = v;
        }
        if let Some(v) = self.max_iterations {
            config.solver.max_iterations = v;
        }
        if let Some(v) = self.absolute_stop {
            config.solver.absolute_stop = v;
        }
        if let Some(v) = self.init {
            config.initial_guess = v.into();
        }

        config.validate().context("Invalid configuration")?;
        debug!(?config, "Resolved configuration");
        Ok(config)
    }
}

/// Run the solver with an iteration progress bar.
pub fn reconstruct_with_progress(
    deblurrer: &Deblurrer,
    observed: &Array2<f64>,
    reference: Option<&Array2<f64>>,
) -> Result<Reconstruction> {
    let pb = ProgressBar::new(deblurrer.config().solver.max_iterations as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:24} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Gradient descent");

    let rec = deblurrer.reconstruct_with_observer(observed, reference, |record| {
        pb.set_position(record.iteration as u64 + 1);
        pb.set_message(format!("f = {:.6e}", record.objective));
    })?;

    pb.finish_with_message(rec.solution.status.to_string());
    Ok(rec)
}
