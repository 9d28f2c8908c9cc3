use ndarray::Array2;
use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::error::{DeblurError, Result};
use crate::psf::BlurOperator;

/// Add zero-mean Gaussian noise with standard deviation `std_dev`.
pub fn add_gaussian_noise<R: Rng + ?Sized>(
    image: &Array2<f64>,
    std_dev: f64,
    rng: &mut R,
) -> Result<Array2<f64>> {
    if !(std_dev.is_finite() && std_dev >= 0.0) {
        return Err(DeblurError::Configuration(format!(
            "noise standard deviation must be non-negative, got {std_dev}"
        )));
    }
    if std_dev == 0.0 {
        return Ok(image.clone());
    }

    let normal = Normal::new(0.0, std_dev)
        .map_err(|e| DeblurError::Configuration(format!("noise distribution: {e}")))?;
    Ok(image.mapv(|v| v + normal.sample(rng)))
}

/// Simulate an observation `b = A x + noise` of a known image.
///
/// A fixed `seed` makes the noise reproducible; `None` draws from entropy.
pub fn simulate_observation(
    truth: &Array2<f64>,
    operator: &BlurOperator,
    noise_std_dev: f64,
    seed: Option<u64>,
) -> Result<Array2<f64>> {
    let blurred = operator.forward(truth)?;
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    debug!(noise_std_dev, ?seed, "Simulating degraded observation");
    add_gaussian_noise(&blurred, noise_std_dev, &mut rng)
}
