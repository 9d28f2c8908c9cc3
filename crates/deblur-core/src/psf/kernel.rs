use ndarray::{Array1, Array2};

use crate::error::{DeblurError, Result};

/// Build a normalized `size x size` Gaussian PSF.
///
/// The 1D profile is `exp(-0.5 * t^2 / sigma)` sampled at the integer
/// offsets `-size/2..=size/2`; the 2D kernel is its outer product with
/// itself, divided by its total so that the entries sum to 1.
///
/// Note that `sigma` enters the exponent unsquared.
pub fn gaussian_kernel(size: usize, sigma: f64) -> Result<Array2<f64>> {
    if size == 0 || size % 2 == 0 {
        return Err(DeblurError::Configuration(format!(
            "kernel size must be a positive odd integer, got {size}"
        )));
    }
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(DeblurError::Configuration(format!(
            "kernel sigma must be positive and finite, got {sigma}"
        )));
    }

    let radius = (size / 2) as f64;
    let profile: Array1<f64> = (0..size)
        .map(|i| {
            let t = i as f64 - radius;
            (-0.5 * t * t / sigma).exp()
        })
        .collect();

    let mut kernel = Array2::from_shape_fn((size, size), |(r, c)| profile[r] * profile[c]);
    let sum = kernel.sum();
    kernel.mapv_inplace(|v| v / sum);

    Ok(kernel)
}
