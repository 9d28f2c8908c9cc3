use ndarray::Array2;

use crate::consts::UNIT_DATA_RANGE;
use crate::error::{DeblurError, Result};

/// Mean squared error between two images of the same shape.
pub fn mse(a: &Array2<f64>, b: &Array2<f64>) -> Result<f64> {
    if a.dim() != b.dim() {
        return Err(DeblurError::shape_mismatch(a.dim(), b.dim()));
    }
    if a.is_empty() {
        return Ok(0.0);
    }

    let sum: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum();
    Ok(sum / a.len() as f64)
}

/// Peak signal-to-noise ratio in dB: `10 * log10(data_range^2 / mse)`.
///
/// Identical images give `f64::INFINITY`.
pub fn psnr(reference: &Array2<f64>, test: &Array2<f64>, data_range: f64) -> Result<f64> {
    if !(data_range.is_finite() && data_range > 0.0) {
        return Err(DeblurError::Configuration(format!(
            "PSNR data range must be positive, got {data_range}"
        )));
    }
    let err = mse(reference, test)?;
    if err == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(10.0 * (data_range * data_range / err).log10())
}

/// PSNR and MSE of an image against a known original.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QualityReport {
    pub psnr: f64,
    pub mse: f64,
}

impl QualityReport {
    /// Compare against `reference` assuming pixel values in [0, 1].
    pub fn compare(reference: &Array2<f64>, test: &Array2<f64>) -> Result<Self> {
        Ok(Self {
            psnr: psnr(reference, test, UNIT_DATA_RANGE)?,
            mse: mse(reference, test)?,
        })
    }
}

impl std::fmt::Display for QualityReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PSNR: {:.6} dB, MSE: {:.6}", self.psnr, self.mse)
    }
}
