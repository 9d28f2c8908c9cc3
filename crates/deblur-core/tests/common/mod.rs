#![allow(dead_code)]

use ndarray::{Array1, Array2};
use rand::prelude::*;

use deblur_core::error::{DeblurError, Result};
use deblur_core::optimize::Objective;

/// Smooth synthetic test image with values in [0, 1].
pub fn synthetic_image(h: usize, w: usize) -> Array2<f64> {
    Array2::from_shape_fn((h, w), |(r, c)| {
        let y = r as f64 / h as f64;
        let x = c as f64 / w as f64;
        0.5 + 0.4 * (std::f64::consts::TAU * x).sin() * (std::f64::consts::PI * y).cos()
    })
}

/// Bright square on a dark background, with sharp edges.
pub fn block_image(h: usize, w: usize) -> Array2<f64> {
    Array2::from_shape_fn((h, w), |(r, c)| {
        if (h / 4..3 * h / 4).contains(&r) && (w / 4..3 * w / 4).contains(&c) {
            0.9
        } else {
            0.1
        }
    })
}

/// Uniform random image in [0, 1) from a fixed seed.
pub fn random_image(shape: (usize, usize), seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn(shape, |_| rng.gen::<f64>())
}

/// Frobenius inner product.
pub fn inner(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

pub fn frobenius_norm(a: &Array2<f64>) -> f64 {
    inner(a, a).sqrt()
}

/// `f(x) = 0.5 * curvature * ||x||^2`, minimized at zero.
pub struct ScaledQuadratic {
    pub curvature: f64,
    pub dim: usize,
}

impl Objective for ScaledQuadratic {
    fn dimension(&self) -> usize {
        self.dim
    }

    fn evaluate(&self, x: &Array1<f64>) -> Result<f64> {
        if x.len() != self.dim {
            return Err(DeblurError::length_mismatch(self.dim, x.len()));
        }
        Ok(0.5 * self.curvature * x.dot(x))
    }

    fn gradient(&self, x: &Array1<f64>) -> Result<Array1<f64>> {
        if x.len() != self.dim {
            return Err(DeblurError::length_mismatch(self.dim, x.len()));
        }
        Ok(x * self.curvature)
    }
}

/// Linear function whose reported gradient has the wrong sign, so no step
/// along `-gradient` ever decreases it.
pub struct MisleadingGradient {
    pub dim: usize,
}

impl Objective for MisleadingGradient {
    fn dimension(&self) -> usize {
        self.dim
    }

    fn evaluate(&self, x: &Array1<f64>) -> Result<f64> {
        Ok(x.sum())
    }

    fn gradient(&self, _x: &Array1<f64>) -> Result<Array1<f64>> {
        Ok(Array1::from_elem(self.dim, -1.0))
    }
}

/// Objective that evaluates to NaN everywhere.
pub struct NanObjective {
    pub dim: usize,
}

impl Objective for NanObjective {
    fn dimension(&self) -> usize {
        self.dim
    }

    fn evaluate(&self, _x: &Array1<f64>) -> Result<f64> {
        Ok(f64::NAN)
    }

    fn gradient(&self, _x: &Array1<f64>) -> Result<Array1<f64>> {
        Ok(Array1::zeros(self.dim))
    }
}
