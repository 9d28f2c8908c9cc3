use std::sync::Arc;

use ndarray::{Array2, ArrayViewMut1, Axis};
use num_complex::Complex;
use rayon::prelude::*;
use rustfft::{Fft, FftPlanner};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Pre-planned 2D FFT for a fixed image shape.
///
/// Row-wise transform followed by column-wise transform. Plans are built once
/// and shared by every forward/inverse call on images of this shape.
#[derive(Clone)]
pub struct Fft2d {
    height: usize,
    width: usize,
    row_forward: Arc<dyn Fft<f64>>,
    col_forward: Arc<dyn Fft<f64>>,
    row_inverse: Arc<dyn Fft<f64>>,
    col_inverse: Arc<dyn Fft<f64>>,
}

impl std::fmt::Debug for Fft2d {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fft2d")
            .field("height", &self.height)
            .field("width", &self.width)
            .finish()
    }
}

impl Fft2d {
    pub fn new(height: usize, width: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            height,
            width,
            row_forward: planner.plan_fft_forward(width),
            col_forward: planner.plan_fft_forward(height),
            row_inverse: planner.plan_fft_inverse(width),
            col_inverse: planner.plan_fft_inverse(height),
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Forward transform of a real image.
    pub fn forward(&self, data: &Array2<f64>) -> Array2<Complex<f64>> {
        let mut spectrum = data.mapv(|v| Complex::new(v, 0.0));
        self.transform_lanes(&mut spectrum, Axis(0), &self.row_forward);
        self.transform_lanes(&mut spectrum, Axis(1), &self.col_forward);
        spectrum
    }

    /// Inverse transform, normalized by 1/(h*w), keeping only the real part.
    pub fn inverse_real(&self, mut spectrum: Array2<Complex<f64>>) -> Array2<f64> {
        self.transform_lanes(&mut spectrum, Axis(1), &self.col_inverse);
        self.transform_lanes(&mut spectrum, Axis(0), &self.row_inverse);

        let scale = 1.0 / (self.height * self.width) as f64;
        spectrum.mapv(|c| c.re * scale)
    }

    /// Run `fft` over every lane of `data` along `axis`.
    ///
    /// `Axis(0)` iterates rows, `Axis(1)` iterates columns.
    fn transform_lanes(
        &self,
        data: &mut Array2<Complex<f64>>,
        axis: Axis,
        fft: &Arc<dyn Fft<f64>>,
    ) {
        if self.height * self.width >= PARALLEL_PIXEL_THRESHOLD {
            data.axis_iter_mut(axis)
                .into_par_iter()
                .for_each(|lane| transform_lane(lane, fft));
        } else {
            for lane in data.axis_iter_mut(axis) {
                transform_lane(lane, fft);
            }
        }
    }
}

fn transform_lane(mut lane: ArrayViewMut1<'_, Complex<f64>>, fft: &Arc<dyn Fft<f64>>) {
    if let Some(slice) = lane.as_slice_mut() {
        fft.process(slice);
        return;
    }

    // Columns of a row-major array are strided; go through a buffer.
    let mut buffer = lane.to_vec();
    fft.process(&mut buffer);
    for (dst, src) in lane.iter_mut().zip(buffer) {
        *dst = src;
    }
}
