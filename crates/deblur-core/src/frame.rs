use ndarray::{Array1, Array2};

use crate::error::{DeblurError, Result};

/// A single-channel image.
/// Pixel values are f64, nominally in [0.0, 1.0] but never clamped by the solver.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f64>,
    /// Original bit depth before conversion (8 or 16)
    pub original_bit_depth: u8,
}

impl Frame {
    pub fn new(data: Array2<f64>, bit_depth: u8) -> Self {
        Self {
            data,
            original_bit_depth: bit_depth,
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }
}

/// Flatten an image into the row-major vector the optimizer works on.
pub fn flatten(image: &Array2<f64>) -> Array1<f64> {
    image.iter().copied().collect()
}

/// Reshape a flat row-major vector back into an image of `shape`.
pub fn unflatten(flat: &Array1<f64>, shape: (usize, usize)) -> Result<Array2<f64>> {
    let (h, w) = shape;
    if flat.len() != h * w {
        return Err(DeblurError::length_mismatch(h * w, flat.len()));
    }
    Array2::from_shape_vec((h, w), flat.to_vec())
        .map_err(|_| DeblurError::length_mismatch(h * w, flat.len()))
}
