use ndarray::Array2;
use num_complex::Complex;
use tracing::debug;

use crate::error::{DeblurError, Result};

use super::fft::Fft2d;

/// Circular convolution with a fixed PSF, applied in the frequency domain.
///
/// Holds the optical transfer function (OTF): the DFT of the PSF after
/// zero-padding to the image shape and rolling its centre to index (0,0).
/// Because the PSF is real the OTF is conjugate-symmetric, so multiplying by
/// its conjugate gives the exact transpose of the blur.
#[derive(Clone, Debug)]
pub struct BlurOperator {
    otf: Array2<Complex<f64>>,
    kernel_dim: (usize, usize),
    fft: Fft2d,
}

impl BlurOperator {
    pub fn new(kernel: &Array2<f64>, shape: (usize, usize)) -> Result<Self> {
        let (h, w) = shape;
        let (kh, kw) = kernel.dim();

        if h == 0 || w == 0 {
            return Err(DeblurError::Configuration(format!(
                "image shape must be non-empty, got {h}x{w}"
            )));
        }
        if kh == 0 || kw == 0 {
            return Err(DeblurError::Configuration("kernel is empty".into()));
        }
        if kh > h || kw > w {
            return Err(DeblurError::shape_mismatch((h, w), (kh, kw)));
        }

        let padded = pad_and_center(kernel, shape);
        let fft = Fft2d::new(h, w);
        let otf = fft.forward(&padded);

        debug!(kernel = %format!("{kh}x{kw}"), image = %format!("{h}x{w}"), "Built blur operator");

        Ok(Self {
            otf,
            kernel_dim: (kh, kw),
            fft,
        })
    }

    /// Image shape (rows, cols) this operator acts on.
    pub fn shape(&self) -> (usize, usize) {
        self.otf.dim()
    }

    pub fn pixel_count(&self) -> usize {
        self.otf.len()
    }

    pub fn kernel_dim(&self) -> (usize, usize) {
        self.kernel_dim
    }

    /// Frequency-domain representation of the PSF.
    pub fn otf(&self) -> &Array2<Complex<f64>> {
        &self.otf
    }

    /// Blur `x`: `Re(IFFT(FFT(x) * OTF))`.
    pub fn forward(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.apply(x, false)
    }

    /// Transpose of the blur: `Re(IFFT(FFT(x) * conj(OTF)))`.
    pub fn adjoint(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.apply(x, true)
    }

    fn apply(&self, x: &Array2<f64>, conjugate: bool) -> Result<Array2<f64>> {
        if x.dim() != self.shape() {
            return Err(DeblurError::shape_mismatch(self.shape(), x.dim()));
        }

        let mut spectrum = self.fft.forward(x);
        if conjugate {
            spectrum.zip_mut_with(&self.otf, |s, &k| *s *= k.conj());
        } else {
            spectrum.zip_mut_with(&self.otf, |s, &k| *s *= k);
        }

        Ok(self.fft.inverse_real(spectrum))
    }
}

/// Zero-pad `kernel` to `shape` and roll it by `-(kh/2, kw/2)` with
/// wrap-around, so the kernel centre sits at (0,0).
fn pad_and_center(kernel: &Array2<f64>, shape: (usize, usize)) -> Array2<f64> {
    let (h, w) = shape;
    let (kh, kw) = kernel.dim();
    let (cy, cx) = (kh / 2, kw / 2);

    let mut padded = Array2::<f64>::zeros((h, w));
    for ((row, col), &v) in kernel.indexed_iter() {
        padded[[(row + h - cy) % h, (col + w - cx) % w]] = v;
    }
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_centre_lands_at_origin() {
        let kernel = Array2::from_shape_fn((3, 3), |(r, c)| (r * 3 + c + 1) as f64);
        let padded = pad_and_center(&kernel, (5, 6));
        assert_eq!(padded[[0, 0]], 5.0);
        assert_eq!(padded[[4, 5]], 1.0);
        assert_eq!(padded[[0, 1]], 6.0);
        assert_eq!(padded[[1, 0]], 8.0);
        assert_eq!(padded[[1, 1]], 9.0);
        let total: f64 = padded.sum();
        assert_eq!(total, kernel.sum());
    }
}
