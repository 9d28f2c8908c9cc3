use approx::assert_abs_diff_eq;
use ndarray::Array2;

use deblur_core::error::DeblurError;
use deblur_core::metrics::{mse, psnr, QualityReport};

#[test]
fn mse_of_constant_offset() {
    let a = Array2::from_elem((4, 4), 0.5);
    let b = Array2::from_elem((4, 4), 0.6);
    assert_abs_diff_eq!(mse(&a, &b).unwrap(), 0.01, epsilon = 1e-12);
}

#[test]
fn psnr_of_known_error() {
    // mse = 0.01 -> 10 * log10(1 / 0.01) = 20 dB
    let a = Array2::from_elem((8, 8), 0.2);
    let b = Array2::from_elem((8, 8), 0.3);
    assert_abs_diff_eq!(psnr(&a, &b, 1.0).unwrap(), 20.0, epsilon = 1e-9);
}

#[test]
fn identical_images_have_infinite_psnr() {
    let a = Array2::from_elem((3, 3), 0.7);
    assert_eq!(psnr(&a, &a, 1.0).unwrap(), f64::INFINITY);
    assert_eq!(mse(&a, &a).unwrap(), 0.0);
}

#[test]
fn shape_mismatch_rejected() {
    let a = Array2::<f64>::zeros((3, 3));
    let b = Array2::<f64>::zeros((3, 4));
    assert!(matches!(
        mse(&a, &b),
        Err(DeblurError::DimensionMismatch { .. })
    ));
}

#[test]
fn invalid_data_range_rejected() {
    let a = Array2::<f64>::zeros((2, 2));
    assert!(matches!(
        psnr(&a, &a, 0.0),
        Err(DeblurError::Configuration(_))
    ));
}

#[test]
fn quality_report_display() {
    let a = Array2::from_elem((2, 2), 0.0);
    let b = Array2::from_elem((2, 2), 0.1);
    let report = QualityReport::compare(&a, &b).unwrap();
    let s = format!("{report}");
    assert!(s.contains("PSNR: 20.000000"), "got: {s}");
    assert!(s.contains("MSE: 0.010000"), "got: {s}");
}
