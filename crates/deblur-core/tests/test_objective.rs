mod common;

use std::sync::Arc;

use approx::assert_relative_eq;
use ndarray::{Array1, Array2};

use deblur_core::error::DeblurError;
use deblur_core::frame::flatten;
use deblur_core::optimize::{DeblurObjective, Objective, Regularization};
use deblur_core::psf::{gaussian_kernel, BlurOperator};

use common::{frobenius_norm, random_image, synthetic_image};

fn make_objective(shape: (usize, usize), regularization: Regularization) -> DeblurObjective {
    let kernel = gaussian_kernel(3, 1.0).unwrap();
    let op = Arc::new(BlurOperator::new(&kernel, shape).unwrap());
    let observed = random_image(shape, 11);
    DeblurObjective::new(op, observed, regularization).unwrap()
}

#[test]
fn gradient_matches_finite_differences() {
    let shape = (6, 5);
    for regularization in [Regularization::None, Regularization::Tikhonov { lambda: 0.01 }] {
        let obj = make_objective(shape, regularization);
        let x = flatten(&random_image(shape, 42));
        let grad = obj.gradient(&x).unwrap();
        let h = 1e-5;

        for i in 0..x.len() {
            let mut plus = x.clone();
            plus[i] += h;
            let mut minus = x.clone();
            minus[i] -= h;
            let fd = (obj.evaluate(&plus).unwrap() - obj.evaluate(&minus).unwrap()) / (2.0 * h);
            let tol = 1e-4 * grad[i].abs().max(1.0);
            assert!(
                (fd - grad[i]).abs() <= tol,
                "{regularization}: component {i}: analytic {} vs finite difference {fd}",
                grad[i]
            );
        }
    }
}

#[test]
fn value_and_gradient_agree_with_separate_calls() {
    let obj = make_objective((8, 8), Regularization::Tikhonov { lambda: 0.05 });
    let x = flatten(&random_image((8, 8), 5));
    let (value, grad) = obj.evaluate_with_gradient(&x).unwrap();
    assert_relative_eq!(value, obj.evaluate(&x).unwrap(), max_relative = 1e-14);
    let separate = obj.gradient(&x).unwrap();
    for (a, b) in grad.iter().zip(separate.iter()) {
        assert_relative_eq!(*a, *b, max_relative = 1e-14);
    }
}

#[test]
fn objective_at_noiseless_truth_is_penalty_only() {
    let shape = (8, 10);
    let kernel = gaussian_kernel(3, 1.0).unwrap();
    let op = Arc::new(BlurOperator::new(&kernel, shape).unwrap());
    let truth = synthetic_image(shape.0, shape.1);
    let observed = op.forward(&truth).unwrap();
    let x = flatten(&truth);

    let plain = DeblurObjective::new(Arc::clone(&op), observed.clone(), Regularization::None).unwrap();
    assert!(plain.evaluate(&x).unwrap() < 1e-20);
    assert!(plain.gradient(&x).unwrap().iter().all(|g| g.abs() < 1e-12));

    let lambda = 0.01;
    let tik = DeblurObjective::new(op, observed, Regularization::Tikhonov { lambda }).unwrap();
    let norm = frobenius_norm(&truth);
    assert_relative_eq!(
        tik.evaluate(&x).unwrap(),
        0.5 * lambda * norm * norm,
        max_relative = 1e-10
    );
}

#[test]
fn tikhonov_adds_lambda_times_x_to_gradient() {
    let shape = (6, 6);
    let kernel = gaussian_kernel(3, 1.0).unwrap();
    let op = Arc::new(BlurOperator::new(&kernel, shape).unwrap());
    let observed = random_image(shape, 9);
    let lambda = 0.3;

    let plain = DeblurObjective::new(Arc::clone(&op), observed.clone(), Regularization::None).unwrap();
    let tik = DeblurObjective::new(op, observed, Regularization::Tikhonov { lambda }).unwrap();

    let x = flatten(&random_image(shape, 10));
    let diff = tik.gradient(&x).unwrap() - plain.gradient(&x).unwrap();
    for (d, xi) in diff.iter().zip(x.iter()) {
        assert_relative_eq!(*d, lambda * xi, epsilon = 1e-12);
    }
}

#[test]
fn zero_lambda_tikhonov_equals_plain() {
    assert_eq!(Regularization::Tikhonov { lambda: 0.0 }.lambda(), 0.0);
    let a = make_objective((5, 5), Regularization::None);
    let b = make_objective((5, 5), Regularization::Tikhonov { lambda: 0.0 });
    let x = Array1::ones(25);
    assert_eq!(a.evaluate(&x).unwrap(), b.evaluate(&x).unwrap());
}

#[test]
fn dimension_is_pixel_count() {
    let obj = make_objective((4, 7), Regularization::default());
    assert_eq!(obj.dimension(), 28);
    assert_eq!(obj.lambda(), 0.01);
}

#[test]
fn wrong_length_rejected() {
    let obj = make_objective((4, 4), Regularization::None);
    let x = Array1::<f64>::zeros(15);
    assert!(matches!(
        obj.evaluate(&x),
        Err(DeblurError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        obj.gradient(&x),
        Err(DeblurError::DimensionMismatch { .. })
    ));
}

#[test]
fn observed_shape_must_match_operator() {
    let kernel = gaussian_kernel(3, 1.0).unwrap();
    let op = Arc::new(BlurOperator::new(&kernel, (4, 4)).unwrap());
    let observed = Array2::<f64>::zeros((4, 5));
    assert!(matches!(
        DeblurObjective::new(op, observed, Regularization::None),
        Err(DeblurError::DimensionMismatch { .. })
    ));
}

#[test]
fn negative_lambda_rejected() {
    let kernel = gaussian_kernel(3, 1.0).unwrap();
    let op = Arc::new(BlurOperator::new(&kernel, (4, 4)).unwrap());
    let observed = Array2::<f64>::zeros((4, 4));
    assert!(matches!(
        DeblurObjective::new(op, observed, Regularization::Tikhonov { lambda: -0.1 }),
        Err(DeblurError::Configuration(_))
    ));
}

#[test]
fn evaluation_does_not_mutate_observed() {
    let obj = make_objective((5, 5), Regularization::default());
    let before = obj.observed().clone();
    let x = Array1::from_elem(25, 0.3);
    obj.evaluate(&x).unwrap();
    obj.gradient(&x).unwrap();
    assert_eq!(&before, obj.observed());
}
