pub mod line_search;
pub mod objective;
pub mod solver;

use ndarray::Array1;

pub use line_search::{backtracking, LineSearchParams, LineSearchStep};
pub use objective::{DeblurObjective, Objective, Regularization};
pub use solver::{GradientDescent, IterationRecord, Solution, SolverConfig, SolverStatus};

/// Euclidean norm of a flat vector.
pub fn l2_norm(v: &Array1<f64>) -> f64 {
    v.dot(v).sqrt()
}
