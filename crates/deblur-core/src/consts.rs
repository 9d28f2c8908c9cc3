/// Minimum pixel count (h*w) to run FFT row/column passes on Rayon.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Default side length of the Gaussian PSF (must be odd).
pub const DEFAULT_KERNEL_SIZE: usize = 9;

/// Default Gaussian spread. Used directly as the variance-like term in
/// `exp(-0.5 * t^2 / sigma)`.
pub const DEFAULT_SIGMA: f64 = 1.3;

/// Default standard deviation of the additive Gaussian noise.
pub const DEFAULT_NOISE_STD_DEV: f64 = 0.025;

/// Default Tikhonov regularization weight.
pub const DEFAULT_LAMBDA: f64 = 0.01;

/// Default iteration budget of the gradient-descent solver.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Iteration budget conventionally given to a library conjugate-gradient
/// solver when comparing it against the gradient-descent solver.
pub const LIBRARY_SOLVER_MAX_ITERATIONS: usize = 6;

/// Default gradient-norm tolerance for the solver.
pub const DEFAULT_ABSOLUTE_STOP: f64 = 1e-5;

/// Initial trial step of the backtracking line search.
pub const LINE_SEARCH_INITIAL_STEP: f64 = 1.1;

/// Multiplicative shrink applied to a rejected trial step.
pub const LINE_SEARCH_SHRINK: f64 = 0.5;

/// Sufficient-decrease (Armijo) constant.
pub const LINE_SEARCH_C1: f64 = 0.25;

/// Maximum number of step reductions before the line search gives up.
pub const LINE_SEARCH_MAX_SHRINKS: usize = 10;

/// Peak value of a normalized image, used as the PSNR data range.
pub const UNIT_DATA_RANGE: f64 = 1.0;
