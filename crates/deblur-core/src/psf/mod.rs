pub mod fft;
pub mod kernel;
pub mod operator;

pub use kernel::gaussian_kernel;
pub use operator::BlurOperator;
