use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeblurError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    #[error("Line search found no sufficient decrease after {attempts} step reductions")]
    NonConvergence { attempts: usize },

    #[error("Numerical divergence: {0}")]
    NumericalDivergence(String),
}

impl DeblurError {
    /// Shape mismatch between two 2D arrays.
    pub fn shape_mismatch(expected: (usize, usize), actual: (usize, usize)) -> Self {
        Self::DimensionMismatch {
            expected: format!("{}x{}", expected.0, expected.1),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }

    /// Length mismatch for a flattened image.
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{expected} pixels"),
            actual: format!("{actual} pixels"),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeblurError>;
