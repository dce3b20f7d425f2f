use optbox_sample::SampleError;
use thiserror::Error;

/// A result type for surrogate modeling
pub type Result<T> = std::result::Result<T, SurrogateError>;

/// An error when fitting or predicting with a surrogate
#[derive(Error, Debug)]
pub enum SurrogateError {
    /// When uncertainty is requested from a model that cannot estimate it
    #[error("Unsupported uncertainty: model `{0}` cannot predict standard deviations")]
    UnsupportedUncertainty(String),
    /// When prediction is requested before any fit
    #[error("Surrogate not fitted")]
    NotFitted,
    /// When an invalid value is encountered
    #[error("InvalidValue error: {0}")]
    InvalidValue(String),
    /// When linear algebra computation fails
    #[error(transparent)]
    LinalgError(#[from] linfa_linalg::LinalgError),
    /// When a linfa error occurs
    #[error(transparent)]
    LinfaError(#[from] linfa::error::Error),
    /// When samples cannot be vectorized
    #[error(transparent)]
    SampleError(#[from] SampleError),
}
