use crate::ShapeClass;
use thiserror::Error;

/// A result type for sampling and vectorization
pub type Result<T> = std::result::Result<T, SampleError>;

/// An error when drawing or vectorizing samples
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SampleError {
    /// When a sampler cannot produce valid samples
    #[error("Invalid sampler: {0}")]
    InvalidSampler(String),
    /// When a batch mixes samples of different shape classes
    #[error("Mixed shapes: expected {expected} samples, found {found} at index {index}")]
    MixedShapes {
        /// Shape class of the first sample of the batch
        expected: ShapeClass,
        /// Offending shape class
        found: ShapeClass,
        /// Index of the offending sample in the batch
        index: usize,
    },
}
