use optbox_sample::{SampleError, ShapeClass};
use optbox_surrogate::SurrogateError;
use thiserror::Error;

/// A result type for optimizer errors
pub type Result<T> = std::result::Result<T, OptError>;

/// An error for sequential optimizers
#[derive(Error, Debug)]
pub enum OptError {
    /// When configuration is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfigError(String),
    /// When the sampler is rejected at construction
    #[error("Invalid sampler: {0}")]
    InvalidSampler(String),
    /// When inputs and outputs given at update differ in length
    #[error("Length mismatch: {inputs} inputs given with {outputs} outputs")]
    LengthMismatch {
        /// number of inputs
        inputs: usize,
        /// number of outputs
        outputs: usize,
    },
    /// When an input does not share the shape class of the history
    #[error("Type incoherence: input {index} is a {found} while history holds {expected} inputs")]
    TypeIncoherence {
        /// shape class of the history
        expected: ShapeClass,
        /// shape class of the faulty input
        found: ShapeClass,
        /// index of the faulty input in the given batch
        index: usize,
    },
    /// When an outcome is not a number
    #[error("Non scalar outcome: output {index} is not a number")]
    NonScalarOutcome {
        /// index of the faulty output in the given batch
        index: usize,
    },
    /// When a batch evaluator does not return one value per evaluated candidate
    #[error("Batch length mismatch: {expected} values expected, got {got}")]
    BatchLengthMismatch {
        /// batch size
        expected: usize,
        /// number of values returned by the evaluator
        got: usize,
    },
    /// When the surrogate fails
    #[error(transparent)]
    SurrogateError(#[from] SurrogateError),
    /// When samples handling fails
    #[error(transparent)]
    SampleError(#[from] SampleError),
}
