use crate::errors::Result;
use ndarray::{Array1, Array2};
use optbox_sample::Sample;

/// Output of a [`Regressor`] prediction.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    /// Predicted values as a (n,) vector
    pub mean: Array1<f64>,
    /// Predicted standard deviations as a (n,) vector, `None` when not requested
    /// or not supported by the model
    pub std: Option<Array1<f64>>,
}

impl Prediction {
    /// Prediction without uncertainty
    pub fn mean_only(mean: Array1<f64>) -> Self {
        Prediction { mean, std: None }
    }

    /// Prediction with uncertainty
    pub fn with_std(mean: Array1<f64>, std: Array1<f64>) -> Self {
        Prediction {
            mean,
            std: Some(std),
        }
    }
}

/// A trait for regression models pluggable in a [`Surrogate`](crate::Surrogate).
///
/// Models consume numeric (n, nx) matrices which may contain NaN values
/// for missing features.
pub trait Regressor {
    /// Train the model given (n, nx) inputs and (n,) outputs.
    /// Any previous training is discarded.
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()>;

    /// Predict output values at n points given as a (n, nx) matrix.
    ///
    /// When `return_std` is true, models able to estimate their uncertainty fill
    /// [`Prediction::std`], others may ignore the flag.
    fn predict(&self, x: &Array2<f64>, return_std: bool) -> Result<Prediction>;

    /// Model name used in reports
    fn name(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

/// A trait for fitted surrogates predicting means and standard deviations of samples.
///
/// Acquisition functions receive a `&dyn UncertainPredictor`.
pub trait UncertainPredictor {
    /// Predict both output values and standard deviations at given samples
    fn predict_valstd(&self, x: &[Sample]) -> Result<(Array1<f64>, Array1<f64>)>;
}
