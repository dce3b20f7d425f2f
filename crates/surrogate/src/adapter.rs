use crate::errors::{Result, SurrogateError};
use crate::kriging::Kriging;
use crate::surrogates::{Prediction, Regressor, UncertainPredictor};
use log::debug;
use ndarray::Array1;
use optbox_sample::{vectorize_features, Columns, Sample};

/// Surrogate model of a sample to outcome mapping.
///
/// The adapter vectorizes samples before handing them to the wrapped [`Regressor`]
/// and remembers the training feature columns: prediction batches are aligned onto
/// them, features unseen at training time are dropped and missing ones set to NaN.
///
/// ```
/// use optbox_sample::Sample;
/// use optbox_surrogate::Surrogate;
///
/// let xs: Vec<Sample> = (0..5).map(|i| Sample::record([("a", (i as f64).into())])).collect();
/// let ys = [0., 1., 4., 9., 16.];
///
/// let mut surrogate = Surrogate::default();
/// surrogate.fit(&xs, &ys).expect("fit");
/// let pred = surrogate.predict(&xs[1..2], true).expect("prediction");
/// assert!((pred.mean[0] - 1.).abs() < 1e-1);
/// assert!(pred.std.is_some());
/// ```
#[derive(Clone, Debug)]
pub struct Surrogate<R: Regressor = Kriging> {
    model: R,
    columns: Option<Columns>,
}

impl Default for Surrogate<Kriging> {
    fn default() -> Self {
        Surrogate::new(Kriging::default())
    }
}

impl<R: Regressor> Surrogate<R> {
    /// Wrap the given model
    pub fn new(model: R) -> Self {
        Surrogate {
            model,
            columns: None,
        }
    }

    /// The wrapped model
    pub fn model(&self) -> &R {
        &self.model
    }

    /// Feature columns seen at training, `None` before the first fit
    pub fn columns(&self) -> Option<&Columns> {
        self.columns.as_ref()
    }

    /// Whether the surrogate was fitted
    pub fn is_fitted(&self) -> bool {
        self.columns.is_some()
    }

    /// Vectorize `samples` and train the model against `outcomes`
    pub fn fit(&mut self, samples: &[Sample], outcomes: &[f64]) -> Result<()> {
        if samples.len() != outcomes.len() {
            return Err(SurrogateError::InvalidValue(format!(
                "{} samples given with {} outcomes",
                samples.len(),
                outcomes.len()
            )));
        }
        let features = vectorize_features(samples)?;
        debug!(
            "Fit {} on {:?} feature matrix",
            self.model.name(),
            features.data.dim()
        );
        let y = Array1::from(outcomes.to_vec());
        self.model.fit(&features.data, &y)?;
        self.columns = Some(features.columns);
        Ok(())
    }

    /// Vectorize `samples` onto training columns and predict, optionally with uncertainty
    pub fn predict(&self, samples: &[Sample], return_std: bool) -> Result<Prediction> {
        let columns = self.columns.as_ref().ok_or(SurrogateError::NotFitted)?;
        let x = vectorize_features(samples)?.align(columns).data;
        self.model.predict(&x, return_std)
    }
}

impl<R: Regressor> UncertainPredictor for Surrogate<R> {
    fn predict_valstd(&self, x: &[Sample]) -> Result<(Array1<f64>, Array1<f64>)> {
        let Prediction { mean, std } = self.predict(x, true)?;
        match std {
            Some(std) => Ok((mean, std)),
            None => Err(SurrogateError::UnsupportedUncertainty(self.model.name())),
        }
    }
}
