//! Acquisition functions scoring candidates for the [`Bandit`](crate::Bandit) optimizer
mod ucb;

pub use ucb::{UcbMaximize, UcbMinimize, UCB_KAPPA, UCB_MAX, UCB_MIN};

use crate::errors::Result;
use dyn_clonable::*;
use ndarray::{Array1, Zip};
use optbox_sample::Sample;
use optbox_surrogate::UncertainPredictor;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// A trait for acquisition functions which maximum over a pool of
/// candidates determines the next sample to evaluate.
///
/// Acquisition functions balance exploitation (predicted value) and exploration
/// (predicted uncertainty) of the surrogate of the objective function.
#[clonable]
pub trait AcquisitionFunction: Clone + Sync + Send {
    /// Name of the acquisition function
    fn name(&self) -> &'static str;

    /// Score given the predicted mean and standard deviation at one point
    fn value(&self, mean: f64, std: f64) -> f64;

    /// Scores of the candidates `x` with regards to the surrogate `model`.
    ///
    /// Fails with [`SurrogateError::UnsupportedUncertainty`](optbox_surrogate::SurrogateError::UnsupportedUncertainty)
    /// when the model does not estimate its uncertainty.
    fn scores(&self, model: &dyn UncertainPredictor, x: &[Sample]) -> Result<Array1<f64>> {
        let (mean, std) = model.predict_valstd(x)?;
        Ok(Zip::from(&mean)
            .and(&std)
            .map_collect(|&m, &s| self.value(m, s)))
    }
}

impl std::fmt::Debug for dyn AcquisitionFunction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Acquisition strategies available as configuration shorthands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub enum AcquisitionStrategy {
    /// Upper confidence bound of outcomes to be maximized, see [`UcbMaximize`]
    #[default]
    UcbMaximize,
    /// Upper confidence bound of outcomes to be minimized, see [`UcbMinimize`]
    UcbMinimize,
}

impl AcquisitionStrategy {
    /// Acquisition function with default exploration coefficient
    pub fn acquisition(&self) -> Box<dyn AcquisitionFunction> {
        match self {
            AcquisitionStrategy::UcbMaximize => Box::new(UCB_MAX),
            AcquisitionStrategy::UcbMinimize => Box::new(UCB_MIN),
        }
    }
}
