/*!
This library provides the surrogate models used by optbox to guide the search.

A surrogate approximates the mapping from samples to outcomes. Any regression model
implementing the [`Regressor`] capability trait (`fit(x, y)` and `predict(x, return_std)`
on numeric matrices) can be plugged into a [`Surrogate`], the adapter which vectorizes
heterogeneous samples before delegating to the model.

Acquisition functions require an estimation of the uncertainty: they query surrogates through
the [`UncertainPredictor`] trait and get a [`SurrogateError::UnsupportedUncertainty`]
error when the wrapped model does not provide standard deviations.

The default model is [`Kriging`], an ordinary kriging with a constant mean and a squared
exponential correlation whose parameter is chosen by maximizing the likelihood.

Example:
```
use optbox_sample::Sample;
use optbox_surrogate::{Surrogate, UncertainPredictor};

let xs: Vec<Sample> = [-1., -0.5, 0., 0.5, 1.].into_iter().map(Sample::from).collect();
let ys: Vec<f64> = [-1., -0.5, 0., 0.5, 1.].iter().map(|x| x * x - 2.).collect();

let mut surrogate = Surrogate::default();
surrogate.fit(&xs, &ys).expect("Surrogate fitted");

let (mean, std) = surrogate
    .predict_valstd(&[Sample::from(0.25), Sample::from(3.)])
    .expect("Surrogate prediction");
assert_eq!(mean.len(), 2);
assert!(std[1] > std[0]);
```
*/
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod adapter;
mod errors;
mod kriging;
mod surrogates;
mod utils;

pub use adapter::*;
pub use errors::*;
pub use kriging::*;
pub use surrogates::*;
