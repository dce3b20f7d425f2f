use crate::errors::{OptError, Result};
use crate::utils::OPTBOX_LOG;
use env_logger::{Builder, Env};
use optbox_sample::{SampleError, Sampler};
use std::cmp::Ordering;

/// Initialize logging to stdout with the filter given by [`OPTBOX_LOG`], no-op when already done
pub(crate) fn init_logger() {
    let env = Env::new().filter_or(OPTBOX_LOG, "info");
    let mut builder = Builder::from_env(env);
    let builder = builder.target(env_logger::Target::Stdout);
    builder.try_init().ok();
}

/// Validate a sampler given to an optimizer constructor
pub(crate) fn check_sampler<S: Sampler + ?Sized>(sampler: &S) -> Result<()> {
    sampler.check().map_err(|err| match err {
        SampleError::InvalidSampler(msg) => OptError::InvalidSampler(msg),
        err => OptError::SampleError(err),
    })
}

/// Order of floats where NaN values come last
pub fn nan_last_cmp(a: &f64, b: &f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.total_cmp(b),
    }
}

/// Index of the maximum value, the first one on ties. NaN values are never selected
/// unless all values are NaN. Returns `None` when `values` is empty.
pub fn argmax<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.into_iter().enumerate() {
        match best {
            Some((_, b)) if !(v > b || (b.is_nan() && !v.is_nan())) => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Indices sorting `values` in ascending order, stable and NaN last
pub fn argsort(values: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&i, &j| nan_last_cmp(&values[i], &values[j]));
    indices
}
