use crate::errors::{Result, SampleError};
use crate::{Sample, Sampler};
use ndarray_rand::rand::Rng;
use rand_xoshiro::Xoshiro256Plus;
use std::collections::{BTreeMap, HashSet};

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Type of a search space dimension
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub enum Dimension {
    /// Float drawn uniformly within \[lower bound, upper bound\]
    Float(f64, f64),
    /// Positive float drawn uniformly in log-space within \[lower bound, upper bound\]
    LogFloat(f64, f64),
    /// Integer drawn uniformly within \[lower bound, upper bound\] (both included)
    Int(i64, i64),
    /// One of the given values
    Choice(Vec<f64>),
}

impl Dimension {
    fn check(&self, name: &str) -> Result<()> {
        let invalid = |msg: String| Err(SampleError::InvalidSampler(format!("`{name}`: {msg}")));
        match self {
            Dimension::Float(lb, ub) if !(ub - lb).is_finite() => {
                invalid(format!("bounds ({lb}, {ub}) should be finite with a finite width"))
            }
            Dimension::Float(lb, ub) if !(lb <= ub) => {
                invalid(format!("lower bound {lb} greater than upper bound {ub}"))
            }
            Dimension::LogFloat(lb, ub) if !(*lb > 0. && lb <= ub && ub.is_finite()) => {
                invalid(format!("log bounds should verify 0 < {lb} <= {ub} < inf"))
            }
            Dimension::Int(lb, ub) if lb > ub => {
                invalid(format!("lower bound {lb} greater than upper bound {ub}"))
            }
            Dimension::Choice(values) if values.is_empty() => invalid("no choice".to_string()),
            Dimension::Choice(values) if values.iter().any(|v| v.is_nan()) => {
                invalid("choices should be numbers".to_string())
            }
            _ => Ok(()),
        }
    }

    fn draw(&self, rng: &mut Xoshiro256Plus) -> f64 {
        match self {
            Dimension::Float(lb, ub) if lb == ub => *lb,
            Dimension::Float(lb, ub) => rng.gen_range(*lb..*ub),
            Dimension::LogFloat(lb, ub) if lb == ub => *lb,
            Dimension::LogFloat(lb, ub) => rng.gen_range(lb.ln()..ub.ln()).exp(),
            Dimension::Int(lb, ub) => rng.gen_range(*lb..=*ub) as f64,
            Dimension::Choice(values) => values[rng.gen_range(0..values.len())],
        }
    }
}

/// A declarative sampler drawing record samples from named dimensions.
///
/// ```
/// use optbox_sample::{SearchSpace, Sampler, rng_from_seed};
///
/// let space = SearchSpace::new()
///     .int("max_depth", 1, 10)
///     .float("learning_rate", 0., 1.);
/// assert!(space.check().is_ok());
///
/// let s = space.sample(&mut rng_from_seed(Some(42)));
/// let depth = s.get("max_depth").and_then(|v| v.as_scalar()).unwrap();
/// assert!((1. ..=10.).contains(&depth));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct SearchSpace {
    dims: Vec<(String, Dimension)>,
}

impl SearchSpace {
    /// Constructor of an empty space, dimensions are added with the builder methods
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dimension of given type
    pub fn dim(mut self, name: impl Into<String>, dim: Dimension) -> Self {
        self.dims.push((name.into(), dim));
        self
    }

    /// Add a continuous dimension within \[low, high\]
    pub fn float(self, name: impl Into<String>, low: f64, high: f64) -> Self {
        self.dim(name, Dimension::Float(low, high))
    }

    /// Add a continuous dimension sampled in log-space within \[low, high\]
    pub fn log_float(self, name: impl Into<String>, low: f64, high: f64) -> Self {
        self.dim(name, Dimension::LogFloat(low, high))
    }

    /// Add an integer dimension within \[low, high\]
    pub fn int(self, name: impl Into<String>, low: i64, high: i64) -> Self {
        self.dim(name, Dimension::Int(low, high))
    }

    /// Add a dimension taking one of the given values
    pub fn choice(self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.dim(name, Dimension::Choice(values))
    }

    /// Declared dimensions
    pub fn dims(&self) -> &[(String, Dimension)] {
        &self.dims
    }
}

impl Sampler for SearchSpace {
    fn sample(&self, rng: &mut Xoshiro256Plus) -> Sample {
        let fields: BTreeMap<String, Sample> = self
            .dims
            .iter()
            .map(|(name, dim)| (name.clone(), Sample::Scalar(dim.draw(rng))))
            .collect();
        Sample::Record(fields)
    }

    fn check(&self) -> Result<()> {
        if self.dims.is_empty() {
            return Err(SampleError::InvalidSampler(
                "search space has no dimension".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for (name, dim) in self.dims.iter() {
            if !seen.insert(name.as_str()) {
                return Err(SampleError::InvalidSampler(format!(
                    "dimension `{name}` declared twice"
                )));
            }
            dim.check(name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng_from_seed;

    #[test]
    fn test_search_space_sample() {
        let space = SearchSpace::new()
            .int("max_depth", 1, 10)
            .float("learning_rate", 0., 1.)
            .log_float("alpha", 1e-4, 1.)
            .choice("n_estimators", vec![10., 100., 1000.]);
        assert!(space.check().is_ok());

        let mut rng = rng_from_seed(Some(42));
        for s in space.sample_n(&mut rng, 50) {
            let depth = s.get("max_depth").and_then(Sample::as_scalar).unwrap();
            assert!((1. ..=10.).contains(&depth));
            assert_eq!(depth, depth.round());
            let lr = s.get("learning_rate").and_then(Sample::as_scalar).unwrap();
            assert!((0. ..1.).contains(&lr));
            let alpha = s.get("alpha").and_then(Sample::as_scalar).unwrap();
            assert!((1e-4..=1.).contains(&alpha));
            let n = s.get("n_estimators").and_then(Sample::as_scalar).unwrap();
            assert!([10., 100., 1000.].contains(&n));
        }
    }

    #[test]
    fn test_invalid_search_spaces() {
        let invalids = [
            SearchSpace::new(),
            SearchSpace::new().float("x", 1., 0.),
            SearchSpace::new().float("x", f64::NAN, 0.),
            SearchSpace::new().log_float("x", 0., 1.),
            SearchSpace::new().int("x", 3, 2),
            SearchSpace::new().choice("x", vec![]),
            SearchSpace::new().float("x", 0., 1.).int("x", 0, 1),
            SearchSpace::new().float("x", 0., f64::INFINITY),
            SearchSpace::new().float("x", f64::NEG_INFINITY, 0.),
            SearchSpace::new().float("x", -f64::MAX, f64::MAX),
            SearchSpace::new().log_float("x", 1., f64::INFINITY),
            SearchSpace::new().choice("x", vec![1., f64::NAN]),
        ];
        for space in invalids {
            assert!(matches!(
                space.check(),
                Err(SampleError::InvalidSampler(_))
            ));
        }
    }

    #[test]
    fn test_wide_finite_bounds() {
        let space = SearchSpace::new()
            .float("x", -f64::MAX / 2., f64::MAX / 2.)
            .log_float("y", 1e-300, 1e300);
        assert!(space.check().is_ok());
        let s = space.sample(&mut rng_from_seed(Some(42)));
        assert!(s.leaves().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_degenerate_bounds() {
        let space = SearchSpace::new().float("x", 2., 2.).int("n", 5, 5);
        let s = space.sample(&mut rng_from_seed(Some(0)));
        assert_eq!(s, Sample::record([("n", 5.into()), ("x", 2.into())]));
    }
}
