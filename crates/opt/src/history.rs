use crate::errors::{OptError, Result};
use ndarray::ArrayView1;
use ndarray_stats::QuantileExt;
use optbox_sample::{Sample, ShapeClass};

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Optimization direction used by best-so-far queries
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Lower outcomes are better
    #[default]
    Minimize,
    /// Higher outcomes are better
    Maximize,
}

/// Ordered record of the (sample, outcome) pairs evaluated by one optimizer.
///
/// Inputs and outputs always have the same length, all inputs share one shape class
/// and all outputs are numbers. Pairs are only ever appended.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct History {
    inputs: Vec<Sample>,
    outputs: Vec<f64>,
}

impl History {
    /// Empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluated samples in evaluation order
    pub fn inputs(&self) -> &[Sample] {
        &self.inputs
    }

    /// Outcomes, `outputs()[i]` is the outcome of `inputs()[i]`
    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    /// Number of evaluations
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Whether nothing was evaluated yet
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Latest evaluated sample
    pub fn last_input(&self) -> Option<&Sample> {
        self.inputs.last()
    }

    /// Shape class shared by the stored samples
    pub fn shape_class(&self) -> Option<ShapeClass> {
        self.last_input().map(Sample::shape_class)
    }

    /// Check that `xs` and `ys` can be appended to the history.
    ///
    /// Fails with [`OptError::LengthMismatch`] when lengths differ, with [`OptError::TypeIncoherence`]
    /// when the samples together with the latest stored one do not share one shape class,
    /// with [`OptError::NonScalarOutcome`] when an outcome is NaN.
    pub fn validate(&self, xs: &[Sample], ys: &[f64]) -> Result<()> {
        if xs.len() != ys.len() {
            return Err(OptError::LengthMismatch {
                inputs: xs.len(),
                outputs: ys.len(),
            });
        }
        if let Some(expected) = self.shape_class().or_else(|| xs.first().map(Sample::shape_class))
        {
            if let Some((index, x)) = xs
                .iter()
                .enumerate()
                .find(|(_, x)| x.shape_class() != expected)
            {
                return Err(OptError::TypeIncoherence {
                    expected,
                    found: x.shape_class(),
                    index,
                });
            }
        }
        if let Some(index) = ys.iter().position(|y| y.is_nan()) {
            return Err(OptError::NonScalarOutcome { index });
        }
        Ok(())
    }

    /// Append all pairs in order once validated, nothing is appended on error
    pub fn extend(&mut self, xs: &[Sample], ys: &[f64]) -> Result<()> {
        self.validate(xs, ys)?;
        self.inputs.extend_from_slice(xs);
        self.outputs.extend_from_slice(ys);
        Ok(())
    }

    /// Drop pairs appended after the first `len` ones
    pub(crate) fn truncate(&mut self, len: usize) {
        self.inputs.truncate(len);
        self.outputs.truncate(len);
    }

    /// Index of the lowest outcome, the first one on ties
    pub fn argmin(&self) -> Option<usize> {
        ArrayView1::from(&self.outputs[..]).argmin().ok()
    }

    /// Index of the highest outcome, the first one on ties
    pub fn argmax(&self) -> Option<usize> {
        ArrayView1::from(&self.outputs[..]).argmax().ok()
    }

    /// Best evaluated pair regarding `direction`
    pub fn best(&self, direction: Direction) -> Option<(&Sample, f64)> {
        let index = match direction {
            Direction::Minimize => self.argmin(),
            Direction::Maximize => self.argmax(),
        }?;
        Some((&self.inputs[index], self.outputs[index]))
    }

    /// Best outcome found so far after each evaluation
    pub fn running_best(&self, direction: Direction) -> Vec<f64> {
        self.outputs
            .iter()
            .scan(None, |best: &mut Option<f64>, &y| {
                let current = match (*best, direction) {
                    (None, _) => y,
                    (Some(b), Direction::Minimize) => b.min(y),
                    (Some(b), Direction::Maximize) => b.max(y),
                };
                *best = Some(current);
                Some(current)
            })
            .collect()
    }
}
