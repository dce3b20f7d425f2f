use crate::errors::{OptError, Result};
use crate::hyperband::HyperbandParams;
use crate::utils::{argsort, check_sampler, init_logger, nan_last_cmp};
use linfa::ParamGuard;
use log::{debug, info};
use optbox_sample::{rng_from_seed, Sample, Sampler};

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// A trait for evaluators of a batch of (budget, candidate) pairs.
///
/// One measured value (lower is better) is expected per pair, in the same order.
/// The returned values are consumed in one pass.
/// Any closure `FnMut(&[(f64, Sample)]) -> I` where `I: IntoIterator<Item = f64>` is an evaluator.
pub trait BatchEvaluator {
    /// Values returned by an evaluation
    type Output: IntoIterator<Item = f64>;

    /// Evaluate each candidate with its allocated budget
    fn evaluate(&mut self, batch: &[(f64, Sample)]) -> Self::Output;
}

impl<F, I> BatchEvaluator for F
where
    F: FnMut(&[(f64, Sample)]) -> I,
    I: IntoIterator<Item = f64>,
{
    type Output = I;

    fn evaluate(&mut self, batch: &[(f64, Sample)]) -> I {
        self(batch)
    }
}

/// Trials run by [`hyperband()`] in evaluation order
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct Trials {
    /// Evaluated (budget, candidate) pairs
    pub inputs: Vec<(f64, Sample)>,
    /// Measured values, `outputs[i]` is the value of `inputs[i]`
    pub outputs: Vec<f64>,
}

impl Trials {
    /// Number of trials
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Whether no trial was run
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Trial with the lowest value, the first one on ties. NaN values are ignored.
    pub fn best(&self) -> Option<(&(f64, Sample), f64)> {
        self.outputs
            .iter()
            .enumerate()
            .filter(|(_, y)| !y.is_nan())
            .min_by(|(i, a), (j, b)| nan_last_cmp(a, b).then(i.cmp(j)))
            .map(|(i, &y)| (&self.inputs[i], y))
    }
}

/// Run hyperband: for each bracket from the most exploratory one, `n` candidates drawn from
/// `sampler` are evaluated with budget `r`, then only the best `1 / eta` of them
/// are evaluated again with a budget multiplied by `eta`, until the maximum budget is reached.
///
/// `evaluator` is called once per round with the whole current population.
/// Fails with [`OptError::BatchLengthMismatch`] when it does not return one value per candidate.
///
/// ```
/// use ndarray_rand::rand::Rng;
/// use optbox_opt::{hyperband, HyperbandParams};
/// use optbox_sample::{Sample, SearchSpace};
///
/// let space = SearchSpace::new()
///     .int("max_depth", 1, 10)
///     .float("learning_rate", 0., 1.);
/// // the more budget, the closer to the true loss
/// let evaluator = |batch: &[(f64, Sample)]| {
///     batch
///         .iter()
///         .map(|(budget, x)| {
///             let lr = x.get("learning_rate").and_then(Sample::as_scalar).unwrap();
///             (lr - 0.1).abs() + 1. / budget
///         })
///         .collect::<Vec<_>>()
/// };
/// let trials = hyperband(&space, evaluator, HyperbandParams::new(), Some(42))
///     .expect("hyperband run");
/// assert_eq!(trials.len(), 206);
/// let ((budget, _), value) = trials.best().unwrap();
/// assert!(value < 0.2 && *budget > 1.);
/// ```
pub fn hyperband<S, E>(
    sampler: &S,
    mut evaluator: E,
    params: HyperbandParams,
    seed: Option<u64>,
) -> Result<Trials>
where
    S: Sampler + ?Sized,
    E: BatchEvaluator,
{
    init_logger();
    check_sampler(sampler)?;
    let params = params.check()?;
    let mut rng = rng_from_seed(seed);
    let eta = params.eta();

    let mut trials = Trials::default();
    for bracket in params.schedule() {
        info!(
            "Hyperband bracket s={}: {} candidates with budget {}",
            bracket.s, bracket.n, bracket.r
        );
        let mut population = sampler.sample_n(&mut rng, bracket.n);
        for i in 0..=bracket.s {
            if population.is_empty() {
                break;
            }
            let r_i = bracket.r * eta.powi(i as i32);
            let batch: Vec<(f64, Sample)> = population.into_iter().map(|x| (r_i, x)).collect();
            let values: Vec<f64> = evaluator.evaluate(&batch).into_iter().collect();
            if values.len() != batch.len() {
                return Err(OptError::BatchLengthMismatch {
                    expected: batch.len(),
                    got: values.len(),
                });
            }

            let n_keep = (batch.len() as f64 / eta).floor() as usize;
            debug!(
                "Hyperband round {i}: {} candidates evaluated with budget {r_i}, {n_keep} kept",
                batch.len()
            );
            population = argsort(&values)
                .into_iter()
                .take(n_keep)
                .map(|k| batch[k].1.clone())
                .collect();
            trials.inputs.extend(batch);
            trials.outputs.extend(values);
        }
    }
    info!("Hyperband done: {} trials", trials.len());
    Ok(trials)
}
