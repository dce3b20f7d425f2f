use crate::errors::Result;
use crate::history::History;
use crate::optimizer::Optimizer;
use crate::utils::{check_sampler, init_logger};
use log::debug;
use optbox_sample::{rng_from_seed, Sample, Sampler};
use rand_xoshiro::Xoshiro256Plus;

/// Optimizer suggesting fresh draws of its sampler, regardless of the history.
///
/// ```
/// use ndarray_rand::rand::Rng;
/// use optbox_opt::{Direction, Optimizer, RandomSearch};
/// use rand_xoshiro::Xoshiro256Plus;
///
/// let sampler = |rng: &mut Xoshiro256Plus| rng.gen_range(-1.0..1.0);
/// let mut opt = RandomSearch::new(sampler, Some(42)).expect("valid sampler");
/// for _ in 0..50 {
///     let x = opt.suggest().expect("suggestion");
///     let y = x.as_scalar().map(|v| v * v - 2.).unwrap();
///     opt.update(x, y).expect("update");
/// }
/// let (_, y_min) = opt.history().best(Direction::Minimize).unwrap();
/// assert!(y_min < -1.9);
/// ```
pub struct RandomSearch<S: Sampler> {
    sampler: S,
    rng: Xoshiro256Plus,
    history: History,
}

impl<S: Sampler> RandomSearch<S> {
    /// Constructor given a sampler and an optional random generator seed.
    ///
    /// Fails with [`OptError::InvalidSampler`](crate::OptError::InvalidSampler) when the sampler check fails.
    pub fn new(sampler: S, seed: Option<u64>) -> Result<Self> {
        init_logger();
        check_sampler(&sampler)?;
        Ok(RandomSearch {
            sampler,
            rng: rng_from_seed(seed),
            history: History::new(),
        })
    }

    /// The sampler used to draw suggestions
    pub fn sampler(&self) -> &S {
        &self.sampler
    }
}

impl<S: Sampler> Optimizer for RandomSearch<S> {
    fn suggest(&mut self) -> Result<Sample> {
        let x = self.sampler.sample(&mut self.rng);
        debug!("RandomSearch suggests {x}");
        Ok(x)
    }

    fn update_many(&mut self, xs: &[Sample], ys: &[f64]) -> Result<()> {
        self.history.extend(xs, ys)?;
        debug!("RandomSearch history: {} evaluations", self.history.len());
        Ok(())
    }

    fn history(&self) -> &History {
        &self.history
    }
}
