use crate::bandit::BanditConfig;
use crate::errors::Result;
use crate::history::History;
use crate::optimizer::Optimizer;
use crate::utils::{argmax, check_sampler, init_logger};

use log::{debug, info};
use ndarray::Array1;
use optbox_sample::{rng_from_seed, Sample, Sampler};
use optbox_surrogate::{Kriging, Regressor, Surrogate};
use rand_xoshiro::Xoshiro256Plus;

/// Bandit optimizer builder allowing to specify the sampler of the search space
/// and the configuration.
///
/// ```
/// use ndarray_rand::rand::Rng;
/// use optbox_opt::{AcquisitionStrategy, BanditBuilder, Optimizer};
/// use rand_xoshiro::Xoshiro256Plus;
///
/// let sampler = |rng: &mut Xoshiro256Plus| rng.gen_range(-1.0..1.0);
/// let mut opt = BanditBuilder::optimize(sampler)
///     .configure(|config| {
///         config
///             .n_candidates(50)
///             .acquisition_strategy(AcquisitionStrategy::UcbMinimize)
///             .seed(42)
///     })
///     .build()
///     .expect("Bandit configured");
///
/// for _ in 0..10 {
///     let x = opt.suggest().expect("suggestion");
///     let y = x.as_scalar().map(|v| v * v - 2.).unwrap();
///     opt.update(x, y).expect("update");
/// }
/// assert_eq!(opt.history().len(), 10);
/// ```
pub struct BanditBuilder<S: Sampler> {
    sampler: S,
    config: BanditConfig,
}

impl<S: Sampler> BanditBuilder<S> {
    /// Optimization within the search space described by `sampler`
    pub fn optimize(sampler: S) -> Self {
        BanditBuilder {
            sampler,
            config: BanditConfig::default(),
        }
    }

    /// Set configuration of the optimizer
    pub fn configure<F: FnOnce(BanditConfig) -> BanditConfig>(mut self, init: F) -> Self {
        self.config = init(self.config);
        self
    }

    /// Build a Bandit optimizer using a default [`Kriging`] surrogate
    pub fn build(self) -> Result<Bandit<S>> {
        self.build_with_model(Kriging::default())
    }

    /// Build a Bandit optimizer using the given regression model as surrogate
    pub fn build_with_model<R: Regressor>(self, model: R) -> Result<Bandit<S, R>> {
        init_logger();
        check_sampler(&self.sampler)?;
        let config = self.config.check()?;
        info!("Bandit configured with {} model: {:?}", model.name(), config);
        Ok(Bandit {
            sampler: self.sampler,
            rng: rng_from_seed(config.seed),
            config,
            surrogate: Surrogate::new(model),
            history: History::new(),
        })
    }
}

/// Optimizer selecting, among candidates drawn from the sampler, the one
/// maximizing an acquisition function computed from a surrogate of the objective.
///
/// The surrogate is trained again on the whole history at each update.
/// While the history is empty, suggestions are plain draws of the sampler.
pub struct Bandit<S: Sampler, R: Regressor = Kriging> {
    sampler: S,
    config: BanditConfig,
    surrogate: Surrogate<R>,
    rng: Xoshiro256Plus,
    history: History,
}

impl<S: Sampler, R: Regressor> Bandit<S, R> {
    /// Optimizer configuration
    pub fn config(&self) -> &BanditConfig {
        &self.config
    }

    /// Surrogate of the objective function
    pub fn surrogate(&self) -> &Surrogate<R> {
        &self.surrogate
    }

    /// Acquisition scores of the given candidates with regards to the current surrogate
    pub fn scores(&self, candidates: &[Sample]) -> Result<Array1<f64>> {
        self.config.acquisition.scores(&self.surrogate, candidates)
    }
}

impl<S: Sampler, R: Regressor> Optimizer for Bandit<S, R> {
    fn suggest(&mut self) -> Result<Sample> {
        if self.history.is_empty() {
            let x = self.sampler.sample(&mut self.rng);
            debug!("Bandit suggests {x} (no evaluation yet)");
            return Ok(x);
        }
        let mut candidates = self
            .sampler
            .sample_n(&mut self.rng, self.config.n_candidates);
        let scores = self.scores(&candidates)?;
        // n_candidates > 0 is checked at build
        let best = argmax(&scores).unwrap_or(0);
        let x = candidates.swap_remove(best);
        debug!(
            "Bandit suggests {x} ({} = {})",
            self.config.acquisition.name(),
            scores[best]
        );
        Ok(x)
    }

    fn update_many(&mut self, xs: &[Sample], ys: &[f64]) -> Result<()> {
        let len = self.history.len();
        self.history.extend(xs, ys)?;
        if xs.is_empty() {
            return Ok(());
        }
        if let Err(err) = self
            .surrogate
            .fit(self.history.inputs(), self.history.outputs())
        {
            self.history.truncate(len);
            return Err(err.into());
        }
        debug!(
            "Bandit surrogate trained on {} evaluations",
            self.history.len()
        );
        Ok(())
    }

    fn history(&self) -> &History {
        &self.history
    }
}
