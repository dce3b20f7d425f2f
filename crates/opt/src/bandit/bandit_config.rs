//! Bandit optimizer configuration.
use crate::criteria::*;
use crate::errors::{OptError, Result};

/// Default number of candidates scored at each suggestion
pub const BANDIT_N_CANDIDATES: usize = 100;

/// Bandit optimizer configuration
#[derive(Clone, Debug)]
pub struct BanditConfig {
    /// Number of candidates drawn from the sampler and scored at each suggestion
    pub(crate) n_candidates: usize,
    /// Criterion to select the next sample among candidates
    pub(crate) acquisition: Box<dyn AcquisitionFunction>,
    /// A random generator seed used to get reproducible results
    pub(crate) seed: Option<u64>,
}

impl Default for BanditConfig {
    fn default() -> Self {
        BanditConfig {
            n_candidates: BANDIT_N_CANDIDATES,
            acquisition: Box::new(UCB_MAX),
            seed: None,
        }
    }
}

impl BanditConfig {
    /// Sets the number of candidates scored at each suggestion
    pub fn n_candidates(mut self, n_candidates: usize) -> Self {
        self.n_candidates = n_candidates;
        self
    }

    /// Sets the acquisition function
    pub fn acquisition(mut self, acquisition: Box<dyn AcquisitionFunction>) -> Self {
        self.acquisition = acquisition;
        self
    }

    /// Sets the acquisition function from a strategy with default parameters
    pub fn acquisition_strategy(mut self, strategy: AcquisitionStrategy) -> Self {
        self.acquisition = strategy.acquisition();
        self
    }

    /// Allows to specify a seed for random number generator to allow
    /// reproducible runs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of candidates
    pub fn get_n_candidates(&self) -> usize {
        self.n_candidates
    }

    /// Acquisition function
    pub fn get_acquisition(&self) -> &dyn AcquisitionFunction {
        self.acquisition.as_ref()
    }

    /// Random generator seed
    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    /// Check the configuration
    pub fn check(self) -> Result<Self> {
        if self.n_candidates == 0 {
            return Err(OptError::InvalidConfigError(
                "n_candidates should be greater than 0".to_string(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BanditConfig::default();
        assert_eq!(config.get_n_candidates(), 100);
        assert_eq!(config.get_acquisition().name(), "UCB-max");
        assert!(config.get_seed().is_none());
    }

    #[test]
    fn test_config() {
        let config = BanditConfig::default()
            .n_candidates(10)
            .acquisition_strategy(AcquisitionStrategy::UcbMinimize)
            .seed(42)
            .check()
            .unwrap();
        assert_eq!(config.get_n_candidates(), 10);
        assert_eq!(config.get_acquisition().name(), "UCB-min");
        assert_eq!(config.get_seed(), Some(42));
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            BanditConfig::default().n_candidates(0).check(),
            Err(OptError::InvalidConfigError(_))
        ));
    }
}
