use crate::errors::{OptError, Result};
use linfa::ParamGuard;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Default maximum budget allocated to one candidate
pub const HYPERBAND_MAX_BUDGET: f64 = 81.;
/// Default downsampling rate between two successive halving rounds
pub const HYPERBAND_ETA: f64 = 3.;

/// Plan of one successive halving bracket
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct Bracket {
    /// Bracket index, the bracket runs `s + 1` rounds
    pub s: usize,
    /// Initial number of candidates
    pub n: usize,
    /// Initial budget per candidate
    pub r: f64,
}

/// A set of validated hyperband parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct HyperbandValidParams {
    /// Maximum budget allocated to one candidate
    pub(crate) max_budget: f64,
    /// Downsampling rate
    pub(crate) eta: f64,
}

impl Default for HyperbandValidParams {
    fn default() -> Self {
        HyperbandValidParams {
            max_budget: HYPERBAND_MAX_BUDGET,
            eta: HYPERBAND_ETA,
        }
    }
}

impl HyperbandValidParams {
    /// Maximum budget allocated to one candidate
    pub fn max_budget(&self) -> f64 {
        self.max_budget
    }

    /// Downsampling rate
    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// Index of the most exploratory bracket `floor(log(max_budget) / log(eta))`
    pub fn s_max(&self) -> usize {
        // absorbs rounding of exact powers of eta
        (self.max_budget.ln() / self.eta.ln() + 1e-9).floor() as usize
    }

    /// Budget of one bracket `(s_max + 1) * max_budget`
    pub fn total_budget(&self) -> f64 {
        (self.s_max() + 1) as f64 * self.max_budget
    }

    /// Brackets from `s_max` down to 0
    pub fn schedule(&self) -> Vec<Bracket> {
        let s_max = self.s_max();
        let budget = self.total_budget();
        (0..=s_max)
            .rev()
            .map(|s| Bracket {
                s,
                n: (budget / self.max_budget / (s + 1) as f64 * self.eta.powi(s as i32)).ceil()
                    as usize,
                r: self.max_budget * self.eta.powi(-(s as i32)),
            })
            .collect()
    }
}

/// The set of hyperparameters that can be specified for the execution of
/// the [hyperband algorithm](crate::hyperband()).
#[derive(Clone, Debug, Default)]
pub struct HyperbandParams(HyperbandValidParams);

impl HyperbandParams {
    /// A constructor for hyperband parameters with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum budget allocated to one candidate
    pub fn max_budget(mut self, max_budget: f64) -> Self {
        self.0.max_budget = max_budget;
        self
    }

    /// Set the downsampling rate: only `1 / eta` candidates are kept between rounds
    pub fn eta(mut self, eta: f64) -> Self {
        self.0.eta = eta;
        self
    }
}

impl ParamGuard for HyperbandParams {
    type Checked = HyperbandValidParams;
    type Error = OptError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if !(self.0.max_budget >= 1. && self.0.max_budget.is_finite()) {
            return Err(OptError::InvalidConfigError(format!(
                "max_budget should be a finite number >= 1, got {}",
                self.0.max_budget
            )));
        }
        if !(self.0.eta > 1. && self.0.eta.is_finite()) {
            return Err(OptError::InvalidConfigError(format!(
                "eta should be a finite number > 1, got {}",
                self.0.eta
            )));
        }
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_schedule() {
        let params = HyperbandParams::new().check().unwrap();
        assert_eq!(params.s_max(), 4);
        assert_abs_diff_eq!(params.total_budget(), 405.);
        let schedule = params.schedule();
        let plan: Vec<(usize, usize)> = schedule.iter().map(|b| (b.s, b.n)).collect();
        assert_eq!(plan, vec![(4, 81), (3, 34), (2, 15), (1, 8), (0, 5)]);
        for (bracket, r) in schedule.iter().zip([1., 3., 9., 27., 81.]) {
            assert_abs_diff_eq!(bracket.r, r, epsilon = 1e-9);
        }
        assert_eq!(schedule.iter().map(|b| b.n).sum::<usize>(), 143);
    }

    #[test]
    fn test_non_power_max_budget() {
        let params = HyperbandParams::new().max_budget(100.).check().unwrap();
        assert_eq!(params.s_max(), 4);
        assert_abs_diff_eq!(params.total_budget(), 500.);
        assert_abs_diff_eq!(params.schedule()[0].r, 100. / 81., epsilon = 1e-9);
    }

    #[test]
    fn test_single_bracket() {
        let params = HyperbandParams::new().max_budget(1.).check().unwrap();
        assert_eq!(params.s_max(), 0);
        assert_eq!(params.schedule(), vec![Bracket { s: 0, n: 1, r: 1. }]);
    }

    #[test]
    fn test_invalid_params() {
        assert!(HyperbandParams::new().max_budget(0.5).check().is_err());
        assert!(HyperbandParams::new().max_budget(f64::NAN).check().is_err());
        assert!(HyperbandParams::new().eta(1.).check().is_err());
        assert!(HyperbandParams::new().eta(f64::INFINITY).check().is_err());
    }
}
