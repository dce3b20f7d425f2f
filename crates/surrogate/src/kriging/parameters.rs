use crate::errors::{Result, SurrogateError};
use linfa::ParamGuard;

/// Default number of theta values tried during likelihood maximization
pub const KRIGING_N_THETA: usize = 10;
/// Default bounds of theta values
pub const KRIGING_THETA_BOUNDS: (f64, f64) = (1e-2, 1e1);
/// Default nugget
pub const KRIGING_NUGGET: f64 = 1e-6;

/// A set of validated Kriging parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct KrigingValidParams {
    /// Bounds (lower, upper) of the correlation length parameter
    pub(crate) theta_bounds: (f64, f64),
    /// Number of theta values of the log-spaced grid within bounds
    pub(crate) n_theta: usize,
    /// Value added to the correlation matrix diagonal, accounts for noisy outputs
    pub(crate) nugget: f64,
}

impl Default for KrigingValidParams {
    fn default() -> KrigingValidParams {
        KrigingValidParams {
            theta_bounds: KRIGING_THETA_BOUNDS,
            n_theta: KRIGING_N_THETA,
            nugget: KRIGING_NUGGET,
        }
    }
}

impl KrigingValidParams {
    /// Get theta bounds
    pub fn theta_bounds(&self) -> (f64, f64) {
        self.theta_bounds
    }

    /// Get the number of theta values tried
    pub fn n_theta(&self) -> usize {
        self.n_theta
    }

    /// Get nugget
    pub fn nugget(&self) -> f64 {
        self.nugget
    }

    /// Theta values tried, log-spaced within bounds
    pub(crate) fn theta_grid(&self) -> Vec<f64> {
        let (lb, ub) = self.theta_bounds;
        if self.n_theta == 1 || lb == ub {
            return vec![lb];
        }
        let step = (ub / lb).ln() / (self.n_theta - 1) as f64;
        (0..self.n_theta)
            .map(|k| lb * (step * k as f64).exp())
            .collect()
    }
}

#[derive(Clone, Debug, Default)]
/// The set of hyperparameters that can be specified for the execution of
/// the [Kriging algorithm](crate::KrigingModel).
pub struct KrigingParams(KrigingValidParams);

impl KrigingParams {
    /// A constructor for Kriging parameters with default values
    pub fn new() -> KrigingParams {
        Self::default()
    }

    /// A constructor for Kriging parameters from validated parameters
    pub fn new_from_valid(params: &KrigingValidParams) -> Self {
        Self(params.clone())
    }

    /// Set bounds of theta, the correlation parameter maximizing the likelihood.
    /// Equal bounds fix theta.
    pub fn theta_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.0.theta_bounds = (lower, upper);
        self
    }

    /// Set the number of theta values tried within bounds
    pub fn n_theta(mut self, n_theta: usize) -> Self {
        self.0.n_theta = n_theta;
        self
    }

    /// Set nugget.
    ///
    /// Nugget is used to improve numerical stability and to model noisy outputs
    pub fn nugget(mut self, nugget: f64) -> Self {
        self.0.nugget = nugget;
        self
    }
}

impl ParamGuard for KrigingParams {
    type Checked = KrigingValidParams;
    type Error = SurrogateError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let (lb, ub) = self.0.theta_bounds;
        if !(lb > 0. && lb <= ub && ub.is_finite()) {
            return Err(SurrogateError::InvalidValue(format!(
                "theta bounds should verify 0 < lower <= upper < inf, got ({lb}, {ub})"
            )));
        }
        if self.0.n_theta == 0 {
            return Err(SurrogateError::InvalidValue(
                "`n_theta` cannot be 0".to_string(),
            ));
        }
        if !(self.0.nugget >= 0. && self.0.nugget.is_finite()) {
            return Err(SurrogateError::InvalidValue(format!(
                "nugget should be a non negative number, got {}",
                self.0.nugget
            )));
        }
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
