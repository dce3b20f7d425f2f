use crate::criteria::AcquisitionFunction;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Default exploration coefficient of upper confidence bounds
pub const UCB_KAPPA: f64 = 1.96;

/// Upper confidence bound with default exploration coefficient, for maximization
pub const UCB_MAX: UcbMaximize = UcbMaximize { kappa: UCB_KAPPA };
/// Upper confidence bound with default exploration coefficient, for minimization
pub const UCB_MIN: UcbMinimize = UcbMinimize { kappa: UCB_KAPPA };

/// Upper confidence bound `mean + kappa * std`, to be used when larger outcomes are better
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct UcbMaximize {
    /// Exploration coefficient
    pub kappa: f64,
}

impl Default for UcbMaximize {
    fn default() -> Self {
        UCB_MAX
    }
}

impl UcbMaximize {
    /// Constructor given the exploration coefficient
    pub fn new(kappa: f64) -> Self {
        UcbMaximize { kappa }
    }
}

impl AcquisitionFunction for UcbMaximize {
    fn name(&self) -> &'static str {
        "UCB-max"
    }

    fn value(&self, mean: f64, std: f64) -> f64 {
        mean + self.kappa * std
    }
}

/// Upper confidence bound of the negated outcome `-(mean - kappa * std)`,
/// to be used when smaller outcomes are better
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct UcbMinimize {
    /// Exploration coefficient
    pub kappa: f64,
}

impl Default for UcbMinimize {
    fn default() -> Self {
        UCB_MIN
    }
}

impl UcbMinimize {
    /// Constructor given the exploration coefficient
    pub fn new(kappa: f64) -> Self {
        UcbMinimize { kappa }
    }
}

impl AcquisitionFunction for UcbMinimize {
    fn name(&self) -> &'static str {
        "UCB-min"
    }

    fn value(&self, mean: f64, std: f64) -> f64 {
        -(mean - self.kappa * std)
    }
}
