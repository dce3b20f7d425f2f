//! Bandit optimizer: a surrogate of the objective function scores a pool of
//! freshly drawn candidates with an acquisition function and the best one is suggested.
mod bandit_config;
mod bandit_solver;

pub use bandit_config::*;
pub use bandit_solver::*;
