//! Hyperband: successive halving of randomly sampled candidates run over brackets
//! trading the number of candidates against the budget allocated to each of them.
mod algorithm;
mod parameters;

pub use algorithm::*;
pub use parameters::*;
