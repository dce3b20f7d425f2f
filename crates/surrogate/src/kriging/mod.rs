mod algorithm;
mod parameters;

pub use algorithm::*;
pub use parameters::*;
