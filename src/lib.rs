//! `optbox` is a toolbox for the sequential optimization of expensive, noisy,
//! black-box functions such as hyperparameter tuning. It gathers:
//!
//! * [`sample`]: the heterogeneous samples (scalars, sequences, records) exchanged with
//!   optimizers, the samplers drawing them and their vectorization into numeric matrices,
//! * [`surrogate`]: the regression models with uncertainty guiding the search,
//! * [`opt`]: the optimizers, namely random search, surrogate-guided bandit and hyperband.
//!
//! The most used items of these crates are re-exported at the root.
//!
//! ```
//! use optbox::{Direction, Optimizer, RandomSearch, Sample, SearchSpace};
//!
//! let space = SearchSpace::new().float("x", -1., 1.);
//! let mut opt = RandomSearch::new(space, Some(42)).expect("valid search space");
//! for _ in 0..10 {
//!     let s = opt.suggest().expect("suggestion");
//!     let x = s.get("x").and_then(Sample::as_scalar).unwrap();
//!     opt.update(s, x * x - 2.).expect("update");
//! }
//! let (_, y_best) = opt.history().best(Direction::Minimize).unwrap();
//! assert!(y_best >= -2.);
//! ```
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub use optbox_opt as opt;
pub use optbox_sample as sample;
pub use optbox_surrogate as surrogate;

pub use optbox_opt::{
    hyperband, AcquisitionStrategy, Bandit, BanditBuilder, BanditConfig, Direction, History,
    HyperbandParams, OptError, Optimizer, RandomSearch, Trials, UcbMaximize, UcbMinimize,
};
pub use optbox_sample::{
    rng_from_seed, vectorize, Sample, SampleError, Sampler, SearchSpace, ShapeClass, Uniform,
};
pub use optbox_surrogate::{Kriging, Regressor, Surrogate, SurrogateError};
