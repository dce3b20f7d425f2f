//! This library implements sequential optimizers of expensive black-box functions
//! driven through an ask-and-tell interface:
//!
//! * [`RandomSearch`]: suggestions are independent draws of a sampler,
//! * [`Bandit`]: suggestions maximize an acquisition function computed by a surrogate
//!   of the objective over a pool of candidates drawn from the sampler,
//! * [`hyperband()`]: successive halving of random candidates with increasing budgets.
//!
//! Optimizers implement the [`Optimizer`] trait: the caller asks for a sample with
//! `suggest()`, evaluates it and tells the outcome with `update()`. Evaluations are stored
//! in a [`History`] whose inputs share one shape class (scalars, sequences or records,
//! see [`optbox_sample::Sample`]) and whose outcomes are numbers.
//!
//! ```
//! use optbox_opt::{AcquisitionStrategy, BanditBuilder, Direction, Optimizer};
//! use optbox_sample::{Sample, SearchSpace};
//!
//! // Branin function: global minimum 0.397887
//! fn branin(x: f64, y: f64) -> f64 {
//!     let pi = std::f64::consts::PI;
//!     let a = y - 5.1 / (4. * pi * pi) * x * x + 5. / pi * x - 6.;
//!     a * a + 10. * (1. - 1. / (8. * pi)) * x.cos() + 10.
//! }
//!
//! let space = SearchSpace::new().float("a", -5., 10.).float("b", 0., 15.);
//! let mut opt = BanditBuilder::optimize(space)
//!     .configure(|config| {
//!         config
//!             .acquisition_strategy(AcquisitionStrategy::UcbMinimize)
//!             .seed(42)
//!     })
//!     .build()
//!     .expect("Bandit configured");
//!
//! for _ in 0..15 {
//!     let s = opt.suggest().expect("suggestion");
//!     let a = s.get("a").and_then(Sample::as_scalar).unwrap();
//!     let b = s.get("b").and_then(Sample::as_scalar).unwrap();
//!     opt.update(s, branin(a, b)).expect("update");
//! }
//! let (x_best, y_best) = opt.history().best(Direction::Minimize).unwrap();
//! println!("Branin min found {y_best} at {x_best}");
//! ```
//!
//! Logging is done through the `log` facade, optimizers initialize an `env_logger`
//! at construction whose filter is read from the [`OPTBOX_LOG`] environment variable
//! (`info` by default).
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod criteria;

mod bandit;
mod errors;
mod history;
mod hyperband;
mod optimizer;
mod random_search;
mod utils;

pub use crate::bandit::*;
pub use crate::criteria::{AcquisitionFunction, AcquisitionStrategy, UcbMaximize, UcbMinimize};
pub use crate::errors::*;
pub use crate::history::*;
pub use crate::hyperband::*;
pub use crate::optimizer::*;
pub use crate::random_search::*;
pub use crate::utils::{argmax, argsort, OPTBOX_LOG};
