/*!
This library implements the sample data model used by optbox optimizers: heterogeneous
samples, the samplers drawing them and their vectorization into numeric matrices.

A [`Sample`] is one point of a search space, either a scalar, a sequence or a (nested)
record. Samples are drawn by a [`Sampler`] given a random generator, any closure
taking a `&mut Xoshiro256Plus` and returning something convertible into a `Sample`
is a sampler. Two declarative samplers are provided:
* [`SearchSpace`]: named float, log-float, integer and choice dimensions drawn as a record,
* [`Uniform`]: uniform draws within a box specified as a `(nx, 2)` matrix of bounds.

Models require fixed-width numeric inputs, [`vectorize`] turns a batch of samples
into a `(n_samples, n_features)` matrix where missing features are NaN.

Example:
```
use optbox_sample::{rng_from_seed, vectorize, Sampler, SearchSpace};

let space = SearchSpace::new()
    .int("max_depth", 1, 10)
    .float("learning_rate", 0., 1.);
let mut rng = rng_from_seed(Some(42));
let batch = space.sample_n(&mut rng, 5);

let x = vectorize(&batch).expect("homogeneous batch");
// columns are sorted by feature name: learning_rate, max_depth
assert_eq!(x.dim(), (5, 2));
```
*/
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod errors;
mod sample;
mod sampler;
mod space;
mod uniform;
mod vectorize;

pub use errors::*;
pub use sample::*;
pub use sampler::*;
pub use space::*;
pub use uniform::*;
pub use vectorize::{
    batch_shape_class, flatten, is_varying_length, vectorize, vectorize_features, Columns,
    FeatureMatrix, MISSING,
};
