use crate::errors::Result;
use crate::Sample;
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

/// A source of candidate samples.
///
/// Samplers are expected to be deterministic given the state of the random
/// generator they are handed, so that seeded optimizations are reproducible.
/// Any closure `Fn(&mut Xoshiro256Plus) -> S` where `S: Into<Sample>` is a sampler.
///
/// ```
/// use ndarray_rand::rand::{Rng, SeedableRng};
/// use optbox_sample::{Sample, Sampler};
/// use rand_xoshiro::Xoshiro256Plus;
///
/// let unif = |rng: &mut Xoshiro256Plus| rng.gen_range(-1.0..1.0);
/// let mut rng = Xoshiro256Plus::seed_from_u64(42);
/// let x = unif.sample(&mut rng);
/// assert!(matches!(x, Sample::Scalar(v) if (-1.0..1.0).contains(&v)));
/// ```
pub trait Sampler {
    /// Draw one sample using the given random generator
    fn sample(&self, rng: &mut Xoshiro256Plus) -> Sample;

    /// Validate the sampler before any draw.
    ///
    /// Optimizers call it at construction and reject the sampler with
    /// [`SampleError::InvalidSampler`](crate::SampleError::InvalidSampler) on failure.
    fn check(&self) -> Result<()> {
        Ok(())
    }

    /// Draw `n` samples in sequence
    fn sample_n(&self, rng: &mut Xoshiro256Plus, n: usize) -> Vec<Sample> {
        (0..n).map(|_| self.sample(rng)).collect()
    }
}

impl<F, S> Sampler for F
where
    F: Fn(&mut Xoshiro256Plus) -> S,
    S: Into<Sample>,
{
    fn sample(&self, rng: &mut Xoshiro256Plus) -> Sample {
        self(rng).into()
    }
}

/// Random generator seeded from `seed` when given, from system entropy otherwise
pub fn rng_from_seed(seed: Option<u64>) -> Xoshiro256Plus {
    match seed {
        Some(seed) => Xoshiro256Plus::seed_from_u64(seed),
        None => Xoshiro256Plus::from_entropy(),
    }
}
