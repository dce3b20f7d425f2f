use crate::errors::{Result, SampleError};
use crate::{Sample, Sampler};
use ndarray::{Array, Array2, ArrayBase, Data, Ix2, Zip};
use ndarray_rand::{rand_distr::Uniform as UniformDistr, RandomExt};
use rand_xoshiro::Xoshiro256Plus;

/// The Uniform sampler draws points uniformly within a box.
///
/// Points are scalars when the box is one-dimensional, sequences of `nx` values otherwise.
#[derive(Clone, Debug)]
pub struct Uniform {
    /// Sampling space definition as a (nx, 2) matrix
    /// The ith row is the [lower_bound, upper_bound] of xi, the ith component of x
    xlimits: Array2<f64>,
}

impl Uniform {
    /// Constructor given a design space given a (nx, 2) matrix \[\[lower bound, upper bound\], ...\]
    ///
    /// ```
    /// use optbox_sample::Uniform;
    /// use ndarray::arr2;
    ///
    /// let sampler = Uniform::new(&arr2(&[[0.0, 1.0], [5.0, 10.0]]));
    /// ```
    pub fn new(xlimits: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Self {
        Uniform {
            xlimits: xlimits.to_owned(),
        }
    }

    /// Sampling space
    pub fn sampling_space(&self) -> &Array2<f64> {
        &self.xlimits
    }

    fn draw(&self, rng: &mut Xoshiro256Plus) -> Vec<f64> {
        let nx = self.xlimits.nrows();
        let unit = Array::random_using(nx, UniformDistr::new(0., 1.), rng);
        let mut x = Array::zeros(nx);
        Zip::from(&mut x)
            .and(&unit)
            .and(self.xlimits.rows())
            .for_each(|xi, &u, lim| *xi = lim[0] + u * (lim[1] - lim[0]));
        x.to_vec()
    }
}

impl Sampler for Uniform {
    fn sample(&self, rng: &mut Xoshiro256Plus) -> Sample {
        let x = self.draw(rng);
        if x.len() == 1 {
            Sample::Scalar(x[0])
        } else {
            Sample::from(x)
        }
    }

    fn check(&self) -> Result<()> {
        if self.xlimits.ncols() != 2 {
            return Err(SampleError::InvalidSampler(
                "xlimits must have 2 columns (lower, upper)".to_string(),
            ));
        }
        if self.xlimits.nrows() == 0 {
            return Err(SampleError::InvalidSampler(
                "xlimits must have at least one row".to_string(),
            ));
        }
        if let Some(i) = self
            .xlimits
            .rows()
            .into_iter()
            .position(|lim| !(lim[1] - lim[0]).is_finite())
        {
            return Err(SampleError::InvalidSampler(format!(
                "xlimits row {i}: bounds should be finite with a finite width"
            )));
        }
        if let Some(i) = self
            .xlimits
            .rows()
            .into_iter()
            .position(|lim| !(lim[0] <= lim[1]))
        {
            return Err(SampleError::InvalidSampler(format!(
                "xlimits row {i}: lower bound greater than upper bound"
            )));
        }
        Ok(())
    }
}
