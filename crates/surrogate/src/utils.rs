use ndarray::{Array1, Array2, ArrayBase, ArrayView1, Data, Ix2, Zip};

/// A structure to store (n, xdim) matrix data and its mean and standard deviation vectors.
///
/// Statistics ignore NaN values which are imputed with the column mean once normalized.
#[derive(Clone, Debug)]
pub(crate) struct NormalizedData {
    /// normalized data
    pub data: Array2<f64>,
    /// mean vector computed from data
    pub mean: Array1<f64>,
    /// standard deviation vector computed from data
    pub std: Array1<f64>,
}

impl NormalizedData {
    /// Constructor
    pub fn new(x: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> NormalizedData {
        let (mean, std): (Vec<f64>, Vec<f64>) = x.columns().into_iter().map(nan_mean_std).unzip();
        let mean = Array1::from(mean);
        let std = Array1::from(std);
        let data = normalize_with(x, &mean, &std);
        NormalizedData { data, mean, std }
    }

    /// Dimension of data points
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// Normalize `x` with the statistics of the stored data
    pub fn normalize(&self, x: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Array2<f64> {
        normalize_with(x, &self.mean, &self.std)
    }
}

fn normalize_with(
    x: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    mean: &Array1<f64>,
    std: &Array1<f64>,
) -> Array2<f64> {
    let mut xnorm = (x - mean) / std;
    xnorm.mapv_inplace(|v| if v.is_nan() { 0. } else { v });
    xnorm
}

/// Mean and standard deviation (ddof = 1) of the non-NaN values of `col`.
/// A degenerate standard deviation is replaced by 1.
fn nan_mean_std(col: ArrayView1<f64>) -> (f64, f64) {
    let values: Vec<f64> = col.iter().copied().filter(|v| !v.is_nan()).collect();
    let n = values.len() as f64;
    if values.is_empty() {
        return (0., 1.);
    }
    let mean = values.iter().sum::<f64>() / n;
    if values.len() < 2 {
        return (mean, 1.);
    }
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1.);
    let std = var.sqrt();
    if std == 0. || !std.is_finite() {
        (mean, 1.)
    } else {
        (mean, std)
    }
}

/// Squared euclidean distances between rows of `a` (n, d) and rows of `b` (m, d) as a (n, m) matrix
pub(crate) fn sq_distances(
    a: &ArrayBase<impl Data<Elem = f64> + Sync, Ix2>,
    b: &ArrayBase<impl Data<Elem = f64> + Sync, Ix2>,
) -> Array2<f64> {
    let mut d = Array2::zeros((a.nrows(), b.nrows()));
    Zip::from(d.rows_mut())
        .and(a.rows())
        .par_for_each(|mut drow, ai| {
            Zip::from(&mut drow).and(b.rows()).for_each(|dij, bj| {
                *dij = ai
                    .iter()
                    .zip(bj.iter())
                    .map(|(u, v)| (u - v) * (u - v))
                    .sum()
            })
        });
    d
}
