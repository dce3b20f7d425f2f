use crate::errors::{Result, SurrogateError};
use crate::kriging::{KrigingParams, KrigingValidParams};
use crate::surrogates::{Prediction, Regressor};
use crate::utils::{sq_distances, NormalizedData};

use linfa::prelude::{Dataset, DatasetBase, Fit};
use linfa_linalg::{cholesky::*, triangular::*};
use log::debug;
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix1, Ix2};
use rayon::prelude::*;

/// Lower bound of the process variance when computing the likelihood
const MIN_SIGMA2: f64 = 1e-12;

/// Internal parameters computed during training
/// used later on in prediction computations
#[derive(Clone, Debug)]
pub(crate) struct KrigingInnerParams {
    /// Correlation parameter
    theta: f64,
    /// Constant mean of the normalized process
    beta: f64,
    /// Weights of the correlations to training points, R^-1.(y - beta)
    gamma: Array2<f64>,
    /// Cholesky decomposition of the correlation matrix R
    r_chol: Array2<f64>,
    /// Solution of r_chol.ft = F with F the unit regression matrix
    ft: Array2<f64>,
    /// Squared norm of ft
    ft_norm2: f64,
    /// Process variance in output units
    sigma2: f64,
}

/// Ordinary kriging model: constant mean and squared exponential correlation
/// `r(x, x') = exp(-theta * |x - x'|^2)` computed on normalized data.
///
/// Missing features (NaN) are imputed to the training mean of their column.
///
/// ```
/// use linfa::prelude::{Dataset, Fit};
/// use ndarray::array;
/// use optbox_surrogate::KrigingModel;
///
/// let xt = array![[0.0], [1.0], [2.0], [3.0], [4.0]];
/// let yt = array![0.0, 1.0, 1.5, 0.9, 1.0];
/// let gp = KrigingModel::params()
///     .fit(&Dataset::new(xt, yt))
///     .expect("Kriging fitted");
/// let (y, var) = gp.predict_valvar(&array![[1.0], [3.5]]).expect("prediction");
/// assert!((y[0] - 1.0).abs() < 5e-2);
/// assert!(var[1] > var[0]);
/// ```
#[derive(Clone, Debug)]
pub struct KrigingModel {
    /// Likelihood of the trained model
    likelihood: f64,
    /// Parameters used to fit this model
    params: KrigingValidParams,
    /// Parameters computed at training
    inner_params: KrigingInnerParams,
    /// Training inputs
    xt_norm: NormalizedData,
    /// Training outputs
    yt_norm: NormalizedData,
}

impl KrigingModel {
    /// Kriging parameters
    pub fn params() -> KrigingParams {
        KrigingParams::new()
    }

    /// Optimized correlation parameter
    pub fn theta(&self) -> f64 {
        self.inner_params.theta
    }

    /// Reduced likelihood of the trained model
    pub fn likelihood(&self) -> f64 {
        self.likelihood
    }

    /// Process variance
    pub fn variance(&self) -> f64 {
        self.inner_params.sigma2
    }

    /// Parameters used at training
    pub fn parameters(&self) -> &KrigingValidParams {
        &self.params
    }

    /// Input dimension
    pub fn dim(&self) -> usize {
        self.xt_norm.ncols()
    }

    /// Predict output values at n given `x` points of nx components specified as a (n, nx) matrix.
    /// Returns n values as (n,) vector.
    pub fn predict(&self, x: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Result<Array1<f64>> {
        let xnorm = self.normalize_input(x)?;
        let corr = self.compute_correlation(&xnorm);
        Ok(self.compute_mean(&corr))
    }

    /// Predict variance values at n given `x` points of nx components specified as a (n, nx) matrix.
    /// Returns n variance values as (n,) vector.
    pub fn predict_var(&self, x: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Result<Array1<f64>> {
        let xnorm = self.normalize_input(x)?;
        let corr = self.compute_correlation(&xnorm);
        self.compute_variance(&corr)
    }

    /// Predict both output values and variances at n given `x` points of nx components
    pub fn predict_valvar(
        &self,
        x: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    ) -> Result<(Array1<f64>, Array1<f64>)> {
        let xnorm = self.normalize_input(x)?;
        let corr = self.compute_correlation(&xnorm);
        Ok((self.compute_mean(&corr), self.compute_variance(&corr)?))
    }

    fn normalize_input(&self, x: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Result<Array2<f64>> {
        if x.ncols() != self.dim() {
            return Err(SurrogateError::InvalidValue(format!(
                "Kriging trained with {} features, got {}",
                self.dim(),
                x.ncols()
            )));
        }
        Ok(self.xt_norm.normalize(x))
    }

    /// Correlations (n, n_train) between normalized `xnorm` points and training points
    fn compute_correlation(&self, xnorm: &Array2<f64>) -> Array2<f64> {
        let theta = self.inner_params.theta;
        sq_distances(xnorm, &self.xt_norm.data).mapv(|d| (-theta * d).exp())
    }

    fn compute_mean(&self, corr: &Array2<f64>) -> Array1<f64> {
        let y_ = corr.dot(&self.inner_params.gamma) + self.inner_params.beta;
        (&y_ * &self.yt_norm.std + &self.yt_norm.mean).remove_axis(Axis(1))
    }

    fn compute_variance(&self, corr: &Array2<f64>) -> Result<Array1<f64>> {
        let inner = &self.inner_params;
        let rt = inner.r_chol.solve_triangular(&corr.t(), UPLO::Lower)?;
        let u = (inner.ft.t().dot(&rt) - 1.).remove_axis(Axis(0));
        let mse = (1. - rt.mapv(|v| v * v).sum_axis(Axis(0)) + u.mapv(|v| v * v) / inner.ft_norm2)
            * inner.sigma2;
        // Mean Squared Error might be slightly negative depending on
        // machine precision: set to zero in that case
        Ok(mse.mapv(|v| if v < 0. { 0. } else { v }))
    }
}

impl<D: Data<Elem = f64>> Fit<ArrayBase<D, Ix2>, ArrayBase<D, Ix1>, SurrogateError>
    for KrigingValidParams
{
    type Object = KrigingModel;

    /// Fit Kriging parameters using maximum likelihood
    fn fit(
        &self,
        dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<D, Ix1>>,
    ) -> Result<Self::Object> {
        let x = dataset.records();
        let y = dataset.targets().to_owned().insert_axis(Axis(1));
        if x.nrows() == 0 {
            return Err(SurrogateError::InvalidValue(
                "Kriging cannot be trained without data".to_string(),
            ));
        }
        if x.nrows() != y.nrows() {
            return Err(SurrogateError::InvalidValue(format!(
                "{} training inputs given with {} outputs",
                x.nrows(),
                y.nrows()
            )));
        }
        if y.iter().any(|v| !v.is_finite()) {
            return Err(SurrogateError::InvalidValue(
                "Kriging training outputs should be finite".to_string(),
            ));
        }

        let xtrain = NormalizedData::new(x);
        let ytrain = NormalizedData::new(&y);
        let sq_dists = sq_distances(&xtrain.data, &xtrain.data);

        let results: Vec<_> = self
            .theta_grid()
            .into_par_iter()
            .map(|theta| reduced_likelihood(theta, &sq_dists, &ytrain, self.nugget))
            .collect();

        let mut best: Option<(f64, KrigingInnerParams)> = None;
        let mut failure = None;
        for res in results {
            match res {
                Ok((lkh, inner)) => {
                    if best.as_ref().map_or(true, |(best_lkh, _)| lkh > *best_lkh) {
                        best = Some((lkh, inner));
                    }
                }
                Err(err) => failure = Some(err),
            }
        }
        let (likelihood, inner_params) = match best {
            Some(best) => best,
            None => {
                return Err(failure.unwrap_or_else(|| {
                    SurrogateError::InvalidValue("no theta value to try".to_string())
                }))
            }
        };
        debug!(
            "Kriging fitted on {} points: theta = {}, likelihood = {}",
            x.nrows(),
            inner_params.theta,
            likelihood
        );

        Ok(KrigingModel {
            likelihood,
            params: self.clone(),
            inner_params,
            xt_norm: xtrain,
            yt_norm: ytrain,
        })
    }
}

/// Compute reduced likelihood function
/// theta: correlation parameter
/// sq_dists: squared distances between normalized training inputs
/// ytrain: normalized training outputs
/// nugget: factor to improve numerical stability
fn reduced_likelihood(
    theta: f64,
    sq_dists: &Array2<f64>,
    ytrain: &NormalizedData,
    nugget: f64,
) -> Result<(f64, KrigingInnerParams)> {
    let n_obs = sq_dists.nrows() as f64;

    // Set up R
    let mut r_mx = sq_dists.mapv(|d| (-theta * d).exp());
    r_mx.diag_mut().mapv_inplace(|v| v + nugget);
    // R cholesky decomposition
    let r_chol = r_mx.cholesky()?;

    // Solve generalized least squared problem with a constant regression
    let ft = r_chol.solve_triangular(&Array2::<f64>::ones((sq_dists.nrows(), 1)), UPLO::Lower)?;
    let yt = r_chol.solve_triangular(&ytrain.data, UPLO::Lower)?;
    let ft_norm2 = ft.t().dot(&ft)[[0, 0]];
    let beta = ft.t().dot(&yt)[[0, 0]] / ft_norm2;
    let rho = yt - &ft * beta;
    let sigma2 = rho.mapv(|v| v * v).sum() / n_obs;

    let gamma = r_chol.t().solve_triangular(&rho, UPLO::Upper)?;

    // The determinant of R is equal to the squared product of
    // the diagonal elements of its Cholesky decomposition r_chol
    let logdet = r_chol.diag().mapv(f64::ln).sum() * 2.;
    let reduced_likelihood = -(n_obs * sigma2.max(MIN_SIGMA2).ln() + logdet);

    let ystd = ytrain.std[0];
    Ok((
        reduced_likelihood,
        KrigingInnerParams {
            theta,
            beta,
            gamma,
            r_chol,
            ft,
            ft_norm2,
            sigma2: sigma2 * ystd * ystd,
        },
    ))
}

/// Kriging regressor, the default model of optbox surrogates.
///
/// It holds validated parameters and the model fitted by the last [`Regressor::fit`] call.
#[derive(Clone, Debug, Default)]
pub struct Kriging {
    params: KrigingValidParams,
    model: Option<KrigingModel>,
}

impl Kriging {
    /// Constructor given validated parameters
    pub fn new(params: KrigingValidParams) -> Self {
        Kriging {
            params,
            model: None,
        }
    }

    /// Kriging parameters
    pub fn params() -> KrigingParams {
        KrigingParams::new()
    }

    /// Model fitted by the last training if any
    pub fn model(&self) -> Option<&KrigingModel> {
        self.model.as_ref()
    }
}

impl Regressor for Kriging {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        let model = self
            .params
            .fit(&Dataset::new(x.to_owned(), y.to_owned()))?;
        self.model = Some(model);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>, return_std: bool) -> Result<Prediction> {
        let model = self.model.as_ref().ok_or(SurrogateError::NotFitted)?;
        if return_std {
            let (mean, var) = model.predict_valvar(x)?;
            Ok(Prediction::with_std(mean, var.mapv(f64::sqrt)))
        } else {
            Ok(Prediction::mean_only(model.predict(x)?))
        }
    }

    fn name(&self) -> String {
        "Kriging".to_string()
    }
}
