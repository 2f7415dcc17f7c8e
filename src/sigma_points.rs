use na::{DMatrix, DVector};

use crate::decomposition::{CholeskySqrt, MatrixSqrt};
use crate::error::{Result, SigmaError};
use crate::moments::Moments;
use crate::params::MerweParams;

/// n 次元状態のシグマ点生成器
///
/// 重みはパラメータだけで決まるので生成時に一度だけ計算する。
/// [`sigma_points`](Self::sigma_points) は毎回 `n x (2n + 1)` の行列を返す:
///
/// - 列 0: 平均
/// - 列 1..=n: 平均 + sqrt((n + λ) P) の i 列目
/// - 列 n+1..=2n: 平均 - sqrt((n + λ) P) の i 列目
pub struct SigmaPointGenerator<B: MatrixSqrt = CholeskySqrt> {
    n: usize,
    params: MerweParams,
    lambda: f64,
    wm: DVector<f64>,
    wc: DVector<f64>,
    backend: B,
}

impl SigmaPointGenerator<CholeskySqrt> {
    pub fn new(n: usize) -> Result<Self> {
        Self::with_params(n, MerweParams::for_dimension(n))
    }

    pub fn with_params(n: usize, params: MerweParams) -> Result<Self> {
        Self::with_backend(n, params, CholeskySqrt)
    }
}

impl<B: MatrixSqrt> SigmaPointGenerator<B> {
    pub fn with_backend(n: usize, params: MerweParams, backend: B) -> Result<Self> {
        params.validate(n)?;
        let lambda = params.lambda(n);
        let (wm, wc) = Self::sigma_weight(n, &params);
        log::debug!(
            "sigma point generator: n = {}, alpha = {}, beta = {}, kappa = {}, lambda = {}",
            n,
            params.alpha,
            params.beta,
            params.kappa,
            lambda
        );
        Ok(Self {
            n,
            params,
            lambda,
            wm,
            wc,
            backend,
        })
    }

    pub fn dimension(&self) -> usize {
        self.n
    }

    // シグマ点の数
    pub fn num_sigmas(&self) -> usize {
        2 * self.n + 1
    }

    pub fn params(&self) -> &MerweParams {
        &self.params
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// 平均用の重み。総和は数式上 1 だが、α が小さいと各重みが 1e6 程度になり
    /// 浮動小数点の誤差は `|wm[0]|` に比例する (α = 1e-3, n = 40 で 1e-8 程度)。
    pub fn mean_weights(&self) -> &DVector<f64> {
        &self.wm
    }

    pub fn covariance_weights(&self) -> &DVector<f64> {
        &self.wc
    }

    pub fn sigma_points(&self, x: &DVector<f64>, p: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        let n = self.n;
        if x.len() != n {
            return Err(SigmaError::vector_len(n, x.len()));
        }
        if p.shape() != (n, n) {
            return Err(SigmaError::matrix_shape((n, n), p.shape()));
        }

        let c = n as f64 + self.lambda;
        let l = self.backend.sqrt(&(p * c))?;
        if l.shape() != (n, n) {
            return Err(SigmaError::matrix_shape((n, n), l.shape()));
        }

        let mut sigma_points = DMatrix::zeros(n, self.num_sigmas());
        sigma_points.set_column(0, x);
        for i in 0..n {
            sigma_points.set_column(1 + i, &(x + l.column(i)));
            sigma_points.set_column(1 + n + i, &(x - l.column(i)));
        }
        Ok(sigma_points)
    }

    pub fn sigma_points_of(&self, moments: &Moments) -> Result<DMatrix<f64>> {
        self.sigma_points(&moments.mean, &moments.covariance)
    }

    fn sigma_weight(n: usize, params: &MerweParams) -> (DVector<f64>, DVector<f64>) {
        let lambda = params.lambda(n);
        let c = n as f64 + lambda;
        let mut wm = DVector::from_element(2 * n + 1, 1.0 / (2.0 * c));
        let mut wc = DVector::from_element(2 * n + 1, 1.0 / (2.0 * c));
        wm[0] = lambda / c;
        wc[0] = lambda / c + 1.0 - params.alpha.powi(2) + params.beta;
        (wm, wc)
    }
}
