use na::{DMatrix, DVector};

use crate::decomposition::MatrixSqrt;
use crate::error::{Result, SigmaError};
use crate::moments::Moments;
use crate::sigma_points::SigmaPointGenerator;

fn check_weights(sigmas: &DMatrix<f64>, w: &DVector<f64>) -> Result<()> {
    if sigmas.ncols() != w.len() {
        return Err(SigmaError::vector_len(sigmas.ncols(), w.len()));
    }
    Ok(())
}

/// Σ wm_i * χ_i
pub fn weighted_mean(sigmas: &DMatrix<f64>, wm: &DVector<f64>) -> Result<DVector<f64>> {
    check_weights(sigmas, wm)?;
    Ok(sigmas * wm)
}

/// Σ wc_i * (χ_i - x)(χ_i - x)^T
pub fn weighted_covariance(
    sigmas: &DMatrix<f64>,
    x: &DVector<f64>,
    wc: &DVector<f64>,
) -> Result<DMatrix<f64>> {
    check_weights(sigmas, wc)?;
    if x.len() != sigmas.nrows() {
        return Err(SigmaError::vector_len(sigmas.nrows(), x.len()));
    }
    let s = sigmas.nrows();
    let mut p = DMatrix::zeros(s, s);
    for (i, col) in sigmas.column_iter().enumerate() {
        let y = col - x;
        p += wc[i] * &y * y.transpose();
    }
    Ok(p)
}

/// シグマ点から平均と共分散を復元 (ノイズがあれば加算)
pub fn reconstruct(
    sigmas: &DMatrix<f64>,
    wm: &DVector<f64>,
    wc: &DVector<f64>,
    noise: Option<&DMatrix<f64>>,
) -> Result<Moments> {
    let x = weighted_mean(sigmas, wm)?;
    let mut p = weighted_covariance(sigmas, &x, wc)?;
    if let Some(q) = noise {
        if q.shape() != p.shape() {
            return Err(SigmaError::matrix_shape(p.shape(), q.shape()));
        }
        p += q;
    }
    Moments::new(x, p)
}

/// シグマ点を `f` で写して平均と共分散を復元する。
/// `f` は次元を変えてよいが、全ての点で同じ長さを返すこと
pub fn unscented_transform<B, F>(
    gen: &SigmaPointGenerator<B>,
    moments: &Moments,
    f: F,
    noise: Option<&DMatrix<f64>>,
) -> Result<Moments>
where
    B: MatrixSqrt,
    F: Fn(&DVector<f64>) -> DVector<f64>,
{
    let sigmas = gen.sigma_points_of(moments)?;
    let mapped: Vec<DVector<f64>> = sigmas
        .column_iter()
        .map(|col| f(&col.into_owned()))
        .collect();

    let out = mapped[0].len();
    if let Some(bad) = mapped.iter().find(|y| y.len() != out) {
        return Err(SigmaError::vector_len(out, bad.len()));
    }
    let sigmas_f = DMatrix::from_columns(&mapped);
    reconstruct(
        &sigmas_f,
        gen.mean_weights(),
        gen.covariance_weights(),
        noise,
    )
}
