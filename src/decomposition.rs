use na::DMatrix;

use crate::error::{Result, SigmaError};

/// シグマ点を広げるための行列平方根
///
/// `root * root^T == m` となる `root` を返すこと
pub trait MatrixSqrt: Send + Sync {
    fn sqrt(&self, m: &DMatrix<f64>) -> Result<DMatrix<f64>>;
}

/// 下三角のコレスキー因子
///
/// 入力は下三角のみ参照する。全要素ゼロの行列はゼロを返し、
/// それ以外の正定値でない行列はエラーにする (正則化はしない)
#[derive(Debug, Clone, Copy, Default)]
pub struct CholeskySqrt;

impl MatrixSqrt for CholeskySqrt {
    fn sqrt(&self, m: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        if !m.is_square() {
            return Err(SigmaError::matrix_shape(
                (m.nrows(), m.nrows()),
                (m.nrows(), m.ncols()),
            ));
        }
        // 分散ゼロは正当な半正定値
        if m.iter().all(|&x| x == 0.0) {
            return Ok(DMatrix::zeros(m.nrows(), m.ncols()));
        }
        match na::Cholesky::new(m.clone()) {
            Some(chol) => Ok(chol.unpack()),
            None => {
                log::warn!("cholesky failed on {}x{} matrix", m.nrows(), m.ncols());
                Err(SigmaError::Decomposition(format!(
                    "{}x{} matrix is not positive definite",
                    m.nrows(),
                    m.ncols()
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use na::dmatrix;

    #[test]
    fn factor_reproduces_input() {
        let m = dmatrix![4.0, 2.0, 0.4;
                         2.0, 5.0, 1.0;
                         0.4, 1.0, 3.0];
        let l = CholeskySqrt.sqrt(&m).unwrap();
        assert!((&l * l.transpose() - &m).abs().max() < 1e-12);
        // 上三角はゼロ
        assert_eq!(l[(0, 1)], 0.0);
        assert_eq!(l[(0, 2)], 0.0);
        assert_eq!(l[(1, 2)], 0.0);
    }

    #[test]
    fn zero_matrix_is_valid() {
        let l = CholeskySqrt.sqrt(&DMatrix::zeros(3, 3)).unwrap();
        assert_eq!(l, DMatrix::zeros(3, 3));
    }

    #[test]
    fn negative_variance_fails() {
        let err = CholeskySqrt.sqrt(&dmatrix![-1.0]).unwrap_err();
        assert!(matches!(err, SigmaError::Decomposition(_)));
    }

    #[test]
    fn error_message_reports_shape_only() {
        let m = DMatrix::from_diagonal_element(50, 50, -1.0);
        let err = CholeskySqrt.sqrt(&m).unwrap_err();
        assert_eq!(
            err,
            SigmaError::Decomposition("50x50 matrix is not positive definite".to_string())
        );
    }

    #[test]
    fn singular_nonzero_fails() {
        let m = dmatrix![1.0, 1.0;
                         1.0, 1.0];
        assert!(matches!(
            CholeskySqrt.sqrt(&m),
            Err(SigmaError::Decomposition(_))
        ));
    }

    #[test]
    fn nan_fails() {
        let m = dmatrix![f64::NAN];
        assert!(matches!(
            CholeskySqrt.sqrt(&m),
            Err(SigmaError::Decomposition(_))
        ));
    }

    #[test]
    fn non_square_is_dimension_mismatch() {
        let m = DMatrix::<f64>::identity(2, 3);
        assert!(matches!(
            CholeskySqrt.sqrt(&m),
            Err(SigmaError::DimensionMismatch { .. })
        ));
    }
}
