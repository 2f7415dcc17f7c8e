use na::{DMatrix, DVector};

use crate::error::{Result, SigmaError};

/// 多変量分布の平均と共分散
#[derive(Debug, Clone, PartialEq)]
pub struct Moments {
    pub mean: DVector<f64>,
    pub covariance: DMatrix<f64>,
}

impl Moments {
    pub fn new(mean: DVector<f64>, covariance: DMatrix<f64>) -> Result<Self> {
        let n = mean.len();
        if covariance.shape() != (n, n) {
            return Err(SigmaError::matrix_shape((n, n), covariance.shape()));
        }
        Ok(Self { mean, covariance })
    }

    /// 平均ゼロ
    pub fn zero_mean(covariance: DMatrix<f64>) -> Result<Self> {
        Self::new(DVector::zeros(covariance.nrows()), covariance)
    }

    pub fn dimension(&self) -> usize {
        self.mean.len()
    }

    // 1σ の幅
    pub fn std_dev(&self) -> DVector<f64> {
        self.covariance.diagonal().map(|v| v.max(0.0).sqrt())
    }
}

/// 独立な確率変数の和
impl core::ops::Add for Moments {
    type Output = Result<Self>;

    fn add(self, rhs: Self) -> Result<Self> {
        if self.dimension() != rhs.dimension() {
            return Err(SigmaError::vector_len(self.dimension(), rhs.dimension()));
        }
        if self.covariance.shape() != rhs.covariance.shape() {
            return Err(SigmaError::matrix_shape(
                self.covariance.shape(),
                rhs.covariance.shape(),
            ));
        }
        Ok(Self {
            mean: self.mean + rhs.mean,
            covariance: self.covariance + rhs.covariance,
        })
    }
}
