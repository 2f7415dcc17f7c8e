use crate::error::{Result, SigmaError};

/// シグマ点のパラメータ
///
/// α: シグマ点のばらつき (0 < α ≤ 1, 通常 1e-3)
/// β: ガウス分布ならば 2.0
/// κ: 3 - n とする
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MerweParams {
    pub alpha: f64,
    pub beta: f64,
    pub kappa: f64,
}

impl MerweParams {
    pub const DEFAULT_ALPHA: f64 = 1e-3;
    pub const DEFAULT_BETA: f64 = 2.0;

    pub fn new(alpha: f64, beta: f64, kappa: f64) -> Self {
        Self { alpha, beta, kappa }
    }

    pub fn for_dimension(n: usize) -> Self {
        Self {
            alpha: Self::DEFAULT_ALPHA,
            beta: Self::DEFAULT_BETA,
            kappa: 3.0 - n as f64,
        }
    }

    // λ = α^2 * (n + κ) - n
    pub fn lambda(&self, n: usize) -> f64 {
        let n = n as f64;
        self.alpha * self.alpha * (n + self.kappa) - n
    }

    /// 平方根をとる前に共分散に掛ける係数 n + λ
    pub fn spread(&self, n: usize) -> f64 {
        n as f64 + self.lambda(n)
    }

    pub fn validate(&self, n: usize) -> Result<()> {
        if n < 1 {
            return Err(SigmaError::InvalidParameter(
                "dimension must be at least 1".to_string(),
            ));
        }
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta), ("kappa", self.kappa)] {
            if !value.is_finite() {
                return Err(SigmaError::InvalidParameter(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        let spread = self.spread(n);
        if spread <= 0.0 {
            return Err(SigmaError::InvalidParameter(format!(
                "n + lambda must be positive, got {} (n = {}, alpha = {}, kappa = {})",
                spread, n, self.alpha, self.kappa
            )));
        }
        Ok(())
    }
}
