use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SigmaError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("matrix square root failed: {0}")]
    Decomposition(String),

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: String, found: String },
}

impl SigmaError {
    pub(crate) fn vector_len(expected: usize, found: usize) -> Self {
        SigmaError::DimensionMismatch {
            expected: format!("vector of length {}", expected),
            found: format!("length {}", found),
        }
    }

    pub(crate) fn matrix_shape(expected: (usize, usize), found: (usize, usize)) -> Self {
        SigmaError::DimensionMismatch {
            expected: format!("{}x{} matrix", expected.0, expected.1),
            found: format!("{}x{}", found.0, found.1),
        }
    }
}

pub type Result<T> = std::result::Result<T, SigmaError>;
