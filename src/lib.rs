extern crate nalgebra as na;

pub mod decomposition;
pub mod error;
pub mod moments;
pub mod params;
pub mod sigma_points;
pub mod transform;

pub use decomposition::{CholeskySqrt, MatrixSqrt};
pub use error::{Result, SigmaError};
pub use moments::Moments;
pub use params::MerweParams;
pub use sigma_points::SigmaPointGenerator;
pub use transform::{reconstruct, unscented_transform, weighted_covariance, weighted_mean};
