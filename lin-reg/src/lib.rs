#[macro_use]
extern crate log;

use dense_matrix::Matrix;

mod error;
mod model;
mod tikhonov_regularization;

pub use error::RegressionError;
pub use model::{FeatureMap, Model};
pub use tikhonov_regularization::{TikhonovRegularization, DEFAULT_REGULARIZATION_COEFF};

/// Generic way of performing linear regression and fitting the readout matrix
pub trait LinReg: Clone {
    /// Fit a readout matrix, mapping inputs to targets
    ///
    /// # Parameters
    /// design: Expanded feature rows, the first column usually being just 1s
    /// targets: Target data having one column per output
    fn fit_readout(&self, design: &Matrix, targets: &Matrix) -> Result<Matrix, RegressionError>;
}

/// Ridge regression of `y` on `x` with a bias column and the default coefficient.
/// Returns the weight column(s), bias weight first.
pub fn lin_regression(x: &Matrix, y: &Matrix) -> Result<Matrix, RegressionError> {
    TikhonovRegularization::default().lin_regression(x, y)
}

/// Ridge regression of `y` on the polynomial expansion of `x` up to `degree`,
/// with the default coefficient
pub fn poly_regression(x: &Matrix, y: &Matrix, degree: u32) -> Result<Matrix, RegressionError> {
    TikhonovRegularization::default().poly_regression(x, y, degree)
}
