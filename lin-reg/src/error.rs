use dense_matrix::MatrixError;
use thiserror::Error;

/// Failures while fitting or evaluating a regression
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegressionError {
    /// Features and labels disagree in their number of rows
    #[error("features have {features} rows but labels have {labels}")]
    DimensionMismatch {
        /// Rows of the feature matrix
        features: usize,
        /// Rows of the label matrix
        labels: usize,
    },

    /// The regularized normal equations could not be inverted
    #[error("regularized normal equations are singular at pivot {pivot}")]
    SingularSystem {
        /// Diagonal index where elimination stopped
        pivot: usize,
    },

    /// Ridge coefficient must be finite and non-negative
    #[error("invalid regularization coefficient: {0}")]
    InvalidRegularization(f64),

    /// A scalar prediction was requested from a model with several outputs
    #[error("model has {outputs} outputs, expected exactly one")]
    NotScalar {
        /// Number of weight columns
        outputs: usize,
    },

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}
