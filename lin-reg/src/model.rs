use dense_matrix::{Matrix, MatrixError};

use crate::RegressionError;

/// How raw feature rows are expanded before fitting and before prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureMap {
    /// Prepend a bias column of ones
    Bias,
    /// Bias column followed by the powers 1..=degree of every feature
    Polynomial(u32),
}

impl FeatureMap {
    /// Expand raw feature rows into a design matrix
    pub fn transform(&self, features: &Matrix) -> Result<Matrix, MatrixError> {
        match self {
            FeatureMap::Bias => Ok(features.add_bias_ones()),
            FeatureMap::Polynomial(degree) => features.polynomialize(*degree),
        }
    }

    /// Number of design columns produced from `features` raw columns
    pub fn design_columns(&self, features: usize) -> usize {
        match self {
            FeatureMap::Bias => features + 1,
            FeatureMap::Polynomial(degree) => features * *degree as usize + 1,
        }
    }
}

/// A fitted mapping from raw feature rows to one or more outputs
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    feature_map: FeatureMap,
    /// One row per design column, one column per output
    weights: Matrix,
}

impl Model {
    /// Wraps weights fitted on designs produced by `feature_map`
    pub fn new(feature_map: FeatureMap, weights: Matrix) -> Self {
        Self {
            feature_map,
            weights,
        }
    }

    /// The expansion applied to every raw row
    pub fn feature_map(&self) -> FeatureMap {
        self.feature_map
    }

    /// The fitted weights
    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    /// Consumes the model, returning its weights
    pub fn into_weights(self) -> Matrix {
        self.weights
    }

    /// Number of outputs predicted per row
    pub fn outputs(&self) -> usize {
        self.weights.columns()
    }

    /// Transforms a raw row the same way as in training and
    /// returns one prediction per output
    pub fn predict(&self, row: &[f64]) -> Result<Vec<f64>, RegressionError> {
        let raw = Matrix::from_rows(&[row])?;
        Ok(self.predict_rows(&raw)?.into_vec())
    }

    /// Prediction of a single output model
    pub fn predict_scalar(&self, row: &[f64]) -> Result<f64, RegressionError> {
        if self.outputs() != 1 {
            return Err(RegressionError::NotScalar {
                outputs: self.outputs(),
            });
        }
        let out = self.predict(row)?;

        Ok(out[0])
    }

    /// Predictions for every row of `rows`, one column per output
    pub fn predict_rows(&self, rows: &Matrix) -> Result<Matrix, RegressionError> {
        let design = self.feature_map.transform(rows)?;
        trace!("predicting {} rows with {:?}", design.rows(), self.feature_map);

        Ok(design.multiply(&self.weights)?)
    }
}
