use dense_matrix::{Matrix, MatrixError};

use crate::{FeatureMap, LinReg, Model, RegressionError};

/// Ridge coefficient used by [`crate::lin_regression`] and [`crate::poly_regression`].
/// Small enough to leave well conditioned fits untouched while keeping
/// the normal equations invertible.
pub const DEFAULT_REGULARIZATION_COEFF: f64 = 1e-6;

/// Tikhonov regularization aka ridge regression
/// It is particularly useful to mitigate the problem of multicollinearity in
/// linear regression
#[derive(Debug, Clone)]
pub struct TikhonovRegularization {
    /// Ridge parameter
    pub regularization_coeff: f64,
}

impl Default for TikhonovRegularization {
    fn default() -> Self {
        Self {
            regularization_coeff: DEFAULT_REGULARIZATION_COEFF,
        }
    }
}

impl TikhonovRegularization {
    /// Expands `features` with `feature_map` and fits a model against `labels`
    pub fn fit(
        &self,
        features: &Matrix,
        labels: &Matrix,
        feature_map: FeatureMap,
    ) -> Result<Model, RegressionError> {
        check_rows(features, labels)?;
        let design = feature_map.transform(features)?;
        let weights = self.fit_readout(&design, labels)?;

        Ok(Model::new(feature_map, weights))
    }

    /// Weights of a bias-only linear fit
    pub fn lin_regression(&self, x: &Matrix, y: &Matrix) -> Result<Matrix, RegressionError> {
        Ok(self.fit(x, y, FeatureMap::Bias)?.into_weights())
    }

    /// Weights of a polynomial fit of the given degree
    pub fn poly_regression(
        &self,
        x: &Matrix,
        y: &Matrix,
        degree: u32,
    ) -> Result<Matrix, RegressionError> {
        Ok(self.fit(x, y, FeatureMap::Polynomial(degree))?.into_weights())
    }
}

impl LinReg for TikhonovRegularization {
    fn fit_readout(&self, design: &Matrix, targets: &Matrix) -> Result<Matrix, RegressionError> {
        if !self.regularization_coeff.is_finite() || self.regularization_coeff < 0.0 {
            return Err(RegressionError::InvalidRegularization(self.regularization_coeff));
        }
        check_rows(design, targets)?;
        debug!(
            "fitting {}x{} design against {} outputs, ridge {}",
            design.rows(),
            design.columns(),
            targets.columns(),
            self.regularization_coeff
        );

        let reg_m = Matrix::identity(design.columns()).scale(self.regularization_coeff)?;

        let p0 = design.t().multiply(design)?;
        let p1 = reg_m.add_elementwise(&p0)?.inverse().map_err(|e| match e {
            MatrixError::Singular { pivot } => RegressionError::SingularSystem { pivot },
            e => RegressionError::Matrix(e),
        })?;
        let p2 = design.t().multiply(targets)?;

        Ok(p1.multiply(&p2)?)
    }
}

fn check_rows(features: &Matrix, labels: &Matrix) -> Result<(), RegressionError> {
    if features.rows() != labels.rows() {
        return Err(RegressionError::DimensionMismatch {
            features: features.rows(),
            labels: labels.rows(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use nalgebra::DMatrix;
    use round::round;

    use super::*;

    fn rounded(m: Matrix, digits: i32) -> Vec<f64> {
        let mut v = m.into_vec();
        v.iter_mut().for_each(|v| *v = round(*v, digits));
        v
    }

    #[test]
    fn tikhonov_regularization() {
        if let Err(_) = pretty_env_logger::try_init() {}

        // Note the first column being just ones
        let design = Matrix::from_rows(&[
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 2.0, 1.0],
            [1.0, 3.0, 2.0],
        ])
        .unwrap();
        let targets = Matrix::from_column(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        info!("design: {}, targets: {}", design, targets);

        let regressor = TikhonovRegularization {
            regularization_coeff: 0.0,
        };
        let readout_matrix = regressor.fit_readout(&design, &targets).unwrap();
        info!("readout_matrix: {}", readout_matrix);

        assert_eq!(readout_matrix.shape(), (3, 1));
        assert_eq!(rounded(readout_matrix, 1), vec![1.0, 1.0, 0.0]);
    }

    #[test]
    fn tikhonov_regularization_shifted() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let design = Matrix::from_rows(&[
            [100.0, 0.0, 0.0],
            [100.0, 100.0, 0.0],
            [100.0, 200.0, 100.0],
            [100.0, 300.0, 200.0],
        ])
        .unwrap();
        let targets = Matrix::from_column(&[100.0, 200.0, 300.0, 400.0]).unwrap();
        info!("design: {}, targets: {}", design, targets);

        let regressor = TikhonovRegularization {
            regularization_coeff: 0.0,
        };
        let readout_matrix = regressor.fit_readout(&design, &targets).unwrap();
        info!("readout_matrix: {}", readout_matrix);

        assert_eq!(rounded(readout_matrix, 1), vec![1.0, 1.0, 0.0]);
    }

    #[test]
    fn lin_regression_recovers_slope() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let x = Matrix::from_rows(&[[1.0], [2.0], [3.0]]).unwrap();
        let y = Matrix::from_column(&[2.0, 4.0, 6.0]).unwrap();

        let w = crate::lin_regression(&x, &y).unwrap();
        info!("weights: {}", w);

        assert_eq!(w.shape(), (2, 1));
        assert!(w.get(0, 0).unwrap().abs() < 1e-4);
        assert!((w.get(1, 0).unwrap() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn poly_regression_recovers_quadratic() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let xs = [-2.0, -1.0, 0.0, 1.0, 2.0, 3.0];
        let x = Matrix::from_column(&xs).unwrap();
        let y: Vec<f64> = xs.iter().map(|x| 1.0 + 2.0 * x - 0.5 * x * x).collect();
        let y = Matrix::from_column(&y).unwrap();

        let w = crate::poly_regression(&x, &y, 2).unwrap();
        info!("weights: {}", w);

        assert_eq!(w.shape(), (3, 1));
        assert_eq!(rounded(w, 3), vec![1.0, 2.0, -0.5]);
    }

    #[test]
    fn poly_regression_degree_one_matches_linear() {
        let x = Matrix::from_rows(&[[1.0, 0.5], [2.0, -1.0], [3.0, 4.0], [5.0, 2.0]]).unwrap();
        let y = Matrix::from_column(&[1.0, 3.0, 2.0, 7.0]).unwrap();

        let lin = crate::lin_regression(&x, &y).unwrap();
        let poly = crate::poly_regression(&x, &y, 1).unwrap();
        assert!(lin.approx_eq(&poly, 1e-12));
    }

    #[test]
    fn multiple_outputs() {
        let x = Matrix::from_rows(&[[1.0], [2.0], [3.0], [4.0]]).unwrap();
        let y = Matrix::from_rows(&[[2.0, 1.0], [4.0, 1.0], [6.0, 1.0], [8.0, 1.0]]).unwrap();

        let w = crate::lin_regression(&x, &y).unwrap();
        assert_eq!(w.shape(), (2, 2));
        assert_eq!(rounded(w, 3), vec![0.0, 1.0, 2.0, 0.0]);
    }

    #[test]
    fn agrees_with_nalgebra() {
        let x = Matrix::from_rows(&[
            [298.0, 88.0, 113.0],
            [501.0, 147.0, 186.0],
            [387.0, 109.0, 142.0],
            [96.0, 172.0, 142.0],
            [67.0, 174.0, 129.0],
            [59.0, 149.0, 111.0],
            [241.0, 347.0, 301.0],
        ])
        .unwrap();
        let y = Matrix::from_column(&[178.0, 178.0, 178.0, 353.0, 353.0, 353.0, 353.0]).unwrap();
        let regressor = TikhonovRegularization {
            regularization_coeff: 1e-3,
        };

        let w = regressor.lin_regression(&x, &y).unwrap();

        let design = x.add_bias_ones();
        let d = DMatrix::from_row_slice(design.rows(), design.columns(), design.as_slice());
        let t = DMatrix::from_row_slice(y.rows(), 1, y.as_slice());
        let reg: DMatrix<f64> = DMatrix::identity(4, 4) * 1e-3;
        let expected = (d.transpose() * &d + reg).try_inverse().unwrap() * d.transpose() * t;

        for i in 0..4 {
            let (a, b) = (w.get(i, 0).unwrap(), expected[(i, 0)]);
            assert!((a - b).abs() <= 1e-6 * b.abs().max(1.0), "{} vs {}", a, b);
        }
    }

    #[test]
    fn dimension_mismatch() {
        let x = Matrix::from_rows(&[[1.0], [2.0], [3.0]]).unwrap();
        let y = Matrix::from_column(&[2.0, 4.0]).unwrap();

        assert_eq!(
            crate::lin_regression(&x, &y),
            Err(RegressionError::DimensionMismatch {
                features: 3,
                labels: 2
            })
        );
        assert!(matches!(
            crate::poly_regression(&x, &y, 3),
            Err(RegressionError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn collinear_features() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let x = Matrix::from_rows(&[[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]).unwrap();
        let y = Matrix::from_column(&[2.0, 4.0, 6.0]).unwrap();

        let unregularized = TikhonovRegularization {
            regularization_coeff: 0.0,
        };
        assert_eq!(
            unregularized.lin_regression(&x, &y),
            Err(RegressionError::SingularSystem { pivot: 2 })
        );

        // the ridge term splits the weight evenly between the duplicated columns
        let w = crate::lin_regression(&x, &y).unwrap();
        let (w1, w2) = (w.get(1, 0).unwrap(), w.get(2, 0).unwrap());
        assert!((w1 + w2 - 2.0).abs() < 1e-3);
        assert!((w1 - w2).abs() < 1e-3);
    }

    #[test]
    fn invalid_regularization() {
        let x = Matrix::from_rows(&[[1.0], [2.0]]).unwrap();
        let y = Matrix::from_column(&[1.0, 2.0]).unwrap();

        for coeff in [-1.0, f64::NAN, f64::INFINITY] {
            let regressor = TikhonovRegularization {
                regularization_coeff: coeff,
            };
            assert!(matches!(
                regressor.lin_regression(&x, &y),
                Err(RegressionError::InvalidRegularization(_))
            ));
        }
    }

    #[test]
    fn overflowing_normal_equations() {
        let x = Matrix::from_rows(&[[1e200], [2e200]]).unwrap();
        let y = Matrix::from_column(&[1.0, 2.0]).unwrap();

        assert_eq!(
            crate::lin_regression(&x, &y),
            Err(RegressionError::Matrix(MatrixError::Overflow("multiply")))
        );
    }

    #[test]
    fn invalid_degree() {
        let x = Matrix::from_rows(&[[1.0], [2.0]]).unwrap();
        let y = Matrix::from_column(&[1.0, 2.0]).unwrap();

        assert_eq!(
            crate::poly_regression(&x, &y, 0),
            Err(RegressionError::Matrix(MatrixError::InvalidDegree(0)))
        );
    }
}
