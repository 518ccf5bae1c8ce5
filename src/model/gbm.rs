//! Gradient boosting regressor.
//!
//! Starts from the mean target and adds shallow regression trees fitted to
//! the residuals of the running prediction, each scaled by the learning
//! rate. Squared-error loss, so the negative gradient is just the residual.

use crate::model::error::ModelError;
use crate::model::tree::{DecisionTreeRegressor, FittedDecisionTree};
use crate::model::Regressor;
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};

/// Gradient boosting configuration (unfitted).
#[derive(Debug, Clone)]
pub struct GradientBoostingRegressor {
    n_estimators: usize,
    learning_rate: f64,
    max_depth: usize,
}

impl Default for GradientBoostingRegressor {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.1,
            max_depth: 3,
        }
    }
}

impl GradientBoostingRegressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Fit the boosted ensemble stage-wise on residuals.
    ///
    /// # Errors
    /// Returns [`ModelError`] if the data is empty or the target length does
    /// not match the number of rows.
    pub fn fit(&self, data: &Matrix, target: &[f64]) -> Result<FittedGradientBoosting, ModelError> {
        let rows = data.n_rows();
        if rows == 0 {
            return Err(ModelError::EmptyData);
        }
        if target.len() != rows {
            return Err(ModelError::DimensionMismatch {
                expected: rows,
                got: target.len(),
            });
        }

        let init = target.iter().sum::<f64>() / rows as f64;
        let mut current: Vec<f64> = vec![init; rows];
        let tree_config = DecisionTreeRegressor::new().with_max_depth(self.max_depth);

        let mut trees = Vec::with_capacity(self.n_estimators);
        for _ in 0..self.n_estimators {
            let residuals: Vec<f64> = target
                .iter()
                .zip(&current)
                .map(|(y, pred)| y - pred)
                .collect();

            let tree = tree_config.fit(data, &residuals)?;
            for r in 0..rows {
                current[r] += self.learning_rate * tree.predict_row(data.row(r));
            }
            trees.push(tree);
        }

        Ok(FittedGradientBoosting {
            init,
            learning_rate: self.learning_rate,
            trees,
        })
    }
}

/// Fitted gradient boosting ensemble ready for inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedGradientBoosting {
    pub init: f64,
    pub learning_rate: f64,
    pub trees: Vec<FittedDecisionTree>,
}

impl FittedGradientBoosting {
    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }
}

impl Regressor for FittedGradientBoosting {
    fn predict_row(&self, features: &[f64]) -> f64 {
        self.init
            + self.learning_rate
                * self
                    .trees
                    .iter()
                    .map(|t| t.predict_row(features))
                    .sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine_data() -> (Matrix, Vec<f64>) {
        let xs: Vec<f64> = (0..50).map(|i| i as f64 / 8.0).collect();
        let ys: Vec<f64> = xs.iter().map(|x| x.sin() * 10.0).collect();
        (Matrix::new(xs, 50, 1), ys)
    }

    #[test]
    fn test_gbm_zero_estimators_predicts_mean() {
        let (x, y) = sine_data();
        let mean = y.iter().sum::<f64>() / y.len() as f64;
        let fitted = GradientBoostingRegressor::new()
            .with_n_estimators(0)
            .fit(&x, &y)
            .unwrap();

        assert!((fitted.predict_row(&[2.0]) - mean).abs() < 1e-12);
    }

    #[test]
    fn test_gbm_reduces_training_error_with_stages() {
        let (x, y) = sine_data();
        let sse = |fitted: &FittedGradientBoosting| -> f64 {
            (0..x.n_rows())
                .map(|r| (fitted.predict_row(x.row(r)) - y[r]).powi(2))
                .sum()
        };

        let few = GradientBoostingRegressor::new()
            .with_n_estimators(5)
            .fit(&x, &y)
            .unwrap();
        let many = GradientBoostingRegressor::new()
            .with_n_estimators(100)
            .fit(&x, &y)
            .unwrap();

        assert!(sse(&many) < sse(&few));
    }

    #[test]
    fn test_gbm_fits_training_data_closely() {
        let (x, y) = sine_data();
        let fitted = GradientBoostingRegressor::new().fit(&x, &y).unwrap();

        for r in 0..x.n_rows() {
            assert!((fitted.predict_row(x.row(r)) - y[r]).abs() < 1.0);
        }
    }

    #[test]
    fn test_gbm_deterministic() {
        let (x, y) = sine_data();
        let a = GradientBoostingRegressor::new()
            .with_n_estimators(20)
            .fit(&x, &y)
            .unwrap();
        let b = GradientBoostingRegressor::new()
            .with_n_estimators(20)
            .fit(&x, &y)
            .unwrap();

        assert_eq!(a.predict_row(&[1.7]), b.predict_row(&[1.7]));
    }

    #[test]
    fn test_gbm_empty_data() {
        let x = Matrix::zeros(0, 1);
        assert!(matches!(
            GradientBoostingRegressor::new().fit(&x, &[]),
            Err(ModelError::EmptyData)
        ));
    }

    #[test]
    fn test_gbm_params_roundtrip() {
        let (x, y) = sine_data();
        let fitted = GradientBoostingRegressor::new()
            .with_n_estimators(10)
            .fit(&x, &y)
            .unwrap();

        let bytes = bincode::serialize(&fitted).unwrap();
        let restored: FittedGradientBoosting = bincode::deserialize(&bytes).unwrap();
        assert_eq!(restored.predict_row(&[3.0]), fitted.predict_row(&[3.0]));
    }
}
