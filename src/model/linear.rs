//! Linear regression trained by full-batch gradient descent.
//!
//! Minimizes mean squared error with an optional L1 or L2 penalty on the
//! weights. With [`Penalty::None`] this is ordinary least squares; L2 gives
//! ridge regression and L1 gives lasso. Inputs are expected to be
//! standardized, which keeps the default learning rate stable.

use crate::model::error::ModelError;
use crate::model::Regressor;
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};

/// Weight penalty applied during training.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Penalty {
    /// No regularization (ordinary least squares).
    None,
    /// L1 penalty: `alpha * sum(|w|)`. Drives weights toward exact zero.
    L1 { alpha: f64 },
    /// L2 penalty: `alpha * sum(w^2)`. Shrinks weights smoothly.
    L2 { alpha: f64 },
}

/// Linear regressor configuration (unfitted).
#[derive(Debug, Clone)]
pub struct LinearRegressor {
    penalty: Penalty,
    learning_rate: f64,
    max_epochs: usize,
}

impl Default for LinearRegressor {
    fn default() -> Self {
        Self {
            penalty: Penalty::None,
            learning_rate: 0.05,
            max_epochs: 2000,
        }
    }
}

impl LinearRegressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_penalty(mut self, penalty: Penalty) -> Self {
        self.penalty = penalty;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_max_epochs(mut self, max_epochs: usize) -> Self {
        self.max_epochs = max_epochs;
        self
    }

    /// Fit weights and bias by full-batch gradient descent on MSE.
    ///
    /// # Errors
    /// Returns [`ModelError`] if the data is empty or the target length does
    /// not match the number of rows.
    pub fn fit(&self, data: &Matrix, target: &[f64]) -> Result<FittedLinearRegressor, ModelError> {
        let (rows, cols) = data.shape();
        if rows == 0 {
            return Err(ModelError::EmptyData);
        }
        if target.len() != rows {
            return Err(ModelError::DimensionMismatch {
                expected: rows,
                got: target.len(),
            });
        }

        let n = rows as f64;
        let mut weights = vec![0.0; cols];
        let mut bias = 0.0;

        for _ in 0..self.max_epochs {
            // residuals = X w + b - y
            let mut residuals = vec![0.0; rows];
            for r in 0..rows {
                let row = data.row(r);
                let pred: f64 = row.iter().zip(&weights).map(|(x, w)| x * w).sum::<f64>() + bias;
                residuals[r] = pred - target[r];
            }

            let mut grad_w = vec![0.0; cols];
            for r in 0..rows {
                let row = data.row(r);
                for c in 0..cols {
                    grad_w[c] += 2.0 * row[c] * residuals[r] / n;
                }
            }
            let grad_b = 2.0 * residuals.iter().sum::<f64>() / n;

            match self.penalty {
                Penalty::None => {}
                Penalty::L1 { alpha } => {
                    for c in 0..cols {
                        grad_w[c] += alpha * weights[c].signum();
                    }
                }
                Penalty::L2 { alpha } => {
                    for c in 0..cols {
                        grad_w[c] += 2.0 * alpha * weights[c];
                    }
                }
            }

            for c in 0..cols {
                weights[c] -= self.learning_rate * grad_w[c];
            }
            bias -= self.learning_rate * grad_b;
        }

        Ok(FittedLinearRegressor { weights, bias })
    }
}

/// Fitted linear regressor ready for inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedLinearRegressor {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl Regressor for FittedLinearRegressor {
    fn predict_row(&self, features: &[f64]) -> f64 {
        features
            .iter()
            .zip(&self.weights)
            .map(|(x, w)| x * w)
            .sum::<f64>()
            + self.bias
    }
}
