//! Random forest regressor.
//!
//! Trains an ensemble of deep regression trees on bootstrap samples and
//! averages their predictions. Trees consider all features at every split,
//! which for regression matches the common library default.

use crate::model::error::ModelError;
use crate::model::tree::{DecisionTreeRegressor, FittedDecisionTree};
use crate::model::Regressor;
use crate::primitives::Matrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Random forest configuration (unfitted).
#[derive(Debug, Clone)]
pub struct RandomForestRegressor {
    n_estimators: usize,
    max_depth: usize,
    min_samples_leaf: usize,
    seed: u64,
}

impl Default for RandomForestRegressor {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 16,
            min_samples_leaf: 1,
            seed: 42,
        }
    }
}

impl RandomForestRegressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_min_samples_leaf(mut self, min_samples_leaf: usize) -> Self {
        self.min_samples_leaf = min_samples_leaf;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Fit the forest on bootstrap resamples of the training rows.
    ///
    /// # Errors
    /// Returns [`ModelError`] if the data is empty or the target length does
    /// not match the number of rows.
    pub fn fit(&self, data: &Matrix, target: &[f64]) -> Result<FittedRandomForest, ModelError> {
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

        let mut rng = StdRng::seed_from_u64(self.seed);
        let tree_config = DecisionTreeRegressor::new()
            .with_max_depth(self.max_depth)
            .with_min_samples_leaf(self.min_samples_leaf);

        let mut trees = Vec::with_capacity(self.n_estimators);
        for _ in 0..self.n_estimators {
            let sample: Vec<usize> = (0..rows).map(|_| rng.gen_range(0..rows)).collect();
            trees.push(tree_config.fit_on_indices(data, target, &sample)?);
        }

        Ok(FittedRandomForest { trees })
    }
}

/// Fitted random forest ready for inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedRandomForest {
    pub trees: Vec<FittedDecisionTree>,
}

impl FittedRandomForest {
    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }
}

impl Regressor for FittedRandomForest {
    fn predict_row(&self, features: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict_row(features)).sum();
        sum / self.trees.len() as f64
    }
}
