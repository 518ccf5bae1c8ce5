//! Regression models.
//!
//! Every fitted model implements [`Regressor`] and serializes through the
//! tagged [`ModelParams`] enum, so an artifact file is self-describing: the
//! registry can load any model file without knowing its kind in advance.

pub mod error;
pub mod forest;
pub mod gbm;
pub mod linear;
pub mod tree;

pub use error::ModelError;
pub use forest::{FittedRandomForest, RandomForestRegressor};
pub use gbm::{FittedGradientBoosting, GradientBoostingRegressor};
pub use linear::{FittedLinearRegressor, LinearRegressor, Penalty};
pub use tree::{DecisionTreeRegressor, FittedDecisionTree, Node};

use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};

/// A fitted regression model that predicts a scalar per feature row.
pub trait Regressor {
    /// Predict the target for a single preprocessed feature row.
    fn predict_row(&self, features: &[f64]) -> f64;

    /// Predict targets for every row of a feature matrix.
    fn predict_batch(&self, data: &Matrix) -> Vec<f64> {
        (0..data.n_rows()).map(|r| self.predict_row(data.row(r))).collect()
    }
}

/// The set of trainable model kinds, identified by snake_case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    LinearRegression,
    RidgeRegression,
    LassoRegression,
    RandomForest,
    GradientBoosting,
}

impl ModelKind {
    /// All kinds, in training order.
    pub const ALL: [ModelKind; 5] = [
        ModelKind::LinearRegression,
        ModelKind::RidgeRegression,
        ModelKind::LassoRegression,
        ModelKind::RandomForest,
        ModelKind::GradientBoosting,
    ];

    /// Artifact/API identifier.
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::LinearRegression => "linear_regression",
            ModelKind::RidgeRegression => "ridge_regression",
            ModelKind::LassoRegression => "lasso_regression",
            ModelKind::RandomForest => "random_forest",
            ModelKind::GradientBoosting => "gradient_boosting",
        }
    }

    /// Human-readable name for reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelKind::LinearRegression => "Linear Regression",
            ModelKind::RidgeRegression => "Ridge Regression",
            ModelKind::LassoRegression => "Lasso Regression",
            ModelKind::RandomForest => "Random Forest",
            ModelKind::GradientBoosting => "Gradient Boosting",
        }
    }

    pub fn from_name(name: &str) -> Option<ModelKind> {
        ModelKind::ALL.iter().copied().find(|k| k.name() == name)
    }
}

/// Serializable representation of any fitted model.
///
/// The enum tag is part of the artifact format, so a loaded artifact knows
/// which regressor to reconstruct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ModelParams {
    Linear(FittedLinearRegressor),
    Forest(FittedRandomForest),
    Boosting(FittedGradientBoosting),
}

impl ModelParams {
    /// Unwrap into a trait object usable across threads by the server.
    pub fn into_regressor(self) -> Box<dyn Regressor + Send + Sync> {
        match self {
            ModelParams::Linear(m) => Box::new(m),
            ModelParams::Forest(m) => Box::new(m),
            ModelParams::Boosting(m) => Box::new(m),
        }
    }
}
