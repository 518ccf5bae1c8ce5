//! Core traits for preprocessing transformers.
//!
//! - [`Transformer`]: unfitted, holds hyperparameters, learns from data.
//! - [`FittedTransformer`]: fitted, ready for inference and serialization.

use crate::preprocessing::error::PreprocessingError;
use crate::primitives::Matrix;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Trait for unfitted transformers with hyperparameters.
///
/// A transformer learns parameters from training data and can then transform
/// new data using those learned parameters.
pub trait Transformer: Clone {
    /// The corresponding fitted transformer type.
    type Fitted: FittedTransformer;

    /// Fit the transformer to the training data.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if the data is empty or incompatible
    /// with the transformer.
    fn fit(&self, data: &Matrix) -> Result<Self::Fitted, PreprocessingError>;

    /// Fit the transformer and transform the data in one step.
    fn fit_transform(&self, data: &Matrix) -> Result<Matrix, PreprocessingError> {
        self.fit(data)?.transform(data)
    }
}

/// Trait for fitted transformers ready for inference.
///
/// After fitting, a transformer contains learned parameters (e.g., mean and
/// scale for the standard scaler) and can transform new data. Its parameters
/// serialize to bytes for deployment.
///
/// # Guarantees
/// `extract_params()` + `from_params()` is a round-trip.
pub trait FittedTransformer: Clone {
    /// Serializable representation of learned parameters.
    type Params: Serialize + DeserializeOwned;

    /// Transform data using learned parameters.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if the input column count does not
    /// match the number of features seen during fit.
    fn transform(&self, data: &Matrix) -> Result<Matrix, PreprocessingError>;

    /// Extract learned parameters as a serializable representation.
    fn extract_params(&self) -> Self::Params;

    /// Reconstruct a fitted transformer from parameters.
    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError>
    where
        Self: Sized;

    /// Number of input features seen during fit.
    fn n_features_in(&self) -> usize;

    /// Save the fitted transformer to a file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let bytes = bincode::serialize(&self.extract_params()).map_err(std::io::Error::other)?;
        std::fs::write(path, bytes)
    }

    /// Load a fitted transformer from a file.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, PreprocessingError>
    where
        Self: Sized,
    {
        let bytes = std::fs::read(path)?;
        let params: Self::Params = bincode::deserialize(&bytes)?;
        Self::from_params(params)
    }
}
