//! Prediction service: the validate → transform → predict pipeline.
//!
//! Stateless and single-pass per request. Any failure in any step surfaces
//! immediately as a [`PredictError`]; there are no retries.

use crate::error::PredictError;
use crate::features::RawFeatures;
use crate::model::ModelKind;
use crate::registry::ModelRegistry;

/// Model used when a request does not name one.
pub const DEFAULT_MODEL: ModelKind = ModelKind::GradientBoosting;

/// Result of one successful prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    /// Predicted charges, rounded to 2 decimal places.
    pub value: f64,
    /// Name of the model that produced the prediction.
    pub model_used: String,
}

/// Stateless prediction pipeline over a model registry.
#[derive(Debug, Clone)]
pub struct PredictionService {
    registry: ModelRegistry,
}

impl PredictionService {
    pub fn new(registry: ModelRegistry) -> Self {
        Self { registry }
    }

    /// Run the full pipeline for one raw request.
    pub fn predict(&self, raw: &RawFeatures) -> Result<PredictionResult, PredictError> {
        let record = raw.validate()?;
        let model_name = raw
            .model_name
            .as_deref()
            .unwrap_or(DEFAULT_MODEL.name());

        let preprocessor = self.registry.load_preprocessor()?;
        let model = self.registry.load(model_name)?;

        let features = preprocessor
            .transform_row(&record.to_raw_row())
            .map_err(|e| PredictError::Unexpected(e.to_string()))?;
        let prediction = model.predict_row(&features);

        Ok(PredictionResult {
            value: round2(prediction),
            model_used: model_name.to_string(),
        })
    }

    /// Sorted names of the fitted model artifacts on disk.
    pub fn available_models(&self) -> Result<Vec<String>, PredictError> {
        self.registry
            .store()
            .list_models()
            .map_err(|e| PredictError::Unexpected(e.to_string()))
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
