//! Model registry: resolves model names to fitted regressors.
//!
//! Loads are lazy, one per request; nothing is cached. Artifacts are read
//! read-only and never mutated after training, so concurrent loads need no
//! synchronization.

use crate::error::PredictError;
use crate::model::{ModelKind, ModelParams, Regressor};
use crate::preprocessing::{ColumnTransformerParams, FittedColumnTransformer, FittedTransformer};
use crate::store::ArtifactStore;

/// Resolves model identifiers against the artifact store.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    store: ArtifactStore,
}

impl ModelRegistry {
    pub fn new(store: ArtifactStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Load a fitted model by its identifier.
    ///
    /// Names outside the recognized set and names whose artifact file is
    /// absent both surface as [`PredictError::ArtifactNotFound`]; a corrupt
    /// artifact is [`PredictError::Unexpected`].
    pub fn load(&self, name: &str) -> Result<Box<dyn Regressor + Send + Sync>, PredictError> {
        let kind = ModelKind::from_name(name)
            .ok_or_else(|| self.not_found(name))?;

        let path = self.store.model_path(kind.name());
        if !path.exists() {
            return Err(self.not_found(kind.name()));
        }

        let bytes = std::fs::read(&path)
            .map_err(|e| PredictError::Unexpected(format!("Failed to read {}: {}", path.display(), e)))?;
        let params: ModelParams = bincode::deserialize(&bytes).map_err(|e| {
            PredictError::Unexpected(format!("Failed to decode {}: {}", path.display(), e))
        })?;
        Ok(params.into_regressor())
    }

    /// Load the fitted preprocessor.
    pub fn load_preprocessor(&self) -> Result<FittedColumnTransformer, PredictError> {
        let path = self.store.preprocessor_path();
        if !path.exists() {
            return Err(PredictError::ArtifactNotFound(format!(
                "Preprocessor file {} not found!",
                path.display()
            )));
        }

        let bytes = std::fs::read(&path)
            .map_err(|e| PredictError::Unexpected(format!("Failed to read {}: {}", path.display(), e)))?;
        let params: ColumnTransformerParams = bincode::deserialize(&bytes).map_err(|e| {
            PredictError::Unexpected(format!("Failed to decode {}: {}", path.display(), e))
        })?;
        FittedColumnTransformer::from_params(params)
            .map_err(|e| PredictError::Unexpected(e.to_string()))
    }

    fn not_found(&self, name: &str) -> PredictError {
        PredictError::ArtifactNotFound(format!(
            "Model file {} not found!",
            self.store.model_path(name).display()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FittedLinearRegressor;

    fn registry_in(dir: &std::path::Path) -> ModelRegistry {
        ModelRegistry::new(ArtifactStore::new(dir))
    }

    #[test]
    fn test_load_unknown_name_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = registry_in(dir.path()).load("quantum_forest").err().unwrap();
        assert!(matches!(err, PredictError::ArtifactNotFound(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_missing_artifact_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = registry_in(dir.path()).load("ridge_regression").err().unwrap();
        assert!(matches!(err, PredictError::ArtifactNotFound(_)));
        assert!(err.to_string().contains("ridge_regression.bin"));
    }

    #[test]
    fn test_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry_in(dir.path());

        let params = ModelParams::Linear(FittedLinearRegressor {
            weights: vec![2.0],
            bias: 1.0,
        });
        std::fs::write(
            registry.store().model_path("linear_regression"),
            bincode::serialize(&params).unwrap(),
        )
        .unwrap();

        let model = registry.load("linear_regression").unwrap();
        assert!((model.predict_row(&[3.0]) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_load_corrupt_artifact_is_unexpected() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry_in(dir.path());
        std::fs::write(registry.store().model_path("random_forest"), b"garbage").unwrap();

        let err = registry.load("random_forest").err().unwrap();
        assert!(matches!(err, PredictError::Unexpected(_)));
    }

    #[test]
    fn test_missing_preprocessor_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = registry_in(dir.path()).load_preprocessor().unwrap_err();
        assert!(matches!(err, PredictError::ArtifactNotFound(_)));
        assert!(err.to_string().contains("Preprocessor"));
    }
}
