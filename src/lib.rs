//! Insurance charges prediction: training pipeline and serving library.
//!
//! The crate trains five regression models on the standard insurance dataset
//! and serves predictions over HTTP. Training fits a column transformer
//! (standardized numerics, one-hot encoded categoricals) plus the models and
//! persists everything as bincode artifacts; serving validates each request,
//! applies the stored preprocessor, and runs the requested model.
//!
//! # Example
//!
//! ```no_run
//! use insurance_ml::registry::ModelRegistry;
//! use insurance_ml::service::PredictionService;
//! use insurance_ml::store::ArtifactStore;
//! use insurance_ml::training::run_training;
//!
//! let store = ArtifactStore::new("artifacts");
//! run_training("insurance.csv", &store, 42).unwrap();
//!
//! let service = PredictionService::new(ModelRegistry::new(store));
//! let raw: insurance_ml::features::RawFeatures = serde_json::from_str(
//!     r#"{"age": 30, "sex": "male", "bmi": 25.0, "children": 1,
//!         "smoker": "no", "region": "northeast"}"#,
//! )
//! .unwrap();
//! let result = service.predict(&raw).unwrap();
//! println!("{} -> {}", result.model_used, result.value);
//! ```

/// Dataset loading and train/test splitting.
pub mod data;
/// Error taxonomy for the prediction pipeline.
pub mod error;
/// Feature record types and request validation.
pub mod features;
/// Regression evaluation metrics.
pub mod metrics;
/// Regression models and the model parameter format.
pub mod model;
/// Fit/transform preprocessing transformers.
pub mod preprocessing;
/// Dense matrix type shared by preprocessing and models.
pub mod primitives;
/// Model name resolution and artifact loading.
pub mod registry;
/// HTTP routes and serving.
pub mod server;
/// The validate/transform/predict pipeline.
pub mod service;
/// Artifact directory layout.
pub mod store;
/// The end-to-end training pipeline.
pub mod training;

pub use error::PredictError;
pub use features::{FeatureRecord, RawFeatures, Region, Sex, Smoker};
pub use primitives::Matrix;
pub use registry::ModelRegistry;
pub use service::{PredictionResult, PredictionService, DEFAULT_MODEL};
pub use store::ArtifactStore;
