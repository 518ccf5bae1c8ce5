//! Training pipeline: dataset → preprocessor → five models → artifacts.
//!
//! One training run fits the preprocessor and every model on the same split
//! and rewrites all artifacts together, which is what keeps the categorical
//! vocabulary and scaling parameters consistent between training and
//! serving.

use crate::data::{DatasetError, InsuranceDataset};
use crate::metrics::Metrics;
use crate::model::{
    GradientBoostingRegressor, LinearRegressor, ModelError, ModelKind, ModelParams, Penalty,
    RandomForestRegressor,
};
use crate::preprocessing::{
    ColumnSpec, ColumnTransformer, FittedTransformer, OneHotEncoder, PreprocessingError,
    StandardScaler, Transformer,
};
use crate::primitives::Matrix;
use crate::store::ArtifactStore;
use std::fmt;
use std::io::Write;
use std::path::Path;

/// Fraction of rows held out for evaluation.
const TEST_SIZE: f64 = 0.2;

/// File name of the evaluation report written next to the artifacts.
const EVALUATION_REPORT: &str = "model_evaluation_results.csv";

/// Error type for the training pipeline.
#[derive(Debug)]
pub enum TrainingError {
    Dataset(DatasetError),
    Preprocessing(PreprocessingError),
    Model(ModelError),
    Io(std::io::Error),
    Serialization(bincode::Error),
}

impl fmt::Display for TrainingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainingError::Dataset(e) => write!(f, "Dataset error: {}", e),
            TrainingError::Preprocessing(e) => write!(f, "Preprocessing error: {}", e),
            TrainingError::Model(e) => write!(f, "Model error: {}", e),
            TrainingError::Io(e) => write!(f, "I/O error: {}", e),
            TrainingError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for TrainingError {}

impl From<DatasetError> for TrainingError {
    fn from(e: DatasetError) -> Self {
        TrainingError::Dataset(e)
    }
}

impl From<PreprocessingError> for TrainingError {
    fn from(e: PreprocessingError) -> Self {
        TrainingError::Preprocessing(e)
    }
}

impl From<ModelError> for TrainingError {
    fn from(e: ModelError) -> Self {
        TrainingError::Model(e)
    }
}

impl From<std::io::Error> for TrainingError {
    fn from(e: std::io::Error) -> Self {
        TrainingError::Io(e)
    }
}

impl From<bincode::Error> for TrainingError {
    fn from(e: bincode::Error) -> Self {
        TrainingError::Serialization(e)
    }
}

/// Held-out metrics for one trained model.
#[derive(Debug, Clone)]
pub struct ModelScore {
    pub name: &'static str,
    pub display_name: &'static str,
    pub metrics: Metrics,
}

/// Summary of one training run.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub n_train: usize,
    pub n_test: usize,
    pub scores: Vec<ModelScore>,
}

impl TrainingReport {
    /// The model with the lowest held-out RMSE.
    pub fn best(&self) -> Option<&ModelScore> {
        self.scores.iter().min_by(|a, b| {
            a.metrics
                .rmse
                .partial_cmp(&b.metrics.rmse)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}

/// The preprocessing table used for both training and serving: standardize
/// the numeric columns, one-hot encode the categoricals with the first
/// category dropped. Column order matches [`FeatureRecord::to_raw_row`].
///
/// [`FeatureRecord::to_raw_row`]: crate::features::FeatureRecord::to_raw_row
pub fn build_preprocessor() -> ColumnTransformer {
    ColumnTransformer::new()
        .add_standard_scaler(StandardScaler::new(), ColumnSpec::Indices(vec![0, 1, 2]))
        .add_one_hot_encoder(
            OneHotEncoder::new().with_drop_first(true),
            ColumnSpec::Indices(vec![3, 4, 5]),
        )
}

/// Train all five models from a CSV file, persist the artifacts and the
/// evaluation report, and return the per-model scores.
pub fn run_training<P: AsRef<Path>>(
    csv_path: P,
    store: &ArtifactStore,
    seed: u64,
) -> Result<TrainingReport, TrainingError> {
    let dataset = InsuranceDataset::load_csv(csv_path)?;
    let (train, test) = dataset.train_test_split(TEST_SIZE, seed);
    println!(
        "Loaded {} rows ({} train / {} test)",
        dataset.len(),
        train.len(),
        test.len()
    );

    let preprocessor = build_preprocessor().fit(&train.to_feature_matrix())?;
    let x_train = preprocessor.transform(&train.to_feature_matrix())?;
    let x_test = preprocessor.transform(&test.to_feature_matrix())?;

    store.ensure_dir()?;
    save_params(
        &store.preprocessor_path(),
        &preprocessor.extract_params(),
    )?;

    let mut scores = Vec::with_capacity(ModelKind::ALL.len());
    for kind in ModelKind::ALL {
        println!("Training {}...", kind.display_name());
        let params = fit_model(kind, &x_train, &train.charges, seed)?;
        save_params(&store.model_path(kind.name()), &params)?;

        let model = params.into_regressor();
        let predictions = model.predict_batch(&x_test);
        let metrics = Metrics::compute(&predictions, &test.charges);
        println!(
            "  RMSE: {:.2}  MAE: {:.2}  R2: {:.4}",
            metrics.rmse, metrics.mae, metrics.r2
        );
        scores.push(ModelScore {
            name: kind.name(),
            display_name: kind.display_name(),
            metrics,
        });
    }

    let report = TrainingReport {
        n_train: train.len(),
        n_test: test.len(),
        scores,
    };
    write_evaluation_report(store, &report)?;
    if let Some(best) = report.best() {
        println!(
            "Best model: {} (RMSE {:.2})",
            best.display_name, best.metrics.rmse
        );
    }
    Ok(report)
}

fn fit_model(
    kind: ModelKind,
    x: &Matrix,
    y: &[f64],
    seed: u64,
) -> Result<ModelParams, ModelError> {
    match kind {
        ModelKind::LinearRegression => Ok(ModelParams::Linear(LinearRegressor::new().fit(x, y)?)),
        ModelKind::RidgeRegression => Ok(ModelParams::Linear(
            LinearRegressor::new()
                .with_penalty(Penalty::L2 { alpha: 1.0 })
                .fit(x, y)?,
        )),
        ModelKind::LassoRegression => Ok(ModelParams::Linear(
            LinearRegressor::new()
                .with_penalty(Penalty::L1 { alpha: 0.1 })
                .fit(x, y)?,
        )),
        ModelKind::RandomForest => Ok(ModelParams::Forest(
            RandomForestRegressor::new()
                .with_n_estimators(100)
                .with_seed(seed)
                .fit(x, y)?,
        )),
        ModelKind::GradientBoosting => Ok(ModelParams::Boosting(
            GradientBoostingRegressor::new()
                .with_n_estimators(100)
                .fit(x, y)?,
        )),
    }
}

fn save_params<T: serde::Serialize>(path: &Path, params: &T) -> Result<(), TrainingError> {
    let bytes = bincode::serialize(params)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

fn write_evaluation_report(
    store: &ArtifactStore,
    report: &TrainingReport,
) -> Result<(), TrainingError> {
    let path = store.root().join(EVALUATION_REPORT);
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "Model,MSE,RMSE,MAE,R2")?;
    for score in &report.scores {
        writeln!(
            file,
            "{},{},{},{},{}",
            score.display_name,
            score.metrics.mse,
            score.metrics.rmse,
            score.metrics.mae,
            score.metrics.r2
        )?;
    }
    Ok(())
}
