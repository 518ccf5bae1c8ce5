//! ColumnTransformer implementation.
//!
//! Applies different transformers to different column subsets and
//! concatenates the results, preserving step order. This is the shape of the
//! fitted preprocessor artifact: scale the numeric columns, one-hot encode
//! the categorical columns, output in a fixed column order.

use crate::preprocessing::encoding::{FittedOneHotEncoder, OneHotEncoder, OneHotEncoderParams};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::scaling::{FittedStandardScaler, StandardScaler, StandardScalerParams};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Specifies which columns a transformer should be applied to.
#[derive(Debug, Clone)]
pub enum ColumnSpec {
    /// Apply to specific column indices.
    Indices(Vec<usize>),
    /// Apply to a range of columns.
    Range(Range<usize>),
    /// Apply to all columns.
    All,
}

impl ColumnSpec {
    fn resolve(&self, n_features: usize) -> Vec<usize> {
        match self {
            ColumnSpec::Indices(indices) => indices.clone(),
            ColumnSpec::Range(range) => range.clone().collect(),
            ColumnSpec::All => (0..n_features).collect(),
        }
    }
}

/// Enum of unfitted transformers usable in a ColumnTransformer.
#[derive(Debug, Clone)]
pub enum ColumnTransformerStep {
    StandardScaler(StandardScaler),
    OneHotEncoder(OneHotEncoder),
}

/// Enum of fitted transformers for ColumnTransformer.
#[derive(Debug, Clone)]
pub enum FittedColumnTransformerStep {
    StandardScaler(FittedStandardScaler),
    OneHotEncoder(FittedOneHotEncoder),
}

impl FittedColumnTransformerStep {
    fn transform(&self, data: &Matrix) -> Result<Matrix, PreprocessingError> {
        match self {
            FittedColumnTransformerStep::StandardScaler(t) => t.transform(data),
            FittedColumnTransformerStep::OneHotEncoder(t) => t.transform(data),
        }
    }

    fn step_name(&self) -> &'static str {
        match self {
            FittedColumnTransformerStep::StandardScaler(_) => "StandardScaler",
            FittedColumnTransformerStep::OneHotEncoder(_) => "OneHotEncoder",
        }
    }

    fn n_features_out(&self) -> usize {
        match self {
            FittedColumnTransformerStep::StandardScaler(t) => t.n_features_in(),
            FittedColumnTransformerStep::OneHotEncoder(t) => t.n_features_out(),
        }
    }
}

/// ColumnTransformer applies different transformers to different columns.
///
/// Useful for heterogeneous data: scale numerical features, one-hot encode
/// categorical features, and concatenate the outputs in step order.
#[derive(Debug, Clone, Default)]
pub struct ColumnTransformer {
    steps: Vec<(ColumnSpec, ColumnTransformerStep)>,
}

impl ColumnTransformer {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Add a StandardScaler for the specified columns.
    pub fn add_standard_scaler(mut self, scaler: StandardScaler, spec: ColumnSpec) -> Self {
        self.steps
            .push((spec, ColumnTransformerStep::StandardScaler(scaler)));
        self
    }

    /// Add a OneHotEncoder for the specified columns.
    pub fn add_one_hot_encoder(mut self, encoder: OneHotEncoder, spec: ColumnSpec) -> Self {
        self.steps
            .push((spec, ColumnTransformerStep::OneHotEncoder(encoder)));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Serializable parameters for one fitted step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepParams {
    /// Column indices this step was applied to.
    pub columns: Vec<usize>,
    /// Step type name.
    pub step_type: String,
    /// Serialized step parameters.
    pub params: Vec<u8>,
}

/// Serializable parameters for a fitted ColumnTransformer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnTransformerParams {
    pub n_features_in: usize,
    pub n_features_out: usize,
    pub steps: Vec<StepParams>,
}

/// Fitted ColumnTransformer ready for inference.
#[derive(Debug, Clone)]
pub struct FittedColumnTransformer {
    fitted_steps: Vec<(Vec<usize>, FittedColumnTransformerStep)>,
    n_features_in: usize,
    n_features_out: usize,
}

impl FittedColumnTransformer {
    pub fn n_features_out(&self) -> usize {
        self.n_features_out
    }

    pub fn step_names(&self) -> Vec<(&'static str, &[usize])> {
        self.fitted_steps
            .iter()
            .map(|(cols, step)| (step.step_name(), cols.as_slice()))
            .collect()
    }

    /// Transform a single raw feature row into the fixed-order numeric
    /// feature vector.
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>, PreprocessingError> {
        let input = Matrix::new(row.to_vec(), 1, row.len());
        let out = self.transform(&input)?;
        Ok(out.row(0).to_vec())
    }
}

impl Transformer for ColumnTransformer {
    type Fitted = FittedColumnTransformer;

    fn fit(&self, data: &Matrix) -> Result<Self::Fitted, PreprocessingError> {
        let (rows, cols) = data.shape();
        if rows == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit ColumnTransformer on empty data".to_string(),
            ));
        }
        if self.steps.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "Cannot fit empty ColumnTransformer".to_string(),
            ));
        }

        let mut fitted_steps = Vec::with_capacity(self.steps.len());
        let mut n_features_out = 0;

        for (spec, step) in &self.steps {
            let columns = spec.resolve(cols);
            for &col in &columns {
                if col >= cols {
                    return Err(PreprocessingError::InvalidParameter(format!(
                        "Column index {} out of bounds (max {})",
                        col,
                        cols - 1
                    )));
                }
            }

            let col_data = data.select_columns(&columns);
            let fitted = match step {
                ColumnTransformerStep::StandardScaler(t) => {
                    FittedColumnTransformerStep::StandardScaler(t.fit(&col_data)?)
                }
                ColumnTransformerStep::OneHotEncoder(t) => {
                    FittedColumnTransformerStep::OneHotEncoder(t.fit(&col_data)?)
                }
            };

            n_features_out += fitted.n_features_out();
            fitted_steps.push((columns, fitted));
        }

        Ok(FittedColumnTransformer {
            fitted_steps,
            n_features_in: cols,
            n_features_out,
        })
    }
}

impl FittedTransformer for FittedColumnTransformer {
    type Params = ColumnTransformerParams;

    fn transform(&self, data: &Matrix) -> Result<Matrix, PreprocessingError> {
        let (rows, cols) = data.shape();
        if cols != self.n_features_in {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.n_features_in,
                got_features: cols,
            });
        }
        if rows == 0 {
            return Ok(Matrix::zeros(0, self.n_features_out));
        }

        let mut outputs = Vec::with_capacity(self.fitted_steps.len());
        for (columns, step) in &self.fitted_steps {
            let col_data = data.select_columns(columns);
            outputs.push(step.transform(&col_data)?);
        }
        Ok(Matrix::hcat(&outputs))
    }

    fn extract_params(&self) -> Self::Params {
        let steps = self
            .fitted_steps
            .iter()
            .map(|(columns, step)| {
                let (step_type, params) = match step {
                    FittedColumnTransformerStep::StandardScaler(t) => (
                        "StandardScaler".to_string(),
                        bincode::serialize(&t.extract_params()).unwrap_or_default(),
                    ),
                    FittedColumnTransformerStep::OneHotEncoder(t) => (
                        "OneHotEncoder".to_string(),
                        bincode::serialize(&t.extract_params()).unwrap_or_default(),
                    ),
                };
                StepParams {
                    columns: columns.clone(),
                    step_type,
                    params,
                }
            })
            .collect();

        ColumnTransformerParams {
            n_features_in: self.n_features_in,
            n_features_out: self.n_features_out,
            steps,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        let mut fitted_steps = Vec::with_capacity(params.steps.len());
        for step_params in params.steps {
            let step = match step_params.step_type.as_str() {
                "StandardScaler" => {
                    let p: StandardScalerParams = bincode::deserialize(&step_params.params)?;
                    FittedColumnTransformerStep::StandardScaler(
                        FittedStandardScaler::from_params(p)?,
                    )
                }
                "OneHotEncoder" => {
                    let p: OneHotEncoderParams = bincode::deserialize(&step_params.params)?;
                    FittedColumnTransformerStep::OneHotEncoder(FittedOneHotEncoder::from_params(
                        p,
                    )?)
                }
                other => {
                    return Err(PreprocessingError::SerializationError(format!(
                        "Unknown step type: {}",
                        other
                    )))
                }
            };
            fitted_steps.push((step_params.columns, step));
        }

        Ok(FittedColumnTransformer {
            fitted_steps,
            n_features_in: params.n_features_in,
            n_features_out: params.n_features_out,
        })
    }

    fn n_features_in(&self) -> usize {
        self.n_features_in
    }
}
