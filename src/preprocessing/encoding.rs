//! One-hot encoding for categorical features.
//!
//! Each input column is treated as an integer-coded categorical feature. The
//! encoder learns the sorted unique values per column during fitting; with
//! `drop_first` enabled a k-valued column produces k-1 indicators, omitting
//! the base category to avoid linear dependence among encoded columns.

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One-hot encoder for integer-coded categorical features (unfitted).
#[derive(Debug, Clone, Default)]
pub struct OneHotEncoder {
    drop_first: bool,
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self { drop_first: false }
    }

    /// Drop the first (lowest) category of every column, emitting k-1
    /// indicators per k-valued column.
    pub fn with_drop_first(mut self, drop_first: bool) -> Self {
        self.drop_first = drop_first;
        self
    }
}

/// Serializable parameters for a fitted OneHotEncoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoderParams {
    /// Sorted unique category codes per input column.
    pub categories: Vec<Vec<i64>>,
    pub drop_first: bool,
    pub n_features_in: usize,
    pub n_features_out: usize,
}

/// Fitted OneHotEncoder ready for inference.
#[derive(Debug, Clone)]
pub struct FittedOneHotEncoder {
    categories: Vec<Vec<i64>>,
    drop_first: bool,
    n_features_in: usize,
    n_features_out: usize,
}

impl FittedOneHotEncoder {
    /// Sorted category codes learned for each input column.
    pub fn categories(&self) -> &[Vec<i64>] {
        &self.categories
    }

    pub fn n_features_out(&self) -> usize {
        self.n_features_out
    }

    fn indicators_per_column(&self, col: usize) -> usize {
        let k = self.categories[col].len();
        if self.drop_first {
            k.saturating_sub(1)
        } else {
            k
        }
    }
}

fn as_category_code(val: f64, row: usize, col: usize) -> Result<i64, PreprocessingError> {
    if !val.is_finite() || val.fract() != 0.0 {
        return Err(PreprocessingError::InvalidParameter(format!(
            "OneHotEncoder expects integer category codes, got {} at ({}, {})",
            val, row, col
        )));
    }
    Ok(val as i64)
}

impl Transformer for OneHotEncoder {
    type Fitted = FittedOneHotEncoder;

    fn fit(&self, data: &Matrix) -> Result<Self::Fitted, PreprocessingError> {
        let (rows, cols) = data.shape();
        if rows == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit OneHotEncoder on empty data".to_string(),
            ));
        }

        let mut categories = Vec::with_capacity(cols);
        for col in 0..cols {
            let mut values = BTreeSet::new();
            for row in 0..rows {
                values.insert(as_category_code(data.get(row, col), row, col)?);
            }
            categories.push(values.into_iter().collect::<Vec<i64>>());
        }

        let n_features_out = categories
            .iter()
            .map(|cats| {
                if self.drop_first {
                    cats.len().saturating_sub(1)
                } else {
                    cats.len()
                }
            })
            .sum();

        Ok(FittedOneHotEncoder {
            categories,
            drop_first: self.drop_first,
            n_features_in: cols,
            n_features_out,
        })
    }
}

impl FittedTransformer for FittedOneHotEncoder {
    type Params = OneHotEncoderParams;

    fn transform(&self, data: &Matrix) -> Result<Matrix, PreprocessingError> {
        let (rows, cols) = data.shape();
        if cols != self.n_features_in {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.n_features_in,
                got_features: cols,
            });
        }

        let mut out = Matrix::zeros(rows, self.n_features_out);
        for row in 0..rows {
            let mut offset = 0;
            for col in 0..cols {
                let code = as_category_code(data.get(row, col), row, col)?;
                let cats = &self.categories[col];
                let idx = cats.iter().position(|&c| c == code).ok_or_else(|| {
                    PreprocessingError::InvalidParameter(format!(
                        "Unknown category {} in column {}",
                        code, col
                    ))
                })?;

                if self.drop_first {
                    // Base category maps to all zeros.
                    if idx > 0 {
                        out.set(row, offset + idx - 1, 1.0);
                    }
                } else {
                    out.set(row, offset + idx, 1.0);
                }
                offset += self.indicators_per_column(col);
            }
        }
        Ok(out)
    }

    fn extract_params(&self) -> Self::Params {
        OneHotEncoderParams {
            categories: self.categories.clone(),
            drop_first: self.drop_first,
            n_features_in: self.n_features_in,
            n_features_out: self.n_features_out,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        Ok(Self {
            categories: params.categories,
            drop_first: params.drop_first,
            n_features_in: params.n_features_in,
            n_features_out: params.n_features_out,
        })
    }

    fn n_features_in(&self) -> usize {
        self.n_features_in
    }
}
