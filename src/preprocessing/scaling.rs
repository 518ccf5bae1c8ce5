//! Standard scaler (z-score normalization).
//!
//! Transforms features by removing the mean and scaling to unit variance:
//! `z = (x - u) / s` where `u` is the per-column mean of the training samples
//! and `s` the per-column population standard deviation.

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};

/// StandardScaler transformer (unfitted).
#[derive(Debug, Clone, Default)]
pub struct StandardScaler;

impl StandardScaler {
    pub fn new() -> Self {
        Self
    }
}

/// Serializable parameters for a fitted StandardScaler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScalerParams {
    /// Mean of each feature.
    pub mean: Vec<f64>,
    /// Scale (standard deviation) of each feature; constant columns use 1.
    pub scale: Vec<f64>,
    /// Number of features seen during fit.
    pub n_features: usize,
}

impl Transformer for StandardScaler {
    type Fitted = FittedStandardScaler;

    fn fit(&self, data: &Matrix) -> Result<Self::Fitted, PreprocessingError> {
        let (rows, cols) = data.shape();
        if rows == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit StandardScaler on empty data".to_string(),
            ));
        }

        let mut mean = vec![0.0; cols];
        let mut scale = vec![0.0; cols];
        for c in 0..cols {
            let col = data.column(c);
            let m = col.iter().sum::<f64>() / rows as f64;
            // Population variance (ddof = 0).
            let var = col.iter().map(|v| (v - m).powi(2)).sum::<f64>() / rows as f64;
            let s = var.sqrt();
            mean[c] = m;
            scale[c] = if s == 0.0 { 1.0 } else { s };
        }

        Ok(FittedStandardScaler {
            mean,
            scale,
            n_features: cols,
        })
    }
}

/// Fitted StandardScaler ready for inference.
#[derive(Debug, Clone)]
pub struct FittedStandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
    n_features: usize,
}

impl FittedStandardScaler {
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }
}

impl FittedTransformer for FittedStandardScaler {
    type Params = StandardScalerParams;

    fn transform(&self, data: &Matrix) -> Result<Matrix, PreprocessingError> {
        let (rows, cols) = data.shape();
        if cols != self.n_features {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.n_features,
                got_features: cols,
            });
        }

        let mut out = Matrix::zeros(rows, cols);
        for r in 0..rows {
            for c in 0..cols {
                out.set(r, c, (data.get(r, c) - self.mean[c]) / self.scale[c]);
            }
        }
        Ok(out)
    }

    fn extract_params(&self) -> Self::Params {
        StandardScalerParams {
            mean: self.mean.clone(),
            scale: self.scale.clone(),
            n_features: self.n_features,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        Ok(Self {
            mean: params.mean,
            scale: params.scale,
            n_features: params.n_features,
        })
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_data() -> Matrix {
        // [[0, 1], [0, 1], [1, 3]]
        Matrix::new(vec![0.0, 1.0, 0.0, 1.0, 1.0, 3.0], 3, 2)
    }

    #[test]
    fn test_standard_scaler_fit() {
        let fitted = StandardScaler::new().fit(&create_test_data()).unwrap();
        let mean = fitted.mean();
        assert!((mean[0] - 1.0 / 3.0).abs() < 1e-12);
        assert!((mean[1] - 5.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_standard_scaler_transform_centers_and_scales() {
        let data = create_test_data();
        let fitted = StandardScaler::new().fit(&data).unwrap();
        let transformed = fitted.transform(&data).unwrap();

        for c in 0..2 {
            let col = transformed.column(c);
            let m = col.iter().sum::<f64>() / col.len() as f64;
            let var = col.iter().map(|v| (v - m).powi(2)).sum::<f64>() / col.len() as f64;
            assert!(m.abs() < 1e-12, "mean[{}] = {}", c, m);
            assert!((var.sqrt() - 1.0).abs() < 1e-10, "std[{}] = {}", c, var.sqrt());
        }
    }

    #[test]
    fn test_standard_scaler_constant_feature() {
        let data = Matrix::new(vec![5.0, 1.0, 5.0, 2.0, 5.0, 3.0], 3, 2);
        let fitted = StandardScaler::new().fit(&data).unwrap();

        // Constant column gets scale 1 so transform stays finite.
        assert!((fitted.scale()[0] - 1.0).abs() < 1e-12);
        assert!((fitted.mean()[0] - 5.0).abs() < 1e-12);

        let transformed = fitted.transform(&data).unwrap();
        assert!(transformed.column(0).iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn test_standard_scaler_feature_mismatch() {
        let fitted = StandardScaler::new().fit(&create_test_data()).unwrap();
        let wrong = Matrix::new(vec![1.0, 2.0, 3.0], 1, 3);
        assert!(matches!(
            fitted.transform(&wrong),
            Err(PreprocessingError::FeatureMismatch {
                expected_features: 2,
                got_features: 3
            })
        ));
    }

    #[test]
    fn test_standard_scaler_empty_data() {
        let data = Matrix::zeros(0, 2);
        assert!(StandardScaler::new().fit(&data).is_err());
    }

    #[test]
    fn test_standard_scaler_params_roundtrip() {
        let data = create_test_data();
        let fitted = StandardScaler::new().fit(&data).unwrap();
        let restored = FittedStandardScaler::from_params(fitted.extract_params()).unwrap();

        let a = fitted.transform(&data).unwrap();
        let b = restored.transform(&data).unwrap();
        for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_standard_scaler_save_load_file() {
        let data = create_test_data();
        let fitted = StandardScaler::new().fit(&data).unwrap();

        let temp_file = std::env::temp_dir().join("test_standard_scaler.bin");
        fitted.save_to_file(&temp_file).unwrap();
        let loaded = FittedStandardScaler::load_from_file(&temp_file).unwrap();

        assert_eq!(loaded.n_features_in(), fitted.n_features_in());
        let a = fitted.transform(&data).unwrap();
        let b = loaded.transform(&data).unwrap();
        for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
            assert!((x - y).abs() < 1e-12);
        }

        std::fs::remove_file(temp_file).ok();
    }
}
