//! Data preprocessing transformers.
//!
//! Follows a fit/transform pattern: an unfitted [`Transformer`] learns
//! parameters from training data and produces a [`FittedTransformer`] that
//! can transform new data and serialize its learned parameters for
//! deployment.
//!
//! # Example
//!
//! ```
//! use insurance_ml::preprocessing::{
//!     ColumnSpec, ColumnTransformer, OneHotEncoder, StandardScaler, Transformer,
//!     FittedTransformer,
//! };
//! use insurance_ml::primitives::Matrix;
//!
//! // Two numeric columns, one integer-coded categorical column.
//! let data = Matrix::new(vec![1.0, 10.0, 0.0, 2.0, 20.0, 1.0, 3.0, 30.0, 0.0], 3, 3);
//! let ct = ColumnTransformer::new()
//!     .add_standard_scaler(StandardScaler::new(), ColumnSpec::Range(0..2))
//!     .add_one_hot_encoder(
//!         OneHotEncoder::new().with_drop_first(true),
//!         ColumnSpec::Indices(vec![2]),
//!     );
//! let fitted = ct.fit(&data).unwrap();
//! let transformed = fitted.transform(&data).unwrap();
//! assert_eq!(transformed.shape(), (3, 3));
//! ```

pub mod column_transformer;
pub mod encoding;
pub mod error;
pub mod scaling;
pub mod traits;

pub use column_transformer::{
    ColumnSpec, ColumnTransformer, ColumnTransformerParams, FittedColumnTransformer,
};
pub use encoding::{FittedOneHotEncoder, OneHotEncoder, OneHotEncoderParams};
pub use error::PreprocessingError;
pub use scaling::{FittedStandardScaler, StandardScaler, StandardScalerParams};
pub use traits::{FittedTransformer, Transformer};
