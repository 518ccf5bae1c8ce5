//! Insurance dataset loading and splitting.
//!
//! Reads the standard insurance CSV (`age,sex,bmi,children,smoker,region,
//! charges`), validates categorical labels per row, and provides a seeded
//! train/test split.

use crate::features::{FeatureRecord, Region, Sex, Smoker};
use crate::primitives::Matrix;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Error type for dataset loading.
#[derive(Debug)]
pub enum DatasetError {
    /// The file could not be read.
    Io(std::io::Error),
    /// A row failed to parse.
    Csv(csv::Error),
    /// A row carried an unknown categorical label.
    InvalidRow { row: usize, message: String },
    /// The file parsed but contained no rows.
    Empty,
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(err) => write!(f, "Failed to read dataset: {}", err),
            DatasetError::Csv(err) => write!(f, "Failed to parse dataset: {}", err),
            DatasetError::InvalidRow { row, message } => {
                write!(f, "Invalid dataset row {}: {}", row, message)
            }
            DatasetError::Empty => write!(f, "Dataset contains no rows"),
        }
    }
}

impl std::error::Error for DatasetError {}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        DatasetError::Io(err)
    }
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        DatasetError::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    age: u32,
    sex: String,
    bmi: f64,
    children: u32,
    smoker: String,
    region: String,
    charges: f64,
}

/// The insurance dataset: one validated feature record and one charge per
/// policyholder.
#[derive(Debug, Clone)]
pub struct InsuranceDataset {
    pub records: Vec<FeatureRecord>,
    pub charges: Vec<f64>,
}

impl InsuranceDataset {
    /// Load and validate the dataset from a CSV file with headers.
    ///
    /// # Errors
    /// Returns [`DatasetError`] on I/O failure, malformed rows, unknown
    /// categorical labels, or an empty file.
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path.as_ref())?;

        let mut records = Vec::new();
        let mut charges = Vec::new();
        for (i, result) in reader.deserialize::<CsvRow>().enumerate() {
            let row = result?;
            // Header is line 1, first data row is line 2.
            let line = i + 2;
            let sex = Sex::parse(&row.sex).ok_or_else(|| DatasetError::InvalidRow {
                row: line,
                message: format!("unknown sex label '{}'", row.sex),
            })?;
            let smoker = Smoker::parse(&row.smoker).ok_or_else(|| DatasetError::InvalidRow {
                row: line,
                message: format!("unknown smoker label '{}'", row.smoker),
            })?;
            let region = Region::parse(&row.region).ok_or_else(|| DatasetError::InvalidRow {
                row: line,
                message: format!("unknown region label '{}'", row.region),
            })?;

            records.push(FeatureRecord {
                age: row.age,
                sex,
                bmi: row.bmi,
                children: row.children,
                smoker,
                region,
            });
            charges.push(row.charges);
        }

        if records.is_empty() {
            return Err(DatasetError::Empty);
        }
        Ok(InsuranceDataset { records, charges })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Raw feature matrix in the fixed column order `[age, bmi, children,
    /// sex, smoker, region]`.
    pub fn to_feature_matrix(&self) -> Matrix {
        let rows: Vec<Vec<f64>> = self.records.iter().map(|r| r.to_raw_row()).collect();
        Matrix::from_rows(&rows)
    }

    /// Split into (train, test) by a seeded shuffle. `test_size` is the
    /// fraction of rows assigned to the test set, rounded down but at least
    /// one row when the dataset has two or more.
    pub fn train_test_split(&self, test_size: f64, seed: u64) -> (InsuranceDataset, InsuranceDataset) {
        let n = self.len();
        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let mut n_test = (n as f64 * test_size) as usize;
        if n_test == 0 && n > 1 {
            n_test = 1;
        }

        let take = |idx: &[usize]| InsuranceDataset {
            records: idx.iter().map(|&i| self.records[i].clone()).collect(),
            charges: idx.iter().map(|&i| self.charges[i]).collect(),
        };
        let (test_idx, train_idx) = indices.split_at(n_test);
        (take(train_idx), take(test_idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
age,sex,bmi,children,smoker,region,charges
19,female,27.9,0,yes,southwest,16884.924
18,male,33.77,1,no,southeast,1725.5523
28,male,33.0,3,no,southeast,4449.462
33,male,22.705,0,no,northwest,21984.47061
32,male,28.88,0,no,northwest,3866.8552
31,female,25.74,0,no,southeast,3756.6216
46,female,33.44,1,no,southeast,8240.5896
37,female,27.74,3,no,northwest,7281.5056
60,female,25.84,0,no,northeast,28923.13692
25,male,26.22,0,no,northeast,2721.3208
";

    fn write_sample() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_csv() {
        let file = write_sample();
        let dataset = InsuranceDataset::load_csv(file.path()).unwrap();

        assert_eq!(dataset.len(), 10);
        assert_eq!(dataset.records[0].age, 19);
        assert_eq!(dataset.records[0].smoker, Smoker::Yes);
        assert!((dataset.charges[0] - 16884.924).abs() < 1e-9);
    }

    #[test]
    fn test_load_csv_invalid_label_names_row() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "age,sex,bmi,children,smoker,region,charges").unwrap();
        writeln!(file, "19,female,27.9,0,yes,southwest,16884.9").unwrap();
        writeln!(file, "20,robot,25.0,0,no,southwest,1000.0").unwrap();

        let err = InsuranceDataset::load_csv(file.path()).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidRow { row: 3, .. }));
        assert!(err.to_string().contains("robot"));
    }

    #[test]
    fn test_load_csv_missing_file() {
        let err = InsuranceDataset::load_csv("/nonexistent/insurance.csv").unwrap_err();
        assert!(matches!(err, DatasetError::Csv(_) | DatasetError::Io(_)));
    }

    #[test]
    fn test_feature_matrix_shape_and_order() {
        let file = write_sample();
        let dataset = InsuranceDataset::load_csv(file.path()).unwrap();
        let matrix = dataset.to_feature_matrix();

        assert_eq!(matrix.shape(), (10, 6));
        // Row 0: 19, female, 27.9, 0, yes, southwest
        assert_eq!(matrix.row(0), &[19.0, 27.9, 0.0, 0.0, 1.0, 3.0]);
    }

    #[test]
    fn test_train_test_split_sizes() {
        let file = write_sample();
        let dataset = InsuranceDataset::load_csv(file.path()).unwrap();
        let (train, test) = dataset.train_test_split(0.2, 42);

        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);
        assert_eq!(train.len() + test.len(), dataset.len());
    }

    #[test]
    fn test_train_test_split_deterministic() {
        let file = write_sample();
        let dataset = InsuranceDataset::load_csv(file.path()).unwrap();
        let (train_a, _) = dataset.train_test_split(0.2, 42);
        let (train_b, _) = dataset.train_test_split(0.2, 42);

        assert_eq!(train_a.charges, train_b.charges);
    }

    #[test]
    fn test_train_test_split_partitions_rows() {
        let file = write_sample();
        let dataset = InsuranceDataset::load_csv(file.path()).unwrap();
        let (train, test) = dataset.train_test_split(0.3, 7);

        let mut all: Vec<f64> = train.charges.iter().chain(&test.charges).copied().collect();
        all.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let mut expected = dataset.charges.clone();
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(all, expected);
    }
}
