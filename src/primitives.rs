//! Dense row-major matrix used throughout preprocessing and model code.
//!
//! Feature tables are small (a few thousand rows, single-digit columns), so a
//! flat `Vec<f64>` with explicit shape bookkeeping is all that is needed.

/// A dense 2D matrix with shape `(rows, cols)`, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Create a matrix from a flat row-major buffer.
    ///
    /// # Panics
    /// Panics if `data.len() != rows * cols`.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "Matrix data length {} does not match shape ({}, {})",
            data.len(),
            rows,
            cols
        );
        Self { data, rows, cols }
    }

    /// Create a zero-filled matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Build a matrix from per-sample rows.
    ///
    /// # Panics
    /// Panics if the rows have inconsistent lengths.
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let n_cols = rows.first().map(Vec::len).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * n_cols);
        for row in rows {
            assert_eq!(row.len(), n_cols, "Inconsistent row length in from_rows");
            data.extend_from_slice(row);
        }
        Self::new(data, rows.len(), n_cols)
    }

    /// `(rows, cols)` shape of the matrix.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn n_rows(&self) -> usize {
        self.rows
    }

    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Borrow row `r` as a slice.
    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn get(&self, r: usize, c: usize) -> f64 {
        self.data[r * self.cols + c]
    }

    pub fn set(&mut self, r: usize, c: usize, value: f64) {
        self.data[r * self.cols + c] = value;
    }

    /// Copy column `c` into a new vector.
    pub fn column(&self, c: usize) -> Vec<f64> {
        (0..self.rows).map(|r| self.get(r, c)).collect()
    }

    /// New matrix containing the given columns, in the given order.
    pub fn select_columns(&self, columns: &[usize]) -> Matrix {
        let mut data = Vec::with_capacity(self.rows * columns.len());
        for r in 0..self.rows {
            for &c in columns {
                data.push(self.get(r, c));
            }
        }
        Matrix::new(data, self.rows, columns.len())
    }

    /// Horizontally concatenate matrices with equal row counts.
    ///
    /// # Panics
    /// Panics if `parts` is empty or row counts disagree.
    pub fn hcat(parts: &[Matrix]) -> Matrix {
        assert!(!parts.is_empty(), "hcat of empty slice");
        let rows = parts[0].rows;
        let cols: usize = parts.iter().map(|m| m.cols).sum();
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for part in parts {
                assert_eq!(part.rows, rows, "hcat row count mismatch");
                data.extend_from_slice(part.row(r));
            }
        }
        Matrix::new(data, rows, cols)
    }

    /// Flat row-major view of the data.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
