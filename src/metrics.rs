//! Regression evaluation metrics.

/// Evaluation metrics for a set of regression predictions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    pub r2: f64,
}

impl Metrics {
    /// Compute all metrics for predictions against true targets.
    ///
    /// # Panics
    /// Panics if the slices are empty or have different lengths.
    pub fn compute(predictions: &[f64], targets: &[f64]) -> Metrics {
        assert_eq!(
            predictions.len(),
            targets.len(),
            "predictions and targets must have the same length"
        );
        assert!(!targets.is_empty(), "cannot compute metrics on empty data");

        let n = targets.len() as f64;
        let mse = predictions
            .iter()
            .zip(targets)
            .map(|(p, t)| (p - t).powi(2))
            .sum::<f64>()
            / n;
        let mae = predictions
            .iter()
            .zip(targets)
            .map(|(p, t)| (p - t).abs())
            .sum::<f64>()
            / n;

        let mean = targets.iter().sum::<f64>() / n;
        let ss_tot: f64 = targets.iter().map(|t| (t - mean).powi(2)).sum();
        let ss_res: f64 = predictions
            .iter()
            .zip(targets)
            .map(|(p, t)| (t - p).powi(2))
            .sum();
        // Constant target: perfect predictions give 1, anything else 0.
        let r2 = if ss_tot == 0.0 {
            if ss_res == 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            1.0 - ss_res / ss_tot
        };

        Metrics {
            mse,
            rmse: mse.sqrt(),
            mae,
            r2,
        }
    }
}
