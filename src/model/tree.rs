//! Regression tree with variance-reduction splits.
//!
//! Nodes live in a flat arena indexed by `usize`, which keeps the fitted tree
//! a plain serializable struct with no boxing or recursion in the data
//! layout. Splitting greedily minimizes the summed squared error of the two
//! children, scanning candidate thresholds in sorted feature order.

use crate::model::error::ModelError;
use crate::model::Regressor;
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};

/// A single node in the fitted tree arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Node {
    /// Terminal node predicting the mean target of its samples.
    Leaf { value: f64 },
    /// Internal node: samples with `feature < threshold` go left.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Decision tree regressor configuration (unfitted).
#[derive(Debug, Clone)]
pub struct DecisionTreeRegressor {
    max_depth: usize,
    min_samples_split: usize,
    min_samples_leaf: usize,
}

impl Default for DecisionTreeRegressor {
    fn default() -> Self {
        Self {
            max_depth: 16,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

impl DecisionTreeRegressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.min_samples_split = min_samples_split;
        self
    }

    pub fn with_min_samples_leaf(mut self, min_samples_leaf: usize) -> Self {
        self.min_samples_leaf = min_samples_leaf;
        self
    }

    /// Fit the tree to the full sample set.
    ///
    /// # Errors
    /// Returns [`ModelError`] if the data is empty or the target length does
    /// not match the number of rows.
    pub fn fit(&self, data: &Matrix, target: &[f64]) -> Result<FittedDecisionTree, ModelError> {
        let indices: Vec<usize> = (0..data.n_rows()).collect();
        self.fit_on_indices(data, target, &indices)
    }

    /// Fit the tree to a subset of rows (used for bootstrap samples).
    pub fn fit_on_indices(
        &self,
        data: &Matrix,
        target: &[f64],
        indices: &[usize],
    ) -> Result<FittedDecisionTree, ModelError> {
        let rows = data.n_rows();
        if rows == 0 || indices.is_empty() {
            return Err(ModelError::EmptyData);
        }
        if target.len() != rows {
            return Err(ModelError::DimensionMismatch {
                expected: rows,
                got: target.len(),
            });
        }

        let mut nodes = Vec::new();
        self.build(data, target, indices.to_vec(), 0, &mut nodes);
        Ok(FittedDecisionTree { nodes })
    }

    /// Recursively build the subtree for `indices`, returning its node index.
    fn build(
        &self,
        data: &Matrix,
        target: &[f64],
        indices: Vec<usize>,
        depth: usize,
        nodes: &mut Vec<Node>,
    ) -> usize {
        let mean = indices.iter().map(|&i| target[i]).sum::<f64>() / indices.len() as f64;

        if depth >= self.max_depth || indices.len() < self.min_samples_split {
            nodes.push(Node::Leaf { value: mean });
            return nodes.len() - 1;
        }

        let split = match self.best_split(data, target, &indices) {
            Some(s) => s,
            None => {
                nodes.push(Node::Leaf { value: mean });
                return nodes.len() - 1;
            }
        };

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| data.get(i, split.feature) < split.threshold);

        // Reserve the split slot before recursing so child indices are stable.
        nodes.push(Node::Leaf { value: mean });
        let this = nodes.len() - 1;
        let left = self.build(data, target, left_idx, depth + 1, nodes);
        let right = self.build(data, target, right_idx, depth + 1, nodes);
        nodes[this] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        this
    }

    /// Find the split minimizing the summed squared error of the children.
    fn best_split(&self, data: &Matrix, target: &[f64], indices: &[usize]) -> Option<SplitPoint> {
        let n = indices.len();
        let cols = data.n_cols();
        let total_sum: f64 = indices.iter().map(|&i| target[i]).sum();
        let total_sq: f64 = indices.iter().map(|&i| target[i] * target[i]).sum();
        let parent_sse = total_sq - total_sum * total_sum / n as f64;

        let mut best: Option<SplitPoint> = None;
        let mut best_sse = parent_sse;

        for feature in 0..cols {
            let mut order: Vec<usize> = indices.to_vec();
            order.sort_by(|&a, &b| {
                data.get(a, feature)
                    .partial_cmp(&data.get(b, feature))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            // Scan split positions left to right with running sums.
            let mut left_sum = 0.0;
            let mut left_sq = 0.0;
            for pos in 1..n {
                let prev = order[pos - 1];
                left_sum += target[prev];
                left_sq += target[prev] * target[prev];

                let prev_val = data.get(prev, feature);
                let cur_val = data.get(order[pos], feature);
                if prev_val == cur_val {
                    continue;
                }
                if pos < self.min_samples_leaf || n - pos < self.min_samples_leaf {
                    continue;
                }

                let right_sum = total_sum - left_sum;
                let right_sq = total_sq - left_sq;
                let sse = (left_sq - left_sum * left_sum / pos as f64)
                    + (right_sq - right_sum * right_sum / (n - pos) as f64);

                if sse < best_sse - 1e-12 {
                    best_sse = sse;
                    best = Some(SplitPoint {
                        feature,
                        threshold: (prev_val + cur_val) / 2.0,
                    });
                }
            }
        }
        best
    }
}

struct SplitPoint {
    feature: usize,
    threshold: f64,
}

/// Fitted regression tree ready for inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedDecisionTree {
    pub nodes: Vec<Node>,
}

impl FittedDecisionTree {
    pub fn depth(&self) -> usize {
        self.depth_from(0)
    }

    fn depth_from(&self, idx: usize) -> usize {
        match &self.nodes[idx] {
            Node::Leaf { .. } => 0,
            Node::Split { left, right, .. } => {
                1 + self.depth_from(*left).max(self.depth_from(*right))
            }
        }
    }
}

impl Regressor for FittedDecisionTree {
    fn predict_row(&self, features: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] < *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_data() -> (Matrix, Vec<f64>) {
        // y = 0 for x < 0, y = 10 for x >= 0
        let xs = [-3.0, -2.0, -1.0, 1.0, 2.0, 3.0];
        let ys: Vec<f64> = xs.iter().map(|&x| if x < 0.0 { 0.0 } else { 10.0 }).collect();
        (Matrix::new(xs.to_vec(), 6, 1), ys)
    }

    #[test]
    fn test_tree_learns_step_function() {
        let (x, y) = step_data();
        let fitted = DecisionTreeRegressor::new().fit(&x, &y).unwrap();

        assert!((fitted.predict_row(&[-5.0]) - 0.0).abs() < 1e-12);
        assert!((fitted.predict_row(&[5.0]) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_tree_max_depth_zero_is_mean() {
        let (x, y) = step_data();
        let fitted = DecisionTreeRegressor::new()
            .with_max_depth(0)
            .fit(&x, &y)
            .unwrap();

        assert_eq!(fitted.nodes.len(), 1);
        assert!((fitted.predict_row(&[0.0]) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_tree_constant_target_is_single_leaf() {
        let x = Matrix::new(vec![1.0, 2.0, 3.0, 4.0], 4, 1);
        let y = vec![7.0; 4];
        let fitted = DecisionTreeRegressor::new().fit(&x, &y).unwrap();

        // No split improves SSE, so the root stays a leaf.
        assert_eq!(fitted.nodes.len(), 1);
        assert!((fitted.predict_row(&[2.5]) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_tree_interpolates_training_points() {
        let x = Matrix::new(vec![1.0, 2.0, 3.0, 4.0], 4, 1);
        let y = vec![1.0, 4.0, 9.0, 16.0];
        let fitted = DecisionTreeRegressor::new().fit(&x, &y).unwrap();

        for r in 0..4 {
            assert!((fitted.predict_row(x.row(r)) - y[r]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_tree_respects_max_depth() {
        let xs: Vec<f64> = (0..32).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| x * x).collect();
        let x = Matrix::new(xs, 32, 1);
        let fitted = DecisionTreeRegressor::new()
            .with_max_depth(3)
            .fit(&x, &ys)
            .unwrap();

        assert!(fitted.depth() <= 3);
    }

    #[test]
    fn test_tree_min_samples_leaf() {
        let (x, y) = step_data();
        let fitted = DecisionTreeRegressor::new()
            .with_min_samples_leaf(3)
            .fit(&x, &y)
            .unwrap();

        // Only the 3/3 split is allowed, which is exactly the step boundary.
        assert!((fitted.predict_row(&[-1.0]) - 0.0).abs() < 1e-12);
        assert!((fitted.predict_row(&[1.0]) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_tree_empty_data() {
        let x = Matrix::zeros(0, 1);
        assert!(matches!(
            DecisionTreeRegressor::new().fit(&x, &[]),
            Err(ModelError::EmptyData)
        ));
    }

    #[test]
    fn test_tree_two_features_picks_informative_one() {
        // Feature 1 carries the signal, feature 0 is constant.
        let data = Matrix::new(
            vec![1.0, -2.0, 1.0, -1.0, 1.0, 1.0, 1.0, 2.0],
            4,
            2,
        );
        let y = vec![0.0, 0.0, 5.0, 5.0];
        let fitted = DecisionTreeRegressor::new().fit(&data, &y).unwrap();

        match &fitted.nodes[0] {
            Node::Split { feature, .. } => assert_eq!(*feature, 1),
            Node::Leaf { .. } => panic!("expected root split"),
        }
    }

    #[test]
    fn test_tree_params_roundtrip() {
        let (x, y) = step_data();
        let fitted = DecisionTreeRegressor::new().fit(&x, &y).unwrap();

        let bytes = bincode::serialize(&fitted).unwrap();
        let restored: FittedDecisionTree = bincode::deserialize(&bytes).unwrap();
        assert_eq!(restored.nodes.len(), fitted.nodes.len());
        assert!((restored.predict_row(&[1.5]) - fitted.predict_row(&[1.5])).abs() < 1e-12);
    }
}
