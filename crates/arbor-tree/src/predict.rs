//! Prediction outputs and batch prediction for trees and forests.

use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::config::Aggregation;
use crate::error::TreeError;
use crate::forest::RandomForest;
use crate::tree::DecisionTree;

/// A class decision with its confidence.
///
/// For a single tree, `confidence` is the fraction of label-1 training rows
/// at the leaf reached. For a forest it is the share of trees voting 1 or
/// the mean leaf confidence, depending on [`Aggregation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Predicted label, 0 or 1.
    pub label: u8,
    /// Confidence that the label is 1, in [0, 1].
    pub confidence: f64,
}

impl Prediction {
    pub(crate) fn new(label: u8, confidence: f64) -> Self {
        Self { label, confidence }
    }
}

impl DecisionTree {
    /// Classify a batch of data points in parallel.
    ///
    /// # Errors
    ///
    /// Returns the first error [`DecisionTree::predict`] reports for any point.
    pub fn predict_batch(&self, data_points: &[Vec<u8>]) -> Result<Vec<Prediction>, TreeError> {
        data_points
            .into_par_iter()
            .map(|point| self.predict(point))
            .collect()
    }
}

impl RandomForest {
    /// Classify one data point by combining every tree's prediction.
    ///
    /// Ties between labels go to 0 under both aggregation rules.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::MissingFeature`] or [`TreeError::NonBinaryValue`]
    /// when any tree cannot route the data point.
    pub fn predict(&self, data_point: &[u8]) -> Result<Prediction, TreeError> {
        let n = self.trees.len() as f64;
        match self.aggregation {
            Aggregation::MajorityVote => {
                let mut ones = 0usize;
                for tree in &self.trees {
                    if tree.predict(data_point)?.label == 1 {
                        ones += 1;
                    }
                }
                let share = ones as f64 / n;
                let label = u8::from(2 * ones > self.trees.len());
                Ok(Prediction::new(label, share))
            }
            Aggregation::MeanConfidence => {
                let mut total = 0.0f64;
                for tree in &self.trees {
                    total += tree.predict(data_point)?.confidence;
                }
                let mean = total / n;
                Ok(Prediction::new(u8::from(mean > 0.5), mean))
            }
        }
    }

    /// Classify a batch of data points in parallel.
    ///
    /// # Errors
    ///
    /// Returns the first error [`RandomForest::predict`] reports for any point.
    pub fn predict_batch(&self, data_points: &[Vec<u8>]) -> Result<Vec<Prediction>, TreeError> {
        data_points
            .into_par_iter()
            .map(|point| self.predict(point))
            .collect()
    }

    /// Return the number of trees in the ensemble.
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Borrow the fitted trees.
    #[must_use]
    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    /// Return the number of feature columns the forest was trained on.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Return the rule used to combine tree predictions.
    #[must_use]
    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }
}
