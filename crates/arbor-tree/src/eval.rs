//! Stratified k-fold cross-validation for trees and forests.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::{info, instrument};

use crate::confusion::ConfusionMatrix;
use crate::error::TreeError;
use crate::model::ModelSpec;

/// Cross-validation configuration.
///
/// Construct via [`CrossValidation::new`], then chain `with_seed` if desired.
#[derive(Debug, Clone)]
pub struct CrossValidation {
    n_folds: usize,
    seed: u64,
}

impl Default for CrossValidation {
    /// Five folds, seed 42.
    fn default() -> Self {
        Self {
            n_folds: 5,
            seed: 42,
        }
    }
}

/// Results of stratified k-fold cross-validation.
#[derive(Debug)]
pub struct CrossValidationResult {
    /// Accuracy for each fold.
    pub fold_accuracies: Vec<f64>,
    /// Confusion matrix over all held-out predictions.
    pub confusion_matrix: ConfusionMatrix,
    /// Mean accuracy across folds.
    pub mean_accuracy: f64,
    /// Standard deviation of fold accuracies.
    pub std_accuracy: f64,
    /// Feature importances averaged over the fold models, summing to 1.0
    /// unless no fold model split at all.
    pub feature_importances: Vec<f64>,
    /// Number of folds.
    pub n_folds: usize,
    /// Total number of samples.
    pub n_samples: usize,
    /// Number of feature columns.
    pub n_features: usize,
}

impl CrossValidation {
    /// Create a new cross-validation config with the given number of folds.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidFoldCount`] if `n_folds` < 2.
    pub fn new(n_folds: usize) -> Result<Self, TreeError> {
        if n_folds < 2 {
            return Err(TreeError::InvalidFoldCount { n_folds });
        }
        Ok(Self { n_folds, seed: 42 })
    }

    /// Set the random seed for fold shuffling.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Return the number of folds.
    #[must_use]
    pub fn n_folds(&self) -> usize {
        self.n_folds
    }

    /// Run stratified k-fold cross-validation.
    ///
    /// Each fold trains `spec` on the remaining folds and predicts the
    /// held-out one. Fold `i` trains with the model seed offset by `i`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`TreeError::EmptyDataset`] | Zero samples |
    /// | [`TreeError::TooFewSamplesForFolds`] | A label has fewer samples than folds |
    /// | Other tree errors | From underlying training or prediction |
    #[instrument(skip_all, fields(n_folds = self.n_folds, n_samples = features.len()))]
    pub fn evaluate(
        &self,
        spec: &ModelSpec,
        predictors: &[usize],
        features: &[Vec<u8>],
        labels: &[u8],
        base_seed: u64,
    ) -> Result<CrossValidationResult, TreeError> {
        if features.is_empty() {
            return Err(TreeError::EmptyDataset);
        }
        if features.len() != labels.len() {
            return Err(TreeError::RowCountMismatch {
                n_rows: features.len(),
                n_labels: labels.len(),
            });
        }

        let n_samples = features.len();
        let n_features = features[0].len();
        let fold_assignments = self.stratified_split(labels)?;

        let mut fold_accuracies = Vec::with_capacity(self.n_folds);
        let mut all_true_labels = Vec::with_capacity(n_samples);
        let mut all_predicted = Vec::with_capacity(n_samples);
        let mut importance_totals = vec![0.0f64; n_features];

        for fold in 0..self.n_folds {
            let mut train_features = Vec::new();
            let mut train_labels = Vec::new();
            let mut test_features = Vec::new();
            let mut test_labels = Vec::new();

            for (i, &assigned_fold) in fold_assignments.iter().enumerate() {
                if assigned_fold == fold {
                    test_features.push(features[i].clone());
                    test_labels.push(labels[i]);
                } else {
                    train_features.push(features[i].clone());
                    train_labels.push(labels[i]);
                }
            }

            let model = spec
                .with_seed(base_seed.wrapping_add(fold as u64))
                .fit(predictors, &train_features, &train_labels)?;
            let predicted: Vec<u8> = model
                .predict_batch(&test_features)?
                .iter()
                .map(|p| p.label)
                .collect();

            let correct = predicted
                .iter()
                .zip(&test_labels)
                .filter(|&(p, l)| p == l)
                .count();
            let fold_accuracy = correct as f64 / test_labels.len() as f64;
            fold_accuracies.push(fold_accuracy);

            info!(fold, accuracy = fold_accuracy, "fold completed");

            for (total, imp) in importance_totals.iter_mut().zip(model.feature_importances()) {
                *total += imp;
            }
            all_true_labels.extend_from_slice(&test_labels);
            all_predicted.extend_from_slice(&predicted);
        }

        let mean_accuracy = fold_accuracies.iter().sum::<f64>() / self.n_folds as f64;
        let std_accuracy = {
            let variance = fold_accuracies
                .iter()
                .map(|&a| (a - mean_accuracy).powi(2))
                .sum::<f64>()
                / self.n_folds as f64;
            variance.sqrt()
        };

        let confusion_matrix = ConfusionMatrix::from_labels(&all_true_labels, &all_predicted)?;

        let sum: f64 = importance_totals.iter().sum();
        if sum > 0.0 {
            importance_totals.iter_mut().for_each(|v| *v /= sum);
        }

        info!(mean_accuracy, std_accuracy, "cross-validation complete");

        Ok(CrossValidationResult {
            fold_accuracies,
            confusion_matrix,
            mean_accuracy,
            std_accuracy,
            feature_importances: importance_totals,
            n_folds: self.n_folds,
            n_samples,
            n_features,
        })
    }

    /// Create stratified fold assignments.
    ///
    /// Groups samples by label, shuffles within each label, then
    /// round-robins across folds so each fold gets approximately
    /// equal representation of both labels.
    fn stratified_split(&self, labels: &[u8]) -> Result<Vec<usize>, TreeError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        let mut class_indices: [Vec<usize>; 2] = [Vec::new(), Vec::new()];
        for (i, &label) in labels.iter().enumerate() {
            class_indices[usize::from(label != 0)].push(i);
        }

        for (class, indices) in class_indices.iter().enumerate() {
            if !indices.is_empty() && indices.len() < self.n_folds {
                return Err(TreeError::TooFewSamplesForFolds {
                    class: class as u8,
                    count: indices.len(),
                    n_folds: self.n_folds,
                });
            }
        }

        let mut fold_assignments = vec![0usize; labels.len()];
        for indices in &mut class_indices {
            indices.shuffle(&mut rng);
            for (j, &idx) in indices.iter().enumerate() {
                fold_assignments[idx] = j % self.n_folds;
            }
        }

        Ok(fold_assignments)
    }
}
