//! Binary confusion matrix and per-class classification metrics.

use std::fmt;

use crate::error::TreeError;

/// A 2×2 confusion matrix for labels in {0, 1}.
///
/// Entry `matrix[true_label][predicted_label]` counts how many samples
/// with true label `true_label` were predicted as `predicted_label`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    matrix: [[usize; 2]; 2],
}

/// Precision, recall, and F1 score for one label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMetrics {
    /// The label these metrics describe.
    pub class: u8,
    /// Precision: TP / (TP + FP). 0.0 if nothing was predicted as this label.
    pub precision: f64,
    /// Recall: TP / (TP + FN). 0.0 if no true samples carry this label.
    pub recall: f64,
    /// F1: 2 * precision * recall / (precision + recall). 0.0 if both are zero.
    pub f1: f64,
    /// Number of true samples with this label.
    pub support: usize,
}

impl ConfusionMatrix {
    /// Build a confusion matrix from true and predicted labels.
    ///
    /// Any non-zero label is counted as 1.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`TreeError::EmptyDataset`] | Zero labels provided |
    /// | [`TreeError::RowCountMismatch`] | The two slices differ in length |
    pub fn from_labels(true_labels: &[u8], predicted: &[u8]) -> Result<Self, TreeError> {
        if true_labels.is_empty() {
            return Err(TreeError::EmptyDataset);
        }
        if true_labels.len() != predicted.len() {
            return Err(TreeError::RowCountMismatch {
                n_rows: predicted.len(),
                n_labels: true_labels.len(),
            });
        }
        let mut matrix = [[0usize; 2]; 2];
        for (&t, &p) in true_labels.iter().zip(predicted) {
            matrix[usize::from(t != 0)][usize::from(p != 0)] += 1;
        }
        Ok(Self { matrix })
    }

    /// Total number of samples counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    /// Overall accuracy: proportion of correct predictions.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        let correct = self.matrix[0][0] + self.matrix[1][1];
        match self.total() {
            0 => 0.0,
            total => correct as f64 / total as f64,
        }
    }

    /// Metrics for label 0 and label 1, in that order.
    #[must_use]
    pub fn class_metrics(&self) -> [ClassMetrics; 2] {
        [self.metrics_for(0), self.metrics_for(1)]
    }

    /// Metrics for the positive label (1).
    #[must_use]
    pub fn positive(&self) -> ClassMetrics {
        self.metrics_for(1)
    }

    fn metrics_for(&self, class: u8) -> ClassMetrics {
        let c = usize::from(class);
        let other = 1 - c;
        let tp = self.matrix[c][c];
        let fp = self.matrix[other][c];
        let fn_ = self.matrix[c][other];
        let support = tp + fn_;
        let precision = if tp + fp == 0 {
            0.0
        } else {
            tp as f64 / (tp + fp) as f64
        };
        let recall = if support == 0 {
            0.0
        } else {
            tp as f64 / support as f64
        };
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        ClassMetrics {
            class,
            precision,
            recall,
            f1,
            support,
        }
    }

    /// Return the underlying matrix rows.
    #[must_use]
    pub fn as_rows(&self) -> [[usize; 2]; 2] {
        self.matrix
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>8} {:>8} {:>8}", "", "pred_0", "pred_1")?;
        for (i, row) in self.matrix.iter().enumerate() {
            writeln!(f, "{:>8} {:>8} {:>8}", format!("true_{i}"), row[0], row[1])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_predictions() {
        let labels = [0, 0, 1, 1, 1];
        let cm = ConfusionMatrix::from_labels(&labels, &labels).unwrap();
        assert!((cm.accuracy() - 1.0).abs() < f64::EPSILON);
        for m in cm.class_metrics() {
            assert!((m.precision - 1.0).abs() < f64::EPSILON);
            assert!((m.recall - 1.0).abs() < f64::EPSILON);
            assert!((m.f1 - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn known_confusion_matrix() {
        // TP=2, FN=1, FP=1, TN=3
        let truth = [1, 1, 1, 0, 0, 0, 0];
        let pred = [1, 1, 0, 1, 0, 0, 0];
        let cm = ConfusionMatrix::from_labels(&truth, &pred).unwrap();
        assert_eq!(cm.as_rows(), [[3, 1], [1, 2]]);

        let pos = cm.positive();
        assert!((pos.precision - 2.0 / 3.0).abs() < 1e-10);
        assert!((pos.recall - 2.0 / 3.0).abs() < 1e-10);
        assert_eq!(pos.support, 3);

        let neg = cm.class_metrics()[0];
        assert!((neg.precision - 0.75).abs() < 1e-10);
        assert_eq!(neg.support, 4);

        assert!((cm.accuracy() - 5.0 / 7.0).abs() < 1e-10);
    }

    #[test]
    fn empty_labels_error() {
        let err = ConfusionMatrix::from_labels(&[], &[]).unwrap_err();
        assert!(matches!(err, TreeError::EmptyDataset));
    }

    #[test]
    fn length_mismatch_error() {
        let err = ConfusionMatrix::from_labels(&[0, 1], &[0]).unwrap_err();
        assert!(matches!(err, TreeError::RowCountMismatch { .. }));
    }

    #[test]
    fn no_positive_predictions() {
        let cm = ConfusionMatrix::from_labels(&[0, 1, 1], &[0, 0, 0]).unwrap();
        let pos = cm.positive();
        assert_eq!(pos.precision, 0.0);
        assert_eq!(pos.recall, 0.0);
        assert_eq!(pos.f1, 0.0);
    }

    #[test]
    fn display_formatting() {
        let cm = ConfusionMatrix::from_labels(&[0, 1], &[0, 1]).unwrap();
        let output = format!("{cm}");
        assert!(output.contains("pred_1"));
        assert!(output.contains("true_0"));
    }
}
