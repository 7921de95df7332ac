//! Out-of-bag (OOB) evaluation for random forests.

use crate::confusion::ConfusionMatrix;
use crate::error::TreeError;
use crate::tree::DecisionTree;

/// Out-of-bag evaluation result.
#[derive(Debug, Clone)]
pub struct OobScore {
    /// OOB accuracy (fraction of correctly predicted OOB samples).
    pub accuracy: f64,
    /// Confusion matrix over the OOB-evaluated samples.
    pub confusion_matrix: ConfusionMatrix,
    /// Number of samples that had at least one OOB tree.
    pub n_oob_samples: usize,
}

/// Compute out-of-bag predictions and accuracy.
///
/// For each sample, only trees whose bootstrap did not contain it vote
/// (majority, ties go to 0). Samples with no OOB tree are skipped; when no
/// sample has one the result is an accuracy of 0 over zero samples.
pub(crate) fn compute_oob(
    trees: &[DecisionTree],
    features: &[Vec<u8>],
    labels: &[u8],
    oob_indices_per_tree: &[Vec<usize>],
) -> Result<OobScore, TreeError> {
    let n_samples = features.len();

    // (votes for 0, votes for 1) per sample.
    let mut votes = vec![(0usize, 0usize); n_samples];

    for (tree, oob_indices) in trees.iter().zip(oob_indices_per_tree) {
        for &sample_idx in oob_indices {
            let pred = tree.predict(&features[sample_idx])?;
            match pred.label {
                0 => votes[sample_idx].0 += 1,
                _ => votes[sample_idx].1 += 1,
            }
        }
    }

    let mut true_labels = Vec::new();
    let mut predicted = Vec::new();
    for (i, &(zeros, ones)) in votes.iter().enumerate() {
        if zeros + ones == 0 {
            continue;
        }
        true_labels.push(labels[i]);
        predicted.push(u8::from(ones > zeros));
    }

    let n_oob_samples = true_labels.len();
    if n_oob_samples == 0 {
        return Ok(OobScore {
            accuracy: 0.0,
            confusion_matrix: ConfusionMatrix::default(),
            n_oob_samples,
        });
    }

    let confusion_matrix = ConfusionMatrix::from_labels(&true_labels, &predicted)?;
    Ok(OobScore {
        accuracy: confusion_matrix.accuracy(),
        confusion_matrix,
        n_oob_samples,
    })
}
