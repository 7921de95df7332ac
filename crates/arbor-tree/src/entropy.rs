//! Label counting, binary entropy, and information gain.

use std::fmt;

/// Gains at or below this magnitude are treated as exactly zero.
///
/// A split that preserves the parent's class ratio has a true gain of 0, but
/// the weighted sum of child entropies can land a few ulps away from the
/// parent entropy.
pub(crate) const GAIN_TOLERANCE: f64 = 1e-12;

/// Binary entropy in bits, always in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Entropy(f64);

impl Entropy {
    /// Return the raw entropy value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Entropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

/// Counts of each label over a set of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelCounts {
    /// Rows labelled 0.
    pub zeros: usize,
    /// Rows labelled 1.
    pub ones: usize,
}

impl LabelCounts {
    /// Count the labels in a slice.
    ///
    /// Labels are not validated: any non-zero value counts as 1. Training
    /// rejects such labels before counting, so callers building counts by
    /// hand must pass 0/1 labels to get the same numbers a tree would.
    #[must_use]
    pub fn from_labels(labels: &[u8]) -> Self {
        let ones = labels.iter().filter(|&&l| l != 0).count();
        Self {
            zeros: labels.len() - ones,
            ones,
        }
    }

    /// Count the labels of the rows selected by `rows`.
    ///
    /// Every index in `rows` must be in bounds for `labels`.
    #[must_use]
    pub(crate) fn from_rows(labels: &[u8], rows: &[usize]) -> Self {
        let ones = rows.iter().filter(|&&r| labels[r] != 0).count();
        Self {
            zeros: rows.len() - ones,
            ones,
        }
    }

    /// Total number of rows counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.zeros + self.ones
    }

    /// `true` when no rows were counted or every row has the same label.
    #[must_use]
    pub fn is_pure(&self) -> bool {
        self.zeros == 0 || self.ones == 0
    }

    /// Fraction of rows labelled 1, or 0.0 when empty.
    #[must_use]
    pub fn fraction_ones(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            n => self.ones as f64 / n as f64,
        }
    }

    /// The label with the larger count. Ties go to 0.
    #[must_use]
    pub fn majority(&self) -> u8 {
        if self.ones > self.zeros { 1 } else { 0 }
    }

    /// Binary entropy of these counts.
    #[must_use]
    pub fn entropy(&self) -> Entropy {
        entropy(*self)
    }
}

/// Binary entropy `-p1·log2(p1) - p0·log2(p0)`.
///
/// Returns 0 for an empty or pure set of labels.
#[must_use]
pub fn entropy(counts: LabelCounts) -> Entropy {
    if counts.is_pure() {
        return Entropy(0.0);
    }
    let p1 = counts.fraction_ones();
    let p0 = 1.0 - p1;
    Entropy(-p1 * p1.log2() - p0 * p0.log2())
}

/// Entropy reduction from splitting `parent` into `left` and `right`.
///
/// Computes `H(parent) - |L|/|P|·H(left) - |R|/|P|·H(right)`. The result is
/// clamped at 0 and values within [`GAIN_TOLERANCE`] of zero are returned as
/// exactly 0.0.
#[must_use]
pub fn information_gain(parent: LabelCounts, left: LabelCounts, right: LabelCounts) -> f64 {
    let n = parent.total();
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    let weighted = (left.total() as f64 * left.entropy().value()
        + right.total() as f64 * right.entropy().value())
        / n;
    let gain = parent.entropy().value() - weighted;
    if gain <= GAIN_TOLERANCE { 0.0 } else { gain }
}
