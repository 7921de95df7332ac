//! Configuration builder for random forest training.

use crate::error::TreeError;
use crate::forest::RandomForest;

/// How a forest combines the predictions of its trees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Aggregation {
    /// Each tree votes its leaf label; confidence is the share of votes for 1.
    #[default]
    MajorityVote,
    /// Average the leaf confidences; the label is 1 when the mean exceeds 0.5.
    MeanConfidence,
}

/// Whether to compute out-of-bag evaluation during training.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OobMode {
    /// Compute OOB accuracy and confusion matrix.
    Enabled,
    /// Skip OOB evaluation.
    Disabled,
}

/// Configuration for random forest training.
///
/// Every tree is grown in [`PredictorSearch::RandomForest`] mode on a
/// bootstrap sample of the training rows.
///
/// # Defaults
///
/// | Parameter            | Default        |
/// |----------------------|----------------|
/// | `aggregation`        | `MajorityVote` |
/// | `bootstrap_fraction` | 1.0            |
/// | `oob_mode`           | `Disabled`     |
/// | `seed`               | 42             |
///
/// [`PredictorSearch::RandomForest`]: crate::PredictorSearch::RandomForest
#[derive(Debug, Clone)]
pub struct RandomForestConfig {
    pub(crate) n_trees: usize,
    pub(crate) aggregation: Aggregation,
    pub(crate) bootstrap_fraction: f64,
    pub(crate) oob_mode: OobMode,
    pub(crate) seed: u64,
}

impl RandomForestConfig {
    /// Create a new config with the given number of trees.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidTreeCount`] if `n_trees` is zero.
    pub fn new(n_trees: usize) -> Result<Self, TreeError> {
        if n_trees == 0 {
            return Err(TreeError::InvalidTreeCount { n_trees });
        }
        Ok(Self {
            n_trees,
            aggregation: Aggregation::MajorityVote,
            bootstrap_fraction: 1.0,
            oob_mode: OobMode::Disabled,
            seed: 42,
        })
    }

    /// Set how tree predictions are combined.
    #[must_use]
    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Set the fraction of rows drawn (with replacement) for each tree.
    ///
    /// Validated at fit time; must be in (0.0, 1.0].
    #[must_use]
    pub fn with_bootstrap_fraction(mut self, fraction: f64) -> Self {
        self.bootstrap_fraction = fraction;
        self
    }

    /// Set whether OOB evaluation is computed.
    #[must_use]
    pub fn with_oob_mode(mut self, oob_mode: OobMode) -> Self {
        self.oob_mode = oob_mode;
        self
    }

    /// Set the master random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Return the number of trees.
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.n_trees
    }

    /// Return the aggregation rule.
    #[must_use]
    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    /// Return the bootstrap fraction.
    #[must_use]
    pub fn bootstrap_fraction(&self) -> f64 {
        self.bootstrap_fraction
    }

    /// Return the OOB mode.
    #[must_use]
    pub fn oob_mode(&self) -> OobMode {
        self.oob_mode
    }

    /// Return the master random seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Train a random forest.
    ///
    /// Each tree is fit in random-forest mode on its own bootstrap sample,
    /// with per-tree seeds drawn from the master seed.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`TreeError::InvalidBootstrapFraction`] | fraction not in (0.0, 1.0] |
    /// | Dataset errors | as for [`DecisionTree::fit`](crate::DecisionTree::fit) |
    pub fn fit(
        &self,
        predictors: &[usize],
        features: &[Vec<u8>],
        labels: &[u8],
    ) -> Result<RandomForest, TreeError> {
        crate::forest::train(self, predictors, features, labels)
    }
}

impl Default for RandomForestConfig {
    /// 100 trees with the defaults listed above.
    fn default() -> Self {
        Self {
            n_trees: 100,
            aggregation: Aggregation::MajorityVote,
            bootstrap_fraction: 1.0,
            oob_mode: OobMode::Disabled,
            seed: 42,
        }
    }
}
