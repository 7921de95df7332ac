//! Random forest training over bootstrap samples.
//!
//! Each tree is grown in random-forest predictor-search mode on a bootstrap
//! sample of the training rows. Trees are trained one after another; every
//! tree gets its own seed drawn from a master `ChaCha8Rng`, so the ensemble
//! is fully determined by the configured seed.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument};

use crate::config::{Aggregation, OobMode, RandomForestConfig};
use crate::error::TreeError;
use crate::oob::{OobScore, compute_oob};
use crate::split::PredictorSearch;
use crate::tree::{DecisionTree, DecisionTreeConfig, validate_dataset};

/// A fitted random forest ensemble.
#[derive(Debug, Clone)]
pub struct RandomForest {
    pub(crate) trees: Vec<DecisionTree>,
    pub(crate) n_features: usize,
    pub(crate) aggregation: Aggregation,
    pub(crate) oob_score: Option<OobScore>,
}

impl RandomForest {
    /// Return the OOB score, if it was computed.
    #[must_use]
    pub fn oob_score(&self) -> Option<&OobScore> {
        self.oob_score.as_ref()
    }

    /// Information-gain feature importances averaged over all trees.
    ///
    /// Normalized to sum to 1.0, or all zeros when no tree split.
    #[must_use]
    pub fn feature_importances(&self) -> Vec<f64> {
        let mut totals = vec![0.0f64; self.n_features];
        for tree in &self.trees {
            for (total, imp) in totals.iter_mut().zip(tree.feature_importances()) {
                *total += imp;
            }
        }
        let sum: f64 = totals.iter().sum();
        if sum > 0.0 {
            totals.iter_mut().for_each(|v| *v /= sum);
        }
        totals
    }
}

/// Generate a bootstrap sample and the out-of-bag indices.
fn bootstrap_sample(
    n_samples: usize,
    draw_count: usize,
    rng: &mut impl Rng,
) -> (Vec<usize>, Vec<usize>) {
    let mut in_bag = vec![false; n_samples];
    let mut bootstrap_indices = Vec::with_capacity(draw_count);
    for _ in 0..draw_count {
        let idx = rng.gen_range(0..n_samples);
        bootstrap_indices.push(idx);
        in_bag[idx] = true;
    }
    let oob_indices: Vec<usize> = (0..n_samples).filter(|&i| !in_bag[i]).collect();
    (bootstrap_indices, oob_indices)
}

/// Train the random forest ensemble.
#[instrument(skip_all, fields(n_trees = config.n_trees, n_samples = features.len()))]
pub(crate) fn train(
    config: &RandomForestConfig,
    predictors: &[usize],
    features: &[Vec<u8>],
    labels: &[u8],
) -> Result<RandomForest, TreeError> {
    let n_features = validate_dataset(predictors, features, labels)?;

    if !(config.bootstrap_fraction > 0.0 && config.bootstrap_fraction <= 1.0) {
        return Err(TreeError::InvalidBootstrapFraction {
            fraction: config.bootstrap_fraction,
        });
    }

    let n_samples = features.len();
    let draw_count = ((n_samples as f64) * config.bootstrap_fraction).ceil() as usize;

    info!(
        n_trees = config.n_trees,
        n_samples,
        n_features,
        n_predictors = predictors.len(),
        draw_count,
        "training random forest"
    );

    let mut master_rng = ChaCha8Rng::seed_from_u64(config.seed);
    let tree_seeds: Vec<u64> = (0..config.n_trees).map(|_| master_rng.r#gen()).collect();

    let mut trees = Vec::with_capacity(config.n_trees);
    let mut oob_indices_per_tree = Vec::with_capacity(config.n_trees);

    for (tree_idx, seed) in tree_seeds.into_iter().enumerate() {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (bootstrap_indices, oob_indices) = bootstrap_sample(n_samples, draw_count, &mut rng);

        let boot_features: Vec<Vec<u8>> = bootstrap_indices
            .iter()
            .map(|&i| features[i].clone())
            .collect();
        let boot_labels: Vec<u8> = bootstrap_indices.iter().map(|&i| labels[i]).collect();

        let tree = DecisionTreeConfig::new()
            .with_search(PredictorSearch::RandomForest)
            .with_seed(rng.r#gen())
            .fit(predictors, &boot_features, &boot_labels)?;

        debug!(tree_idx, n_nodes = tree.n_nodes(), depth = tree.depth(), "tree trained");

        trees.push(tree);
        oob_indices_per_tree.push(oob_indices);
    }

    let oob_score = match config.oob_mode {
        OobMode::Enabled => Some(compute_oob(&trees, features, labels, &oob_indices_per_tree)?),
        OobMode::Disabled => None,
    };

    info!(
        oob_accuracy = oob_score.as_ref().map(|s| s.accuracy),
        "random forest training complete"
    );

    Ok(RandomForest {
        trees,
        n_features,
        aggregation: config.aggregation,
        oob_score,
    })
}
