use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument};

use crate::{
    TreeError,
    entropy::LabelCounts,
    node::{FeatureIndex, Node, NodeIndex},
    predict::Prediction,
    split::{PredictorSearch, find_best_predictor},
};

/// Configuration for a single binary decision tree.
///
/// Construct via [`DecisionTreeConfig::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter | Default      |
/// |-----------|--------------|
/// | `search`  | `Exhaustive` |
/// | `seed`    | 42           |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionTreeConfig {
    pub(crate) search: PredictorSearch,
    pub(crate) seed: u64,
}

impl DecisionTreeConfig {
    /// Create a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            search: PredictorSearch::Exhaustive,
            seed: 42,
        }
    }

    /// Set the predictor search mode.
    #[must_use]
    pub fn with_search(mut self, search: PredictorSearch) -> Self {
        self.search = search;
        self
    }

    /// Set the random seed used by [`DecisionTree::fit`].
    ///
    /// Only consulted in [`PredictorSearch::RandomForest`] mode.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Return the predictor search mode.
    #[must_use]
    pub fn search(&self) -> PredictorSearch {
        self.search
    }

    /// Return the random seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Build an unfitted tree and fit it on the given dataset.
    ///
    /// # Errors
    ///
    /// Same as [`DecisionTree::fit`].
    pub fn fit(
        &self,
        predictors: &[usize],
        features: &[Vec<u8>],
        labels: &[u8],
    ) -> Result<DecisionTree, TreeError> {
        let mut tree = DecisionTree::new(*self);
        tree.fit(predictors, features, labels)?;
        Ok(tree)
    }
}

impl Default for DecisionTreeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Check a training set and its candidate predictors.
///
/// Returns the number of feature columns.
pub(crate) fn validate_dataset(
    predictors: &[usize],
    features: &[Vec<u8>],
    labels: &[u8],
) -> Result<usize, TreeError> {
    if features.is_empty() {
        return Err(TreeError::EmptyDataset);
    }
    if features.len() != labels.len() {
        return Err(TreeError::RowCountMismatch {
            n_rows: features.len(),
            n_labels: labels.len(),
        });
    }

    let n_features = features[0].len();
    for (sample_index, row) in features.iter().enumerate() {
        if row.len() != n_features {
            return Err(TreeError::FeatureCountMismatch {
                expected: n_features,
                got: row.len(),
                sample_index,
            });
        }
        if let Some((feature_index, &value)) = row.iter().enumerate().find(|(_, v)| **v > 1) {
            return Err(TreeError::NonBinaryFeature {
                sample_index,
                feature_index,
                value,
            });
        }
    }

    if let Some((sample_index, &value)) = labels.iter().enumerate().find(|(_, v)| **v > 1) {
        return Err(TreeError::NonBinaryLabel {
            sample_index,
            value,
        });
    }

    let mut seen = vec![false; n_features];
    for &predictor in predictors {
        if predictor >= n_features {
            return Err(TreeError::PredictorOutOfRange {
                predictor,
                n_features,
            });
        }
        if seen[predictor] {
            return Err(TreeError::DuplicatePredictor { predictor });
        }
        seen[predictor] = true;
    }

    Ok(n_features)
}

/// Push a leaf for the rows summarized by `counts`.
fn make_leaf(arena: &mut Vec<Node>, counts: LabelCounts) -> NodeIndex {
    let idx = arena.len();
    arena.push(Node::Leaf {
        class_label: counts.majority(),
        confidence: counts.fraction_ones(),
        n_samples: counts.total(),
    });
    NodeIndex::new(idx)
}

/// Recursively partition `rows` and grow the arena.
///
/// Returns the [`NodeIndex`] of the node just created in `arena`. Every path
/// consumes at least one predictor per level, so recursion depth is bounded
/// by `remaining.len()`.
fn fit_helper<R: Rng>(
    remaining: &[FeatureIndex],
    features: &[Vec<u8>],
    labels: &[u8],
    rows: &[usize],
    search: PredictorSearch,
    rng: &mut R,
    arena: &mut Vec<Node>,
) -> NodeIndex {
    let counts = LabelCounts::from_rows(labels, rows);

    if remaining.is_empty() || counts.is_pure() {
        return make_leaf(arena, counts);
    }

    let choice = find_best_predictor(remaining, features, labels, rows, search, rng);
    let Some(split) = choice.best else {
        return make_leaf(arena, counts);
    };

    // Reserve the slot so the root stays at index 0; overwritten below.
    let node_idx = arena.len();
    arena.push(Node::Leaf {
        class_label: 0,
        confidence: 0.0,
        n_samples: 0,
    });

    let left = fit_helper(
        &choice.remaining,
        features,
        labels,
        &split.left_rows,
        search,
        rng,
        arena,
    );
    let right = fit_helper(
        &choice.remaining,
        features,
        labels,
        &split.right_rows,
        search,
        rng,
        arena,
    );

    arena[node_idx] = Node::Internal {
        split_predictor: split.predictor,
        left,
        right,
        n_samples: rows.len(),
        information_gain: split.gain,
    };

    NodeIndex::new(node_idx)
}

/// A binary decision tree over 0/1 features.
///
/// Stored as an arena-based `Vec<Node>` with index references. The tree is
/// empty until [`fit`](Self::fit) succeeds; after that it is only read.
/// Nodes can only be created by fitting, so every child index and split
/// predictor in the arena is in range.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    root: Option<NodeIndex>,
    search: PredictorSearch,
    seed: u64,
    n_features: usize,
}

impl DecisionTree {
    /// Create an unfitted tree.
    #[must_use]
    pub fn new(config: DecisionTreeConfig) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            search: config.search,
            seed: config.seed,
            n_features: 0,
        }
    }

    /// Induce the tree from a binary training set.
    ///
    /// `predictors` lists the feature columns that may be split on; their
    /// order is kept and decides which predictor wins a tie in gain.
    /// `features[sample_idx][feature_idx]` is row-major, `labels[sample_idx]`
    /// is 0 or 1. In random-forest mode candidates are drawn from a
    /// `ChaCha8Rng` seeded with the configured seed.
    ///
    /// # Errors
    ///
    /// | Variant | When |
    /// |---|---|
    /// | [`TreeError::EmptyDataset`] | `features` is empty |
    /// | [`TreeError::RowCountMismatch`] | `features.len() != labels.len()` |
    /// | [`TreeError::FeatureCountMismatch`] | rows have inconsistent lengths |
    /// | [`TreeError::NonBinaryFeature`] | a feature value is not 0 or 1 |
    /// | [`TreeError::NonBinaryLabel`] | a label is not 0 or 1 |
    /// | [`TreeError::PredictorOutOfRange`] | a predictor is not a feature column |
    /// | [`TreeError::DuplicatePredictor`] | a predictor is listed twice |
    pub fn fit(
        &mut self,
        predictors: &[usize],
        features: &[Vec<u8>],
        labels: &[u8],
    ) -> Result<(), TreeError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.fit_with_rng(predictors, features, labels, &mut rng)
    }

    /// Same as [`fit`](Self::fit), drawing random-forest candidates from `rng`.
    ///
    /// # Errors
    ///
    /// Same as [`fit`](Self::fit). On error the tree is left unchanged.
    #[instrument(
        skip_all,
        fields(n_samples = features.len(), n_predictors = predictors.len(), search = ?self.search)
    )]
    pub fn fit_with_rng<R: Rng>(
        &mut self,
        predictors: &[usize],
        features: &[Vec<u8>],
        labels: &[u8],
        rng: &mut R,
    ) -> Result<(), TreeError> {
        let n_features = validate_dataset(predictors, features, labels)?;

        let remaining: Vec<FeatureIndex> = predictors.iter().map(|&p| FeatureIndex::new(p)).collect();
        let rows: Vec<usize> = (0..features.len()).collect();
        let mut arena: Vec<Node> = Vec::new();

        let root = fit_helper(
            &remaining,
            features,
            labels,
            &rows,
            self.search,
            rng,
            &mut arena,
        );

        self.nodes = arena;
        self.root = Some(root);
        self.n_features = n_features;

        debug!(
            n_nodes = self.n_nodes(),
            n_leaves = self.n_leaves(),
            depth = self.depth(),
            "decision tree built"
        );
        Ok(())
    }

    /// Classify one data point.
    ///
    /// Starting at the root, each internal node reads the data point's value
    /// at its split predictor and descends left on 0 and right on 1 until a
    /// leaf is reached.
    ///
    /// # Errors
    ///
    /// | Variant | When |
    /// |---|---|
    /// | [`TreeError::UnfittedModel`] | `fit` has not succeeded yet |
    /// | [`TreeError::MissingFeature`] | the data point is too short for a tested feature |
    /// | [`TreeError::NonBinaryValue`] | a tested value is not 0 or 1 |
    pub fn predict(&self, data_point: &[u8]) -> Result<Prediction, TreeError> {
        let mut idx = self.root.ok_or(TreeError::UnfittedModel)?;
        loop {
            match &self.nodes[idx.index()] {
                Node::Leaf {
                    class_label,
                    confidence,
                    ..
                } => return Ok(Prediction::new(*class_label, *confidence)),
                Node::Internal {
                    split_predictor,
                    left,
                    right,
                    ..
                } => {
                    let feature = split_predictor.index();
                    let value = *data_point.get(feature).ok_or(TreeError::MissingFeature {
                        feature,
                        got: data_point.len(),
                    })?;
                    idx = match value {
                        0 => *left,
                        1 => *right,
                        value => return Err(TreeError::NonBinaryValue { feature, value }),
                    };
                }
            }
        }
    }

    /// Return `true` once the tree has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.root.is_some()
    }

    /// Return the root index, or `None` before fitting.
    #[must_use]
    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Borrow a node by index.
    #[must_use]
    pub fn node(&self, idx: NodeIndex) -> Option<&Node> {
        self.nodes.get(idx.index())
    }

    /// Borrow the node arena.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return the predictor search mode.
    #[must_use]
    pub fn search(&self) -> PredictorSearch {
        self.search
    }

    /// Return the number of feature columns seen during fitting.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Return the total number of nodes in the tree (both internal and leaves).
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of leaf nodes.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Return the maximum depth of the tree.
    ///
    /// A single-leaf tree and an unfitted tree both have depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };

        let mut max_depth = 0usize;
        let mut stack = vec![(root, 0usize)];
        while let Some((idx, d)) = stack.pop() {
            match &self.nodes[idx.index()] {
                Node::Leaf { .. } => max_depth = max_depth.max(d),
                Node::Internal { left, right, .. } => {
                    stack.push((*left, d + 1));
                    stack.push((*right, d + 1));
                }
            }
        }
        max_depth
    }

    /// Information-gain feature importances.
    ///
    /// Each internal node contributes `n_samples * information_gain` to its
    /// split predictor; totals are normalized to sum to 1.0. Returns all
    /// zeros when the tree is a single leaf.
    #[must_use]
    pub fn feature_importances(&self) -> Vec<f64> {
        let mut totals = vec![0.0f64; self.n_features];
        for node in &self.nodes {
            if let Node::Internal {
                split_predictor,
                n_samples,
                information_gain,
                ..
            } = node
            {
                totals[split_predictor.index()] += *n_samples as f64 * information_gain;
            }
        }
        let sum: f64 = totals.iter().sum();
        if sum > 0.0 {
            totals.iter_mut().for_each(|v| *v /= sum);
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn and_data() -> (Vec<Vec<u8>>, Vec<u8>) {
        (
            vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]],
            vec![0, 0, 0, 1],
        )
    }

    /// All 2^n rows over `n` binary features.
    fn truth_table(n: usize) -> Vec<Vec<u8>> {
        (0..1usize << n)
            .map(|i| (0..n).map(|b| ((i >> b) & 1) as u8).collect())
            .collect()
    }

    /// Walk the tree checking structural invariants; returns leaf rows seen.
    fn check_subtree(
        tree: &DecisionTree,
        idx: NodeIndex,
        used: &mut Vec<usize>,
    ) -> usize {
        match tree.node(idx).expect("child index inside arena") {
            Node::Leaf {
                confidence,
                n_samples,
                ..
            } => {
                assert!((0.0..=1.0).contains(confidence));
                *n_samples
            }
            Node::Internal {
                split_predictor,
                left,
                right,
                n_samples,
                information_gain,
            } => {
                assert!(*information_gain > 0.0);
                assert!(
                    !used.contains(&split_predictor.index()),
                    "predictor {split_predictor} reused on a path"
                );
                used.push(split_predictor.index());
                let l = check_subtree(tree, *left, used);
                let r = check_subtree(tree, *right, used);
                used.pop();
                assert_eq!(l, tree.node(*left).unwrap().n_samples());
                assert_eq!(r, tree.node(*right).unwrap().n_samples());
                assert_eq!(l + r, *n_samples);
                *n_samples
            }
        }
    }

    #[test]
    fn and_function_scenario() {
        let (features, labels) = and_data();
        let tree = DecisionTreeConfig::new().fit(&[0, 1], &features, &labels).unwrap();

        match tree.node(tree.root().unwrap()).unwrap() {
            Node::Internal { split_predictor, .. } => assert_eq!(split_predictor.index(), 0),
            Node::Leaf { .. } => panic!("root should split"),
        }

        let p = tree.predict(&[1, 1]).unwrap();
        assert_eq!((p.label, p.confidence), (1, 1.0));

        let p = tree.predict(&[0, 1]).unwrap();
        assert_eq!((p.label, p.confidence), (0, 0.0));

        let p = tree.predict(&[1, 0]).unwrap();
        assert_eq!((p.label, p.confidence), (0, 0.0));
    }

    #[test]
    fn pure_labels_single_leaf() {
        let features = vec![vec![0, 1], vec![1, 0], vec![1, 1]];
        let tree = DecisionTreeConfig::new().fit(&[0, 1], &features, &[1, 1, 1]).unwrap();
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(
            tree.nodes()[0],
            Node::Leaf {
                class_label: 1,
                confidence: 1.0,
                n_samples: 3
            }
        );
    }

    #[test]
    fn no_predictors_majority_leaf() {
        let features = vec![vec![0], vec![1]];
        let tree = DecisionTreeConfig::new().fit(&[], &features, &[0, 1]).unwrap();
        assert_eq!(tree.n_nodes(), 1);
        let p = tree.predict(&[1]).unwrap();
        assert_eq!(p.label, 0);
        assert!((p.confidence - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn majority_leaf_when_no_gain() {
        // XOR on two features: no single split has positive gain.
        let features = truth_table(2);
        let labels: Vec<u8> = features.iter().map(|r| r[0] ^ r[1]).collect();
        let tree = DecisionTreeConfig::new().fit(&[0, 1], &features, &labels).unwrap();
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn fits_noiseless_data_exactly() {
        // y = (x0 AND x1) OR x2, with a noise-free irrelevant x3.
        let features = truth_table(4);
        let labels: Vec<u8> = features.iter().map(|r| (r[0] & r[1]) | r[2]).collect();
        let tree = DecisionTreeConfig::new()
            .fit(&[0, 1, 2, 3], &features, &labels)
            .unwrap();

        for (row, &label) in features.iter().zip(&labels) {
            let p = tree.predict(row).unwrap();
            assert_eq!(p.label, label);
            assert!((p.confidence - f64::from(label)).abs() < f64::EPSILON);
        }
        // x3 never carries information.
        assert_eq!(tree.feature_importances()[3], 0.0);
    }

    #[test]
    fn structural_invariants_hold() {
        let features = truth_table(5);
        let labels: Vec<u8> = features
            .iter()
            .map(|r| (r[0] | (r[1] & r[3])) ^ (r[4] & r[2] & r[0]))
            .collect();
        for search in [PredictorSearch::Exhaustive, PredictorSearch::RandomForest] {
            let tree = DecisionTreeConfig::new()
                .with_search(search)
                .with_seed(5)
                .fit(&[0, 1, 2, 3, 4], &features, &labels)
                .unwrap();
            let total = check_subtree(&tree, tree.root().unwrap(), &mut Vec::new());
            assert_eq!(total, features.len());
            assert!(tree.depth() <= 5);
            assert_eq!(tree.n_nodes(), 2 * tree.n_leaves() - 1);
        }
    }

    #[test]
    fn leaf_confidence_matches_reaching_rows() {
        // Feature 1 is duplicated in rows with different labels, so leaves stay mixed.
        let features = vec![vec![0, 0], vec![0, 0], vec![0, 0], vec![1, 1], vec![1, 1]];
        let labels = vec![0, 0, 1, 1, 1];
        let tree = DecisionTreeConfig::new().fit(&[0, 1], &features, &labels).unwrap();
        let p = tree.predict(&[0, 0]).unwrap();
        assert_eq!(p.label, 0);
        assert!((p.confidence - 1.0 / 3.0).abs() < 1e-12);
        let p = tree.predict(&[1, 1]).unwrap();
        assert_eq!((p.label, p.confidence), (1, 1.0));
    }

    #[test]
    fn random_forest_mode_is_reproducible() {
        let features = truth_table(6);
        let labels: Vec<u8> = features.iter().map(|r| (r[0] & r[5]) | (r[2] & !r[3] & 1)).collect();
        let predictors: Vec<usize> = (0..6).collect();
        let config = DecisionTreeConfig::new()
            .with_search(PredictorSearch::RandomForest)
            .with_seed(99);
        let a = config.fit(&predictors, &features, &labels).unwrap();
        let b = config.fit(&predictors, &features, &labels).unwrap();
        assert_eq!(a.nodes(), b.nodes());

        let mut rng_a = ChaCha8Rng::seed_from_u64(7);
        let mut rng_b = ChaCha8Rng::seed_from_u64(7);
        let mut c = DecisionTree::new(config);
        let mut d = DecisionTree::new(config);
        c.fit_with_rng(&predictors, &features, &labels, &mut rng_a).unwrap();
        d.fit_with_rng(&predictors, &features, &labels, &mut rng_b).unwrap();
        assert_eq!(c.nodes(), d.nodes());
    }

    #[test]
    fn refit_replaces_previous_tree() {
        let (features, labels) = and_data();
        let mut tree = DecisionTree::new(DecisionTreeConfig::new());
        tree.fit(&[0, 1], &features, &labels).unwrap();
        assert!(tree.n_nodes() > 1);
        tree.fit(&[0, 1], &features, &[1, 1, 1, 1]).unwrap();
        assert_eq!(tree.n_nodes(), 1);
    }

    #[test]
    fn failed_fit_leaves_tree_untouched() {
        let (features, labels) = and_data();
        let mut tree = DecisionTree::new(DecisionTreeConfig::new());
        tree.fit(&[0, 1], &features, &labels).unwrap();
        let before = tree.nodes().to_vec();
        assert!(tree.fit(&[0, 1], &features, &[0, 1]).is_err());
        assert_eq!(tree.nodes(), before.as_slice());
    }

    #[test]
    fn predict_before_fit_errors() {
        let tree = DecisionTree::new(DecisionTreeConfig::new());
        assert!(!tree.is_fitted());
        assert!(matches!(tree.predict(&[0, 1]), Err(TreeError::UnfittedModel)));
    }

    #[test]
    fn missing_feature_errors() {
        let (features, labels) = and_data();
        let tree = DecisionTreeConfig::new().fit(&[0, 1], &features, &labels).unwrap();
        // Root tests feature 0 (value 1 → right), right child tests feature 1.
        let err = tree.predict(&[1]).unwrap_err();
        assert!(matches!(err, TreeError::MissingFeature { feature: 1, got: 1 }));
        // The left branch is a leaf, so a short point routed there is fine.
        assert_eq!(tree.predict(&[0]).unwrap().label, 0);
    }

    #[test]
    fn non_binary_prediction_value_errors() {
        let (features, labels) = and_data();
        let tree = DecisionTreeConfig::new().fit(&[0, 1], &features, &labels).unwrap();
        let err = tree.predict(&[2, 0]).unwrap_err();
        assert!(matches!(err, TreeError::NonBinaryValue { feature: 0, value: 2 }));
    }

    #[test]
    fn empty_dataset_error() {
        let err = DecisionTreeConfig::new().fit(&[], &[], &[]).unwrap_err();
        assert!(matches!(err, TreeError::EmptyDataset));
    }

    #[test]
    fn row_count_mismatch_error() {
        let (features, _) = and_data();
        let err = DecisionTreeConfig::new().fit(&[0], &features, &[0, 1]).unwrap_err();
        assert!(matches!(err, TreeError::RowCountMismatch { n_rows: 4, n_labels: 2 }));
    }

    #[test]
    fn feature_count_mismatch_error() {
        let features = vec![vec![0, 1], vec![1]];
        let err = DecisionTreeConfig::new().fit(&[0], &features, &[0, 1]).unwrap_err();
        assert!(matches!(err, TreeError::FeatureCountMismatch { sample_index: 1, .. }));
    }

    #[test]
    fn non_binary_feature_error() {
        let features = vec![vec![0, 1], vec![1, 3]];
        let err = DecisionTreeConfig::new().fit(&[0], &features, &[0, 1]).unwrap_err();
        assert!(matches!(
            err,
            TreeError::NonBinaryFeature {
                sample_index: 1,
                feature_index: 1,
                value: 3
            }
        ));
    }

    #[test]
    fn non_binary_label_error() {
        let (features, _) = and_data();
        let err = DecisionTreeConfig::new()
            .fit(&[0], &features, &[0, 1, 2, 0])
            .unwrap_err();
        assert!(matches!(err, TreeError::NonBinaryLabel { sample_index: 2, value: 2 }));
    }

    #[test]
    fn predictor_errors() {
        let (features, labels) = and_data();
        let err = DecisionTreeConfig::new().fit(&[0, 2], &features, &labels).unwrap_err();
        assert!(matches!(err, TreeError::PredictorOutOfRange { predictor: 2, n_features: 2 }));
        let err = DecisionTreeConfig::new().fit(&[1, 1], &features, &labels).unwrap_err();
        assert!(matches!(err, TreeError::DuplicatePredictor { predictor: 1 }));
    }

    #[test]
    fn predictor_subset_is_respected() {
        let (features, labels) = and_data();
        let tree = DecisionTreeConfig::new().fit(&[1], &features, &labels).unwrap();
        for node in tree.nodes() {
            if let Node::Internal { split_predictor, .. } = node {
                assert_eq!(split_predictor.index(), 1);
            }
        }
    }

    #[test]
    fn feature_importances_sum_to_one() {
        let features = truth_table(3);
        let labels: Vec<u8> = features.iter().map(|r| (r[0] & r[1]) | r[2]).collect();
        let tree = DecisionTreeConfig::new().fit(&[0, 1, 2], &features, &labels).unwrap();
        let sum: f64 = tree.feature_importances().iter().sum();
        assert!((sum - 1.0).abs() < 1e-10, "sum = {sum}");
    }

    #[test]
    fn arena_indices_stay_in_range() {
        let features = truth_table(4);
        let labels: Vec<u8> = features.iter().map(|r| r[0] | (r[1] & r[3])).collect();
        let tree = DecisionTreeConfig::new()
            .with_search(PredictorSearch::RandomForest)
            .with_seed(3)
            .fit(&[0, 1, 2, 3], &features, &labels)
            .unwrap();

        assert_eq!(tree.root().map(NodeIndex::index), Some(0));
        for (i, node) in tree.nodes().iter().enumerate() {
            if let Node::Internal {
                split_predictor,
                left,
                right,
                ..
            } = node
            {
                assert!(left.index() > i && left.index() < tree.n_nodes());
                assert!(right.index() > i && right.index() < tree.n_nodes());
                assert!(split_predictor.index() < tree.n_features());
            }
        }
        assert_eq!(tree.feature_importances().len(), 4);
        for point in &features {
            assert!(tree.predict(point).is_ok());
        }
    }
}
