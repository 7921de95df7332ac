use rand::Rng;

use crate::entropy::{LabelCounts, information_gain};
use crate::node::FeatureIndex;

/// How candidate predictors are chosen at each split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PredictorSearch {
    /// Score every remaining predictor.
    #[default]
    Exhaustive,
    /// Score a uniform random subset of `round(sqrt(n))` remaining predictors,
    /// drawn without replacement.
    RandomForest,
}

impl PredictorSearch {
    /// Number of candidates examined when `n_remaining` predictors are left.
    #[must_use]
    pub fn candidate_count(&self, n_remaining: usize) -> usize {
        match self {
            PredictorSearch::Exhaustive => n_remaining,
            PredictorSearch::RandomForest => {
                ((n_remaining as f64).sqrt().round() as usize).min(n_remaining)
            }
        }
    }
}

/// The winning predictor of a search together with its partition.
#[derive(Debug, Clone)]
pub(crate) struct BestSplit {
    pub(crate) predictor: FeatureIndex,
    pub(crate) gain: f64,
    /// Rows whose value for `predictor` is 0.
    pub(crate) left_rows: Vec<usize>,
    /// Rows whose value for `predictor` is 1.
    pub(crate) right_rows: Vec<usize>,
}

/// Outcome of [`find_best_predictor`].
#[derive(Debug, Clone)]
pub(crate) struct PredictorChoice {
    /// `None` when no candidate has strictly positive gain.
    pub(crate) best: Option<BestSplit>,
    /// Predictors still usable below this node: the input set minus every
    /// degenerate candidate and minus the chosen predictor.
    pub(crate) remaining: Vec<FeatureIndex>,
}

/// Split `rows` on a binary predictor: value 0 goes left, anything else right.
pub(crate) fn partition(
    features: &[Vec<u8>],
    rows: &[usize],
    predictor: FeatureIndex,
) -> (Vec<usize>, Vec<usize>) {
    rows.iter()
        .partition(|&&r| features[r][predictor.index()] == 0)
}

/// Search `remaining` for the predictor with the greatest information gain
/// over `rows`.
///
/// Candidates whose partition leaves one side empty are dropped from the
/// returned predictor set without being scored. A candidate only wins with
/// gain strictly above zero and strictly above every earlier candidate, so
/// ties keep the first one examined. "Zero" here is after
/// [`information_gain`] snaps gains within `GAIN_TOLERANCE` (1e-12) to 0.0,
/// so a split that preserves the class ratio never wins on rounding error.
///
/// `features` is row-major: `features[row][predictor]`.
pub(crate) fn find_best_predictor(
    remaining: &[FeatureIndex],
    features: &[Vec<u8>],
    labels: &[u8],
    rows: &[usize],
    search: PredictorSearch,
    rng: &mut impl Rng,
) -> PredictorChoice {
    let parent = LabelCounts::from_rows(labels, rows);

    // Partial Fisher-Yates: shuffle only the first `take` positions.
    let mut order: Vec<FeatureIndex> = remaining.to_vec();
    let take = search.candidate_count(order.len());
    if search == PredictorSearch::RandomForest {
        for i in 0..take {
            let j = rng.gen_range(i..order.len());
            order.swap(i, j);
        }
    }

    let mut degenerate: Vec<FeatureIndex> = Vec::new();
    let mut best: Option<BestSplit> = None;
    let mut best_gain = 0.0f64;

    for &predictor in &order[..take] {
        let (left_rows, right_rows) = partition(features, rows, predictor);
        if left_rows.is_empty() || right_rows.is_empty() {
            degenerate.push(predictor);
            continue;
        }

        let gain = information_gain(
            parent,
            LabelCounts::from_rows(labels, &left_rows),
            LabelCounts::from_rows(labels, &right_rows),
        );

        if gain > best_gain {
            best_gain = gain;
            best = Some(BestSplit {
                predictor,
                gain,
                left_rows,
                right_rows,
            });
        }
    }

    let chosen = best.as_ref().map(|b| b.predictor);
    let remaining: Vec<FeatureIndex> = remaining
        .iter()
        .copied()
        .filter(|p| !degenerate.contains(p) && Some(*p) != chosen)
        .collect();

    PredictorChoice { best, remaining }
}
