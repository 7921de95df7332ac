/// Errors from tree induction, prediction, and ensemble evaluation.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Returned when the training dataset has zero samples.
    #[error("training dataset has zero samples")]
    EmptyDataset,

    /// Returned when the feature matrix and label vector disagree on row count.
    #[error("feature matrix has {n_rows} rows but label vector has {n_labels}")]
    RowCountMismatch {
        /// Number of rows in the feature matrix.
        n_rows: usize,
        /// Number of entries in the label vector.
        n_labels: usize,
    },

    /// Returned when a sample has a different number of features than the first row.
    #[error("sample {sample_index} has {got} features, expected {expected}")]
    FeatureCountMismatch {
        /// The expected number of features.
        expected: usize,
        /// The actual number of features in the sample.
        got: usize,
        /// The zero-based index of the offending sample.
        sample_index: usize,
    },

    /// Returned when a training feature value is neither 0 nor 1.
    #[error("non-binary value {value} at sample {sample_index}, feature {feature_index}")]
    NonBinaryFeature {
        /// The zero-based index of the offending sample.
        sample_index: usize,
        /// The zero-based index of the offending feature column.
        feature_index: usize,
        /// The value found.
        value: u8,
    },

    /// Returned when a label is neither 0 nor 1.
    #[error("non-binary label {value} at sample {sample_index}")]
    NonBinaryLabel {
        /// The zero-based index of the offending sample.
        sample_index: usize,
        /// The value found.
        value: u8,
    },

    /// Returned when a candidate predictor does not index a feature column.
    #[error("predictor {predictor} is out of range for {n_features} features")]
    PredictorOutOfRange {
        /// The offending predictor index.
        predictor: usize,
        /// The number of feature columns in the dataset.
        n_features: usize,
    },

    /// Returned when the same predictor appears twice in the candidate set.
    #[error("predictor {predictor} appears more than once in the candidate set")]
    DuplicatePredictor {
        /// The repeated predictor index.
        predictor: usize,
    },

    /// Returned when `predict` is called on a tree that has not been fitted.
    #[error("tree has not been fitted")]
    UnfittedModel,

    /// Returned when a data point lacks a feature the tree splits on.
    #[error("data point has {got} features but the tree splits on feature {feature}")]
    MissingFeature {
        /// The feature index referenced by the tree.
        feature: usize,
        /// The length of the data point.
        got: usize,
    },

    /// Returned when a routed feature value of a data point is neither 0 nor 1.
    #[error("data point has non-binary value {value} at feature {feature}")]
    NonBinaryValue {
        /// The feature index being tested.
        feature: usize,
        /// The value found.
        value: u8,
    },

    /// Returned when n_trees is zero.
    #[error("n_trees must be at least 1, got {n_trees}")]
    InvalidTreeCount {
        /// The invalid n_trees value provided.
        n_trees: usize,
    },

    /// Returned when bootstrap_fraction is not in (0.0, 1.0].
    #[error("bootstrap_fraction must be in (0.0, 1.0], got {fraction}")]
    InvalidBootstrapFraction {
        /// The invalid bootstrap_fraction value provided.
        fraction: f64,
    },

    /// Returned when n_folds is less than 2.
    #[error("n_folds must be at least 2, got {n_folds}")]
    InvalidFoldCount {
        /// The invalid n_folds value provided.
        n_folds: usize,
    },

    /// Returned when a class has fewer samples than the number of folds.
    #[error("class {class} has only {count} samples, need at least {n_folds} for stratified CV")]
    TooFewSamplesForFolds {
        /// The class label with insufficient samples.
        class: u8,
        /// The number of samples belonging to that class.
        count: usize,
        /// The requested number of folds.
        n_folds: usize,
    },
}
