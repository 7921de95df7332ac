//! Domain types for arbor-io.

use crate::IoError;

/// A validated experiment name for output file naming.
///
/// Must match `[a-zA-Z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentName(String);

impl ExperimentName {
    /// Parse and validate an experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidExperimentName`] if the name is empty or
    /// contains characters outside `[a-zA-Z0-9_-]`.
    pub fn new(name: String) -> Result<Self, IoError> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(IoError::InvalidExperimentName { name });
        }
        Ok(Self(name))
    }

    /// Return the experiment name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExperimentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A binary classification dataset: 0/1 feature columns plus a 0/1 label.
///
/// Produced by [`BinaryCsvReader`](crate::BinaryCsvReader). Rows are kept
/// in file order; `features[i]` is labelled `labels[i]`.
#[derive(Debug)]
pub struct BinaryDataset {
    /// Name of the label column in the source file.
    label_name: String,
    /// Feature column names, in header order with the label column removed.
    feature_names: Vec<String>,
    /// Feature values: `features[sample_index][feature_index]`.
    features: Vec<Vec<u8>>,
    /// Label per row.
    labels: Vec<u8>,
}

impl BinaryDataset {
    pub(crate) fn new(
        label_name: String,
        feature_names: Vec<String>,
        features: Vec<Vec<u8>>,
        labels: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(features.len(), labels.len());
        Self {
            label_name,
            feature_names,
            features,
            labels,
        }
    }

    /// Return the label column name.
    #[must_use]
    pub fn label_name(&self) -> &str {
        &self.label_name
    }

    /// Return the feature column names.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Return the feature matrix (row-major).
    #[must_use]
    pub fn features(&self) -> &[Vec<u8>] {
        &self.features
    }

    /// Return the labels.
    #[must_use]
    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// Every feature column index, in order. The usual predictor set.
    #[must_use]
    pub fn predictors(&self) -> Vec<usize> {
        (0..self.feature_names.len()).collect()
    }

    /// Return the number of samples.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.labels.len()
    }

    /// Return the number of feature columns.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Number of rows labelled 1.
    #[must_use]
    pub fn n_positive(&self) -> usize {
        self.labels.iter().filter(|&&l| l == 1).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn experiment_name_valid() {
        let name = ExperimentName::new("and-gate_01".to_string());
        assert!(name.is_ok());
        assert_eq!(name.unwrap().as_str(), "and-gate_01");
    }

    #[test]
    fn experiment_name_rejects_empty() {
        let name = ExperimentName::new(String::new());
        assert!(matches!(name, Err(IoError::InvalidExperimentName { .. })));
    }

    #[test]
    fn experiment_name_rejects_special_chars() {
        let name = ExperimentName::new("../escape".to_string());
        assert!(matches!(name, Err(IoError::InvalidExperimentName { .. })));
    }

    #[test]
    fn dataset_accessors() {
        let ds = BinaryDataset::new(
            "y".into(),
            vec!["a".into(), "b".into()],
            vec![vec![0, 1], vec![1, 1], vec![1, 0]],
            vec![0, 1, 1],
        );
        assert_eq!(ds.label_name(), "y");
        assert_eq!(ds.n_samples(), 3);
        assert_eq!(ds.n_features(), 2);
        assert_eq!(ds.predictors(), vec![0, 1]);
        assert_eq!(ds.n_positive(), 2);
    }
}
