//! JSON result writer for evaluation and prediction outputs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::ExperimentName;

/// Writes evaluation and prediction results to JSON files.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are named `{experiment}_evaluate.json` and
/// `{experiment}_predict.json`. Takes primitives so it does not depend on
/// `arbor-tree`.
pub struct ResultWriter {
    output_dir: PathBuf,
    experiment: ExperimentName,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory and experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), experiment = %experiment))]
    pub fn new(output_dir: &Path, experiment: ExperimentName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            experiment,
        })
    }

    /// Write cross-validation results to `{experiment}_evaluate.json`.
    ///
    /// Features are listed by descending importance with 1-based ranks.
    /// `class_metrics` holds `(precision, recall, f1, support)` for label 0
    /// then label 1.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[allow(clippy::too_many_arguments)]
    #[instrument(skip_all)]
    pub fn write_evaluation(
        &self,
        model: &str,
        cv_accuracy_mean: f64,
        cv_accuracy_std: f64,
        fold_accuracies: &[f64],
        oob_accuracy: Option<f64>,
        feature_names: &[String],
        feature_importances: &[f64],
        confusion_matrix: [[usize; 2]; 2],
        class_metrics: &[(f64, f64, f64, usize); 2],
    ) -> Result<PathBuf, IoError> {
        let path = self
            .output_dir
            .join(format!("{}_evaluate.json", self.experiment.as_str()));

        let mut features: Vec<FeatureEntry> = feature_names
            .iter()
            .zip(feature_importances)
            .map(|(name, &importance)| FeatureEntry {
                name: name.as_str(),
                importance,
                rank: 0,
            })
            .collect();
        features.sort_by(|a, b| b.importance.total_cmp(&a.importance));
        for (i, entry) in features.iter_mut().enumerate() {
            entry.rank = i + 1;
        }

        let classes: Vec<ClassEntry> = class_metrics
            .iter()
            .enumerate()
            .map(|(i, &(precision, recall, f1, support))| ClassEntry {
                class: i as u8,
                precision,
                recall,
                f1,
                support,
            })
            .collect();

        let artifact = EvaluateArtifact {
            experiment: self.experiment.as_str(),
            model,
            cv_accuracy_mean,
            cv_accuracy_std,
            fold_accuracies,
            oob_accuracy,
            feature_importances: features,
            confusion_matrix,
            class_metrics: classes,
        };

        write_json(&path, &artifact)?;
        info!(path = %path.display(), "evaluation result written");
        Ok(path)
    }

    /// Write holdout predictions to `{experiment}_predict.json`.
    ///
    /// `predictions[i]` is the `(label, confidence)` for row `i`;
    /// `true_labels[i]` is that row's recorded label.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all, fields(n = predictions.len()))]
    pub fn write_predictions(
        &self,
        model: &str,
        predictions: &[(u8, f64)],
        true_labels: &[u8],
    ) -> Result<PathBuf, IoError> {
        let path = self
            .output_dir
            .join(format!("{}_predict.json", self.experiment.as_str()));

        let entries: Vec<PredictionEntry> = predictions
            .iter()
            .zip(true_labels)
            .enumerate()
            .map(|(row, (&(label, confidence), &true_label))| PredictionEntry {
                row,
                label,
                confidence,
                true_label,
            })
            .collect();
        let correct = entries.iter().filter(|e| e.label == e.true_label).count();
        let accuracy = if entries.is_empty() {
            0.0
        } else {
            correct as f64 / entries.len() as f64
        };

        let artifact = PredictArtifact {
            experiment: self.experiment.as_str(),
            model,
            n_samples: entries.len(),
            accuracy,
            predictions: entries,
        };

        write_json(&path, &artifact)?;
        info!(path = %path.display(), accuracy, "predictions written");
        Ok(path)
    }
}

fn write_json<T: Serialize>(path: &Path, artifact: &T) -> Result<(), IoError> {
    let json = serde_json::to_string_pretty(artifact).map_err(|e| IoError::WriteFile {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    fs::write(path, json).map_err(|e| IoError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}

// --- Shadow structs for JSON serialization ---

#[derive(Serialize)]
struct EvaluateArtifact<'a> {
    experiment: &'a str,
    model: &'a str,
    cv_accuracy_mean: f64,
    cv_accuracy_std: f64,
    fold_accuracies: &'a [f64],
    oob_accuracy: Option<f64>,
    feature_importances: Vec<FeatureEntry<'a>>,
    confusion_matrix: [[usize; 2]; 2],
    class_metrics: Vec<ClassEntry>,
}

#[derive(Serialize)]
struct FeatureEntry<'a> {
    name: &'a str,
    importance: f64,
    rank: usize,
}

#[derive(Serialize)]
struct ClassEntry {
    class: u8,
    precision: f64,
    recall: f64,
    f1: f64,
    support: usize,
}

#[derive(Serialize)]
struct PredictArtifact<'a> {
    experiment: &'a str,
    model: &'a str,
    n_samples: usize,
    accuracy: f64,
    predictions: Vec<PredictionEntry>,
}

#[derive(Serialize)]
struct PredictionEntry {
    row: usize,
    label: u8,
    confidence: f64,
    true_label: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read_json(path: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn write_evaluation_json_structure() {
        let dir = TempDir::new().unwrap();
        let experiment = ExperimentName::new("eval_test".into()).unwrap();
        let writer = ResultWriter::new(dir.path(), experiment).unwrap();

        let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let path = writer
            .write_evaluation(
                "tree",
                0.75,
                0.05,
                &[0.7, 0.8],
                None,
                &names,
                &[0.2, 0.7, 0.1],
                [[3, 1], [1, 3]],
                &[(0.75, 0.75, 0.75, 4), (0.75, 0.75, 0.75, 4)],
            )
            .unwrap();

        assert_eq!(path, dir.path().join("eval_test_evaluate.json"));
        let content = read_json(&path);
        assert_eq!(content["experiment"], "eval_test");
        assert_eq!(content["model"], "tree");
        assert_eq!(content["fold_accuracies"].as_array().unwrap().len(), 2);
        assert_eq!(content["confusion_matrix"][1][1], 3);
        assert!(content["oob_accuracy"].is_null());
        assert_eq!(content["class_metrics"][1]["class"], 1);
        assert_eq!(content["class_metrics"][0]["support"], 4);
    }

    #[test]
    fn feature_importances_ranked_descending() {
        let dir = TempDir::new().unwrap();
        let experiment = ExperimentName::new("rank_test".into()).unwrap();
        let writer = ResultWriter::new(dir.path(), experiment).unwrap();

        let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let path = writer
            .write_evaluation(
                "forest",
                1.0,
                0.0,
                &[1.0, 1.0],
                Some(0.95),
                &names,
                &[0.2, 0.7, 0.1],
                [[2, 0], [0, 2]],
                &[(1.0, 1.0, 1.0, 2), (1.0, 1.0, 1.0, 2)],
            )
            .unwrap();

        let content = read_json(&path);
        let features = content["feature_importances"].as_array().unwrap();
        assert_eq!(features[0]["name"], "b");
        assert_eq!(features[0]["rank"], 1);
        assert_eq!(features[1]["name"], "a");
        assert_eq!(features[2]["name"], "c");
        assert_eq!(features[2]["rank"], 3);
        assert!((content["oob_accuracy"].as_f64().unwrap() - 0.95).abs() < 1e-12);
    }

    #[test]
    fn write_predictions_json_structure() {
        let dir = TempDir::new().unwrap();
        let experiment = ExperimentName::new("pred_test".into()).unwrap();
        let writer = ResultWriter::new(dir.path(), experiment).unwrap();

        let path = writer
            .write_predictions("tree", &[(1, 1.0), (0, 0.25), (1, 0.6)], &[1, 0, 0])
            .unwrap();

        let content = read_json(&path);
        assert_eq!(content["experiment"], "pred_test");
        assert_eq!(content["n_samples"], 3);
        let accuracy = content["accuracy"].as_f64().unwrap();
        assert!((accuracy - 2.0 / 3.0).abs() < 1e-12);
        let predictions = content["predictions"].as_array().unwrap();
        assert_eq!(predictions[1]["row"], 1);
        assert_eq!(predictions[1]["label"], 0);
        assert_eq!(predictions[2]["true_label"], 0);
    }

    #[test]
    fn creates_nested_output_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested").join("deep");
        let experiment = ExperimentName::new("nested_test".into()).unwrap();
        let writer = ResultWriter::new(&nested, experiment).unwrap();

        writer.write_predictions("tree", &[(0, 0.0)], &[0]).unwrap();

        assert!(nested.join("nested_test_predict.json").exists());
    }
}
