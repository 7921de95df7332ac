//! A single tree or a forest behind one fit/predict surface.

use crate::config::RandomForestConfig;
use crate::error::TreeError;
use crate::forest::RandomForest;
use crate::predict::Prediction;
use crate::tree::{DecisionTree, DecisionTreeConfig};

/// What to train.
#[derive(Debug, Clone)]
pub enum ModelSpec {
    /// One decision tree.
    Tree(DecisionTreeConfig),
    /// A bagged ensemble of random-forest-mode trees.
    Forest(RandomForestConfig),
}

impl ModelSpec {
    /// Return a copy of this spec with its random seed replaced.
    #[must_use]
    pub fn with_seed(&self, seed: u64) -> Self {
        match self {
            ModelSpec::Tree(config) => ModelSpec::Tree(config.with_seed(seed)),
            ModelSpec::Forest(config) => ModelSpec::Forest(config.clone().with_seed(seed)),
        }
    }

    /// Train the described model.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`DecisionTreeConfig::fit`] or
    /// [`RandomForestConfig::fit`].
    pub fn fit(
        &self,
        predictors: &[usize],
        features: &[Vec<u8>],
        labels: &[u8],
    ) -> Result<FittedModel, TreeError> {
        Ok(match self {
            ModelSpec::Tree(config) => FittedModel::Tree(config.fit(predictors, features, labels)?),
            ModelSpec::Forest(config) => {
                FittedModel::Forest(config.fit(predictors, features, labels)?)
            }
        })
    }
}

/// A trained tree or forest.
#[derive(Debug, Clone)]
pub enum FittedModel {
    /// A fitted decision tree.
    Tree(DecisionTree),
    /// A fitted random forest.
    Forest(RandomForest),
}

impl FittedModel {
    /// Classify one data point.
    ///
    /// # Errors
    ///
    /// See [`DecisionTree::predict`] and [`RandomForest::predict`].
    pub fn predict(&self, data_point: &[u8]) -> Result<Prediction, TreeError> {
        match self {
            FittedModel::Tree(tree) => tree.predict(data_point),
            FittedModel::Forest(forest) => forest.predict(data_point),
        }
    }

    /// Classify a batch of data points in parallel.
    ///
    /// # Errors
    ///
    /// See [`DecisionTree::predict_batch`] and [`RandomForest::predict_batch`].
    pub fn predict_batch(&self, data_points: &[Vec<u8>]) -> Result<Vec<Prediction>, TreeError> {
        match self {
            FittedModel::Tree(tree) => tree.predict_batch(data_points),
            FittedModel::Forest(forest) => forest.predict_batch(data_points),
        }
    }

    /// Normalized information-gain importances, one per feature column.
    #[must_use]
    pub fn feature_importances(&self) -> Vec<f64> {
        match self {
            FittedModel::Tree(tree) => tree.feature_importances(),
            FittedModel::Forest(forest) => forest.feature_importances(),
        }
    }
}
