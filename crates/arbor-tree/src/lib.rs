//! Binary decision trees: fit, predict, evaluate.
//!
//! Induces decision trees over datasets whose features and label are all
//! 0/1, choosing splits by information gain. Trees can run in random-forest
//! mode, which scores only a random `round(sqrt(n))` subset of the remaining
//! predictors at each split; [`RandomForestConfig`] bags such trees into an
//! ensemble. Stratified cross-validation and a binary confusion matrix are
//! provided for evaluation.

mod config;
mod confusion;
mod entropy;
mod error;
mod eval;
mod forest;
mod model;
mod node;
mod oob;
mod predict;
mod split;
mod tree;

pub use config::{Aggregation, OobMode, RandomForestConfig};
pub use confusion::{ClassMetrics, ConfusionMatrix};
pub use entropy::{Entropy, LabelCounts, entropy, information_gain};
pub use error::TreeError;
pub use eval::{CrossValidation, CrossValidationResult};
pub use forest::RandomForest;
pub use model::{FittedModel, ModelSpec};
pub use node::{FeatureIndex, Node, NodeIndex};
pub use oob::OobScore;
pub use predict::Prediction;
pub use split::PredictorSearch;
pub use tree::{DecisionTree, DecisionTreeConfig};
