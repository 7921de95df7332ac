use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use arbor_io::{BinaryCsvReader, BinaryDataset, ExperimentName, ResultWriter};
use arbor_tree::{
    Aggregation, CrossValidation, DecisionTreeConfig, FittedModel, ModelSpec, OobMode,
    PredictorSearch, RandomForestConfig,
};

#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "Binary decision trees and random forests over 0/1 datasets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// RNG seed for reproducibility
    #[arg(long, default_value_t = 42, global = true)]
    seed: u64,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel prediction (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

/// Model selection shared by every subcommand.
#[derive(Args, Debug, Clone)]
struct ModelArgs {
    /// Name of the label column in the CSV files
    #[arg(long, default_value = "label")]
    label: String,

    /// Train a random forest instead of a single tree
    #[arg(long, default_value_t = false)]
    forest: bool,

    /// Predictor search for a single tree: "exhaustive" or "random-forest"
    #[arg(long, default_value = "exhaustive")]
    search: String,

    /// Number of trees in the forest
    #[arg(long, default_value_t = 100)]
    n_trees: usize,

    /// Fraction of rows bootstrapped for each forest tree
    #[arg(long, default_value_t = 1.0)]
    bootstrap_fraction: f64,

    /// How forest trees are combined: "vote" or "mean"
    #[arg(long, default_value = "vote")]
    aggregation: String,
}

#[derive(Subcommand)]
enum Command {
    /// Estimate accuracy with stratified k-fold cross-validation
    Evaluate {
        /// Path to the input CSV file
        #[arg(long)]
        data: PathBuf,

        /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        experiment: String,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Number of cross-validation folds
        #[arg(long, default_value_t = 5)]
        cv_folds: usize,

        #[command(flatten)]
        model: ModelArgs,
    },

    /// Train on one file and classify the rows of another
    Predict {
        /// Path to the training CSV file
        #[arg(long)]
        train: PathBuf,

        /// Path to the CSV file to classify (must carry the label column)
        #[arg(long)]
        test: PathBuf,

        /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        experiment: String,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        #[command(flatten)]
        model: ModelArgs,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct EvaluateOutput {
    experiment: String,
    model: &'static str,
    n_samples: usize,
    n_features: usize,
    cv_folds: usize,
    cv_mean_accuracy: f64,
    cv_std_accuracy: f64,
    oob_accuracy: Option<f64>,
    output: PathBuf,
}

#[derive(Serialize)]
struct PredictOutput {
    experiment: String,
    model: &'static str,
    n_train: usize,
    n_test: usize,
    accuracy: f64,
    output: PathBuf,
}

fn parse_search(s: &str) -> Result<PredictorSearch> {
    match s {
        "exhaustive" => Ok(PredictorSearch::Exhaustive),
        "random-forest" => Ok(PredictorSearch::RandomForest),
        other => anyhow::bail!("unknown search: {other} (expected exhaustive or random-forest)"),
    }
}

fn parse_aggregation(s: &str) -> Result<Aggregation> {
    match s {
        "vote" => Ok(Aggregation::MajorityVote),
        "mean" => Ok(Aggregation::MeanConfidence),
        other => anyhow::bail!("unknown aggregation: {other} (expected vote or mean)"),
    }
}

fn build_spec(args: &ModelArgs, seed: u64) -> Result<ModelSpec> {
    if args.forest {
        let config = RandomForestConfig::new(args.n_trees)?
            .with_aggregation(parse_aggregation(&args.aggregation)?)
            .with_bootstrap_fraction(args.bootstrap_fraction)
            .with_seed(seed);
        Ok(ModelSpec::Forest(config))
    } else {
        let config = DecisionTreeConfig::new()
            .with_search(parse_search(&args.search)?)
            .with_seed(seed);
        Ok(ModelSpec::Tree(config))
    }
}

fn model_name(spec: &ModelSpec) -> &'static str {
    match spec {
        ModelSpec::Tree(_) => "tree",
        ModelSpec::Forest(_) => "forest",
    }
}

fn read_dataset(path: &Path, label: &str) -> Result<BinaryDataset> {
    let dataset = BinaryCsvReader::new(path)
        .with_label_column(label)
        .read()
        .with_context(|| format!("failed to read {}", path.display()))?;
    info!(
        n_samples = dataset.n_samples(),
        n_features = dataset.n_features(),
        n_positive = dataset.n_positive(),
        "dataset loaded"
    );
    Ok(dataset)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Evaluate {
            data,
            experiment,
            output_dir,
            cv_folds,
            model,
        } => {
            let experiment_name = ExperimentName::new(experiment.clone())?;
            let dataset = read_dataset(&data, &model.label)?;
            let spec = build_spec(&model, cli.seed)?;
            let predictors = dataset.predictors();

            // 1. Cross-validate
            let cv_result = CrossValidation::new(cv_folds)?
                .with_seed(cli.seed)
                .evaluate(
                    &spec,
                    &predictors,
                    dataset.features(),
                    dataset.labels(),
                    cli.seed,
                )
                .context("cross-validation failed")?;

            // 2. For forests, also fit on all rows to report OOB accuracy
            let oob_accuracy = match &spec {
                ModelSpec::Forest(config) => {
                    let forest = config
                        .clone()
                        .with_oob_mode(OobMode::Enabled)
                        .fit(&predictors, dataset.features(), dataset.labels())
                        .context("final forest training failed")?;
                    forest.oob_score().map(|s| s.accuracy)
                }
                ModelSpec::Tree(_) => None,
            };
            info!(oob_accuracy = ?oob_accuracy, "evaluation complete");

            // 3. Write evaluation JSON
            let class_metrics = cv_result
                .confusion_matrix
                .class_metrics()
                .map(|m| (m.precision, m.recall, m.f1, m.support));
            let writer = ResultWriter::new(&output_dir, experiment_name)?;
            let path = writer.write_evaluation(
                model_name(&spec),
                cv_result.mean_accuracy,
                cv_result.std_accuracy,
                &cv_result.fold_accuracies,
                oob_accuracy,
                dataset.feature_names(),
                &cv_result.feature_importances,
                cv_result.confusion_matrix.as_rows(),
                &class_metrics,
            )?;

            // 4. Print summary
            let output = EvaluateOutput {
                experiment,
                model: model_name(&spec),
                n_samples: cv_result.n_samples,
                n_features: cv_result.n_features,
                cv_folds,
                cv_mean_accuracy: cv_result.mean_accuracy,
                cv_std_accuracy: cv_result.std_accuracy,
                oob_accuracy,
                output: path,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Predict {
            train,
            test,
            experiment,
            output_dir,
            model,
        } => {
            let experiment_name = ExperimentName::new(experiment.clone())?;
            let train_set = read_dataset(&train, &model.label)?;
            let test_set = read_dataset(&test, &model.label)?;
            if train_set.feature_names() != test_set.feature_names() {
                anyhow::bail!(
                    "feature columns differ between {} and {}",
                    train.display(),
                    test.display()
                );
            }

            // 1. Train
            let spec = build_spec(&model, cli.seed)?;
            let fitted = spec
                .fit(
                    &train_set.predictors(),
                    train_set.features(),
                    train_set.labels(),
                )
                .context("training failed")?;
            if let FittedModel::Tree(tree) = &fitted {
                info!(
                    n_nodes = tree.n_nodes(),
                    n_leaves = tree.n_leaves(),
                    depth = tree.depth(),
                    "tree trained"
                );
            }

            // 2. Predict
            let predictions: Vec<(u8, f64)> = fitted
                .predict_batch(test_set.features())
                .context("prediction failed")?
                .iter()
                .map(|p| (p.label, p.confidence))
                .collect();

            // 3. Write predictions JSON
            let writer = ResultWriter::new(&output_dir, experiment_name)?;
            let path =
                writer.write_predictions(model_name(&spec), &predictions, test_set.labels())?;

            let correct = predictions
                .iter()
                .zip(test_set.labels())
                .filter(|&(&(label, _), &truth)| label == truth)
                .count();

            // 4. Print summary
            let output = PredictOutput {
                experiment,
                model: model_name(&spec),
                n_train: train_set.n_samples(),
                n_test: test_set.n_samples(),
                accuracy: correct as f64 / test_set.n_samples() as f64,
                output: path,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
