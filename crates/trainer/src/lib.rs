//! Length-of-stay trainer
//!
//! Loads labeled admissions from CSV, fits the one-hot + random forest
//! pipeline with a fixed seed, evaluates it on a held-out split and writes the
//! model artifact.

pub mod context;
pub mod dataset;
pub mod errors;
pub mod evaluation;
pub mod report;
pub mod trainer;

use discharge_model::{AppConfig, ModelArtifact};
use tracing::info;

pub use context::{TrainingContext, DEFAULT_SEED};
pub use dataset::{ColumnStats, Dataset, TrainTestSplit};
pub use errors::TrainerError;
pub use evaluation::RegressionMetrics;
pub use report::{metrics_table, TrainingReport};
pub use trainer::{ModelTrainer, TrainingOutcome};

/// Load `config.paths.input`, then split, fit and evaluate
///
/// Nothing is written to disk.
pub fn fit_model(config: &AppConfig) -> Result<TrainingOutcome, TrainerError> {
    config.training.validate()?;

    let input = &config.paths.input;
    info!("Loading data from {}...", input.display());
    let dataset = Dataset::from_csv(input)?;
    info!("Loaded {} rows", dataset.len());
    for stats in dataset.numeric_stats() {
        info!(
            "  {}: min={}, max={}, mean={:.2}",
            stats.column, stats.min, stats.max, stats.mean
        );
    }

    ModelTrainer::from_config(&config.training).train(&dataset)
}

/// Write a fitted outcome to `config.paths.model`
pub fn save_model(
    config: &AppConfig,
    outcome: TrainingOutcome,
) -> Result<TrainingReport, TrainerError> {
    let output = &config.paths.model;

    info!("Saving model...");
    let feature_count = outcome.model.pipeline().feature_count();
    let artifact = ModelArtifact::new(
        outcome.model,
        config.training.seed,
        config.training.forest(),
        outcome.train_rows,
        outcome.test_rows,
    )?;
    artifact.save(output)?;

    Ok(TrainingReport {
        metrics: outcome.metrics,
        train_rows: outcome.train_rows,
        test_rows: outcome.test_rows,
        feature_count,
        model_path: output.clone(),
        model_hash: artifact.metadata().model_hash.clone(),
    })
}

/// Train on `config.paths.input` and write the artifact to `config.paths.model`
///
/// Nothing is written unless every step succeeds.
pub fn train_model(config: &AppConfig) -> Result<TrainingReport, TrainerError> {
    let outcome = fit_model(config)?;
    save_model(config, outcome)
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
