//! Length-of-stay trainer CLI
//!
//! Trains the regression model from `data/input.csv` and writes
//! `data/model.bin` unless told otherwise.

use anyhow::{Context, Result};
use clap::Parser;
use discharge_model::{AppConfig, UnknownCategoryPolicy};
use discharge_trainer::{fit_model, metrics_table, report, save_model};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "discharge-train")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Train the length-of-stay regression model", long_about = None)]
struct Args {
    /// Input CSV (PrimaryDiagnosis,Age,AdmissionType,PastHospitalizations,Label)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output model file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (defaults to ./discharge.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the train/test split and the forest
    #[arg(long)]
    seed: Option<u64>,

    /// Number of trees
    #[arg(long)]
    trees: Option<u16>,

    /// Maximum tree depth
    #[arg(long)]
    max_depth: Option<u16>,

    /// Minimum samples per leaf
    #[arg(long)]
    min_samples_leaf: Option<usize>,

    /// Share of rows held out for evaluation
    #[arg(long)]
    test_fraction: Option<f64>,

    /// Fail predictions on categories unseen during training
    #[arg(long)]
    reject_unknown: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(input) = &self.input {
            config.paths.input = input.clone();
        }
        if let Some(output) = &self.output {
            config.paths.model = output.clone();
        }

        let training = &mut config.training;
        if let Some(seed) = self.seed {
            training.seed = seed;
        }
        if let Some(trees) = self.trees {
            training.trees = trees;
        }
        if let Some(max_depth) = self.max_depth {
            training.max_depth = max_depth;
        }
        if let Some(min_samples_leaf) = self.min_samples_leaf {
            training.min_samples_leaf = min_samples_leaf;
        }
        if let Some(test_fraction) = self.test_fraction {
            training.test_fraction = test_fraction;
        }
        if self.reject_unknown {
            training.unknown_category = UnknownCategoryPolicy::Reject;
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let mut config = AppConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply(&mut config);

    info!("Length-of-stay trainer v{}", env!("CARGO_PKG_VERSION"));
    info!("═══════════════════════════════════════════");
    info!("  Seed: {}", config.training.seed);
    info!("  Test fraction: {}", config.training.test_fraction);
    info!("  Unknown categories: {:?}", config.training.unknown_category);

    let outcome = match fit_model(&config) {
        Ok(outcome) => outcome,
        Err(err) => {
            report::print_error(&format!("Error: {err}"));
            return Ok(ExitCode::FAILURE);
        }
    };
    println!("{}", metrics_table(&outcome.metrics));

    match save_model(&config, outcome) {
        Ok(summary) => {
            info!("═══════════════════════════════════════════");
            info!(
                "  Rows: {} train / {} test, {} features",
                summary.train_rows, summary.test_rows, summary.feature_count
            );
            info!("  Hash: {}", summary.model_hash);
            report::print_success(&format!(
                "Model saved to: {}",
                summary.model_path.display()
            ));
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            report::print_error(&format!("Error: {err}"));
            Ok(ExitCode::FAILURE)
        }
    }
}
