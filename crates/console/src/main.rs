//! Length-of-stay predictor CLI

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use discharge_console::{collect_input, format_prediction, PredictionService, Prompter};
use discharge_model::{AppConfig, ModelError};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "discharge-predict")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Predict a patient's length of stay", long_about = None)]
struct Args {
    /// Trained model file
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Configuration file (defaults to ./discharge.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
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
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let config = AppConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let model_path = args.model.unwrap_or(config.paths.model);

    let service = match PredictionService::load(&model_path) {
        Ok(service) => service,
        Err(err @ ModelError::ModelNotFound(_)) => {
            eprintln!("{} {}", "✗".red().bold(), err.to_string().red());
            eprintln!("  Run discharge-train first to create it.");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => {
            eprintln!("{} {}", "✗".red().bold(), format!("Cannot load model: {err}").red());
            return Ok(ExitCode::FAILURE);
        }
    };

    debug!("Model hash: {}", service.metadata().model_hash);

    println!("{}", "Predict Patient Length of Stay".bold().yellow());

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let input = collect_input(&mut prompter).context("Failed to read patient details")?;

    match service.predict(&input) {
        Ok(output) => {
            println!("{}", format_prediction(&output).blue().bold());
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{} {}", "✗".red().bold(), format!("Prediction failed: {err}").red());
            Ok(ExitCode::FAILURE)
        }
    }
}
