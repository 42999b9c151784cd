//! Console output for training runs

use colored::Colorize;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

use crate::evaluation::RegressionMetrics;

/// Summary of a completed training run
#[derive(Clone, Debug)]
pub struct TrainingReport {
    pub metrics: RegressionMetrics,
    pub train_rows: usize,
    pub test_rows: usize,
    pub feature_count: usize,
    pub model_path: PathBuf,
    pub model_hash: String,
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Rounded table of evaluation metrics
pub fn metrics_table(metrics: &RegressionMetrics) -> String {
    let rows = [
        MetricRow {
            metric: "R-squared",
            value: format!("{:.3}", metrics.r_squared),
        },
        MetricRow {
            metric: "RMSE",
            value: format!("{:.3}", metrics.rmse),
        },
        MetricRow {
            metric: "MAE",
            value: format!("{:.3}", metrics.mae),
        },
        MetricRow {
            metric: "MSE",
            value: format!("{:.3}", metrics.mse),
        },
    ];

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}
