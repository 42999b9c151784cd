use discharge_model::{FieldError, ModelError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the trainer.
#[derive(Debug, Error)]
pub enum TrainerError {
    #[error("missing input file: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: {source}")]
    InvalidRecord { line: u64, source: FieldError },

    #[error("dataset has no data rows")]
    EmptyDataset,

    #[error("cannot split {rows} rows with test fraction {fraction}: both sides need at least one row")]
    EmptySplit { rows: usize, fraction: f64 },

    #[error("training error: {0}")]
    Training(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}
