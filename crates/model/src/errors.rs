//! Error types for the model crate

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building, persisting or evaluating a model
#[derive(Error, Debug)]
pub enum ModelError {
    /// No model artifact exists at the given path
    #[error("Model file not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    /// The artifact was written by an incompatible build
    #[error("Incompatible model artifact: {0}")]
    Incompatible(String),

    /// Stored hash does not match the decoded model
    #[error("Model integrity check failed: expected {expected}, computed {actual}")]
    IntegrityMismatch { expected: String, actual: String },

    /// Categorical value absent from the training vocabulary
    #[error("Unknown {column} category: {value:?}")]
    UnknownCategory { column: &'static str, value: String },

    /// A feature matrix needs at least one row
    #[error("Cannot build a feature matrix from zero records")]
    EmptyBatch,

    /// The fitted forest failed to produce a prediction
    #[error("Inference failed: {0}")]
    Inference(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration source could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
