//! Length-of-stay model core
//!
//! Shared by the offline trainer and the interactive predictor.
//!
//! Modules:
//! - `record`: input and output records
//! - `schema`: column mapping table used to bind CSV rows and stamp artifacts
//! - `encoding`: one-hot encoders for the categorical columns
//! - `pipeline`: feature pipeline and fitted random forest
//! - `artifact`: model file persistence with integrity hashing
//! - `config`: layered application configuration

pub mod artifact;
pub mod config;
pub mod encoding;
pub mod errors;
pub mod pipeline;
pub mod record;
pub mod schema;

pub use artifact::{ArtifactMetadata, ModelArtifact, DEFAULT_MODEL_PATH, FORMAT_VERSION};
pub use crate::config::{AppConfig, PathsConfig, TrainingConfig};
pub use encoding::{OneHotEncoder, UnknownCategoryPolicy};
pub use errors::ModelError;
pub use pipeline::{labels, FeaturePipeline, FittedModel, Forest, ForestParams};
pub use record::{ModelInput, ModelOutput};
pub use schema::{bind_row, ColumnKind, ColumnSpec, Field, FieldError, INPUT_SCHEMA};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
