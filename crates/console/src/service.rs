//! Prediction service over a loaded model artifact

use discharge_model::{ArtifactMetadata, ModelArtifact, ModelError, ModelInput, ModelOutput};
use std::path::Path;
use tracing::info;

/// Loaded, immutable model answering single-record queries
#[derive(Debug)]
pub struct PredictionService {
    artifact: ModelArtifact,
}

impl PredictionService {
    /// Load the model at `path`
    ///
    /// A missing file yields `ModelError::ModelNotFound`.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        info!("Loading model from: {}", path.display());
        let artifact = ModelArtifact::load(path)?;

        let metadata = artifact.metadata();
        info!(
            "  Trained {} on {} rows ({} trees, seed {})",
            metadata.trained_at.format("%Y-%m-%d %H:%M:%S UTC"),
            metadata.train_rows,
            metadata.forest.trees,
            metadata.seed
        );

        Ok(Self { artifact })
    }

    pub fn metadata(&self) -> &ArtifactMetadata {
        self.artifact.metadata()
    }

    /// Predicted length of stay for one admission
    pub fn predict(&self, input: &ModelInput) -> Result<ModelOutput, ModelError> {
        self.artifact.model().predict(input)
    }
}

/// Result line shown to the user
pub fn format_prediction(output: &ModelOutput) -> String {
    format!(
        "Predicted Length of Stay: {:.2} days",
        output.length_of_stay_prediction
    )
}
