//! Model artifact persistence
//!
//! On disk the artifact is a bincode envelope holding the format version, the
//! column schema, training metadata and the encoded fitted model. The BLAKE3
//! hash of the encoded model is stored alongside it and verified on load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::errors::{ModelError, Result};
use crate::pipeline::{FittedModel, ForestParams};
use crate::schema::column_names;

/// Current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

/// Default location of the trained model
pub const DEFAULT_MODEL_PATH: &str = "data/model.bin";

/// Facts about the training run that produced a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub trained_at: DateTime<Utc>,
    pub seed: u64,
    pub forest: ForestParams,
    pub train_rows: usize,
    pub test_rows: usize,
    pub feature_names: Vec<String>,
    /// Hex BLAKE3 digest of the encoded fitted model
    pub model_hash: String,
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    format_version: u32,
    schema: Vec<String>,
    metadata: ArtifactMetadata,
    model: Vec<u8>,
}

/// A fitted model together with its metadata
#[derive(Debug)]
pub struct ModelArtifact {
    metadata: ArtifactMetadata,
    model: FittedModel,
}

/// Hex BLAKE3 digest of the encoded model
pub fn model_hash(model: &FittedModel) -> Result<String> {
    let bytes = bincode::serialize(model)?;
    Ok(hash_bytes(&bytes))
}

fn hash_bytes(bytes: &[u8]) -> String {
    hex::encode(blake3::hash(bytes).as_bytes())
}

impl ModelArtifact {
    /// Wrap a freshly fitted model, computing its hash
    pub fn new(
        model: FittedModel,
        seed: u64,
        forest: ForestParams,
        train_rows: usize,
        test_rows: usize,
    ) -> Result<Self> {
        let metadata = ArtifactMetadata {
            trained_at: Utc::now(),
            seed,
            forest,
            train_rows,
            test_rows,
            feature_names: model.pipeline().feature_names(),
            model_hash: model_hash(&model)?,
        };

        Ok(Self { metadata, model })
    }

    pub fn metadata(&self) -> &ArtifactMetadata {
        &self.metadata
    }

    pub fn model(&self) -> &FittedModel {
        &self.model
    }

    /// Write the artifact to `path`, replacing any existing file
    ///
    /// Bytes go to a temporary file in the destination directory which is
    /// renamed over `path` only once fully written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let model = bincode::serialize(&self.model)?;
        let envelope = Envelope {
            format_version: FORMAT_VERSION,
            schema: column_names(),
            metadata: self.metadata.clone(),
            model,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let temp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            bincode::serialize_into(&mut writer, &envelope)?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|err| ModelError::Io(err.error))?;

        info!(
            "Model artifact written to {} ({})",
            path.display(),
            self.metadata.model_hash
        );
        Ok(())
    }

    /// Read and verify an artifact
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ModelError::ModelNotFound(path.to_path_buf()));
        }

        let bytes = fs::read(path)?;
        let envelope: Envelope = bincode::deserialize(&bytes)?;

        if envelope.format_version != FORMAT_VERSION {
            return Err(ModelError::Incompatible(format!(
                "format version {} (expected {})",
                envelope.format_version, FORMAT_VERSION
            )));
        }

        let expected_schema = column_names();
        if envelope.schema != expected_schema {
            return Err(ModelError::Incompatible(format!(
                "schema [{}] (expected [{}])",
                envelope.schema.join(", "),
                expected_schema.join(", ")
            )));
        }

        let actual = hash_bytes(&envelope.model);
        if actual != envelope.metadata.model_hash {
            return Err(ModelError::IntegrityMismatch {
                expected: envelope.metadata.model_hash,
                actual,
            });
        }

        let model: FittedModel = bincode::deserialize(&envelope.model)?;
        debug!(
            features = model.pipeline().feature_count(),
            trees = envelope.metadata.forest.trees,
            "Model artifact decoded"
        );

        Ok(Self {
            metadata: envelope.metadata,
            model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::UnknownCategoryPolicy;
    use crate::pipeline::{labels, FeaturePipeline, Forest};
    use crate::record::ModelInput;
    use tempfile::tempdir;

    fn fitted_model() -> FittedModel {
        let records = vec![
            ModelInput::query("Heart Failure", "Emergency", 65.0, 2.0).with_label(4.0),
            ModelInput::query("Angina", "Elective", 50.0, 0.0).with_label(2.0),
            ModelInput::query("Arrhythmia", "Emergency", 71.0, 4.0).with_label(5.0),
            ModelInput::query("Angina", "Emergency", 44.0, 1.0).with_label(3.0),
        ];
        let pipeline = FeaturePipeline::fit(&records, UnknownCategoryPolicy::Zeros);
        let x = pipeline.transform_batch(&records).unwrap();
        let y = labels(&records);
        let params = ForestParams {
            trees: 4,
            max_depth: 3,
            min_samples_leaf: 1,
        };
        let forest = Forest::fit(&x, &y, params.to_parameters(42)).unwrap();
        FittedModel::new(pipeline, forest)
    }

    fn artifact() -> ModelArtifact {
        let params = ForestParams {
            trees: 4,
            max_depth: 3,
            min_samples_leaf: 1,
        };
        ModelArtifact::new(fitted_model(), 42, params, 4, 0).unwrap()
    }

    #[test]
    fn save_then_load_preserves_predictions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("model.bin");

        let original = artifact();
        original.save(&path).unwrap();
        let loaded = ModelArtifact::load(&path).unwrap();

        assert_eq!(loaded.metadata(), original.metadata());
        let query = ModelInput::query("Heart Failure", "Emergency", 65.0, 2.0);
        assert_eq!(
            loaded.model().predict(&query).unwrap(),
            original.model().predict(&query).unwrap()
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.bin");

        match ModelArtifact::load(&path) {
            Err(ModelError::ModelNotFound(p)) => assert_eq!(p, path),
            other => panic!("expected ModelNotFound, got {other:?}"),
        }
    }

    #[test]
    fn tampered_model_fails_integrity_check() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.bin");
        artifact().save(&path).unwrap();

        let mut bytes = fs::read(&path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        fs::write(&path, bytes).unwrap();

        assert!(matches!(
            ModelArtifact::load(&path),
            Err(ModelError::IntegrityMismatch { .. })
        ));
    }

    #[test]
    fn garbage_file_is_a_serialization_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.bin");
        fs::write(&path, b"not a model").unwrap();

        assert!(matches!(
            ModelArtifact::load(&path),
            Err(ModelError::Serialization(_))
        ));
    }

    #[test]
    fn save_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.bin");
        fs::write(&path, b"stale").unwrap();

        artifact().save(&path).unwrap();
        assert!(ModelArtifact::load(&path).is_ok());

        let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn model_hash_is_stable() {
        let model = fitted_model();
        assert_eq!(model_hash(&model).unwrap(), model_hash(&model).unwrap());
        assert_eq!(model_hash(&model).unwrap().len(), 64);
    }
}
