//! Feature pipeline and fitted model
//!
//! Feature vector layout:
//! `[diagnosis one-hot.., admission one-hot.., age, past_hospitalizations]`

use serde::{Deserialize, Serialize};
use std::fmt;
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::encoding::{OneHotEncoder, UnknownCategoryPolicy};
use crate::errors::{ModelError, Result};
use crate::record::{ModelInput, ModelOutput};
use crate::schema::{column_for, Field};

/// Random forest over dense `f64` features
pub type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Forest hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestParams {
    /// Number of trees in the ensemble
    pub trees: u16,
    /// Maximum tree depth (a depth of 5 caps a tree at 32 leaves)
    pub max_depth: u16,
    /// Minimum number of samples in a leaf
    pub min_samples_leaf: usize,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            trees: 120,
            max_depth: 5,
            min_samples_leaf: 5,
        }
    }
}

impl ForestParams {
    /// Upper bound on leaves per tree
    pub fn max_leaves(&self) -> u64 {
        1u64 << self.max_depth.min(63)
    }

    /// Library parameters seeded for reproducible bootstrap sampling
    pub fn to_parameters(&self, seed: u64) -> RandomForestRegressorParameters {
        RandomForestRegressorParameters::default()
            .with_n_trees(self.trees.into())
            .with_max_depth(self.max_depth)
            .with_min_samples_leaf(self.min_samples_leaf)
            .with_seed(seed)
    }
}

/// Fitted categorical encoders plus the numeric passthrough columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturePipeline {
    diagnosis: OneHotEncoder,
    admission: OneHotEncoder,
    unknown_category: UnknownCategoryPolicy,
}

impl FeaturePipeline {
    /// Fit both encoders on the training records
    pub fn fit(records: &[ModelInput], unknown_category: UnknownCategoryPolicy) -> Self {
        let diagnosis = OneHotEncoder::fit(
            column_for(Field::PrimaryDiagnosis).name,
            records.iter().map(|r| r.primary_diagnosis.as_str()),
        );
        let admission = OneHotEncoder::fit(
            column_for(Field::AdmissionType).name,
            records.iter().map(|r| r.admission_type.as_str()),
        );

        Self {
            diagnosis,
            admission,
            unknown_category,
        }
    }

    pub fn diagnosis(&self) -> &OneHotEncoder {
        &self.diagnosis
    }

    pub fn admission(&self) -> &OneHotEncoder {
        &self.admission
    }

    pub fn unknown_category(&self) -> UnknownCategoryPolicy {
        self.unknown_category
    }

    /// Length of every feature vector
    pub fn feature_count(&self) -> usize {
        self.diagnosis.width() + self.admission.width() + 2
    }

    /// Human-readable name of each feature slot
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.feature_count());
        for encoder in [&self.diagnosis, &self.admission] {
            for category in encoder.categories() {
                names.push(format!("{}={}", encoder.column(), category));
            }
        }
        names.push(column_for(Field::Age).name.to_string());
        names.push(column_for(Field::PastHospitalizations).name.to_string());
        names
    }

    /// Feature vector for one record
    pub fn transform(&self, input: &ModelInput) -> Result<Vec<f64>> {
        self.transform_with(input, self.unknown_category)
    }

    /// Feature vector for one record under an explicit unknown-category policy
    pub fn transform_with(
        &self,
        input: &ModelInput,
        policy: UnknownCategoryPolicy,
    ) -> Result<Vec<f64>> {
        let mut features = Vec::with_capacity(self.feature_count());
        self.diagnosis
            .encode_into(&input.primary_diagnosis, policy, &mut features)?;
        self.admission
            .encode_into(&input.admission_type, policy, &mut features)?;
        features.push(f64::from(input.age));
        features.push(f64::from(input.past_hospitalizations));
        Ok(features)
    }

    /// Row-major feature matrix for a batch of records
    pub fn transform_batch(&self, inputs: &[ModelInput]) -> Result<DenseMatrix<f64>> {
        self.transform_batch_with(inputs, self.unknown_category)
    }

    pub fn transform_batch_with(
        &self,
        inputs: &[ModelInput],
        policy: UnknownCategoryPolicy,
    ) -> Result<DenseMatrix<f64>> {
        if inputs.is_empty() {
            return Err(ModelError::EmptyBatch);
        }

        let rows = inputs
            .iter()
            .map(|input| self.transform_with(input, policy))
            .collect::<Result<Vec<_>>>()?;

        Ok(DenseMatrix::from_2d_vec(&rows))
    }
}

/// Labels of a batch, in row order
pub fn labels(inputs: &[ModelInput]) -> Vec<f64> {
    inputs.iter().map(|r| f64::from(r.length_of_stay)).collect()
}

/// Fitted pipeline: encoders followed by the forest
#[derive(Serialize, Deserialize)]
pub struct FittedModel {
    pipeline: FeaturePipeline,
    forest: Forest,
}

impl FittedModel {
    pub fn new(pipeline: FeaturePipeline, forest: Forest) -> Self {
        Self { pipeline, forest }
    }

    pub fn pipeline(&self) -> &FeaturePipeline {
        &self.pipeline
    }

    /// Predictions for a batch of records, in row order
    pub fn predict_batch(&self, inputs: &[ModelInput]) -> Result<Vec<f64>> {
        self.predict_batch_with(inputs, self.pipeline.unknown_category)
    }

    /// Batch predictions with the stored policy overridden
    pub fn predict_batch_with(
        &self,
        inputs: &[ModelInput],
        policy: UnknownCategoryPolicy,
    ) -> Result<Vec<f64>> {
        let matrix = self.pipeline.transform_batch_with(inputs, policy)?;
        self.forest
            .predict(&matrix)
            .map_err(|err| ModelError::Inference(err.to_string()))
    }

    /// Prediction for a single record
    pub fn predict(&self, input: &ModelInput) -> Result<ModelOutput> {
        let predictions = self.predict_batch(std::slice::from_ref(input))?;
        let value = predictions
            .first()
            .copied()
            .ok_or_else(|| ModelError::Inference("forest returned no prediction".to_string()))?;

        Ok(ModelOutput {
            length_of_stay_prediction: value as f32,
        })
    }
}

impl fmt::Debug for FittedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FittedModel")
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}
