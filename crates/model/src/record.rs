//! Input and output records
//!
//! `ModelInput` is one training row or one interactive query. The label is
//! only meaningful during training; queries leave it at zero.

use serde::{Deserialize, Serialize};

/// One patient admission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInput {
    /// Primary diagnosis (categorical)
    pub primary_diagnosis: String,
    /// Admission type (categorical)
    pub admission_type: String,
    /// Age in years
    pub age: f32,
    /// Number of previous hospital stays
    pub past_hospitalizations: f32,
    /// Observed length of stay in days (label)
    #[serde(default)]
    pub length_of_stay: f32,
}

impl ModelInput {
    /// Build an unlabeled query record
    pub fn query(
        primary_diagnosis: impl Into<String>,
        admission_type: impl Into<String>,
        age: f32,
        past_hospitalizations: f32,
    ) -> Self {
        Self {
            primary_diagnosis: primary_diagnosis.into(),
            admission_type: admission_type.into(),
            age,
            past_hospitalizations,
            length_of_stay: 0.0,
        }
    }

    /// Attach a label, consuming the record
    pub fn with_label(mut self, length_of_stay: f32) -> Self {
        self.length_of_stay = length_of_stay;
        self
    }
}

/// Prediction result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    /// Predicted length of stay in days
    pub length_of_stay_prediction: f32,
}
