//! One-hot encoding for categorical columns
//!
//! Vocabularies are learned from the training split in first-appearance
//! order and frozen afterwards.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{ModelError, Result};

/// What to do with a category that never appeared during training
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCategoryPolicy {
    /// Encode as the all-zero indicator vector
    #[default]
    Zeros,
    /// Fail the prediction
    Reject,
}

/// Fitted one-hot encoder for a single column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    column: String,
    categories: Vec<String>,
}

impl OneHotEncoder {
    /// Learn the vocabulary of `column` from training values
    pub fn fit<'a, I>(column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut categories: Vec<String> = Vec::new();
        for value in values {
            if !categories.iter().any(|c| c == value) {
                categories.push(value.to_string());
            }
        }

        Self {
            column: column.to_string(),
            categories,
        }
    }

    /// Column this encoder was fitted on
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Learned categories, in indicator order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Width of the indicator vector
    pub fn width(&self) -> usize {
        self.categories.len()
    }

    /// Position of `value` in the vocabulary
    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == value)
    }

    /// Append the indicator vector for `value` to `out`
    pub fn encode_into(
        &self,
        value: &str,
        policy: UnknownCategoryPolicy,
        out: &mut Vec<f64>,
    ) -> Result<()> {
        let start = out.len();
        out.resize(start + self.width(), 0.0);

        match (self.index_of(value), policy) {
            (Some(idx), _) => out[start + idx] = 1.0,
            (None, UnknownCategoryPolicy::Zeros) => {
                warn!(
                    column = %self.column,
                    value = %value,
                    "Unseen category encoded as zero vector"
                );
            }
            (None, UnknownCategoryPolicy::Reject) => {
                out.truncate(start);
                return Err(ModelError::UnknownCategory {
                    column: column_label(&self.column),
                    value: value.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Indicator vector for `value`
    pub fn encode(&self, value: &str, policy: UnknownCategoryPolicy) -> Result<Vec<f64>> {
        let mut out = Vec::with_capacity(self.width());
        self.encode_into(value, policy, &mut out)?;
        Ok(out)
    }
}

fn column_label(column: &str) -> &'static str {
    crate::schema::INPUT_SCHEMA
        .iter()
        .find(|c| c.name == column)
        .map(|c| c.name)
        .unwrap_or("categorical")
}
