//! CSV dataset loading and splitting
//!
//! Columns bind positionally through `INPUT_SCHEMA`; header names are only
//! checked for a warning.

use csv::{ReaderBuilder, Trim};
use discharge_model::schema::column_for;
use discharge_model::{bind_row, Field, ModelInput, INPUT_SCHEMA};
use rand::seq::SliceRandom;
use std::path::Path;
use tracing::warn;

use crate::context::TrainingContext;
use crate::errors::TrainerError;

/// Labeled admissions loaded from CSV
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub records: Vec<ModelInput>,
}

/// Disjoint train and test partitions
#[derive(Clone, Debug, PartialEq)]
pub struct TrainTestSplit {
    pub train: Vec<ModelInput>,
    pub test: Vec<ModelInput>,
}

/// Min, max and mean of a numeric column
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnStats {
    pub column: &'static str,
    pub min: f32,
    pub max: f32,
    pub mean: f32,
}

impl Dataset {
    /// Load dataset from CSV file
    /// Expected format: header row, then
    /// PrimaryDiagnosis,Age,AdmissionType,PastHospitalizations,Label
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self, TrainerError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(TrainerError::InputNotFound(path.to_path_buf()));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        for column in &INPUT_SCHEMA {
            match headers.get(column.index) {
                Some(name) if name == column.name => {}
                found => warn!(
                    "Header column {} is {:?}, expected {:?}; binding by position",
                    column.index + 1,
                    found.unwrap_or(""),
                    column.name
                ),
            }
        }

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result?;
            if row.iter().all(str::is_empty) {
                continue;
            }

            let line = row.position().map(|p| p.line()).unwrap_or_default();
            let record = bind_row(row.iter())
                .map_err(|source| TrainerError::InvalidRecord { line, source })?;
            records.push(record);
        }

        if records.is_empty() {
            return Err(TrainerError::EmptyDataset);
        }

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of held-out rows for `test_fraction`
    pub fn test_len(&self, test_fraction: f64) -> usize {
        (self.len() as f64 * test_fraction).round() as usize
    }

    /// Deterministically shuffle row order and partition it
    pub fn split(
        &self,
        context: &TrainingContext,
        test_fraction: f64,
    ) -> Result<TrainTestSplit, TrainerError> {
        let rows = self.len();
        let test_len = self.test_len(test_fraction);
        if test_len == 0 || test_len >= rows {
            return Err(TrainerError::EmptySplit {
                rows,
                fraction: test_fraction,
            });
        }

        let mut indices: Vec<usize> = (0..rows).collect();
        indices.shuffle(&mut context.rng());

        let (test_idx, train_idx) = indices.split_at(test_len);
        let pick = |idx: &[usize]| -> Vec<ModelInput> {
            idx.iter().map(|&i| self.records[i].clone()).collect()
        };

        Ok(TrainTestSplit {
            train: pick(train_idx),
            test: pick(test_idx),
        })
    }

    /// Statistics of the numeric columns, for logging
    pub fn numeric_stats(&self) -> Vec<ColumnStats> {
        let columns: [(&'static str, fn(&ModelInput) -> f32); 3] = [
            (column_for(Field::Age).name, |r| r.age),
            (column_for(Field::PastHospitalizations).name, |r| r.past_hospitalizations),
            (column_for(Field::LengthOfStay).name, |r| r.length_of_stay),
        ];

        columns
            .iter()
            .map(|&(column, value)| {
                let mut min = f32::INFINITY;
                let mut max = f32::NEG_INFINITY;
                let mut sum = 0.0f64;
                for record in &self.records {
                    let v = value(record);
                    min = min.min(v);
                    max = max.max(v);
                    sum += f64::from(v);
                }
                ColumnStats {
                    column,
                    min,
                    max,
                    mean: (sum / self.len().max(1) as f64) as f32,
                }
            })
            .collect()
    }
}
