//! Closed choice sets and numeric bounds offered by the prompts

use std::ops::RangeInclusive;

pub const PRIMARY_DIAGNOSES: [&str; 5] = [
    "Heart Failure",
    "Arrhythmia",
    "Angina",
    "Myocardial Infarction",
    "Hypertension Crisis",
];

pub const ADMISSION_TYPES: [&str; 2] = ["Emergency", "Elective"];

/// Accepted age in years
pub const AGE_RANGE: RangeInclusive<i64> = 0..=120;

/// Accepted number of past hospitalizations
pub const PAST_HOSPITALIZATIONS_RANGE: RangeInclusive<i64> = 0..=20;
