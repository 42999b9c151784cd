//! Fixed-order question sequence for one prediction

use discharge_model::ModelInput;
use std::io::{BufRead, Write};

use crate::catalog::{ADMISSION_TYPES, AGE_RANGE, PAST_HOSPITALIZATIONS_RANGE, PRIMARY_DIAGNOSES};
use crate::prompt::{PromptError, Prompter};

/// Ask for diagnosis, admission type, age and past hospitalizations
pub fn collect_input<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<ModelInput, PromptError> {
    let diagnosis = prompter.select("Primary Diagnosis", &PRIMARY_DIAGNOSES)?;
    let admission_type = prompter.select("Admission Type", &ADMISSION_TYPES)?;
    let age = prompter.number_in_range("Age", &AGE_RANGE, "Invalid age")?;
    let past_hospitalizations = prompter.number_in_range(
        "Number of Past Hospitalizations",
        &PAST_HOSPITALIZATIONS_RANGE,
        "Invalid number",
    )?;

    Ok(ModelInput::query(
        diagnosis,
        admission_type,
        age as f32,
        past_hospitalizations as f32,
    ))
}
