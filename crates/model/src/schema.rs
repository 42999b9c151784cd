//! Column schema shared by the CSV reader and the model artifact
//!
//! Columns bind positionally. The artifact stores the column names so a model
//! trained against one layout is never loaded by a build expecting another.

use crate::record::ModelInput;
use std::fmt;

/// Record field a column binds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    PrimaryDiagnosis,
    Age,
    AdmissionType,
    PastHospitalizations,
    LengthOfStay,
}

/// How a column's raw text is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Categorical,
    Numeric,
    Label,
}

/// One entry of the column mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub index: usize,
    pub name: &'static str,
    pub field: Field,
    pub kind: ColumnKind,
}

/// Input layout, in file order
pub const INPUT_SCHEMA: [ColumnSpec; 5] = [
    ColumnSpec {
        index: 0,
        name: "PrimaryDiagnosis",
        field: Field::PrimaryDiagnosis,
        kind: ColumnKind::Categorical,
    },
    ColumnSpec {
        index: 1,
        name: "Age",
        field: Field::Age,
        kind: ColumnKind::Numeric,
    },
    ColumnSpec {
        index: 2,
        name: "AdmissionType",
        field: Field::AdmissionType,
        kind: ColumnKind::Categorical,
    },
    ColumnSpec {
        index: 3,
        name: "PastHospitalizations",
        field: Field::PastHospitalizations,
        kind: ColumnKind::Numeric,
    },
    ColumnSpec {
        index: 4,
        name: "Label",
        field: Field::LengthOfStay,
        kind: ColumnKind::Label,
    },
];

/// Column names in schema order
pub fn column_names() -> Vec<String> {
    INPUT_SCHEMA.iter().map(|c| c.name.to_string()).collect()
}

/// Look up the spec for a field
pub fn column_for(field: Field) -> &'static ColumnSpec {
    // Every field appears exactly once in the table.
    INPUT_SCHEMA
        .iter()
        .find(|c| c.field == field)
        .unwrap_or(&INPUT_SCHEMA[0])
}

/// A raw value that could not be bound to its field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub column: &'static str,
    pub reason: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}: {}", self.column, self.reason)
    }
}

impl std::error::Error for FieldError {}

/// Bind one row of raw values to a record using `INPUT_SCHEMA`
///
/// Values are trimmed. Extra trailing columns are ignored.
pub fn bind_row<'a, I>(values: I) -> Result<ModelInput, FieldError>
where
    I: IntoIterator<Item = &'a str>,
{
    let values: Vec<&str> = values.into_iter().map(str::trim).collect();
    let mut input = ModelInput::query(String::new(), String::new(), 0.0, 0.0);

    for column in &INPUT_SCHEMA {
        let raw = values.get(column.index).copied().ok_or_else(|| FieldError {
            column: column.name,
            reason: "missing value".to_string(),
        })?;

        match column.kind {
            ColumnKind::Categorical => {
                if raw.is_empty() {
                    return Err(FieldError {
                        column: column.name,
                        reason: "empty category".to_string(),
                    });
                }
                assign_text(&mut input, column.field, raw);
            }
            ColumnKind::Numeric | ColumnKind::Label => {
                let value = raw.parse::<f32>().map_err(|_| FieldError {
                    column: column.name,
                    reason: format!("invalid number {raw:?}"),
                })?;
                if !value.is_finite() {
                    return Err(FieldError {
                        column: column.name,
                        reason: format!("non-finite number {raw:?}"),
                    });
                }
                assign_number(&mut input, column.field, value);
            }
        }
    }

    Ok(input)
}

fn assign_text(input: &mut ModelInput, field: Field, raw: &str) {
    match field {
        Field::PrimaryDiagnosis => input.primary_diagnosis = raw.to_string(),
        Field::AdmissionType => input.admission_type = raw.to_string(),
        _ => {}
    }
}

fn assign_number(input: &mut ModelInput, field: Field, value: f32) {
    match field {
        Field::Age => input.age = value,
        Field::PastHospitalizations => input.past_hospitalizations = value,
        Field::LengthOfStay => input.length_of_stay = value,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_indices_match_positions() {
        for (pos, column) in INPUT_SCHEMA.iter().enumerate() {
            assert_eq!(column.index, pos);
        }
        assert_eq!(column_for(Field::LengthOfStay).name, "Label");
        assert_eq!(column_for(Field::AdmissionType).index, 2);
    }

    #[test]
    fn binds_row_positionally() {
        let input = bind_row(["Heart Failure", " 65", "Emergency", "2", "4.0"]).unwrap();
        assert_eq!(input.primary_diagnosis, "Heart Failure");
        assert_eq!(input.age, 65.0);
        assert_eq!(input.admission_type, "Emergency");
        assert_eq!(input.past_hospitalizations, 2.0);
        assert_eq!(input.length_of_stay, 4.0);
    }

    #[test]
    fn short_row_names_missing_column() {
        let err = bind_row(["Angina", "40", "Elective"]).unwrap_err();
        assert_eq!(err.column, "PastHospitalizations");
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = bind_row(["Angina", "forty", "Elective", "1", "2"]).unwrap_err();
        assert_eq!(err.column, "Age");

        let err = bind_row(["Angina", "40", "Elective", "1", "NaN"]).unwrap_err();
        assert_eq!(err.column, "Label");
    }

    #[test]
    fn rejects_empty_category() {
        let err = bind_row(["", "40", "Elective", "1", "2"]).unwrap_err();
        assert_eq!(err.column, "PrimaryDiagnosis");
    }
}
