//! Integration tests for the length-of-stay trainer
//!
//! Ensures identical results across runs and that failed runs leave the
//! model file alone.

use discharge_model::{AppConfig, ModelArtifact, ModelError};
use discharge_trainer::{fit_model, save_model, train_model, TrainerError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const HEADER: &str = "PrimaryDiagnosis,Age,AdmissionType,PastHospitalizations,Label";

const DIAGNOSES: [&str; 5] = [
    "Heart Failure",
    "Arrhythmia",
    "Angina",
    "Myocardial Infarction",
    "Hypertension Crisis",
];

fn write_synthetic_csv(dir: &Path, rows: usize) -> PathBuf {
    let path = dir.join("input.csv");
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for i in 0..rows {
        let diagnosis = DIAGNOSES[i % DIAGNOSES.len()];
        let admission = if i % 4 == 0 { "Elective" } else { "Emergency" };
        let age = 25 + (i * 11) % 70;
        let past = i % 5;
        let label = 2.0 + (i % DIAGNOSES.len()) as f32 * 0.8 + past as f32 * 0.6;
        writeln!(file, "{diagnosis},{age},{admission},{past},{label:.1}").unwrap();
    }
    path
}

fn config_for(dir: &TempDir, input: PathBuf, model_name: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.paths.input = input;
    config.paths.model = dir.path().join("data").join(model_name);
    config.training.trees = 20;
    config
}

#[test]
fn test_deterministic_training() {
    let dir = tempdir().unwrap();
    let input = write_synthetic_csv(dir.path(), 80);

    let first = train_model(&config_for(&dir, input.clone(), "first.bin")).unwrap();
    let second = train_model(&config_for(&dir, input, "second.bin")).unwrap();

    assert_eq!(
        first.metrics.r_squared.to_bits(),
        second.metrics.r_squared.to_bits(),
        "R-squared should be bit-identical"
    );
    assert_eq!(
        first.metrics.rmse.to_bits(),
        second.metrics.rmse.to_bits(),
        "RMSE should be bit-identical"
    );
    assert_eq!(first.model_hash, second.model_hash, "Model hashes should match");
    assert_eq!(first.train_rows, 64);
    assert_eq!(first.test_rows, 16);
}

#[test]
fn test_different_seed_changes_model() {
    let dir = tempdir().unwrap();
    let input = write_synthetic_csv(dir.path(), 80);

    let base = train_model(&config_for(&dir, input.clone(), "a.bin")).unwrap();

    let mut config = config_for(&dir, input, "b.bin");
    config.training.seed = 7;
    let reseeded = train_model(&config).unwrap();

    assert_ne!(base.model_hash, reseeded.model_hash);
}

#[test]
fn test_five_row_dataset_produces_model() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.csv");
    fs::write(
        &input,
        format!(
            "{HEADER}\n\
             Heart Failure,65,Emergency,2,4.0\n\
             Angina,52,Elective,0,2.0\n\
             Arrhythmia,71,Emergency,3,5.0\n\
             Myocardial Infarction,80,Emergency,4,7.0\n\
             Hypertension Crisis,45,Elective,1,3.0\n"
        ),
    )
    .unwrap();

    let config = config_for(&dir, input, "model.bin");
    let report = train_model(&config).unwrap();

    assert_eq!(report.train_rows, 4);
    assert_eq!(report.test_rows, 1);
    assert!(report.metrics.rmse.is_finite());

    let artifact = ModelArtifact::load(&config.paths.model).unwrap();
    assert_eq!(artifact.metadata().model_hash, report.model_hash);
    assert_eq!(artifact.metadata().train_rows, 4);
}

#[test]
fn test_missing_input_writes_nothing() {
    let dir = tempdir().unwrap();
    let config = config_for(&dir, dir.path().join("absent.csv"), "model.bin");

    match train_model(&config) {
        Err(TrainerError::InputNotFound(path)) => assert_eq!(path, config.paths.input),
        other => panic!("expected InputNotFound, got {other:?}"),
    }
    assert!(!config.paths.model.exists());
}

#[test]
fn test_failed_training_keeps_existing_model() {
    let dir = tempdir().unwrap();
    let good = write_synthetic_csv(dir.path(), 40);
    let config = config_for(&dir, good, "model.bin");
    train_model(&config).unwrap();
    let before = fs::read(&config.paths.model).unwrap();

    let bad = dir.path().join("bad.csv");
    fs::write(&bad, format!("{HEADER}\nAngina,52,Elective,zero,2.0\n")).unwrap();
    let mut bad_config = config.clone();
    bad_config.paths.input = bad;

    assert!(matches!(
        train_model(&bad_config),
        Err(TrainerError::InvalidRecord { line: 2, .. })
    ));
    assert_eq!(fs::read(&config.paths.model).unwrap(), before);

    let leftovers = fs::read_dir(config.paths.model.parent().unwrap())
        .unwrap()
        .count();
    assert_eq!(leftovers, 1, "no temporary files should remain");
}

#[test]
fn test_missing_input_keeps_existing_model() {
    let dir = tempdir().unwrap();
    let mut config = config_for(&dir, dir.path().join("absent.csv"), "model.bin");
    fs::create_dir_all(config.paths.model.parent().unwrap()).unwrap();
    fs::write(&config.paths.model, b"previous").unwrap();

    assert!(train_model(&config).is_err());
    assert_eq!(fs::read(&config.paths.model).unwrap(), b"previous");

    config.paths.input = write_synthetic_csv(dir.path(), 30);
    train_model(&config).unwrap();
    assert!(ModelArtifact::load(&config.paths.model).is_ok());
}

#[test]
fn test_metrics_available_when_save_fails() {
    let dir = tempdir().unwrap();
    let input = write_synthetic_csv(dir.path(), 40);
    let mut config = config_for(&dir, input, "model.bin");

    // Parent of the model path is a regular file, so the save cannot succeed
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"").unwrap();
    config.paths.model = blocker.join("model.bin");

    let outcome = fit_model(&config).unwrap();
    assert!(outcome.metrics.rmse.is_finite());
    assert_eq!(outcome.train_rows + outcome.test_rows, 40);

    assert!(matches!(
        save_model(&config, outcome),
        Err(TrainerError::Model(_))
    ));
    assert!(!config.paths.model.exists());
}

#[test]
fn test_invalid_training_settings_write_nothing() {
    let dir = tempdir().unwrap();
    let input = write_synthetic_csv(dir.path(), 40);
    let mut config = config_for(&dir, input, "model.bin");
    config.training.max_depth = 0;

    assert!(matches!(
        train_model(&config),
        Err(TrainerError::Model(ModelError::InvalidConfig(_)))
    ));
    assert!(!config.paths.model.exists());
}
