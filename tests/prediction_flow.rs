//! End-to-end tests of the prediction cycle with the shipped model artifact

use salary_predictor::config::{Config, PathsConfig};
use salary_predictor::{
    Currency, EducationLevel, Gender, PredictionRequest, PredictionService, SalaryError,
};
use std::path::{Path, PathBuf};

fn config_in(dir: &Path) -> Config {
    Config {
        paths: PathsConfig {
            model: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("model/salary_predictor.json"),
            evaluation_log: dir.join("model_evaluation_table.csv"),
        },
        ..Config::default()
    }
}

fn data_scientist() -> PredictionRequest {
    PredictionRequest {
        age: 30,
        gender: Gender::Male,
        education_level: EducationLevel::Bachelor,
        job_title: "Data Scientist".to_string(),
        years_experience: 5,
    }
}

#[test]
fn test_first_submission_creates_one_record() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    assert!(!config.paths.evaluation_log.exists());

    let service = PredictionService::from_config(&config).unwrap();
    assert!(service.history().unwrap().is_empty());

    let sub = service.handle_submit(data_scientist(), Currency::Inr).unwrap();
    assert!(sub.persistence_error.is_none());
    assert!(sub.display.starts_with('₹'));

    let records = service.history().unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.request(), data_scientist());
    assert_eq!(record.predicted_salary, sub.result.predicted_salary);
    assert_eq!(record.error, record.predicted_salary - record.actual_salary);
    assert_eq!(record.absolute_error, record.error.abs());
    assert!(record.absolute_error <= 10_000.0);
}

#[test]
fn test_history_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let jobs = ["Developer", "HR Executive", "AI Researcher"];
    {
        let service = PredictionService::from_config(&config).unwrap();
        for job in jobs {
            let mut req = data_scientist();
            req.job_title = job.to_string();
            service.handle_submit(req, Currency::Usd).unwrap();
        }
    }

    let service = PredictionService::from_config(&config).unwrap();
    let titles: Vec<String> = service
        .history()
        .unwrap()
        .into_iter()
        .map(|r| r.job_title)
        .collect();
    assert_eq!(titles, jobs);
}

#[test]
fn test_unknown_job_title_does_not_touch_log() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let service = PredictionService::from_config(&config).unwrap();

    service.handle_submit(data_scientist(), Currency::Inr).unwrap();
    let before = std::fs::read_to_string(&config.paths.evaluation_log).unwrap();

    let mut req = data_scientist();
    req.job_title = "Chief Vibes Officer".to_string();
    let err = service.handle_submit(req, Currency::Inr).unwrap_err();
    assert!(matches!(err, SalaryError::UnsupportedCategory { .. }));

    let after = std::fs::read_to_string(&config.paths.evaluation_log).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_padded_job_title_is_rejected_and_not_logged() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let service = PredictionService::from_config(&config).unwrap();

    service.handle_submit(data_scientist(), Currency::Inr).unwrap();
    let before = std::fs::read_to_string(&config.paths.evaluation_log).unwrap();

    let mut req = data_scientist();
    req.job_title = "  Data Scientist\t".to_string();
    let err = service.handle_submit(req, Currency::Inr).unwrap_err();
    assert!(matches!(err, SalaryError::UnsupportedCategory { .. }));

    let after = std::fs::read_to_string(&config.paths.evaluation_log).unwrap();
    assert_eq!(before, after);
    assert_eq!(service.history().unwrap().len(), 1);
}

#[test]
fn test_bad_exchange_rate_is_rejected_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.prediction.usd_exchange_rate = -1.0;
    assert!(PredictionService::from_config(&config).is_err());
}
