//! Summary statistics over the evaluation log
//!
//! All error figures here are measured against the simulated "actual"
//! salary, so they describe the injected noise rather than model accuracy.

use serde::Serialize;

use crate::types::EvaluationRecord;

/// One point of the residual scatter plot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResidualPoint {
    pub predicted_salary: f64,
    pub error: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogSummary {
    pub count: usize,
    pub mean_predicted_salary: f64,
    pub mean_error: f64,
    pub mean_absolute_error: f64,
    pub root_mean_squared_error: f64,
    /// Always true: errors are computed against simulated ground truth
    pub simulated: bool,
}

impl LogSummary {
    pub fn from_records(records: &[EvaluationRecord]) -> Self {
        if records.is_empty() {
            return Self {
                simulated: true,
                ..Self::default()
            };
        }

        let n = records.len() as f64;
        let mut predicted = 0.0;
        let mut error = 0.0;
        let mut abs_error = 0.0;
        let mut squared = 0.0;
        for r in records {
            predicted += r.predicted_salary;
            error += r.error;
            abs_error += r.absolute_error;
            squared += r.error * r.error;
        }

        Self {
            count: records.len(),
            mean_predicted_salary: predicted / n,
            mean_error: error / n,
            mean_absolute_error: abs_error / n,
            root_mean_squared_error: (squared / n).sqrt(),
            simulated: true,
        }
    }
}

/// (predicted, error) pairs in log order
pub fn residual_points(records: &[EvaluationRecord]) -> Vec<ResidualPoint> {
    records
        .iter()
        .map(|r| ResidualPoint {
            predicted_salary: r.predicted_salary,
            error: r.error,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EducationLevel, Gender};

    fn record(predicted: f64, error: f64) -> EvaluationRecord {
        EvaluationRecord {
            age: 40,
            gender: Gender::Other,
            education_level: EducationLevel::Master,
            job_title: "Project Manager".to_string(),
            years_experience: 12,
            predicted_salary: predicted,
            actual_salary: predicted - error,
            error,
            absolute_error: error.abs(),
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = LogSummary::from_records(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean_absolute_error, 0.0);
        assert!(summary.simulated);
        assert!(residual_points(&[]).is_empty());
    }

    #[test]
    fn test_summary_statistics() {
        let records = vec![record(10_000.0, 3_000.0), record(20_000.0, -4_000.0)];
        let summary = LogSummary::from_records(&records);

        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean_predicted_salary, 15_000.0);
        assert_eq!(summary.mean_error, -500.0);
        assert_eq!(summary.mean_absolute_error, 3_500.0);
        // sqrt((9e6 + 16e6) / 2)
        assert!((summary.root_mean_squared_error - 12_500_000f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_residuals_follow_log_order() {
        let records = vec![record(3.0, 1.0), record(1.0, -1.0), record(2.0, 0.5)];
        let points = residual_points(&records);
        let xs: Vec<f64> = points.iter().map(|p| p.predicted_salary).collect();
        assert_eq!(xs, vec![3.0, 1.0, 2.0]);
        assert_eq!(points[1].error, -1.0);
    }
}
