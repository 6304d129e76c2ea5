//! Presentation helpers derived from a prediction
//!
//! Breakdown shares, the career insight sentence and the static quality
//! figures of the offline-trained model.

use serde::Serialize;

use crate::types::{EducationLevel, ExperienceTier};

/// Illustrative split of a predicted salary
pub const BREAKDOWN_SHARES: [(&str, f64); 3] = [("Base", 0.7), ("Bonus", 0.2), ("Benefits", 0.1)];

/// Hints shown next to the input form
pub const PREDICTION_TIPS: [&str; 4] = [
    "Provide accurate experience details",
    "Choose the closest matching job title",
    "Use realistic age and education inputs",
    "Understand the salary currency context",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownComponent {
    pub label: &'static str,
    pub share: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryBreakdown {
    pub components: Vec<BreakdownComponent>,
}

impl SalaryBreakdown {
    pub fn from_prediction(predicted_salary: f64) -> Self {
        let components = BREAKDOWN_SHARES
            .iter()
            .map(|&(label, share)| BreakdownComponent {
                label,
                share,
                amount: predicted_salary * share,
            })
            .collect();
        Self { components }
    }
}

/// Qualitative sentence shown under the result
///
/// Depends only on the form state, so the page shows it before any prediction.
pub fn career_insight(job_title: &str, education_level: EducationLevel, years_experience: u32) -> String {
    format!(
        "As a {}, professionals with {} years of experience and {} usually reach the {} tier in industry benchmarks.",
        job_title,
        years_experience,
        education_level,
        ExperienceTier::from_years(years_experience)
    )
}

/// Quality figures reported for the model when it was trained offline.
///
/// These are annotations, not computed by this service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelQualityMetrics {
    pub test_r2: f64,
    pub training_r2: f64,
    pub test_rmse_inr: f64,
    pub test_mae_inr: f64,
}

pub const OFFLINE_MODEL_METRICS: ModelQualityMetrics = ModelQualityMetrics {
    test_r2: 0.8882,
    training_r2: 0.9599,
    test_rmse_inr: 14_533.15,
    test_mae_inr: 10_217.66,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_shares() {
        let breakdown = SalaryBreakdown::from_prediction(100_000.0);
        let amounts: Vec<f64> = breakdown.components.iter().map(|c| c.amount).collect();
        assert_eq!(amounts, vec![70_000.0, 20_000.0, 10_000.0]);
        assert_eq!(breakdown.components[0].label, "Base");
        assert_eq!(breakdown.components[2].label, "Benefits");

        let total: f64 = BREAKDOWN_SHARES.iter().map(|(_, s)| s).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_career_insight() {
        let text = career_insight("ML Engineer", EducationLevel::Master, 8);
        assert_eq!(
            text,
            "As a ML Engineer, professionals with 8 years of experience and Master usually reach the Experienced Professional tier in industry benchmarks."
        );

        let text = career_insight("Developer", EducationLevel::HighSchool, 0);
        assert!(text.ends_with("reach the Entry Level tier in industry benchmarks."));
    }
}
