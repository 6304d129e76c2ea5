//! Linear salary model backed by a JSON artifact
//!
//! The artifact stores an intercept, one coefficient per numeric feature and
//! a weight table per categorical feature (one-hot encoding folded into a
//! lookup). Unknown categories are rejected, never coerced.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::Predictor;
use crate::error::SalaryError;
use crate::types::PredictionRequest;

/// Feature names, in the order the model was trained on
pub const FEATURE_SCHEMA: [&str; 5] = [
    "Age",
    "Gender",
    "Education Level",
    "Job Title",
    "Years of Experience",
];

/// On-disk form of the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearArtifact {
    pub name: String,
    pub features: Vec<String>,
    pub intercept: f64,
    pub age_coefficient: f64,
    pub experience_coefficient: f64,
    pub gender: HashMap<String, f64>,
    pub education_level: HashMap<String, f64>,
    pub job_title: HashMap<String, f64>,
}

/// Scores requests with a [`LinearArtifact`]
#[derive(Debug, Clone)]
pub struct LinearSalaryModel {
    artifact: LinearArtifact,
    source: PathBuf,
}

impl LinearSalaryModel {
    /// Load and check the artifact at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SalaryError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| SalaryError::ModelArtifact {
            path: path.to_path_buf(),
            reason: format!("cannot read: {}", e),
        })?;
        let artifact: LinearArtifact =
            serde_json::from_str(&contents).map_err(|e| SalaryError::ModelArtifact {
                path: path.to_path_buf(),
                reason: format!("cannot parse: {}", e),
            })?;

        let model = Self::from_artifact(artifact, path)?;
        info!(
            "Loaded model '{}' from {} ({} job titles)",
            model.artifact.name,
            path.display(),
            model.artifact.job_title.len()
        );
        Ok(model)
    }

    /// Wrap an in-memory artifact, rejecting a feature schema that differs from [`FEATURE_SCHEMA`]
    pub fn from_artifact(artifact: LinearArtifact, source: impl Into<PathBuf>) -> Result<Self, SalaryError> {
        let source = source.into();
        if artifact.features.iter().map(String::as_str).ne(FEATURE_SCHEMA) {
            return Err(SalaryError::ModelArtifact {
                path: source,
                reason: format!(
                    "feature schema {:?} does not match expected {:?}",
                    artifact.features, FEATURE_SCHEMA
                ),
            });
        }

        let coefficients = [
            artifact.intercept,
            artifact.age_coefficient,
            artifact.experience_coefficient,
        ];
        let weights = artifact
            .gender
            .values()
            .chain(artifact.education_level.values())
            .chain(artifact.job_title.values());
        if coefficients.iter().chain(weights).any(|w| !w.is_finite()) {
            return Err(SalaryError::ModelArtifact {
                path: source,
                reason: "non-finite coefficient".to_string(),
            });
        }

        Ok(Self { artifact, source })
    }

    pub fn name(&self) -> &str {
        &self.artifact.name
    }

    /// Job titles the model can encode, sorted
    pub fn job_titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = self.artifact.job_title.keys().map(String::as_str).collect();
        titles.sort_unstable();
        titles
    }

    fn weight(
        table: &HashMap<String, f64>,
        feature: &'static str,
        value: &str,
    ) -> Result<f64, SalaryError> {
        table
            .get(value)
            .copied()
            .ok_or_else(|| SalaryError::unsupported(feature, value))
    }
}

impl Predictor for LinearSalaryModel {
    fn predict(&self, request: &PredictionRequest) -> Result<f64, SalaryError> {
        let a = &self.artifact;
        let gender = Self::weight(&a.gender, "Gender", request.gender.as_str())?;
        let education = Self::weight(&a.education_level, "Education Level", request.education_level.as_str())?;
        let job = Self::weight(&a.job_title, "Job Title", &request.job_title)?;

        let raw = a.intercept
            + a.age_coefficient * f64::from(request.age)
            + a.experience_coefficient * f64::from(request.years_experience)
            + gender
            + education
            + job;

        debug!("Model '{}' scored {:.2} for {:?}", a.name, raw, request);
        Ok(raw.max(0.0))
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.artifact.name, self.source.display())
    }
}
