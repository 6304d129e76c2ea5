//! Shared types used across modules
//!
//! The request/result/record model of one prediction, plus the categorical
//! domains the input widgets and the model artifact agree on.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::SalaryError;

/// Inclusive age range accepted by the model
pub const AGE_RANGE: (u32, u32) = (18, 65);

/// Inclusive years-of-experience range accepted by the model
pub const EXPERIENCE_RANGE: (u32, u32) = (0, 50);

/// Job titles the shipped model was trained on
pub const JOB_TITLES: &[&str] = &[
    "Data Scientist",
    "Software Engineer",
    "Developer",
    "Business Analyst",
    "System Administrator",
    "DevOps Engineer",
    "Frontend Developer",
    "Backend Developer",
    "Full Stack Developer",
    "Project Manager",
    "ML Engineer",
    "AI Researcher",
    "Data Engineer",
    "HR Executive",
    "Sales Manager",
];

/// Lowercase and drop separators so "high_school" and "High School" compare equal
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = SalaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Gender::ALL
            .into_iter()
            .find(|g| normalize(g.as_str()) == key)
            .ok_or_else(|| SalaryError::validation("gender", format!("unknown value '{}'", s)))
    }
}

/// Highest completed education, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "High School")]
    HighSchool,
    Diploma,
    Bachelor,
    Master,
    #[serde(rename = "PhD")]
    Phd,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 5] = [
        EducationLevel::HighSchool,
        EducationLevel::Diploma,
        EducationLevel::Bachelor,
        EducationLevel::Master,
        EducationLevel::Phd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "High School",
            EducationLevel::Diploma => "Diploma",
            EducationLevel::Bachelor => "Bachelor",
            EducationLevel::Master => "Master",
            EducationLevel::Phd => "PhD",
        }
    }
}

impl std::fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EducationLevel {
    type Err = SalaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        EducationLevel::ALL
            .into_iter()
            .find(|e| normalize(e.as_str()) == key)
            .ok_or_else(|| {
                SalaryError::validation("education level", format!("unknown value '{}'", s))
            })
    }
}

/// Display currency for the predicted salary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Inr,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.symbol(), self.code())
    }
}

impl FromStr for Currency {
    type Err = SalaryError;

    /// Accepts the ISO code or the selector label, e.g. "usd" or "$ (USD)"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        if upper == "INR" || upper == "₹ (INR)" {
            Ok(Currency::Inr)
        } else if upper == "USD" || upper == "$ (USD)" {
            Ok(Currency::Usd)
        } else {
            Err(SalaryError::validation("currency", format!("unknown currency '{}'", s)))
        }
    }
}

/// Qualitative band of years of experience. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExperienceTier {
    EntryLevel,
    MidJuniorLevel,
    ExperiencedProfessional,
    SeniorExpert,
}

impl ExperienceTier {
    pub fn from_years(years: u32) -> Self {
        match years {
            0..=2 => ExperienceTier::EntryLevel,
            3..=5 => ExperienceTier::MidJuniorLevel,
            6..=10 => ExperienceTier::ExperiencedProfessional,
            _ => ExperienceTier::SeniorExpert,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExperienceTier::EntryLevel => "Entry Level",
            ExperienceTier::MidJuniorLevel => "Mid-Junior Level",
            ExperienceTier::ExperiencedProfessional => "Experienced Professional",
            ExperienceTier::SeniorExpert => "Senior Expert",
        }
    }
}

impl std::fmt::Display for ExperienceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The five attributes submitted for one prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub age: u32,
    pub gender: Gender,
    pub education_level: EducationLevel,
    pub job_title: String,
    pub years_experience: u32,
}

impl PredictionRequest {
    /// Range checks on the numeric fields and a non-blank job title.
    ///
    /// Whether the job title is known to the model is left to the predictor.
    pub fn validate(&self) -> Result<(), SalaryError> {
        let (min_age, max_age) = AGE_RANGE;
        if !(min_age..=max_age).contains(&self.age) {
            return Err(SalaryError::validation(
                "age",
                format!("{} is outside {}-{}", self.age, min_age, max_age),
            ));
        }

        let (min_exp, max_exp) = EXPERIENCE_RANGE;
        if !(min_exp..=max_exp).contains(&self.years_experience) {
            return Err(SalaryError::validation(
                "years of experience",
                format!("{} is outside {}-{}", self.years_experience, min_exp, max_exp),
            ));
        }

        if self.job_title.trim().is_empty() {
            return Err(SalaryError::validation("job title", "must not be empty"));
        }

        Ok(())
    }

    pub fn tier(&self) -> ExperienceTier {
        ExperienceTier::from_years(self.years_experience)
    }
}

/// Outcome of one submission. The "actual" salary is simulated, not measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub request: PredictionRequest,
    pub predicted_salary: f64,
    /// Prediction plus uniform noise; a stand-in for ground truth in the demo
    pub synthetic_actual_salary: f64,
    pub error: f64,
    pub absolute_error: f64,
}

impl PredictionResult {
    pub fn new(request: PredictionRequest, predicted_salary: f64, noise: f64) -> Self {
        let synthetic_actual_salary = predicted_salary + noise;
        let error = predicted_salary - synthetic_actual_salary;
        Self {
            request,
            predicted_salary,
            synthetic_actual_salary,
            error,
            absolute_error: error.abs(),
        }
    }
}

/// Flattened, persisted form of a [`PredictionResult`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub age: u32,
    pub gender: Gender,
    pub education_level: EducationLevel,
    pub job_title: String,
    pub years_experience: u32,
    pub predicted_salary: f64,
    pub actual_salary: f64,
    pub error: f64,
    pub absolute_error: f64,
}

impl EvaluationRecord {
    /// Column names of the evaluation log, in order
    pub const COLUMNS: [&'static str; 9] = [
        "Age",
        "Gender",
        "Education Level",
        "Job Title",
        "Years of Experience",
        "Predicted Salary",
        "Actual Salary",
        "Error",
        "Absolute Error",
    ];

    pub fn request(&self) -> PredictionRequest {
        PredictionRequest {
            age: self.age,
            gender: self.gender,
            education_level: self.education_level,
            job_title: self.job_title.clone(),
            years_experience: self.years_experience,
        }
    }
}

impl From<&PredictionResult> for EvaluationRecord {
    fn from(result: &PredictionResult) -> Self {
        let req = &result.request;
        Self {
            age: req.age,
            gender: req.gender,
            education_level: req.education_level,
            job_title: req.job_title.clone(),
            years_experience: req.years_experience,
            predicted_salary: result.predicted_salary,
            actual_salary: result.synthetic_actual_salary,
            error: result.error,
            absolute_error: result.absolute_error,
        }
    }
}
